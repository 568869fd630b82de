use async_graphql::{Context, Object};

use crate::{
    app_state::AppState,
    auth::session_from_context,
    errors::AppResult,
    models::dto::response::LearningPathDto,
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn mark_lesson_complete(
        &self,
        ctx: &Context<'_>,
        lesson_id: String,
    ) -> AppResult<LearningPathDto> {
        let state = ctx.data::<AppState>()?;
        let session = session_from_context(ctx)?;

        state
            .learning_path_service
            .mark_complete(&session.user_id, &lesson_id)
            .await
    }
}
