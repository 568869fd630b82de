use async_graphql::{Context, Object};

use crate::{
    app_state::AppState,
    auth::{require_self_or_admin, session_from_context},
    errors::AppResult,
    models::dto::response::{AchievementDto, LearningPathDto, LessonDetailDto},
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The caller's learning path, or another student's for admins.
    async fn learning_path(
        &self,
        ctx: &Context<'_>,
        student_id: Option<String>,
    ) -> AppResult<LearningPathDto> {
        let state = ctx.data::<AppState>()?;
        let session = session_from_context(ctx)?;

        let student_id = student_id.unwrap_or_else(|| session.user_id.clone());
        require_self_or_admin(&session, &student_id)?;

        Ok(state
            .learning_path_service
            .learning_path_or_empty(&student_id)
            .await)
    }

    async fn lesson(&self, ctx: &Context<'_>, id: String) -> AppResult<LessonDetailDto> {
        let state = ctx.data::<AppState>()?;
        session_from_context(ctx)?;

        state.learning_path_service.open_lesson(&id).await
    }

    async fn achievements(&self, ctx: &Context<'_>) -> AppResult<Vec<AchievementDto>> {
        let state = ctx.data::<AppState>()?;
        let session = session_from_context(ctx)?;

        state.user_service.achievements(&session.user_id).await
    }
}
