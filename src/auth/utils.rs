use async_graphql::Context;

use crate::{
    auth::claims::Session,
    errors::{AppError, AppResult},
    models::domain::user::UserRole,
};

pub fn require_admin(session: &Session) -> AppResult<()> {
    if !session.is_admin() {
        return Err(AppError::Forbidden(
            "Only admins can perform this action".to_string(),
        ));
    }
    Ok(())
}

pub fn require_self_or_admin(session: &Session, owner_id: &str) -> AppResult<()> {
    if !session.is_admin() && session.user_id != owner_id {
        return Err(AppError::Forbidden(
            "You can only access your own resources".to_string(),
        ));
    }
    Ok(())
}

/// Admins pass every role check.
pub fn require_role(session: &Session, role: UserRole) -> AppResult<()> {
    if session.role != role && !session.is_admin() {
        return Err(AppError::Forbidden(format!(
            "This action is only available to {} accounts",
            role
        )));
    }
    Ok(())
}

pub fn session_from_context(ctx: &Context<'_>) -> AppResult<Session> {
    ctx.data::<Session>()
        .cloned()
        .map_err(|_| AppError::Unauthorized("Authentication required".to_string()))
}
