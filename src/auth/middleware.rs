use actix_web::{http::header::Header, web, FromRequest, HttpRequest};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use futures::future::LocalBoxFuture;

use crate::{app_state::AppState, auth::claims::Session, errors::AppError};

/// Extractor for the caller's session. Verifies the bearer token against the
/// auth service's signing secret, then takes the role from the stored profile
/// when one exists.
pub struct AuthenticatedUser(pub Session);

impl AuthenticatedUser {
    async fn authenticate(req: HttpRequest) -> Result<Self, AppError> {
        let state = req
            .app_data::<web::Data<AppState>>()
            .ok_or_else(|| AppError::InternalError("JWT service not configured".to_string()))?;

        let header = Authorization::<Bearer>::parse(&req)
            .map_err(|_| AppError::Unauthorized("Missing or malformed bearer token".to_string()))?;

        let claims = state.jwt_service.validate_token(header.as_ref().token())?;
        let mut session: Session = claims.into();

        // Token role only stands in until the profile is registered.
        if let Some(user) = state.user_service.find_user(&session.user_id).await? {
            session.role = user.role;
        }

        Ok(AuthenticatedUser(session))
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        Box::pin(Self::authenticate(req.clone()))
    }
}
