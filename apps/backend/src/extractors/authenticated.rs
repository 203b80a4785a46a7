use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use super::bearer::BearerToken;
use crate::error::AppError;
use crate::services::auth::ValidatedToken;
use crate::state::app_state::AppState;

/// A request whose bearer token is valid and whose subject still exists.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub ValidatedToken);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = BearerToken::from_request_headers(req);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let BearerToken(token) = token?;
            let state = state
                .ok_or_else(|| AppError::internal("AppState not available".to_string()))?;

            state
                .auth
                .validate_token(&token)
                .await
                .map(AuthenticatedUser)
                .map_err(AppError::from_validate)
        })
    }
}
