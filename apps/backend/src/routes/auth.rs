use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::AuthFailure;
use crate::error::{AppError, MSG_TOKEN_REQUIRED};
use crate::extractors::{AuthenticatedUser, ValidatedJson};
use crate::logging::security;
use crate::services::auth::Verification;
use crate::state::app_state::AppState;

/// Missing fields deserialize as `None` so they get the same 400 as blank ones.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires: String,
}

/// `token` is kept untyped: a present non-string token is a rejected token,
/// not a malformed request.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub token: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub user: String,
    pub expires: String,
}

/// Exchange a username/password pair for an access token.
async fn login(
    req: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { username, password } = req.into_inner();

    let grant = app_state
        .auth
        .login(
            username.as_deref().unwrap_or_default(),
            password.as_deref().unwrap_or_default(),
        )
        .await
        .map_err(AppError::from_login)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        expires: grant.expires_iso(),
        token: grant.token,
    }))
}

/// Stateless signature and expiry check. Never consults the user directory.
async fn verify(
    req: ValidatedJson<VerifyRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = match req.into_inner().token {
        None | Some(Value::Null) => return Err(AppError::bad_request(MSG_TOKEN_REQUIRED)),
        Some(Value::String(token)) => token,
        Some(_) => {
            security::token_rejected("verify", AuthFailure::MalformedInput);
            return Err(AppError::token_rejected(AuthFailure::MalformedInput));
        }
    };

    match app_state.auth.verify(&token) {
        Ok(Verification::Valid(_)) => Ok(HttpResponse::Ok().json(VerifyResponse {
            valid: true,
            message: "Token is valid".to_string(),
        })),
        Ok(Verification::Invalid(failure)) => Err(AppError::token_rejected(failure)),
        Err(_) => Err(AppError::bad_request(MSG_TOKEN_REQUIRED)),
    }
}

/// Resolve the bearer token to its current user.
async fn validate(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let AuthenticatedUser(validated) = user;

    Ok(HttpResponse::Ok().json(ValidateResponse {
        valid: true,
        expires: validated.expires_iso(),
        user: validated.user.name,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(["/login", "/login/"]).route(web::post().to(login)))
        .service(web::resource(["/verify", "/verify/"]).route(web::post().to(verify)))
        .service(web::resource(["/validate", "/validate/"]).route(web::get().to(validate)));
}
