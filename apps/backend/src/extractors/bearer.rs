use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};

use crate::error::{AppError, MSG_HEADER_FORMAT, MSG_HEADER_REQUIRED};
use crate::services::auth::parse_bearer;

/// Raw token from an `Authorization: Bearer <token>` header.
///
/// Only the header shape is checked here; the token itself is not decoded.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn from_request_headers(req: &HttpRequest) -> Result<Self, AppError> {
        let value = req
            .headers()
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::unauthorized(MSG_HEADER_REQUIRED))?;

        let value = value
            .to_str()
            .map_err(|_| AppError::unauthorized(MSG_HEADER_FORMAT))?;

        let token = parse_bearer(value).map_err(|_| AppError::unauthorized(MSG_HEADER_FORMAT))?;
        Ok(Self(token.to_string()))
    }
}

impl FromRequest for BearerToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::from_request_headers(req))
    }
}
