use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::warn;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub app_version: String,
    /// `None` when the user directory could not be reached.
    pub users: Option<usize>,
    pub time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let (status, users) = match app_state.directory.user_count().await {
        Ok(count) => ("ok", Some(count)),
        Err(e) => {
            warn!(error = %e, "Health check could not reach user directory");
            ("degraded", None)
        }
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        app_version: env!("CARGO_PKG_VERSION").to_string(),
        users,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health));
}
