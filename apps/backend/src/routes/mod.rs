use actix_web::web;

pub mod auth;
pub mod health;

/// Register every application route. Shared by `main.rs` and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Token lifecycle: /api/auth/**
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));
}
