use actix_web::{web, App, HttpServer};
use auth_backend::config::server::ServerConfig;
use auth_backend::infra::state::build_state;
use auth_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use auth_backend::routes;
use auth_backend::state::security_config::SecurityConfig;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker-compose env_file, or `set -a; . ./.env; set +a` locally).
    let server = ServerConfig::from_env().unwrap_or_else(|e| {
        eprintln!("❌ {e}");
        std::process::exit(1);
    });
    let security = SecurityConfig::from_env().unwrap_or_else(|e| {
        eprintln!("❌ {e}");
        std::process::exit(1);
    });

    let app_state = build_state(security)
        .with_users_file(server.users_file.clone())
        .with_bcrypt_cost(server.bcrypt_cost)
        .build()
        .unwrap_or_else(|e| {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        });

    info!(
        host = %server.host,
        port = server.port,
        ttl_secs = app_state.security.token_ttl.whole_seconds(),
        "Starting auth backend"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(TraceSpan)
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
