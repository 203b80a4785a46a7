use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use auth_backend::directory::{InMemoryUserDirectory, UserDirectory};
use auth_backend::infra::state::build_state;
use auth_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use auth_backend::routes;
use auth_backend::state::app_state::AppState;

use super::tokens::test_security;

pub const TEST_USER: &str = "testuser";
pub const TEST_PASSWORD: &str = "testpass123";
pub const INACTIVE_USER: &str = "inactive";
pub const INACTIVE_PASSWORD: &str = "password123";

/// Lowest cost bcrypt accepts; keeps hashing fast in tests.
pub const TEST_BCRYPT_COST: u32 = 4;

/// State with one active and one inactive user, signed with the test secret.
pub fn seeded_state() -> (AppState, Arc<InMemoryUserDirectory>) {
    let directory = Arc::new(InMemoryUserDirectory::new(TEST_BCRYPT_COST).unwrap());
    directory
        .create_user(TEST_USER, TEST_PASSWORD, true)
        .unwrap();
    directory
        .create_user(INACTIVE_USER, INACTIVE_PASSWORD, false)
        .unwrap();

    let state = build_state(test_security())
        .with_directory(directory.clone())
        .build()
        .unwrap();
    (state, directory)
}

/// State backed by an arbitrary directory double.
pub fn state_with_directory(directory: Arc<dyn UserDirectory>) -> AppState {
    build_state(test_security())
        .with_directory(directory)
        .build()
        .unwrap()
}

/// Builder for creating test Actix service instances with production
/// middleware and routes.
pub struct TestAppBuilder {
    state: AppState,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn build(
        self,
    ) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
        let data = web::Data::new(self.state);

        test::init_service(
            App::new()
                .wrap(TraceSpan)
                .wrap(StructuredLogger)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(routes::configure),
        )
        .await
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
