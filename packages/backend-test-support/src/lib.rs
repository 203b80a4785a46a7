//! Backend test support utilities
//!
//! Shared by the backend's unit and integration tests: logging
//! initialization, JSON error body assertions and unique test data.

pub mod error_body;
pub mod logging;
pub mod unique_helpers;

pub use error_body::{assert_error_body, assert_rejection_body};
