#![allow(dead_code)]

pub mod app_builder;
pub mod directories;
pub mod tokens;

pub use app_builder::{create_test_app, seeded_state};
