//! Common utilities for integration tests.
//!
//! Shared LocalStack client setup and log document generation.

pub mod localstack;

pub use localstack::{LocalStackTestContext, login_log};
