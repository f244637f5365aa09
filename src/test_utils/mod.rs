//! Test utilities.
//!
//! This module provides:
//! - Test data factories for creating valid test fixtures
//! - In-memory implementations of the repository, email and rate limiter ports
//! - An in-memory store for exercising the client without HTTP
//! - `TestAppStateBuilder` and `spawn_app` for HTTP-level tests

mod app_state_builder;
mod waitlist_mocks;

pub use app_state_builder::*;
pub use client_mocks::*;
pub use factories::*;
pub use waitlist_mocks::*;
