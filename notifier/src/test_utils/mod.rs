//! Test utilities
//!
//! In-memory port implementations, mockall mocks and test fixtures for unit
//! testing.
//!
//! The in-memory store and the recording broadcaster cover the happy paths;
//! the mockall mocks are for injecting failures into a single call.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
