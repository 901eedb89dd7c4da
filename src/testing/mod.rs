//! Testing utilities and fixtures
//!
//! Builders for constructing tickets in unit tests, integration tests and
//! benchmarks without spelling out every field.

pub mod fixtures;
