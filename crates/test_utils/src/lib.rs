//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! billing engine test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built campaigns, bookings and amounts
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for billing types
//! - `generators`: Property-based test data generators
//! - `logging`: Test-writer tracing subscriber

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod logging;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use logging::*;
