//! Shared test utilities for urban-feedback integration tests.
//!
//! This module provides:
//! - Scripted fakes for the device capabilities, classifier and geocoder
//! - `TestHarness` wiring a pipeline, a report store and a finalizer together

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::TestHarness;
