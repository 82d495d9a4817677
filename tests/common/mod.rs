//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod algorithms;
pub mod builders;
pub mod observers;

use std::time::Duration;

/// Upper bound for waiting on the worker thread
pub fn test_timeout() -> Duration {
    Duration::from_secs(5)
}
