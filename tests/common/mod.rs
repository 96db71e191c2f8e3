//! Shared test utilities for ellipse-kernel integration tests.
//!
//! Test crates import this via `mod common;` and call [`init_logging`] so
//! solver diagnostics show up with `RUST_LOG=debug`.

#![allow(dead_code)]

pub mod builders;
pub mod comparison;

/// Route `log` output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
