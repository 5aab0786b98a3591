//! Integration test harness.
//!
//! Cargo builds `tests/integration/main.rs` as one test binary; each
//! submodule covers one area against the public library API.

mod golden;
mod mock_source;
mod sweep;
