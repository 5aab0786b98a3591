//! AUCTION-SIM: judicial auction property investment simulator
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod types;
pub mod calculator;
pub mod format;
pub mod comparables;
pub mod report;
pub mod config;
pub mod cli;
