//! Integration test utilities for the reminder engine
//!
//! This crate provides helpers for driving the service layer end to end
//! against the in-memory backend, with a recording notifier standing in
//! for the outbound channel.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
