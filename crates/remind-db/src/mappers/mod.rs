//! Entity <-> model mappers
//!
//! Row-to-entity conversions are fallible: enum tags and union columns come
//! back as loose strings and must re-validate on the way in.

mod execution_log;
mod poll;
mod reminder;
mod template;
mod vote;

pub use reminder::{target_columns, trigger_columns};
