//! Value objects - immutable identifier types

mod poll_id;
mod snowflake;

pub use poll_id::PollId;
pub use snowflake::{Snowflake, SnowflakeParseError};
