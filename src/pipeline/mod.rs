//! Command pipeline for the status bot.
//!
//! - `parse_invocation`: Interpret the caller's positionals
//! - `StatusCommand`: Fetch, filter, format, chunk and deliver

mod command;
pub mod invocation;
pub mod report;

pub use command::{CommandOutcome, LOADING_TEXT, StatusCommand};
pub use invocation::{Invocation, Mode, Rejection, parse_command_line, parse_invocation};
