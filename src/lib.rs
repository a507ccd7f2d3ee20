// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod model;

pub use error::ParseError;
pub use model::{CommandAction, MeetingIntent, parse_meeting_command, parse_meeting_command_in};
