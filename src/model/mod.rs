// File: ./src/model/mod.rs
pub mod evaluator;
pub mod grammar;
pub mod intent;
pub mod parser;
pub mod timezone;

pub use intent::{CommandAction, DEFAULT_MEETING_MINUTES, MeetingIntent};
pub use parser::{parse_meeting_command, parse_meeting_command_in};
