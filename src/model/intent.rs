// File: ./src/model/intent.rs
use crate::model::parser::quote_name;
use crate::model::timezone::truncate_to_minute;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Meeting length when neither a duration nor a finish time is given.
pub const DEFAULT_MEETING_MINUTES: i64 = 60;

/// What a `/meet` command asks for.
///
/// When `is_login` or `is_logout` is set the remaining fields carry their
/// defaults and must be ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingIntent {
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub is_now: bool,
    pub no_calendar: bool,
    pub is_login: bool,
    pub is_logout: bool,
}

/// The downstream flow a chat handler runs for an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum CommandAction {
    Login,
    Logout,
    CreateMeeting { calendar: bool },
}

impl MeetingIntent {
    /// Defaults for a call made at `reference`: unnamed, starting on the
    /// current minute and lasting an hour.
    pub fn starting_now(reference: DateTime<Utc>) -> Self {
        let start = truncate_to_minute(reference);
        Self {
            name: String::new(),
            start,
            end: start + Duration::minutes(DEFAULT_MEETING_MINUTES),
            is_now: true,
            no_calendar: false,
            is_login: false,
            is_logout: false,
        }
    }

    pub fn action(&self) -> CommandAction {
        if self.is_login {
            CommandAction::Login
        } else if self.is_logout {
            CommandAction::Logout
        } else {
            CommandAction::CreateMeeting {
                calendar: !self.no_calendar,
            }
        }
    }

    /// `end - start`. Negative when an explicit finish precedes the start.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn format_duration_short(&self) -> String {
        let minutes = self.duration().num_minutes();
        let sign = if minutes < 0 { "-" } else { "" };
        let m = minutes.abs();
        if m >= 60 && m % 60 == 0 {
            format!("{}{}h", sign, m / 60)
        } else if m >= 60 {
            format!("{}{}h{}m", sign, m / 60, m % 60)
        } else {
            format!("{}{}m", sign, m)
        }
    }

    /// Command text that parses back to this intent in `tz`, for prefilling
    /// an edit box. Explicit times are written as 24-hour clocks and the end
    /// as a duration.
    pub fn to_command_string(&self, tz: Tz) -> String {
        match self.action() {
            CommandAction::Login => "login".to_string(),
            CommandAction::Logout => "logout".to_string(),
            CommandAction::CreateMeeting { calendar } => {
                let mut s = quote_name(&self.name);
                if !self.is_now {
                    s.push_str(&format!(" {}", self.start.with_timezone(&tz).format("%H:%M")));
                }
                let minutes = self.duration().num_minutes();
                if minutes >= 0 && minutes != DEFAULT_MEETING_MINUTES {
                    s.push_str(&format!(" {}m", minutes));
                } else if minutes < 0 {
                    // A bare clock after the name would read as a start.
                    if self.is_now {
                        s.push_str(" now");
                    }
                    s.push_str(&format!(" {}", self.end.with_timezone(&tz).format("%H:%M")));
                }
                if !calendar {
                    s.push_str(" nocal");
                }
                s
            }
        }
    }

    /// One-line summary with times shown in `tz`.
    pub fn to_local_string(&self, tz: Tz) -> String {
        match self.action() {
            CommandAction::Login => "login".to_string(),
            CommandAction::Logout => "logout".to_string(),
            CommandAction::CreateMeeting { calendar } => {
                let start = self.start.with_timezone(&tz);
                let end = self.end.with_timezone(&tz);
                let mut s = format!(
                    "\"{}\" {} -> {} [{}] ({})",
                    self.name,
                    start.format("%Y-%m-%d %H:%M"),
                    end.format("%Y-%m-%d %H:%M"),
                    self.format_duration_short(),
                    tz.name()
                );
                if self.is_now {
                    s.push_str(" now");
                }
                if !calendar {
                    s.push_str(" nocal");
                }
                s
            }
        }
    }
}

impl fmt::Display for MeetingIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_local_string(Tz::UTC))
    }
}
