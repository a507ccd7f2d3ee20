// File: src/model/parser.rs
use crate::error::ParseError;
use crate::model::evaluator::{EvalContext, evaluate};
use crate::model::grammar::build_tree;
use crate::model::intent::MeetingIntent;
use crate::model::timezone::{parse_time_zone, resolve};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Parses a `/meet` argument string into a [`MeetingIntent`].
///
/// `reference` stands in for "now": it is the start when none is given and
/// supplies the calendar day, as seen in `time_zone`, for explicit times.
/// The zone is where the user is, which is usually not where this code runs:
/// `10:00` typed in `America/New_York` becomes 14:00 UTC in summer.
pub fn parse_meeting_command(
    input: &str,
    reference: DateTime<Utc>,
    time_zone: &str,
) -> Result<MeetingIntent, ParseError> {
    let tz = parse_time_zone(time_zone)?;
    parse_meeting_command_in(input, reference, tz)
}

/// Same as [`parse_meeting_command`] with an already validated zone.
pub fn parse_meeting_command_in(
    input: &str,
    reference: DateTime<Utc>,
    tz: Tz,
) -> Result<MeetingIntent, ParseError> {
    let tree = build_tree(input).inspect_err(|e| log::debug!("'{}' rejected: {}", input, e))?;
    log::debug!("'{}' parsed as '{}'", input, tree);

    let mut ctx = EvalContext::new(MeetingIntent::starting_now(reference));
    evaluate(&tree, &mut ctx)?;
    resolve(ctx, reference, tz)
}

/// Removes the double quotes around a quoted meeting name.
pub fn strip_quotes(s: &str) -> String {
    let s = s.trim();
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

/// Quotes a meeting name when it could not be typed bare or would read as a
/// keyword.
pub fn quote_name(name: &str) -> String {
    use crate::model::grammar::NAME_PUNCTUATION;
    let bare = !matches!(name, "" | "login" | "logout")
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || NAME_PUNCTUATION.contains(&c));
    if bare {
        name.to_string()
    } else {
        format!("\"{}\"", name)
    }
}
