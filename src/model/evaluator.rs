// File: ./src/model/evaluator.rs
//! Tree-walk turning a parse tree into a meeting intent plus the wall-clock
//! values the timezone resolver still has to anchor.
use crate::error::ParseError;
use crate::model::grammar::{DurationUnit, Meridiem, Node};
use crate::model::intent::MeetingIntent;
use crate::model::parser::strip_quotes;

/// An hour/minute pair as the user wrote it, in the user's zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    pub hour: u32,
    pub minute: u32,
}

/// Accumulator for one evaluation. Never shared between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseState {
    pub hour: u32,
    pub minute: u32,
    pub meridiem: Option<Meridiem>,
    pub duration_unit: Option<DurationUnit>,
    pub duration_minutes: Option<i64>,
    pub start: Option<WallClock>,
    pub finish: Option<WallClock>,
}

impl ParseState {
    /// Closes the clock currently held in `hour`/`minute`.
    ///
    /// A pending `pm` moves hours below 12 into the afternoon; `am` leaves the
    /// hour untouched, so `12am` stays 12. The marker is cleared either way.
    fn complete_time(&mut self) -> WallClock {
        if let Some(Meridiem::Pm) = self.meridiem
            && self.hour < 12
        {
            self.hour += 12;
        }
        self.meridiem = None;
        WallClock {
            hour: self.hour,
            minute: self.minute,
        }
    }
}

/// Mutable context threaded through [`evaluate`].
#[derive(Debug, Clone)]
pub struct EvalContext {
    pub state: ParseState,
    pub intent: MeetingIntent,
}

impl EvalContext {
    pub fn new(intent: MeetingIntent) -> Self {
        Self {
            state: ParseState::default(),
            intent,
        }
    }
}

/// Evaluates `node` into `ctx`.
///
/// Children are evaluated first, in source order, then the node applies its
/// own effect.
pub fn evaluate(node: &Node, ctx: &mut EvalContext) -> Result<(), ParseError> {
    match node {
        Node::Login => {
            ctx.intent.is_now = false;
            ctx.intent.is_login = true;
        }
        Node::Logout => {
            ctx.intent.is_now = false;
            ctx.intent.is_logout = true;
        }
        Node::Meeting {
            name,
            schedule,
            no_calendar,
        } => {
            evaluate(name, ctx)?;
            if let Some(schedule) = schedule {
                evaluate(schedule, ctx)?;
            }
            if let Some(flag) = no_calendar {
                evaluate(flag, ctx)?;
            }
        }
        Node::Name(raw) => {
            ctx.intent.name = strip_quotes(raw);
        }
        Node::Schedule { start, end } => {
            for child in [start, end].into_iter().flatten() {
                evaluate(child, ctx)?;
            }
        }
        Node::StartTime(inner) => {
            evaluate(inner, ctx)?;
            if matches!(**inner, Node::Now) {
                ctx.intent.is_now = true;
            } else {
                ctx.state.start = Some(ctx.state.complete_time());
                ctx.intent.is_now = false;
            }
        }
        Node::FinishTime(inner) => {
            evaluate(inner, ctx)?;
            ctx.state.finish = Some(ctx.state.complete_time());
        }
        Node::Now => {}
        Node::TwentyFourHourClock { hour, minute } => {
            let hour = parse_component(hour, "Hour")?;
            if hour > 23 {
                return Err(ParseError::range(format!(
                    "Hour must be between 0 and 23 in 24 hour clock, got {}",
                    hour
                )));
            }
            let minute = parse_component(minute, "Minute")?;
            if minute > 59 {
                return Err(ParseError::range(format!(
                    "Minute must be between 0 and 59 in 24 hour clock, got {}",
                    minute
                )));
            }
            ctx.state.hour = hour;
            ctx.state.minute = minute;
        }
        Node::TwelveHourClock {
            hour,
            minute,
            meridiem,
        } => {
            evaluate(meridiem, ctx)?;
            let hour = parse_component(hour, "Hour")?;
            if !(1..=12).contains(&hour) {
                return Err(ParseError::range(format!(
                    "Hour must be between 1 and 12 in 12 hour clock, got {}",
                    hour
                )));
            }
            let minute = match minute {
                Some(m) => parse_component(m, "Minute")?,
                None => 0,
            };
            if minute > 59 {
                return Err(ParseError::range(format!(
                    "Minute must be between 0 and 59 in 12 hour clock, got {}",
                    minute
                )));
            }
            ctx.state.hour = hour;
            ctx.state.minute = minute;
        }
        Node::Meridiem(m) => {
            ctx.state.meridiem = Some(*m);
        }
        Node::Duration { amount, unit } => {
            evaluate(unit, ctx)?;
            let amount: u32 = amount
                .parse()
                .map_err(|_| ParseError::range(format!("Duration '{}' is too large", amount)))?;
            let unit = ctx.state.duration_unit.unwrap_or(DurationUnit::Minutes);
            ctx.state.duration_minutes = Some(unit.to_minutes(amount));
        }
        Node::DurationUnit(u) => {
            ctx.state.duration_unit = Some(*u);
        }
        Node::NoCalendar => {
            ctx.intent.no_calendar = true;
        }
    }
    Ok(())
}

fn parse_component(digits: &str, what: &str) -> Result<u32, ParseError> {
    digits
        .parse::<u32>()
        .map_err(|_| ParseError::range(format!("{} '{}' is not a number", what, digits)))
}
