// File: ./src/model/grammar.rs
//! Accepted `/meet` command syntax and the parse-tree builder.
//!
//! The whole input must match one of three alternatives, tried in order:
//!
//! ```text
//! Command   := "login" | "logout" | Meeting
//! Meeting   := Name (Schedule)? ("nocal")?
//! Schedule  := StartTime (FinishTime | Duration)? | Duration
//! StartTime := TwelveHourClock | TwentyFourHourClock | "now"
//! FinishTime:= TwelveHourClock | TwentyFourHourClock
//! ```
//!
//! Tokens are separated by whitespace. A digit run followed by `:` can only
//! be a clock, a digit run followed by `h`/`m` can only be a duration, so the
//! ordered choice never has to guess.
use crate::error::ParseError;
use chumsky::prelude::*;
use std::fmt;
use strum::{Display, EnumString};

pub type GrammarError = Simple<char>;

/// Characters allowed in an unquoted meeting name besides alphanumerics.
pub const NAME_PUNCTUATION: &[char] = &['_', '-', '!', '?', '\'', '/'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Meridiem {
    Am,
    Pm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum DurationUnit {
    #[strum(serialize = "h")]
    Hours,
    #[strum(serialize = "m")]
    Minutes,
}

impl DurationUnit {
    pub fn to_minutes(self, amount: u32) -> i64 {
        match self {
            DurationUnit::Hours => i64::from(amount) * 60,
            DurationUnit::Minutes => i64::from(amount),
        }
    }
}

/// One node per grammar production.
///
/// Numeric components are kept as their source digits; range checks belong
/// to evaluation, not to syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Login,
    Logout,
    Meeting {
        name: Box<Node>,
        schedule: Option<Box<Node>>,
        no_calendar: Option<Box<Node>>,
    },
    /// Raw name source, quotes included when the user quoted it.
    Name(String),
    Schedule {
        start: Option<Box<Node>>,
        end: Option<Box<Node>>,
    },
    StartTime(Box<Node>),
    FinishTime(Box<Node>),
    Now,
    TwentyFourHourClock {
        hour: String,
        minute: String,
    },
    TwelveHourClock {
        hour: String,
        minute: Option<String>,
        meridiem: Box<Node>,
    },
    Meridiem(Meridiem),
    Duration {
        amount: String,
        unit: Box<Node>,
    },
    DurationUnit(DurationUnit),
    NoCalendar,
}

impl fmt::Display for Node {
    /// Renders the node back to canonical command text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Login => write!(f, "login"),
            Node::Logout => write!(f, "logout"),
            Node::Meeting {
                name,
                schedule,
                no_calendar,
            } => {
                write!(f, "{}", name)?;
                if let Some(schedule) = schedule {
                    write!(f, " {}", schedule)?;
                }
                if let Some(flag) = no_calendar {
                    write!(f, " {}", flag)?;
                }
                Ok(())
            }
            Node::Name(raw) => write!(f, "{}", raw),
            Node::Schedule { start, end } => match (start, end) {
                (Some(start), Some(end)) => write!(f, "{} {}", start, end),
                (Some(only), None) | (None, Some(only)) => write!(f, "{}", only),
                (None, None) => Ok(()),
            },
            Node::StartTime(inner) | Node::FinishTime(inner) => write!(f, "{}", inner),
            Node::Now => write!(f, "now"),
            Node::TwentyFourHourClock { hour, minute } => write!(f, "{}:{}", hour, minute),
            Node::TwelveHourClock {
                hour,
                minute,
                meridiem,
            } => match minute {
                Some(minute) => write!(f, "{}:{}{}", hour, minute, meridiem),
                None => write!(f, "{}{}", hour, meridiem),
            },
            Node::Meridiem(m) => write!(f, "{}", m),
            Node::Duration { amount, unit } => write!(f, "{}{}", amount, unit),
            Node::DurationUnit(u) => write!(f, "{}", u),
            Node::NoCalendar => write!(f, "nocal"),
        }
    }
}

/// Matches `input` against the grammar.
///
/// On failure the error carries the furthest character offset any
/// alternative reached.
pub fn build_tree(input: &str) -> Result<Node, ParseError> {
    command().parse(input).map_err(syntax_error)
}

pub fn command() -> impl Parser<char, Node, Error = GrammarError> {
    choice((
        whole_input(just("login").to(Node::Login)),
        whole_input(just("logout").to(Node::Logout)),
        whole_input(meeting()),
    ))
}

fn whole_input<P>(inner: P) -> impl Parser<char, Node, Error = GrammarError> + Clone
where
    P: Parser<char, Node, Error = GrammarError> + Clone,
{
    text::whitespace()
        .ignore_then(inner)
        .then_ignore(text::whitespace())
        .then_ignore(end())
}

fn separator() -> impl Parser<char, (), Error = GrammarError> + Clone {
    filter(|c: &char| c.is_whitespace())
        .repeated()
        .at_least(1)
        .ignored()
}

fn digit() -> impl Parser<char, char, Error = GrammarError> + Clone {
    filter(|c: &char| c.is_ascii_digit())
}

fn digits(first: char, second: Option<char>) -> String {
    std::iter::once(first).chain(second).collect()
}

fn meeting() -> impl Parser<char, Node, Error = GrammarError> + Clone {
    name()
        .then(separator().ignore_then(schedule()).or_not())
        .then(
            separator()
                .ignore_then(just("nocal").to(Node::NoCalendar))
                .or_not(),
        )
        .map(|((name, schedule), no_calendar)| Node::Meeting {
            name: Box::new(name),
            schedule: schedule.map(Box::new),
            no_calendar: no_calendar.map(Box::new),
        })
}

fn name() -> impl Parser<char, Node, Error = GrammarError> + Clone {
    let quoted = just('"')
        .ignore_then(none_of("\"").repeated().at_least(1).collect::<String>())
        .then_ignore(just('"'))
        .map(|inner| format!("\"{}\"", inner));
    let unquoted = filter(|c: &char| c.is_alphanumeric() || NAME_PUNCTUATION.contains(c))
        .repeated()
        .at_least(1)
        .collect::<String>();
    quoted.or(unquoted).map(Node::Name)
}

fn schedule() -> impl Parser<char, Node, Error = GrammarError> + Clone {
    let start_then_end = start_time()
        .then(
            separator()
                .ignore_then(choice((finish_time(), duration())))
                .or_not(),
        )
        .map(|(start, end)| Node::Schedule {
            start: Some(Box::new(start)),
            end: end.map(Box::new),
        });
    let duration_only = duration().map(|d| Node::Schedule {
        start: None,
        end: Some(Box::new(d)),
    });
    start_then_end.or(duration_only)
}

fn start_time() -> impl Parser<char, Node, Error = GrammarError> + Clone {
    choice((
        twelve_hour_clock(),
        twenty_four_hour_clock(),
        just("now").to(Node::Now),
    ))
    .map(|inner| Node::StartTime(Box::new(inner)))
}

fn finish_time() -> impl Parser<char, Node, Error = GrammarError> + Clone {
    twelve_hour_clock()
        .or(twenty_four_hour_clock())
        .map(|inner| Node::FinishTime(Box::new(inner)))
}

// H[H][:MM](am|pm)
fn twelve_hour_clock() -> impl Parser<char, Node, Error = GrammarError> + Clone {
    digit()
        .then(digit().or_not())
        .then(just(':').ignore_then(digit().then(digit())).or_not())
        .then(meridiem())
        .map(|(((h1, h2), minute), meridiem)| Node::TwelveHourClock {
            hour: digits(h1, h2),
            minute: minute.map(|(m1, m2)| digits(m1, Some(m2))),
            meridiem: Box::new(meridiem),
        })
}

// H[H]:MM
fn twenty_four_hour_clock() -> impl Parser<char, Node, Error = GrammarError> + Clone {
    digit()
        .then(digit().or_not())
        .then_ignore(just(':'))
        .then(digit().then(digit()))
        .map(|((h1, h2), (m1, m2))| Node::TwentyFourHourClock {
            hour: digits(h1, h2),
            minute: digits(m1, Some(m2)),
        })
}

fn meridiem() -> impl Parser<char, Node, Error = GrammarError> + Clone {
    just("am").or(just("pm")).try_map(|text, span| {
        text.parse::<Meridiem>()
            .map(Node::Meridiem)
            .map_err(|e| Simple::custom(span, e.to_string()))
    })
}

fn duration() -> impl Parser<char, Node, Error = GrammarError> + Clone {
    let unit = one_of("hm").try_map(|c: char, span| {
        c.to_string()
            .parse::<DurationUnit>()
            .map(Node::DurationUnit)
            .map_err(|e| Simple::custom(span, e.to_string()))
    });
    digit()
        .repeated()
        .at_least(1)
        .collect::<String>()
        .then(unit)
        .map(|(amount, unit)| Node::Duration {
            amount,
            unit: Box::new(unit),
        })
}

fn syntax_error(errors: Vec<GrammarError>) -> ParseError {
    match errors.into_iter().max_by_key(|e| e.span().start) {
        Some(err) => {
            let message = match err.found() {
                Some(c) => format!("unexpected '{}'", c),
                None => "unexpected end of input".to_string(),
            };
            ParseError::Syntax {
                offset: err.span().start,
                message,
            }
        }
        None => ParseError::Syntax {
            offset: 0,
            message: "no alternative matched".to_string(),
        },
    }
}
