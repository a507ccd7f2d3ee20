// File: ./src/cli.rs
//! Shared command-line interface logic: argument handling and help text.
use anyhow::Result;
use std::path::PathBuf;

/// One-line syntax reminder shown when a command does not parse.
pub const USAGE: &str =
    "Usage: /meet ([meeting title] [start|now] [end|duration] [nocal]) | [login] | [logout]";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub time_zone: Option<String>,
    pub json: bool,
    pub help: bool,
    /// Remaining words joined by single spaces.
    pub command: String,
}

/// Splits `args` (without the binary name) into options and command text.
///
/// Options are only recognised before the first command word; `--` ends them
/// explicitly so a meeting name may start with `-`.
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut words: Vec<&str> = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if !words.is_empty() {
            words.push(arg.as_str());
            continue;
        }
        match arg.as_str() {
            "-h" | "--help" | "help" => out.help = true,
            "--json" => out.json = true,
            "-r" | "--root" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{} expects a path", arg))?;
                out.root = Some(PathBuf::from(path));
            }
            "--tz" | "--time-zone" => {
                let zone = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{} expects a zone name", arg))?;
                out.time_zone = Some(zone.clone());
            }
            "--" => words.extend(iter.by_ref().map(String::as_str)),
            other => words.push(other),
        }
    }

    out.command = words.join(" ");
    Ok(out)
}

/// Chat handlers substitute a default name for an empty command so the
/// result is still a meeting.
pub fn effective_input<'a>(command: &'a str, default_name: &'a str) -> &'a str {
    if command.trim().is_empty() {
        default_name
    } else {
        command
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Slashmeet v{} - parse /meet commands into meeting intents",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] [--] <command...>", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config.");
    println!("    --tz <zone>           IANA time zone of the user (default from config).");
    println!("    --json                Print the intent as JSON.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("COMMAND SYNTAX:");
    println!("    login | logout        Start the login or logout flow");
    println!("    name                  Meeting name, or \"quoted name with spaces\"");
    println!("    14:00 | 2pm | 1:30pm  Start time (24 or 12 hour clock)");
    println!("    now                   Start now (the default)");
    println!("    17:00 | 5pm           End time, after a start time");
    println!("    25m | 1h              Duration (default 1h)");
    println!("    nocal                 Do not create a calendar event");
    println!();
    println!("EXAMPLES:");
    println!("    {} standup 9:30 15m", binary_name);
    println!("    {} '\"team sync\"' 14:00 17:00 nocal", binary_name);
    println!("    {} --tz America/New_York review 2pm 1h", binary_name);
    println!();
    println!("{}", USAGE);
}
