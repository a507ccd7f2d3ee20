use anyhow::Result;
use chrono::Utc;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use slashmeet::cli::{self, USAGE};
use slashmeet::config::Config;
use slashmeet::context::StandardContext;
use slashmeet::model::parse_meeting_command_in;
use slashmeet::model::timezone::parse_time_zone;
use std::env;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let args: Vec<String> = env::args().skip(1).collect();
    let args = cli::parse_args(&args)?;

    if args.help {
        cli::print_help("meet");
        return Ok(ExitCode::SUCCESS);
    }

    let ctx = StandardContext::new(args.root.clone());
    let config = Config::load(&ctx)?;

    // Logging goes to stderr so JSON on stdout stays clean.
    let _ = TermLogger::init(
        config.level_filter(),
        ConfigBuilder::new().build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let tz = match &args.time_zone {
        Some(zone) => parse_time_zone(zone)?,
        None => config.tz()?,
    };
    let input = cli::effective_input(&args.command, &config.default_meeting_name);
    log::debug!("Parsing '{}' in {}", input, tz.name());

    match parse_meeting_command_in(input, Utc::now(), tz) {
        Ok(intent) => {
            if args.json || config.json_output {
                println!("{}", serde_json::to_string_pretty(&intent)?);
            } else {
                println!("{}", intent.to_local_string(tz));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            log::warn!("Rejected command '{}': {}", input, e);
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            Ok(ExitCode::from(2))
        }
    }
}
