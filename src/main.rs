use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use datatransit::config::{Config, OutputFormat};
use datatransit::document::DataValue;
use datatransit::file::loader::{load_source_file, load_source_from_stdin, load_transitions_file};
use datatransit::file::writer::write_results;
use datatransit::transition::DataTransition;

/// DataTransit - extract values from nested JSON/YAML documents
#[derive(Parser)]
#[command(name = "datatransit")]
#[command(version)]
#[command(
    about = "Extract, validate and rename values from a nested JSON/YAML document",
    long_about = None
)]
struct Cli {
    /// Source document (JSON or YAML, optionally .gz); read from stdin if omitted
    file: Option<PathBuf>,

    /// Transition expression, e.g. "a>b>c#integer|depthVal" (repeatable)
    #[arg(short = 't', long = "transition", value_name = "EXPR")]
    transitions: Vec<String>,

    /// File holding a JSON or YAML list of transitions
    #[arg(short = 'T', long, value_name = "PATH")]
    transitions_file: Option<PathBuf>,

    /// Output format (default from config, else json)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8, config: &Config) {
    let level = match verbose {
        0 => config.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    init_logging(cli.verbose, &config);
    if let Some(err) = config_error {
        log::warn!("ignoring config, using defaults: {:#}", err);
    }

    // Transition files may hold non-string entries; those are checked during construction
    let mut transitions: Vec<DataValue> = match &cli.transitions_file {
        Some(path) => load_transitions_file(path)?,
        None => Vec::new(),
    };
    transitions.extend(cli.transitions.into_iter().map(DataValue::String));

    if transitions.is_empty() {
        anyhow::bail!("No transitions given; use -t EXPR or --transitions-file PATH");
    }

    let source = match &cli.file {
        Some(path) => load_source_file(path)?,
        None if !io::stdin().is_terminal() => load_source_from_stdin()?,
        None => anyhow::bail!("No source document given and stdin is a terminal"),
    };

    let transition = DataTransition::from_values(&transitions, &source)
        .context("Failed to apply transitions")?;

    let format = cli.format.unwrap_or(config.output_format);
    let pretty = config.pretty && !cli.compact;
    write_results(&mut io::stdout().lock(), transition.results(), format, pretty)?;

    Ok(())
}
