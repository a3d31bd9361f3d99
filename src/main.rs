//! Hanabi - Main Binary
//!
//! Reads Hanabi commands from a file or stdin and reports the game state
//! after every line.

use clap::{Parser, ValueEnum};
use hanabi_rs::{
    config::{DIFFICULTY_ENV_VAR, LEGACY_DIFFICULTY_ENV_VAR},
    game::{CommandProcessor, OutputFormat, VerbosityLevel},
    Config, Result,
};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

/// Status report format
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable status blocks
    Text,
    /// One JSON object per status report
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "hanabi")]
#[command(about = "Hanabi - cooperative card game driven by text commands", long_about = None)]
struct Cli {
    /// Command file to read (reads stdin when omitted)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Difficulty level; 0 or less reveals every card at the deal
    /// [default: $HANABI_DIFFICULTY_LEVEL, or 0]
    #[arg(long, allow_hyphen_values = true)]
    difficulty: Option<i32>,

    /// Number of players seated for each new game (2-5)
    #[arg(long, default_value_t = hanabi_rs::config::DEFAULT_PLAYERS)]
    players: usize,

    /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
    #[arg(long, default_value = "normal", short = 'v')]
    verbosity: VerbosityLevel,

    /// Status report format
    #[arg(long, value_enum, default_value = "text")]
    format: FormatArg,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env().with_players(cli.players);
    if let Some(difficulty) = cli.difficulty {
        config = config.with_difficulty(difficulty);
    }
    config.verbosity = cli.verbosity;
    config.output_format = cli.format.into();
    config.validate()?;

    if config.verbosity >= VerbosityLevel::Verbose {
        let source = match cli.difficulty {
            Some(_) => "--difficulty",
            None if std::env::var_os(DIFFICULTY_ENV_VAR).is_some() => DIFFICULTY_ENV_VAR,
            None if std::env::var_os(LEGACY_DIFFICULTY_ENV_VAR).is_some() => {
                LEGACY_DIFFICULTY_ENV_VAR
            }
            None => "default",
        };
        eprintln!(
            "difficulty {} (from {source}), {} players",
            config.difficulty, config.players
        );
    }

    let mut processor = CommandProcessor::new(config);
    match cli.input {
        Some(path) => {
            let file = File::open(&path)?;
            processor.run(BufReader::new(file))?;
        }
        None => {
            processor.run(io::stdin().lock())?;
        }
    }

    Ok(())
}
