//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands;
use codigo::output::OutputMode;

/// codigo - ICD-10 and CPT code classification and matching
#[derive(Parser, Debug)]
#[command(
    name = "codigo",
    version,
    about = "ICD-10 and CPT code classification and matching",
    long_about = "Sort pasted text into ICD-10-CM diagnosis codes, CPT procedure codes\n\
                  and invalid tokens, then pair each CPT code with the ICD codes that\n\
                  support it."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: $CODIGO_CONFIG or ~/.codigo/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify codes in TEXT (or stdin) into ICD, CPT and invalid
    Classify {
        /// Text to classify; `-` or omitted reads stdin
        text: Option<String>,
    },

    /// Classify codes and match CPT codes against ICD codes
    Match {
        /// Text to classify; `-` or omitted reads stdin
        text: Option<String>,

        #[command(flatten)]
        matcher: MatcherArgs,
    },

    /// Interactive session: every stdin line replaces the input
    ///
    /// Lines `:process`, `:clear` and `:quit` re-run matching, clear the
    /// input and exit.
    Session {
        #[command(flatten)]
        matcher: MatcherArgs,
    },

    /// Show version
    Version,
}

/// Overrides for the placeholder matcher
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct MatcherArgs {
    /// Simulated matcher latency in milliseconds
    #[arg(long, value_name = "MS")]
    pub latency_ms: Option<u64>,

    /// Seed for the placeholder match draw
    #[arg(long)]
    pub seed: Option<u64>,

    /// Share of CPT codes reported as matched (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub match_percent: Option<u8>,

    /// Make the matcher fail
    #[arg(long)]
    pub fail: bool,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::Classify { text }) => commands::classify(text, cli.config, output_mode),
        Some(Command::Match { text, matcher }) => {
            commands::match_cmd(text, matcher, cli.config, output_mode)
        },
        Some(Command::Session { matcher }) => commands::session(matcher, cli.config, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": codigo::VERSION
                    })
                );
            } else {
                println!("codigo v{}", codigo::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": codigo::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("codigo v{}", codigo::VERSION);
                println!("\nRun 'codigo --help' for usage");
                println!("Run 'codigo classify \"M79.3, 99213\"' to get started");
            }
            Ok(())
        },
    }
}
