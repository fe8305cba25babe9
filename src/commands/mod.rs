//! Command implementations

mod classify;
mod match_cmd;
mod session;

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use crate::cli::MatcherArgs;
use codigo::adapters::PlaceholderMatcher;
use codigo::config::Config;

pub use classify::classify;
pub use match_cmd::match_cmd;
pub use session::session;

/// Text from the argument, or all of stdin when absent or `-`
fn read_input(text: Option<String>) -> anyhow::Result<String> {
    match text {
        Some(text) if text != "-" => Ok(text),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
            Ok(buf)
        },
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    Ok(Config::load(path)?)
}

/// Placeholder matcher from config, with command-line overrides on top
fn build_matcher(config: &Config, args: MatcherArgs) -> PlaceholderMatcher {
    let mut matcher = config.matcher();
    if let Some(ms) = args.latency_ms {
        matcher = matcher.with_latency(Duration::from_millis(ms));
    }
    if let Some(seed) = args.seed {
        matcher = matcher.with_seed(seed);
    }
    if let Some(percent) = args.match_percent {
        matcher = matcher.with_match_percent(percent);
    }
    if args.fail {
        matcher = matcher.failing(true);
    }
    matcher
}
