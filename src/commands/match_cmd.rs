//! Match command - classify, then pair CPT codes with ICD codes

use std::path::PathBuf;

use codigo::adapters::{ChannelNotifier, ConsoleNotifier};
use codigo::core::services::{Completion, MatchSession, SessionOptions};
use codigo::output::{MatchReport, MatchStatus, OutputMode};

use super::{build_matcher, load_config, read_input};
use crate::cli::MatcherArgs;

/// Classify `text` (or stdin) and run the codes through the matcher once
pub fn match_cmd(
    text: Option<String>,
    args: MatcherArgs,
    config: Option<PathBuf>,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let rules = config.rules()?;
    let matcher = build_matcher(&config, args);
    let input = read_input(text)?;

    // One-shot: start the request explicitly rather than on input
    let options = SessionOptions {
        auto_process: false,
        ..config.session_options()
    };
    let (notifier, notifications) = ChannelNotifier::new();
    let mut session = MatchSession::new(rules, options, Box::new(notifier));
    session.input_changed(&input);

    let status = match session.process() {
        Some(request) => {
            if output_mode == OutputMode::Human {
                eprintln!("Processing {} CPT code(s)...", request.cpt.len());
            }
            match session.run(&matcher, &request) {
                Completion::Applied => MatchStatus::Results,
                Completion::Failed | Completion::Stale => MatchStatus::Error,
            }
        },
        None => MatchStatus::Skipped,
    };

    let notifications: Vec<_> = notifications.try_iter().collect();
    if output_mode == OutputMode::Human {
        for notification in &notifications {
            eprintln!("{}", ConsoleNotifier::banner(notification));
        }
    }

    let report = MatchReport::new(
        status,
        session.codes().clone(),
        session.results().to_vec(),
        notifications,
    );
    report.render(output_mode);

    if status == MatchStatus::Error {
        anyhow::bail!("code matching failed");
    }
    Ok(())
}
