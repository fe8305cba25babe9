//! Session command - interactive entry form over stdin
//!
//! Every line read replaces the whole input, like editing the form field.
//! Matcher calls run on worker threads and report back over the same
//! channel as the input lines, tagged with their request id, so an edit
//! made while a call is outstanding is visible to the session.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{Sender, channel};
use std::thread;

use codigo::adapters::{ConsoleNotifier, LogNotifier};
use codigo::core::models::MatchRecord;
use codigo::core::ports::{CodeMatcher, Notifier};
use codigo::core::services::{Completion, MatchRequest, MatchSession, RequestId};
use codigo::output::{ClassifyReport, OutputMode, render_results};

use super::{build_matcher, load_config};
use crate::cli::MatcherArgs;

/// Something the session loop has to react to
enum Event {
    /// A line of input
    Line(String),
    /// Stdin closed
    Eof,
    /// A matcher call finished
    Outcome(RequestId, anyhow::Result<Vec<MatchRecord>>),
}

/// Run the interactive session until `:quit` or end of input
pub fn session(
    args: MatcherArgs,
    config: Option<PathBuf>,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let rules = config.rules()?;
    let matcher: Arc<dyn CodeMatcher> = Arc::new(build_matcher(&config, args));

    let notifier: Box<dyn Notifier> = match output_mode {
        OutputMode::Human => Box::new(ConsoleNotifier),
        OutputMode::Json => Box::new(LogNotifier),
    };
    let mut session = MatchSession::new(rules, config.session_options(), notifier);

    let (tx, rx) = channel();
    spawn_reader(tx.clone());

    let mut input_closed = false;
    while let Ok(event) = rx.recv() {
        match event {
            Event::Line(line) => match line.trim() {
                ":quit" | ":q" => break,
                ":clear" => {
                    session.clear();
                    show_codes(&session, output_mode);
                },
                ":process" => {
                    if let Some(request) = session.process() {
                        start(&matcher, request, &tx, output_mode);
                    }
                },
                _ => {
                    let request = session.input_changed(&line);
                    show_codes(&session, output_mode);
                    if let Some(request) = request {
                        start(&matcher, request, &tx, output_mode);
                    }
                },
            },
            Event::Eof => input_closed = true,
            Event::Outcome(id, outcome) => {
                if session.complete(id, outcome) != Completion::Stale {
                    show_results(&session, id, output_mode);
                }
            },
        }

        if input_closed && !session.awaiting_latest() {
            break;
        }
    }

    log::debug!("session ended: {session:?}");
    Ok(())
}

fn spawn_reader(tx: Sender<Event>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(Event::Line(line)).is_err() {
                        return;
                    }
                },
                Err(err) => {
                    log::error!("failed to read stdin: {err}");
                    break;
                },
            }
        }
        let _ = tx.send(Event::Eof);
    });
}

fn start(
    matcher: &Arc<dyn CodeMatcher>,
    request: MatchRequest,
    tx: &Sender<Event>,
    output_mode: OutputMode,
) {
    if output_mode == OutputMode::Human {
        println!("Loading matches ({})...", request.id);
    }
    let matcher = Arc::clone(matcher);
    let tx = tx.clone();
    thread::spawn(move || {
        let outcome = matcher.match_codes(&request.icd, &request.cpt);
        let _ = tx.send(Event::Outcome(request.id, outcome));
    });
}

fn show_codes(session: &MatchSession, output_mode: OutputMode) {
    match output_mode {
        OutputMode::Human => print!("{}", ClassifyReport::new(session.codes().clone()).to_human()),
        OutputMode::Json => println!(
            "{}",
            serde_json::json!({
                "event": "codes",
                "codes": session.codes(),
                "total": session.codes().total(),
            })
        ),
    }
}

fn show_results(session: &MatchSession, id: RequestId, output_mode: OutputMode) {
    match output_mode {
        OutputMode::Human => print!("{}", render_results(session.results())),
        OutputMode::Json => println!(
            "{}",
            serde_json::json!({
                "event": "results",
                "request": id.get(),
                "summary": session.summary(),
                "results": session.results(),
            })
        ),
    }
}
