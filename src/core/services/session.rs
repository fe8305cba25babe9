//! Match session - the state behind the code entry form
//!
//! A session holds the latest classification, the match results on screen
//! and the request currently outstanding. It never calls a matcher on its
//! own initiative: starting a request hands a [`MatchRequest`] back to the
//! caller, who runs it (inline or on another thread) and reports the
//! outcome through [`MatchSession::complete`].
//!
//! ```text
//! Idle -> Loading -> Results
//!                 \-> Failed
//! ```
//!
//! Each request carries a monotonically increasing [`RequestId`]. An outcome
//! for a request that is no longer the latest is *stale*; what happens to it
//! is decided by [`StalePolicy`].

use serde::{Deserialize, Serialize};

use super::classifier::{PatternRules, classify_with};
use crate::core::models::{ClassificationResult, MatchRecord, MatchSummary, Notification};
use crate::core::ports::{CodeMatcher, Notifier};

/// Identifier of a match request, increasing per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    /// Raw numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What to do with an outcome that arrives after a newer request started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StalePolicy {
    /// Ignore it; only the latest request may update results
    #[default]
    Discard,
    /// Apply it anyway (last completion wins)
    Apply,
}

impl std::fmt::Display for StalePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Discard => write!(f, "discard"),
            Self::Apply => write!(f, "apply"),
        }
    }
}

impl std::str::FromStr for StalePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "discard" => Ok(Self::Discard),
            "apply" => Ok(Self::Apply),
            _ => Err(format!("Invalid stale policy: {s}. Use: discard, apply")),
        }
    }
}

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing requested yet, or input cleared
    Idle,
    /// A matcher call is outstanding
    Loading(RequestId),
    /// The last applied call succeeded
    Results,
    /// The last applied call failed
    Failed,
}

/// Work handed to the caller: run these codes through a matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRequest {
    /// Request identifier, to be passed back to [`MatchSession::complete`]
    pub id: RequestId,
    /// ICD codes, deduplicated and in input order
    pub icd: Vec<String>,
    /// CPT codes, deduplicated and in input order
    pub cpt: Vec<String>,
}

/// What [`MatchSession::complete`] did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Results replaced and success reported
    Applied,
    /// Results cleared and failure reported
    Failed,
    /// Outcome belonged to an older request and was dropped
    Stale,
}

/// Session behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Start matching as soon as input has both ICD and CPT codes
    pub auto_process: bool,
    /// Handling of outdated outcomes
    pub stale_responses: StalePolicy,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            auto_process: true,
            stale_responses: StalePolicy::Discard,
        }
    }
}

/// State of one code entry form
pub struct MatchSession {
    rules: PatternRules,
    options: SessionOptions,
    notifier: Box<dyn Notifier>,
    input: String,
    codes: ClassificationResult,
    results: Vec<MatchRecord>,
    state: SessionState,
    next_id: u64,
    latest: Option<RequestId>,
    awaiting: bool,
}

impl std::fmt::Debug for MatchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchSession")
            .field("options", &self.options)
            .field("codes", &self.codes)
            .field("results", &self.results.len())
            .field("state", &self.state)
            .field("latest", &self.latest)
            .field("awaiting", &self.awaiting)
            .finish_non_exhaustive()
    }
}

impl MatchSession {
    /// Create a session reporting to the given notifier
    #[must_use]
    pub fn new(rules: PatternRules, options: SessionOptions, notifier: Box<dyn Notifier>) -> Self {
        Self {
            rules,
            options,
            notifier,
            input: String::new(),
            codes: ClassificationResult::empty(),
            results: Vec::new(),
            state: SessionState::Idle,
            next_id: 0,
            latest: None,
            awaiting: false,
        }
    }

    /// Replace the input text
    ///
    /// Reclassifies from scratch. Returns a request to run when auto-process
    /// is on and both ICD and CPT codes are present. Input with neither
    /// clears the results on screen.
    pub fn input_changed(&mut self, text: &str) -> Option<MatchRequest> {
        text.clone_into(&mut self.input);
        self.codes = if text.trim().is_empty() {
            ClassificationResult::empty()
        } else {
            classify_with(text, &self.rules)
        };

        if self.options.auto_process && self.codes.is_matchable() {
            return Some(self.begin());
        }
        if self.codes.has_no_codes() {
            self.results.clear();
            if !self.is_loading() {
                self.state = SessionState::Idle;
            }
        }
        None
    }

    /// Clear the input (and with it the results)
    pub fn clear(&mut self) {
        let _ = self.input_changed("");
    }

    /// Manually start matching the current codes
    ///
    /// Without both ICD and CPT codes nothing starts and a "Missing codes"
    /// notification is sent instead.
    pub fn process(&mut self) -> Option<MatchRequest> {
        if self.codes.is_matchable() {
            return Some(self.begin());
        }
        self.notifier.notify(&Notification::destructive(
            "Missing codes",
            "Please enter both ICD-10 and CPT codes to process matches.",
        ));
        None
    }

    /// Report the outcome of a request
    pub fn complete(
        &mut self,
        id: RequestId,
        outcome: anyhow::Result<Vec<MatchRecord>>,
    ) -> Completion {
        if self.latest != Some(id) {
            match self.options.stale_responses {
                StalePolicy::Discard => {
                    log::debug!(
                        "discarding outcome of stale request {id} (latest {:?})",
                        self.latest.map(RequestId::get)
                    );
                    return Completion::Stale;
                },
                StalePolicy::Apply => {
                    log::warn!("applying outcome of stale request {id}");
                },
            }
        }

        if self.latest == Some(id) {
            self.awaiting = false;
        }

        match outcome {
            Ok(records) => {
                let summary = MatchSummary::of(&records);
                log::info!(
                    "request {id} complete: {} matched, {} need attention",
                    summary.matched,
                    summary.need_attention
                );
                self.results = records;
                self.state = SessionState::Results;
                self.notifier.notify(&Notification::success(
                    "Code matching complete!",
                    format!(
                        "{} CPT codes matched, {} need attention.",
                        summary.matched, summary.need_attention
                    ),
                ));
                Completion::Applied
            },
            Err(err) => {
                log::error!("Error processing codes (request {id}): {err:#}");
                self.results.clear();
                self.state = SessionState::Failed;
                self.notifier.notify(&Notification::destructive(
                    "Error processing codes",
                    "Please try again or contact support if the issue persists.",
                ));
                Completion::Failed
            },
        }
    }

    /// Run a request through a matcher on the current thread and complete it
    pub fn run(&mut self, matcher: &dyn CodeMatcher, request: &MatchRequest) -> Completion {
        log::debug!(
            "running request {} through {} ({} icd, {} cpt)",
            request.id,
            matcher.name(),
            request.icd.len(),
            request.cpt.len()
        );
        let outcome = matcher.match_codes(&request.icd, &request.cpt);
        self.complete(request.id, outcome)
    }

    fn begin(&mut self) -> MatchRequest {
        self.next_id += 1;
        let id = RequestId(self.next_id);
        if let SessionState::Loading(previous) = self.state {
            log::debug!("request {id} supersedes outstanding request {previous}");
        }
        self.latest = Some(id);
        self.awaiting = true;
        self.state = SessionState::Loading(id);
        MatchRequest {
            id,
            icd: self.codes.icd.clone(),
            cpt: self.codes.cpt.clone(),
        }
    }

    /// Current input text
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Classification of the current input
    #[must_use]
    pub const fn codes(&self) -> &ClassificationResult {
        &self.codes
    }

    /// Match results on screen
    #[must_use]
    pub fn results(&self) -> &[MatchRecord] {
        &self.results
    }

    /// Summary counts of the results on screen
    #[must_use]
    pub fn summary(&self) -> MatchSummary {
        MatchSummary::of(&self.results)
    }

    /// Lifecycle state
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a spinner should be shown
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading(_))
    }

    /// Whether the latest request has not reported back yet
    ///
    /// Differs from [`Self::is_loading`] under [`StalePolicy::Apply`], where
    /// an older outcome leaves the loading state while the latest is still out.
    #[must_use]
    pub const fn awaiting_latest(&self) -> bool {
        self.awaiting
    }

    /// Most recently started request
    #[must_use]
    pub const fn latest_request(&self) -> Option<RequestId> {
        self.latest
    }
}
