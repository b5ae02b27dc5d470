//! The interactive comparison session and rating synthesis.
//!
//! One session per rating event: the caller presents one candidate at a time,
//! feeds back a boolean "was the new concert better?" judgment, and once all
//! candidates are judged (or the user skips the rest) the session synthesizes
//! a single rating inside the chosen bracket's bounds. Sessions are plain
//! owned data, single-use, and never persisted.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::bracket::Bracket;
use crate::candidates::select_candidates;
use crate::concert::RatedConcert;

/// Hard cap on interactive comparisons per session. The candidate list may
/// be longer (same-bracket peers are not truncated); judgments stop here.
pub const MAX_COMPARISONS: usize = 5;

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum SessionState {
    /// Waiting on a judgment for `candidates[index]`.
    AwaitingJudgment { index: usize },
    /// All done; `final_rating` is available.
    Complete,
}

/// Precondition violations on a comparison session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session is already complete; judgments can no longer be recorded")]
    SessionComplete,
    #[error("judgment for '{given}' does not match the current candidate '{expected}'")]
    CandidateMismatch { expected: String, given: String },
    #[error("final rating requested before the session completed")]
    NotComplete,
}

/// A single in-progress rating event.
///
/// Created fresh per new concert, driven to `Complete` by the caller, then
/// discarded. Holds an owned snapshot of its candidates; nothing here touches
/// storage.
#[derive(Debug)]
pub struct ComparisonSession {
    new_concert_id: String,
    bracket: Bracket,
    candidates: Vec<RatedConcert>,
    index: usize,
    better_than: HashSet<String>,
    worse_than: HashSet<String>,
    rating: Option<f64>,
}

impl ComparisonSession {
    /// Start a session for a new concert against a snapshot of everything
    /// the user has rated so far.
    ///
    /// With an empty snapshot the session is born `Complete` and the rating
    /// is the bracket midpoint — a first concert has nothing to lose to.
    pub fn new(
        new_concert_id: impl Into<String>,
        bracket: Bracket,
        existing: &[RatedConcert],
    ) -> Self {
        let new_concert_id = new_concert_id.into();
        let candidates = select_candidates(existing, bracket, &new_concert_id);
        let mut session = Self {
            new_concert_id,
            bracket,
            candidates,
            index: 0,
            better_than: HashSet::new(),
            worse_than: HashSet::new(),
            rating: None,
        };
        if session.candidates.is_empty() {
            session.complete();
        }
        session
    }

    pub fn state(&self) -> SessionState {
        if self.rating.is_some() {
            SessionState::Complete
        } else {
            SessionState::AwaitingJudgment { index: self.index }
        }
    }

    pub fn bracket(&self) -> Bracket {
        self.bracket
    }

    pub fn new_concert_id(&self) -> &str {
        &self.new_concert_id
    }

    /// Total comparisons this session will ask for.
    pub fn comparisons_planned(&self) -> usize {
        self.candidates.len().min(MAX_COMPARISONS)
    }

    /// The candidate awaiting judgment, or `None` once complete.
    pub fn current_candidate(&self) -> Option<&RatedConcert> {
        match self.state() {
            SessionState::AwaitingJudgment { index } => self.candidates.get(index),
            SessionState::Complete => None,
        }
    }

    /// Record the judgment for the current candidate and advance.
    ///
    /// `candidate_id` must name the current candidate — this keeps each
    /// candidate id in at most one of the two judgment sets even if the
    /// caller's UI races ahead or replays an answer.
    pub fn record_judgment(
        &mut self,
        candidate_id: &str,
        is_new_better: bool,
    ) -> Result<SessionState, SessionError> {
        let current = self
            .current_candidate()
            .ok_or(SessionError::SessionComplete)?;
        if current.id != candidate_id {
            return Err(SessionError::CandidateMismatch {
                expected: current.id.clone(),
                given: candidate_id.to_string(),
            });
        }

        debug!(
            candidate = %current.id,
            candidate_rating = current.rating,
            is_new_better,
            "recorded judgment"
        );
        if is_new_better {
            self.better_than.insert(current.id.clone());
        } else {
            self.worse_than.insert(current.id.clone());
        }

        self.index += 1;
        if self.index >= self.comparisons_planned() {
            self.complete();
        }
        Ok(self.state())
    }

    /// Skip all remaining comparisons and synthesize from what we have.
    pub fn skip_remaining(&mut self) -> SessionState {
        if self.rating.is_none() {
            self.complete();
        }
        self.state()
    }

    /// The synthesized rating. Only valid once the session is `Complete`;
    /// asking earlier is a usage error, not a partial answer.
    pub fn final_rating(&self) -> Result<f64, SessionError> {
        self.rating.ok_or(SessionError::NotComplete)
    }

    fn complete(&mut self) {
        let rating = self.synthesize();
        debug!(
            new_concert = %self.new_concert_id,
            bracket = %self.bracket,
            rating,
            judged = self.better_than.len() + self.worse_than.len(),
            "session complete"
        );
        self.rating = Some(rating);
    }

    /// Turn accumulated judgments into one rating inside the bracket bounds.
    ///
    /// The new concert lands between the mean of what it beat and the mean of
    /// what it lost to; sweeping wins or losses nudge it half a point past
    /// the best/worst thing it was compared against, clamped to the bracket.
    fn synthesize(&self) -> f64 {
        let (min, max) = self.bracket.bounds();

        let better: Vec<f64> = self.ratings_of(&self.better_than);
        let worse: Vec<f64> = self.ratings_of(&self.worse_than);

        let raw = match (better.is_empty(), worse.is_empty()) {
            (true, true) => self.bracket.midpoint(),
            // Lost every comparison: slot in just under the weakest winner.
            (true, false) => {
                let floor = worse.iter().copied().fold(f64::INFINITY, f64::min);
                (floor - 0.5).max(min)
            }
            // Won every comparison: slot in just above the strongest loser.
            (false, true) => {
                let ceil = better.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                (ceil + 0.5).min(max)
            }
            (false, false) => {
                let mid = (mean(&better) + mean(&worse)) / 2.0;
                mid.clamp(min, max)
            }
        };

        // One decimal, and never outside the global scale even if an input
        // rating violated its contract.
        round_tenth(raw).clamp(0.0, 10.0)
    }

    fn ratings_of(&self, ids: &HashSet<String>) -> Vec<f64> {
        self.candidates
            .iter()
            .filter(|c| ids.contains(&c.id))
            .map(|c| c.rating)
            .collect()
    }
}

fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

fn round_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

// =============================================================================
// TESTS
// =============================================================================
