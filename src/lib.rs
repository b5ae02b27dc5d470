#![forbid(unsafe_code)]

//! # encore-rating
//!
//! Pairwise comparison-based rating derivation for logged concerts.
//!
//! Instead of asking the user to "rate this 0–10" cold, the engine has them
//! pick a coarse bracket (Good / Ok / Bad) and answer a handful of "was it
//! better than X?" questions against concerts they already rated. The
//! accumulated judgments are synthesized into one rating, rounded to a tenth
//! and guaranteed to land inside the chosen bracket's numeric range.
//!
//! The engine is pure computation: the caller owns persistence, hands in an
//! immutable snapshot of rated concerts per session, and drives the loop one
//! judgment at a time.

pub mod bracket;
pub mod candidates;
pub mod concert;
pub mod session;

pub use bracket::Bracket;
pub use candidates::select_candidates;
pub use concert::{ConcertLibrary, LibraryError, RatedConcert};
pub use session::{ComparisonSession, SessionError, SessionState, MAX_COMPARISONS};
