//! Rated concert records and the JSON library the CLI reads and writes.
//!
//! The engine only ever sees an immutable snapshot of `RatedConcert` values;
//! persistence belongs to the caller. `ConcertLibrary` is that caller-side
//! plumbing for the CLI: a flat JSON file of everything the user has rated.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::bracket::Bracket;

/// A concert the user has already rated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatedConcert {
    /// Stable identifier.
    pub id: String,
    /// Artist or act shown when this concert comes up as a comparison.
    pub artist: String,
    /// Assigned rating in [0, 10].
    pub rating: f64,
    /// Bracket stored when the concert was rated. Older records may lack it,
    /// in which case it is re-derived from the rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bracket: Option<Bracket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl RatedConcert {
    pub fn new(id: impl Into<String>, artist: impl Into<String>, rating: f64) -> Self {
        Self {
            id: id.into(),
            artist: artist.into(),
            rating,
            bracket: None,
            venue: None,
            date: None,
        }
    }

    /// The bracket this concert counts toward during candidate selection.
    ///
    /// A stored bracket wins over the rating-derived one; records edited by
    /// hand can disagree and the stored value is taken as the user's intent.
    pub fn effective_bracket(&self) -> Bracket {
        self.bracket.unwrap_or_else(|| Bracket::for_rating(self.rating))
    }
}

/// Errors loading or saving a concert library file.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid library json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate concert id '{0}'")]
    DuplicateId(String),
}

/// A user's rated concerts, as stored in the CLI's JSON library file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConcertLibrary {
    pub concerts: Vec<RatedConcert>,
}

impl ConcertLibrary {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let raw = std::fs::read_to_string(path)?;
        let lib: ConcertLibrary = serde_json::from_str(&raw)?;
        let mut seen = HashSet::new();
        for c in &lib.concerts {
            if !seen.insert(c.id.as_str()) {
                return Err(LibraryError::DuplicateId(c.id.clone()));
            }
        }
        Ok(lib)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LibraryError> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.concerts.iter().any(|c| c.id == id)
    }

    /// Append a newly rated concert. Rejects duplicate ids.
    pub fn add(&mut self, concert: RatedConcert) -> Result<(), LibraryError> {
        if self.contains(&concert.id) {
            return Err(LibraryError::DuplicateId(concert.id));
        }
        self.concerts.push(concert);
        Ok(())
    }

    /// Concerts sorted by rating, best first — the "my rankings" view.
    pub fn ranked(&self) -> Vec<&RatedConcert> {
        let mut out: Vec<&RatedConcert> = self.concerts.iter().collect();
        out.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        out
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_bracket_prefers_stored_value() {
        let mut c = RatedConcert::new("c1", "The National", 8.2);
        assert_eq!(c.effective_bracket(), Bracket::Good);

        // Manually edited record: stored bracket disagrees with the rating.
        c.bracket = Some(Bracket::Ok);
        assert_eq!(c.effective_bracket(), Bracket::Ok);
    }

    #[test]
    fn ranked_sorts_best_first_with_stable_ties() {
        let lib = ConcertLibrary {
            concerts: vec![
                RatedConcert::new("a", "A", 6.0),
                RatedConcert::new("b", "B", 9.0),
                RatedConcert::new("c", "C", 6.0),
            ],
        };
        let ids: Vec<&str> = lib.ranked().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn add_rejects_duplicate_id() {
        let mut lib = ConcertLibrary::default();
        lib.add(RatedConcert::new("x", "X", 5.0)).unwrap();
        assert!(matches!(
            lib.add(RatedConcert::new("x", "X again", 6.0)),
            Err(LibraryError::DuplicateId(_))
        ));
    }
}
