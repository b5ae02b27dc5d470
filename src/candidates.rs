//! Candidate selection for the comparison loop.
//!
//! Picks which previously rated concerts the new one gets compared against.
//! Same-bracket peers give fine-grained placement; when the bracket is empty
//! the nearest concerts by rating stand in; a couple of cross-bracket anchors
//! keep the comparison set from floating free of the rest of the scale.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::bracket::Bracket;
use crate::concert::RatedConcert;

/// Cross-bracket anchors appended when same-bracket peers exist.
const MAX_ANCHORS: usize = 2;

/// How many nearest-by-rating concerts to take when the bracket is empty.
const NEAREST_FALLBACK: usize = 5;

/// Build the ordered comparison candidate list for a new concert.
///
/// `exclude_id` is the concert being rated; it never appears in the output,
/// and duplicate ids in the snapshot are dropped (first occurrence wins).
///
/// The returned list is not capped at 5 when same-bracket peers exist — the
/// session itself caps interactive comparisons.
pub fn select_candidates(
    existing: &[RatedConcert],
    bracket: Bracket,
    exclude_id: &str,
) -> Vec<RatedConcert> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut same_bracket: Vec<&RatedConcert> = Vec::new();
    let mut other_brackets: Vec<&RatedConcert> = Vec::new();

    for c in existing {
        if c.id == exclude_id || !seen.insert(c.id.as_str()) {
            continue;
        }
        if c.effective_bracket() == bracket {
            same_bracket.push(c);
        } else {
            other_brackets.push(c);
        }
    }

    let midpoint = bracket.midpoint();

    let candidates: Vec<RatedConcert> = if !same_bracket.is_empty() {
        // Same-bracket peers first, then the closest cross-bracket anchors.
        sort_by_distance(&mut other_brackets, midpoint);
        same_bracket
            .into_iter()
            .chain(other_brackets.into_iter().take(MAX_ANCHORS))
            .cloned()
            .collect()
    } else {
        // Nothing rated in this bracket yet: fall back to the concerts whose
        // ratings sit nearest the bracket midpoint, whatever their bracket.
        sort_by_distance(&mut other_brackets, midpoint);
        other_brackets
            .into_iter()
            .take(NEAREST_FALLBACK)
            .cloned()
            .collect()
    };

    debug!(
        bracket = %bracket,
        count = candidates.len(),
        "selected comparison candidates"
    );
    candidates
}

fn sort_by_distance(concerts: &mut [&RatedConcert], midpoint: f64) {
    concerts.sort_by(|a, b| {
        let da = (a.rating - midpoint).abs();
        let db = (b.rating - midpoint).abs();
        da.partial_cmp(&db)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn concert(id: &str, rating: f64) -> RatedConcert {
        RatedConcert::new(id, format!("artist-{id}"), rating)
    }

    #[test]
    fn empty_snapshot_yields_no_candidates() {
        assert!(select_candidates(&[], Bracket::Ok, "new").is_empty());
    }

    #[test]
    fn same_bracket_peers_come_first_then_anchors() {
        let existing = vec![
            concert("g1", 8.0),
            concert("g2", 9.5),
            concert("b1", 2.0),
            concert("o1", 5.5),
            concert("o2", 6.3),
            concert("o3", 6.8),
        ];
        let got = select_candidates(&existing, Bracket::Good, "new");

        let ids: Vec<&str> = got.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(&ids[..2], &["g1", "g2"]);
        assert_eq!(ids.len(), 4);
        // Anchors are the two non-Good concerts nearest 8.5.
        assert_eq!(&ids[2..], &["o3", "o2"]);
    }

    #[test]
    fn anchor_count_never_exceeds_two() {
        let existing = vec![
            concert("g1", 7.5),
            concert("b1", 1.0),
            concert("b2", 2.0),
            concert("b3", 3.0),
            concert("o1", 5.0),
        ];
        let got = select_candidates(&existing, Bracket::Good, "new");
        assert_eq!(got.len(), 3); // 1 peer + 2 anchors
    }

    #[test]
    fn empty_bracket_falls_back_to_five_nearest_midpoint() {
        // Rating Good (midpoint 8.5) with nothing in Good yet.
        let existing = vec![
            concert("a", 6.9),
            concert("b", 6.0),
            concert("c", 5.0),
            concert("d", 4.0),
            concert("e", 3.0),
            concert("f", 1.0),
        ];
        let got = select_candidates(&existing, Bracket::Good, "new");
        let ids: Vec<&str> = got.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn excludes_new_concert_and_duplicate_ids() {
        let existing = vec![
            concert("new", 8.0),
            concert("x", 7.5),
            concert("x", 9.0),
            concert("y", 8.8),
        ];
        let got = select_candidates(&existing, Bracket::Good, "new");
        let ids: Vec<&str> = got.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert!(!ids.contains(&"new"));
        let unique: HashSet<&&str> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn stored_bracket_overrides_rating_when_partitioning() {
        // Rating says Good, stored bracket says Ok — it partitions as Ok.
        let mut edited = concert("e", 8.0);
        edited.bracket = Some(Bracket::Ok);
        let existing = vec![edited, concert("o", 5.5)];

        let got = select_candidates(&existing, Bracket::Ok, "new");
        let ids: Vec<&str> = got.iter().map(|c| c.id.as_str()).collect();
        assert!(ids.contains(&"e"));
        assert!(ids.contains(&"o"));
    }
}
