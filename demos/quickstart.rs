//! Minimal end-to-end example for `encore-rating`.
//!
//! Rates a new concert against a small library by scripting the judgments
//! a user would normally give interactively.
//!
//! To run: `cargo run --example quickstart`

use encore_rating::{Bracket, ComparisonSession, RatedConcert};

fn main() {
    // The user's existing rated concerts — in the real app this snapshot
    // comes from storage.
    let library = vec![
        RatedConcert::new("lcd-2023", "LCD Soundsystem", 8.8),
        RatedConcert::new("national-2024", "The National", 7.4),
        RatedConcert::new("beach-house-2024", "Beach House", 6.2),
    ];

    // New concert, user says it was "good".
    let mut session = ComparisonSession::new("radiohead-2025", Bracket::Good, &library);

    // Walk the comparison loop. Here we script the answers; the CLI asks the
    // user one question at a time instead.
    let verdicts = [
        ("lcd-2023", false),        // not better than LCD Soundsystem
        ("national-2024", true),    // better than The National
        ("beach-house-2024", true), // better than Beach House (the anchor)
    ];
    let mut verdicts = verdicts.iter();
    while let Some(candidate) = session.current_candidate() {
        let id = candidate.id.clone();
        let (expected_id, was_better) = verdicts.next().expect("scripted verdict");
        assert_eq!(*expected_id, id);
        let was_better = *was_better;
        println!("better than {}? {}", id, was_better);
        session
            .record_judgment(&id, was_better)
            .expect("judgment for current candidate");
    }

    let rating = session.final_rating().expect("session complete");
    println!("final rating: {rating:.1}");
}
