#![forbid(unsafe_code)]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use encore_rating::{
    Bracket, ComparisonSession, ConcertLibrary, RatedConcert, SessionState,
};

#[derive(Parser)]
#[command(name = "encore", version, about = "Rate concerts by pairwise comparison")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rate a new concert interactively against the library
    Rate {
        /// Path to the concert library JSON
        #[arg(long)]
        library: PathBuf,
        /// Identifier for the new concert
        #[arg(long)]
        id: String,
        /// Artist or act
        #[arg(long)]
        artist: String,
        /// Coarse quality tier: good, ok, or bad
        #[arg(long)]
        bracket: Bracket,
        #[arg(long)]
        venue: Option<String>,
        /// Concert date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Write the updated library here (defaults to in-place)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the rating without saving
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the library sorted by rating, best first
    Rankings {
        #[arg(long)]
        library: PathBuf,
    },
    /// Print the bracket table
    Brackets,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rate {
            library,
            id,
            artist,
            bracket,
            venue,
            date,
            out,
            dry_run,
        } => {
            let mut lib = ConcertLibrary::load(&library)?;
            if lib.contains(&id) {
                return Err(format!("concert '{id}' is already in the library").into());
            }

            let rating = run_comparison_loop(&id, bracket, &lib.concerts)?;
            println!("{artist}: {rating:.1} ({bracket})");

            if !dry_run {
                let concert = RatedConcert {
                    id,
                    artist,
                    rating,
                    bracket: Some(bracket),
                    venue,
                    date,
                };
                lib.add(concert)?;
                lib.save(out.as_deref().unwrap_or(library.as_path()))?;
            }
            Ok(())
        }
        Commands::Rankings { library } => {
            let lib = ConcertLibrary::load(&library)?;
            for (pos, c) in lib.ranked().iter().enumerate() {
                let when = c
                    .date
                    .map(|d| format!(" ({d})"))
                    .unwrap_or_default();
                println!("{:>3}. {:4.1}  {}{}", pos + 1, c.rating, c.artist, when);
            }
            Ok(())
        }
        Commands::Brackets => {
            println!("bracket  min   max");
            for b in Bracket::ALL {
                let (min, max) = b.bounds();
                println!("{b:<8} {min:<5} {max}");
            }
            Ok(())
        }
    }
}

/// Drive one judgment at a time over stdin: y / n / s(kip the rest).
fn run_comparison_loop(
    new_id: &str,
    bracket: Bracket,
    existing: &[RatedConcert],
) -> Result<f64, Box<dyn std::error::Error>> {
    let mut session = ComparisonSession::new(new_id, bracket, existing);
    let planned = session.comparisons_planned();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut asked = 0;

    loop {
        let (candidate_id, prompt) = match session.current_candidate() {
            Some(candidate) => {
                let venue = candidate
                    .venue
                    .as_deref()
                    .map(|v| format!(" at {v}"))
                    .unwrap_or_default();
                (
                    candidate.id.clone(),
                    format!("Better than {}{venue}?", candidate.artist),
                )
            }
            None => break,
        };

        asked += 1;
        print!("[{asked}/{planned}] {prompt} [y/n/s] ");
        io::stdout().flush()?;

        let answer = match lines.next() {
            Some(line) => line?,
            // stdin closed mid-loop: treat as skipping the rest.
            None => {
                session.skip_remaining();
                break;
            }
        };

        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => {
                session.record_judgment(&candidate_id, true)?;
            }
            "n" | "no" => {
                session.record_judgment(&candidate_id, false)?;
            }
            "s" | "skip" => {
                session.skip_remaining();
            }
            other => {
                println!("unrecognized answer '{other}', expected y, n, or s");
                asked -= 1;
            }
        }
    }

    debug_assert_eq!(session.state(), SessionState::Complete);
    Ok(session.final_rating()?)
}
