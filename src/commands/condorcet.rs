use colored::*;
use ranked_tally::condorcet::condorcet;
use ranked_tally::formats::read_ballots;
use ranked_tally::reports::{render_copeland, render_matrix};
use std::error::Error;
use std::path::Path;

pub fn condorcet_file(ballot_file: &Path, diff: bool) -> Result<(), Box<dyn Error>> {
    let ballots = read_ballots(ballot_file)?;
    let outcome = condorcet(&ballots);

    println!("📊 Preference matrix:");
    println!("{}", render_matrix(&outcome.matrix, diff));
    println!();
    println!("{}", render_copeland(&outcome.copeland));
    println!();

    match (&outcome.winner, &outcome.leader) {
        (Some(winner), _) => println!(
            "✅ Condorcet winner found: {}",
            winner.to_string().bright_green().bold()
        ),
        (None, Some(leader)) => println!(
            "⚠️  No Condorcet winner (most pairwise wins is {})",
            leader.to_string().bright_yellow()
        ),
        (None, None) => println!("⚠️  No candidates ranked"),
    }

    Ok(())
}
