use colored::*;
use instant::Instant;
use ranked_tally::formats::read_ballots;
use ranked_tally::reports::{generate_contest_report, render_result};
use ranked_tally::{tabulate, TabulationOptions};
use std::error::Error;
use std::path::Path;

/// Tabulate a ballot file with one of the ranked methods and print each round
pub fn tabulate_file(
    ballot_file: &Path,
    options: &TabulationOptions,
    json: bool,
    report_path: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    let ballots = read_ballots(ballot_file)?;

    if !json {
        println!(
            "🚀 Tabulating {} ballots from {} with {} for {} seat(s)",
            ballots.len().to_string().bright_yellow(),
            ballot_file.display().to_string().bright_cyan(),
            options.method.to_string().bright_cyan(),
            options.seats
        );
    }

    let result = tabulate(ballots, options)?;
    let report = generate_contest_report(options.method, options.seats, &result);

    if let Some(path) = report_path {
        report.write(path)?;
    }

    if json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    println!("{}", render_result(&result));
    println!(
        "✅ Elected {} in {} rounds ({:.3} seconds)",
        result
            .winners
            .iter()
            .map(|w| w.to_string().bright_green().bold().to_string())
            .collect::<Vec<_>>()
            .join(", "),
        result.rounds.len().to_string().bright_yellow(),
        start.elapsed().as_secs_f64()
    );
    if let Some(path) = report_path {
        println!("📁 Report written to {}", path.display().to_string().bright_green());
    }

    Ok(())
}
