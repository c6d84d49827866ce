use colored::*;
use ranked_tally::formats::{self, read_vote_map};
use ranked_tally::util::write_serialized;
use std::error::Error;
use std::path::Path;

/// Write an STV ballot file equivalent to a party-list vote map
pub fn pr2stv(vote_map_file: &Path, output: &Path, seats: usize) -> Result<(), Box<dyn Error>> {
    let votes = read_vote_map(vote_map_file)?;
    let records = formats::pr2stv(&votes, seats)?;
    write_serialized(output, &records)?;

    println!(
        "✅ Wrote {} ballot records for {} seats: {}",
        records.len().to_string().bright_yellow(),
        seats,
        output.display().to_string().bright_green()
    );

    Ok(())
}
