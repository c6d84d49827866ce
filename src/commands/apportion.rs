use colored::*;
use ranked_tally::formats::{read_seat_map, read_vote_map};
use ranked_tally::proportional::{self, ApportionMethod};
use ranked_tally::reports::render_apportionment;
use std::error::Error;
use std::path::Path;

pub fn apportion(
    vote_map_file: &Path,
    seats: usize,
    method: ApportionMethod,
) -> Result<(), Box<dyn Error>> {
    let votes = read_vote_map(vote_map_file)?;

    println!(
        "🏛️  Apportioning {} seats among {} parties by {}",
        seats.to_string().bright_yellow(),
        votes.len(),
        method.to_string().bright_cyan()
    );

    let result = proportional::apportion(method, &votes, seats)?;
    println!("{}", render_apportionment(&votes, &result));

    Ok(())
}

pub fn mmp(
    vote_map_file: &Path,
    district_seats_file: &Path,
    seats: Option<usize>,
) -> Result<(), Box<dyn Error>> {
    let votes = read_vote_map(vote_map_file)?;
    let districts = read_seat_map(district_seats_file)?;

    let result = proportional::mmp(&votes, &districts, seats)?;
    println!(
        "🏛️  Mixed-member chamber of {} seats ({} district seats)",
        result.values().sum::<usize>().to_string().bright_yellow(),
        districts.values().sum::<usize>()
    );
    println!("{}", render_apportionment(&votes, &result));

    Ok(())
}
