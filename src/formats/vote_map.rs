use super::{BallotRecord, FormatError, Result};
use crate::model::Candidate;
use crate::proportional::{SeatMap, VoteMap};
use crate::util::read_serialized;
use std::path::Path;

/// Resolution of the vote shares written by `pr2stv`.
const SHARE_SCALE: u128 = 100_000;

pub fn read_vote_map(path: &Path) -> Result<VoteMap> {
    Ok(read_serialized(path)?)
}

pub fn read_seat_map(path: &Path) -> Result<SeatMap> {
    Ok(read_serialized(path)?)
}

fn trailing_zeros(mut n: u64) -> u32 {
    let mut zeros = 0;
    while n != 0 && n % 10 == 0 {
        n /= 10;
        zeros += 1;
    }
    zeros
}

/// Turn party votes into party-list ballots for STV.
///
/// Each party gets one record ranking its own `seats` list candidates
/// (`"<party> #1"`, `"<party> #2"`, ...), counted by the party's vote share
/// in units of 1/100000, reduced by the largest common power of ten.
pub fn pr2stv(votes: &VoteMap, seats: usize) -> Result<Vec<BallotRecord>> {
    if seats == 0 {
        return Err(FormatError::NoSeats);
    }
    let total: u64 = votes.values().sum();
    if total == 0 {
        return Err(FormatError::NoVotes);
    }

    let mut records: Vec<BallotRecord> = votes
        .iter()
        .map(|(party, &v)| BallotRecord {
            ranking: (1..=seats)
                .map(|i| Candidate::new(format!("{} #{}", party, i)))
                .collect(),
            count: (v as u128 * SHARE_SCALE / total as u128) as u64,
        })
        .collect();

    let common = records
        .iter()
        .filter(|r| r.count != 0)
        .map(|r| trailing_zeros(r.count))
        .min()
        .unwrap_or(0);
    let divisor = 10u64.pow(common);
    for record in records.iter_mut() {
        record.count /= divisor;
    }

    Ok(records)
}
