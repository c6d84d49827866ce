//! Input files: ranked ballot records and party vote maps.

use crate::model::Candidate;
use crate::util::FileError;

pub mod ballots;
pub mod vote_map;

pub use ballots::{expand_records, parse_ballots, read_ballots, BallotRecord};
pub use vote_map::{pr2stv, read_seat_map, read_vote_map};

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error(transparent)]
    File(#[from] FileError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Ballot record {record} ranks {candidate} more than once")]
    DuplicateCandidate { record: usize, candidate: Candidate },
    #[error("Ballot file contains no ballots")]
    NoBallots,
    #[error("Vote map contains no votes")]
    NoVotes,
    #[error("At least one seat is required")]
    NoSeats,
}

pub type Result<T> = std::result::Result<T, FormatError>;
