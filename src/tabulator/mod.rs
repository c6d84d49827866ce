//! Round-by-round tabulation of ranked ballots.

use crate::model::{Ballot, Candidate, Round, Scores, TabulationResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub mod bottom_up;
pub mod btr_irv;
pub mod stv;

pub use bottom_up::bottom_up;
pub use btr_irv::btr_irv;
pub use stv::stv;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TabulationError {
    #[error("No ballots to tabulate")]
    NoBallots,
    #[error("Ballot {ballot} ranks {candidate} more than once")]
    DuplicateCandidate { ballot: usize, candidate: Candidate },
    #[error("Ballot {ballot} has weight {weight}, weights must be finite and non-negative")]
    InvalidWeight { ballot: usize, weight: f64 },
    #[error("At least one seat must be filled")]
    NoSeats,
    #[error("Cannot fill {seats} seats from {candidates} candidates")]
    TooManySeats { seats: usize, candidates: usize },
    #[error("{method} elects a single seat, {seats} requested")]
    UnsupportedSeats {
        method: TabulationMethod,
        seats: usize,
    },
    #[error("No live candidates remain on any ballot")]
    NoCandidates,
}

pub type Result<T> = std::result::Result<T, TabulationError>;

/// Slack allowed when comparing summed fractional weights.
pub(crate) const SCORE_EPSILON: f64 = 1e-9;

/// Tabulation method for ranked ballots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabulationMethod {
    /// Single transferable vote with Droop quota and fractional surplus transfer
    Stv,
    /// Eliminate the last-place candidate until only the seats remain
    BottomUp,
    /// Bottom-two runoff instant runoff voting
    BottomTwoRunoff,
}

impl fmt::Display for TabulationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabulationMethod::Stv => write!(f, "STV"),
            TabulationMethod::BottomUp => write!(f, "bottom-up RCV"),
            TabulationMethod::BottomTwoRunoff => write!(f, "BTR-IRV"),
        }
    }
}

/// Tabulation options
#[derive(Debug, Clone)]
pub struct TabulationOptions {
    pub method: TabulationMethod,
    pub seats: usize,
}

impl Default for TabulationOptions {
    fn default() -> Self {
        Self {
            method: TabulationMethod::Stv,
            seats: 1,
        }
    }
}

/// Run the configured method over `ballots`, which the run takes ownership of.
pub fn tabulate(ballots: Vec<Ballot>, options: &TabulationOptions) -> Result<TabulationResult> {
    match options.method {
        TabulationMethod::Stv => stv(ballots, options.seats),
        TabulationMethod::BottomUp => bottom_up(ballots, options.seats),
        TabulationMethod::BottomTwoRunoff => {
            if options.seats != 1 {
                return Err(TabulationError::UnsupportedSeats {
                    method: options.method,
                    seats: options.seats,
                });
            }
            btr_irv(ballots)
        }
    }
}

/// Every candidate ranked on any ballot, in order of first appearance.
pub fn live_candidates(ballots: &[Ballot]) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for ballot in ballots {
        for candidate in ballot.ranking() {
            if seen.insert(candidate) {
                candidates.push(candidate.clone());
            }
        }
    }

    candidates
}

/// Checks run before any round loop starts. Returns the candidate list.
pub(crate) fn check_preconditions(ballots: &[Ballot], seats: usize) -> Result<Vec<Candidate>> {
    if ballots.is_empty() {
        return Err(TabulationError::NoBallots);
    }

    for (i, ballot) in ballots.iter().enumerate() {
        if let Some(candidate) = ballot.first_duplicate() {
            return Err(TabulationError::DuplicateCandidate {
                ballot: i,
                candidate: candidate.clone(),
            });
        }
        if !ballot.weight().is_finite() || ballot.weight() < 0.0 {
            return Err(TabulationError::InvalidWeight {
                ballot: i,
                weight: ballot.weight(),
            });
        }
    }

    if seats == 0 {
        return Err(TabulationError::NoSeats);
    }

    let candidates = live_candidates(ballots);
    if seats > candidates.len() {
        return Err(TabulationError::TooManySeats {
            seats,
            candidates: candidates.len(),
        });
    }

    Ok(candidates)
}

/// Sum ballot weights by top live choice. Exhausted ballots count for nobody.
pub(crate) fn weighted_scores(ballots: &[Ballot]) -> Scores {
    let mut scores = Scores::new();
    for ballot in ballots {
        if let Some(top) = ballot.top_live_choice() {
            *scores.entry(top.clone()).or_insert(0.0) += ballot.weight();
        }
    }
    scores
}

/// One vote per ballot for its top live choice, with every candidate in
/// `seed` present even at zero.
pub(crate) fn plurality_scores<'a>(
    ballots: &[Ballot],
    seed: impl IntoIterator<Item = &'a Candidate>,
) -> Scores {
    let mut scores: Scores = seed.into_iter().map(|c| (c.clone(), 0.0)).collect();
    for ballot in ballots {
        if let Some(top) = ballot.top_live_choice() {
            *scores.entry(top.clone()).or_insert(0.0) += 1.0;
        }
    }
    scores
}

pub(crate) fn exhausted_count(ballots: &[Ballot]) -> usize {
    ballots.iter().filter(|b| b.is_exhausted()).count()
}

pub(crate) fn exhausted_weight(ballots: &[Ballot]) -> f64 {
    ballots
        .iter()
        .filter(|b| b.is_exhausted())
        .map(|b| b.weight())
        .sum()
}

/// Highest score; ties go to the lexicographically first candidate.
pub(crate) fn leader(scores: &Scores) -> Option<(&Candidate, f64)> {
    // BTreeMap iterates in candidate order, so only a strictly greater score replaces.
    scores.iter().fold(None, |best, (c, &s)| match best {
        Some((_, b)) if s <= b => best,
        _ => Some((c, s)),
    })
}

pub(crate) fn min_score(scores: &Scores) -> Option<f64> {
    scores.values().copied().reduce(f64::min)
}

pub(crate) fn remove_everywhere(ballots: &mut [Ballot], candidate: &Candidate) {
    for ballot in ballots.iter_mut() {
        ballot.remove(candidate);
    }
}

pub(crate) fn log_round(method: TabulationMethod, number: usize, round: &Round) {
    log::debug!(
        "{} round {}: scores={:?} elected={:?} eliminated={:?} exhausted={}",
        method,
        number,
        round.scores,
        round.winners,
        round.losers,
        round.exhausted_count
    );
}
