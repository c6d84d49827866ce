use super::{ContestReport, ResultSummary, RoundResult};
use crate::model::{Candidate, TabulationResult};
use crate::tabulator::{live_candidates, TabulationMethod};

/// Candidates as they stood before tabulation, recovered by resetting a copy
/// of the final ballots.
pub fn initial_candidates(result: &TabulationResult) -> Vec<Candidate> {
    let mut ballots = result.ballots.clone();
    for ballot in ballots.iter_mut() {
        ballot.reset();
    }
    live_candidates(&ballots)
}

/// Generate a complete contest report from a finished tabulation
pub fn generate_contest_report(
    method: TabulationMethod,
    seats: usize,
    result: &TabulationResult,
) -> ContestReport {
    let results = result
        .rounds
        .iter()
        .enumerate()
        .map(|(i, round)| RoundResult {
            round: i + 1,
            tally: round.scores.clone(),
            elected: round.winners.clone(),
            eliminated: round.losers.clone(),
            exhausted: round.exhausted_count,
        })
        .collect();

    let summary = ResultSummary {
        winners: result.winners.clone(),
        total_rounds: result.rounds.len(),
        total_ballots: result.ballot_count(),
    };

    ContestReport {
        method,
        ballot_count: result.ballot_count(),
        seats,
        candidates: initial_candidates(result),
        results,
        summary,
    }
}
