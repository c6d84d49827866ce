use super::ballot::{Ballot, Candidate};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Accumulated ballot weight per candidate for one round.
pub type Scores = BTreeMap<Candidate, f64>;

/// Score descending, then candidate ascending.
pub(crate) fn by_score_desc(a: (&Candidate, &f64), b: (&Candidate, &f64)) -> Ordering {
    b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0))
}

/// Snapshot of a single tabulation round. Never mutated once recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Round {
    pub scores: Scores,
    pub winners: Vec<Candidate>,
    pub losers: Vec<Candidate>,
    /// Size of the ballot collection the round was tallied over.
    pub ballot_count: usize,
    pub exhausted_count: usize,
    /// Total weight held by exhausted ballots after the round.
    pub exhausted_weight: f64,
}

impl Round {
    /// Candidates ordered most-votes first, ties by identifier.
    pub fn ranked_scores(&self) -> Vec<(&Candidate, f64)> {
        let mut ranked: Vec<_> = self.scores.iter().collect();
        ranked.sort_by(|a, b| by_score_desc(*a, *b));
        ranked.into_iter().map(|(c, s)| (c, *s)).collect()
    }

    pub fn total_score(&self) -> f64 {
        self.scores.values().sum()
    }

    /// Fraction of all ballots held by `score`.
    pub fn share(&self, score: f64) -> f64 {
        score / self.ballot_count as f64
    }

    pub fn elected(&self, candidate: &Candidate) -> bool {
        self.winners.contains(candidate)
    }
}

/// Outcome of one tabulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct TabulationResult {
    /// In the order elected.
    pub winners: Vec<Candidate>,
    pub rounds: Vec<Round>,
    /// Ballot collection as left by the final round.
    pub ballots: Vec<Ballot>,
}

impl TabulationResult {
    pub fn ballot_count(&self) -> usize {
        self.ballots.len()
    }
}
