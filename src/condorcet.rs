//! Pairwise preference counts and Copeland scoring.

use crate::model::{Ballot, Candidate};
use crate::tabulator::live_candidates;
use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};

/// `get(a, b)` is the number of ballots ranking `a` ahead of `b`.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceMatrix {
    candidates: Vec<Candidate>,
    counts: HashMap<(Candidate, Candidate), u64>,
}

impl PreferenceMatrix {
    pub fn from_ballots(ballots: &[Ballot]) -> Self {
        let candidates = live_candidates(ballots);
        let mut counts = HashMap::new();

        for (runner, opponent) in candidates.iter().tuple_combinations() {
            let mut for_runner = 0;
            let mut for_opponent = 0;
            for ballot in ballots {
                if ballot.outranks(runner, opponent) {
                    for_runner += 1;
                } else if ballot.outranks(opponent, runner) {
                    for_opponent += 1;
                }
            }
            counts.insert((runner.clone(), opponent.clone()), for_runner);
            counts.insert((opponent.clone(), runner.clone()), for_opponent);
        }

        PreferenceMatrix { candidates, counts }
    }

    /// In order of first appearance on the ballots.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn get(&self, runner: &Candidate, opponent: &Candidate) -> u64 {
        self.counts
            .get(&(runner.clone(), opponent.clone()))
            .copied()
            .unwrap_or(0)
    }

    pub fn margin(&self, runner: &Candidate, opponent: &Candidate) -> i64 {
        self.get(runner, opponent) as i64 - self.get(opponent, runner) as i64
    }
}

/// One point per pairwise win, half a point per pairwise tie.
pub fn copeland(matrix: &PreferenceMatrix) -> BTreeMap<Candidate, f64> {
    let mut scores: BTreeMap<Candidate, f64> =
        matrix.candidates().iter().map(|c| (c.clone(), 0.0)).collect();

    for (runner, opponent) in matrix.candidates().iter().tuple_combinations() {
        let (r, o) = match matrix.margin(runner, opponent) {
            m if m > 0 => (1.0, 0.0),
            m if m < 0 => (0.0, 1.0),
            _ => (0.5, 0.5),
        };
        *scores.entry(runner.clone()).or_insert(0.0) += r;
        *scores.entry(opponent.clone()).or_insert(0.0) += o;
    }

    scores
}

/// Copeland leader; ties go to the lexicographically first candidate.
pub fn copeland_leader(scores: &BTreeMap<Candidate, f64>) -> Option<(&Candidate, f64)> {
    scores.iter().fold(None, |best, (c, &s)| match best {
        Some((_, b)) if s <= b => best,
        _ => Some((c, s)),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct CondorcetOutcome {
    pub matrix: PreferenceMatrix,
    pub copeland: BTreeMap<Candidate, f64>,
    /// Set only if the leader beats every other candidate head to head.
    pub winner: Option<Candidate>,
    pub leader: Option<Candidate>,
}

pub fn condorcet(ballots: &[Ballot]) -> CondorcetOutcome {
    let matrix = PreferenceMatrix::from_ballots(ballots);
    let copeland = copeland(&matrix);
    let leader = copeland_leader(&copeland).map(|(c, s)| (c.clone(), s));
    let beats_all = (matrix.candidates().len().saturating_sub(1)) as f64;

    let winner = match &leader {
        Some((c, s)) if *s == beats_all => Some(c.clone()),
        _ => None,
    };

    CondorcetOutcome {
        winner,
        leader: leader.map(|(c, _)| c),
        matrix,
        copeland,
    }
}

pub fn condorcet_winner(ballots: &[Ballot]) -> Option<Candidate> {
    condorcet(ballots).winner
}

#[cfg(test)]
mod condorcet_test {
    use super::*;
    use crate::tabulator::test_util::*;

    #[test]
    fn matrix_counts() {
        let b = ballots(&[(&["A", "B", "C"], 3), (&["B", "A"], 2), (&["C"], 1)]);
        let m = PreferenceMatrix::from_ballots(&b);

        assert_eq!(names(m.candidates()), vec!["A", "B", "C"]);
        assert_eq!(m.get(&"A".into(), &"B".into()), 3);
        assert_eq!(m.get(&"B".into(), &"A".into()), 2);
        assert_eq!(m.get(&"A".into(), &"C".into()), 3);
        assert_eq!(m.get(&"C".into(), &"A".into()), 0);
        assert_eq!(m.margin(&"B".into(), &"A".into()), -1);
    }

    #[test]
    fn winner_beats_everyone() {
        let b = ballots(&[(&["A", "B", "C"], 4), (&["B", "C", "A"], 2), (&["C", "A", "B"], 1)]);
        let outcome = condorcet(&b);

        assert_eq!(outcome.winner, Some(Candidate::from("A")));
        assert_eq!(outcome.copeland[&Candidate::from("A")], 2.0);
    }

    #[test]
    fn cycle_has_no_winner() {
        let b = ballots(&[(&["A", "B", "C"], 1), (&["B", "C", "A"], 1), (&["C", "A", "B"], 1)]);
        let outcome = condorcet(&b);

        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.leader, Some(Candidate::from("A")));
        assert!(outcome.copeland.values().all(|s| *s == 1.0));
    }

    #[test]
    fn ties_score_half() {
        let b = ballots(&[(&["A", "B"], 1), (&["B", "A"], 1)]);
        let scores = copeland(&PreferenceMatrix::from_ballots(&b));
        assert_eq!(scores[&Candidate::from("A")], 0.5);
        assert_eq!(scores[&Candidate::from("B")], 0.5);
        assert_eq!(condorcet_winner(&b), None);
    }
}
