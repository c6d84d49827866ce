extern crate quickcheck;
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

use quickcheck::{Arbitrary, Gen};
use ranked_tally::tabulator::{live_candidates, stv::droop_quota};
use ranked_tally::{tabulate, Ballot, Candidate, TabulationMethod, TabulationOptions};
use std::collections::HashSet;

const NAMES: [&str; 5] = ["A", "B", "C", "D", "E"];

/// Matches the slack the STV engine allows on summed weights.
const TOLERANCE: f64 = 1e-9;

/// A small election whose seat count never exceeds its candidate count.
#[derive(Clone, Debug)]
struct Election {
    ballots: Vec<Ballot>,
    seats: usize,
}

impl Election {
    fn candidate_count(&self) -> usize {
        live_candidates(&self.ballots).len()
    }

    fn run(&self, method: TabulationMethod, seats: usize) -> ranked_tally::TabulationResult {
        let options = TabulationOptions { method, seats };
        tabulate(self.ballots.clone(), &options).unwrap()
    }
}

impl Arbitrary for Election {
    fn arbitrary(g: &mut Gen) -> Self {
        let ballot_count = 1 + usize::arbitrary(g) % 40;
        let mut ballots = Vec::with_capacity(ballot_count);

        for _ in 0..ballot_count {
            let length = 1 + usize::arbitrary(g) % NAMES.len();
            let mut remaining: Vec<&str> = NAMES.to_vec();
            let mut ranking = Vec::with_capacity(length);
            for _ in 0..length {
                let i = usize::arbitrary(g) % remaining.len();
                ranking.push(Candidate::from(remaining.remove(i)));
            }
            ballots.push(Ballot::new(ranking));
        }

        let candidates = live_candidates(&ballots).len();
        let seats = 1 + usize::arbitrary(g) % candidates.min(3);

        Election { ballots, seats }
    }
}

#[quickcheck]
fn stv_fills_every_seat(election: Election) -> bool {
    let result = election.run(TabulationMethod::Stv, election.seats);
    let unique: HashSet<_> = result.winners.iter().collect();

    result.winners.len() == election.seats && unique.len() == election.seats
}

#[quickcheck]
fn final_weights_stay_in_unit_range(election: Election) -> bool {
    let result = election.run(TabulationMethod::Stv, election.seats);

    result
        .ballots
        .iter()
        .all(|b| b.weight() >= 0.0 && b.weight() <= 1.0)
}

#[quickcheck]
fn exhaustion_is_permanent(election: Election) -> bool {
    let result = election.run(TabulationMethod::Stv, election.seats);

    result
        .rounds
        .windows(2)
        .all(|w| w[0].exhausted_count <= w[1].exhausted_count)
}

#[quickcheck]
fn elected_candidates_reach_quota(election: Election) -> bool {
    let quota = droop_quota(election.ballots.len(), election.seats);
    let result = election.run(TabulationMethod::Stv, election.seats);

    result.rounds.iter().all(|round| {
        if round.winners.is_empty() {
            round.scores.values().all(|&s| s + TOLERANCE < quota)
        } else {
            round.winners.iter().all(|w| round.scores[w] + TOLERANCE >= quota)
        }
    })
}

/// Weight only leaves the count through a quota handed to a winner. Between
/// rounds, live plus exhausted weight drops by exactly one quota per
/// election and is unchanged by eliminations.
#[quickcheck]
fn weight_is_conserved(election: Election) -> bool {
    let n = election.ballots.len() as f64;
    let quota = droop_quota(election.ballots.len(), election.seats);
    let result = election.run(TabulationMethod::Stv, election.seats);
    let close = |a: f64, b: f64| (a - b).abs() < 1e-6;

    let mut exhausted_before = 0.0;
    for pair in result.rounds.windows(2) {
        let (this, next) = (&pair[0], &pair[1]);
        let elected = this.winners.len() as f64;
        let expected = this.total_score() + exhausted_before - quota * elected;
        if !close(next.total_score() + this.exhausted_weight, expected) {
            return false;
        }
        exhausted_before = this.exhausted_weight;
    }

    let quota_winners: usize = result.rounds.iter().map(|r| r.winners.len()).sum();
    let remaining: f64 = result.ballots.iter().map(|b| b.weight()).sum();
    close(remaining, n - quota * quota_winners as f64)
}

#[quickcheck]
fn round_totals_never_exceed_ballots(election: Election) -> bool {
    let n = election.ballots.len() as f64;
    let result = election.run(TabulationMethod::Stv, election.seats);

    result.rounds.iter().all(|r| r.total_score() <= n + 1e-9)
}

#[quickcheck]
fn every_round_removes_a_candidate(election: Election) -> bool {
    let candidates = election.candidate_count();

    let stv = election.run(TabulationMethod::Stv, election.seats);
    let bottom_up = election.run(TabulationMethod::BottomUp, election.seats);
    let btr = election.run(TabulationMethod::BottomTwoRunoff, 1);

    stv.rounds.len() <= candidates
        && bottom_up.rounds.len() == candidates - election.seats + 1
        && btr.rounds.len() <= candidates
}

#[quickcheck]
fn bottom_up_elects_exactly_the_seats(election: Election) -> bool {
    let result = election.run(TabulationMethod::BottomUp, election.seats);

    result.winners.len() == election.seats
        && result.rounds[..result.rounds.len() - 1]
            .iter()
            .all(|r| r.losers.len() == 1 && r.winners.is_empty())
}

#[quickcheck]
fn btr_elects_one(election: Election) -> bool {
    let result = election.run(TabulationMethod::BottomTwoRunoff, 1);
    let last = &result.rounds[result.rounds.len() - 1];

    result.winners.len() == 1 && last.winners == result.winners
}
