use super::{
    check_preconditions, exhausted_count, exhausted_weight, log_round, min_score,
    plurality_scores, remove_everywhere, Result, TabulationMethod,
};
use crate::model::{Ballot, Candidate, Round, Scores, TabulationResult};

/// Multi-winner ranked choice by elimination from the bottom.
///
/// One candidate is dropped per round until only `seats` remain; those are
/// elected together in a final round, listed in order of first appearance
/// on the ballots.
pub fn bottom_up(mut ballots: Vec<Ballot>, seats: usize) -> Result<TabulationResult> {
    let mut candidates = check_preconditions(&ballots, seats)?;
    let mut rounds = Vec::new();

    log::info!(
        "bottom-up RCV: {} ballots, {} candidates, {} seats",
        ballots.len(),
        candidates.len(),
        seats
    );

    while candidates.len() > seats {
        let scores = plurality_scores(&ballots, &candidates);
        // scores is seeded with every remaining candidate, so it is never empty here
        let loser = match last_place(&scores) {
            Some(loser) => loser,
            None => break,
        };

        candidates.retain(|c| c != &loser);
        remove_everywhere(&mut ballots, &loser);

        let round = Round {
            scores,
            winners: Vec::new(),
            losers: vec![loser],
            ballot_count: ballots.len(),
            exhausted_count: exhausted_count(&ballots),
            exhausted_weight: exhausted_weight(&ballots),
        };
        log_round(TabulationMethod::BottomUp, rounds.len() + 1, &round);
        rounds.push(round);
    }

    let round = Round {
        scores: plurality_scores(&ballots, &candidates),
        winners: candidates.clone(),
        losers: Vec::new(),
        ballot_count: ballots.len(),
        exhausted_count: exhausted_count(&ballots),
        exhausted_weight: exhausted_weight(&ballots),
    };
    log_round(TabulationMethod::BottomUp, rounds.len() + 1, &round);
    rounds.push(round);

    Ok(TabulationResult {
        winners: candidates,
        rounds,
        ballots,
    })
}

/// Lowest score; ties eliminate the lexicographically last candidate.
fn last_place(scores: &Scores) -> Option<Candidate> {
    let worst = min_score(scores)?;
    scores
        .iter()
        .filter(|(_, &s)| s == worst)
        .map(|(c, _)| c.clone())
        .last()
}
