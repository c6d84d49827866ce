use super::{
    check_preconditions, exhausted_count, exhausted_weight, leader, log_round, min_score,
    remove_everywhere, weighted_scores, Result, TabulationMethod, SCORE_EPSILON,
};
use crate::model::{Ballot, Candidate, Round, Scores, TabulationResult};
use crate::model::round::by_score_desc;

/// Droop quota: the smallest whole number of votes that only `seats`
/// candidates can reach.
pub fn droop_quota(ballot_count: usize, seats: usize) -> f64 {
    (ballot_count / (seats + 1) + 1) as f64
}

/// Single transferable vote.
///
/// Each round either elects the leader, if it reaches the quota, and passes
/// the surplus fraction of its ballots on to their next preference, or
/// eliminates every candidate tied for last place. Scores within
/// `SCORE_EPSILON` of the quota, or of each other, count as equal. If the live candidates
/// run out first, the remaining seats go to the eliminated candidates with
/// the highest score at elimination.
pub fn stv(mut ballots: Vec<Ballot>, seats: usize) -> Result<TabulationResult> {
    check_preconditions(&ballots, seats)?;

    let threshold = droop_quota(ballots.len(), seats);
    let mut winners: Vec<Candidate> = Vec::new();
    let mut rounds: Vec<Round> = Vec::new();
    let mut eliminated = Scores::new();

    log::info!(
        "STV: {} ballots, {} seats, quota {}",
        ballots.len(),
        seats,
        threshold
    );

    while winners.len() < seats {
        let scores = weighted_scores(&ballots);

        let (top, top_score) = match leader(&scores) {
            Some((top, score)) => (top.clone(), score),
            None => {
                let fallback = fallback_winners(&eliminated, &winners, seats - winners.len());
                log::info!("STV: no live candidates left, seating {:?}", fallback);
                winners.extend(fallback);
                break;
            }
        };

        let (round_winners, round_losers) = if top_score + SCORE_EPSILON >= threshold {
            let surplus = ((top_score - threshold) / top_score).max(0.0);
            for ballot in ballots.iter_mut() {
                if ballot.top_live_choice() == Some(&top) {
                    ballot.scale_weight(surplus);
                }
                // also from ballots ranking it lower, or it could be elected twice
                ballot.remove(&top);
            }
            winners.push(top.clone());
            (vec![top], Vec::new())
        } else {
            let worst = min_score(&scores).unwrap_or(0.0);
            let losers: Vec<Candidate> = scores
                .iter()
                .filter(|(_, &s)| s <= worst + SCORE_EPSILON)
                .map(|(c, _)| c.clone())
                .collect();

            for loser in &losers {
                eliminated.insert(loser.clone(), worst);
                remove_everywhere(&mut ballots, loser);
            }
            (Vec::new(), losers)
        };

        let round = Round {
            scores,
            winners: round_winners,
            losers: round_losers,
            ballot_count: ballots.len(),
            exhausted_count: exhausted_count(&ballots),
            exhausted_weight: exhausted_weight(&ballots),
        };
        log_round(TabulationMethod::Stv, rounds.len() + 1, &round);
        rounds.push(round);
    }

    Ok(TabulationResult {
        winners,
        rounds,
        ballots,
    })
}

/// Up to `needed` eliminated candidates, best score at elimination first.
fn fallback_winners(eliminated: &Scores, already: &[Candidate], needed: usize) -> Vec<Candidate> {
    let mut pool: Vec<_> = eliminated
        .iter()
        .filter(|(c, _)| !already.contains(c))
        .collect();
    pool.sort_by(|a, b| by_score_desc(*a, *b));
    pool.into_iter().take(needed).map(|(c, _)| c.clone()).collect()
}
