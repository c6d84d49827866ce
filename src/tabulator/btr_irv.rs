use super::{
    check_preconditions, exhausted_count, exhausted_weight, leader, live_candidates, log_round,
    plurality_scores, remove_everywhere, Result, TabulationError, TabulationMethod,
};
use crate::model::round::by_score_desc;
use crate::model::{Ballot, Candidate, Round, Scores, TabulationResult};

/// Bottom-two runoff instant runoff voting, single seat.
///
/// A candidate holding more than half of all ballots wins. Otherwise the two
/// lowest scorers face each other head to head and the one fewer ballots
/// prefer is eliminated.
pub fn btr_irv(mut ballots: Vec<Ballot>) -> Result<TabulationResult> {
    check_preconditions(&ballots, 1)?;

    let threshold = (ballots.len() / 2) as f64;
    let mut rounds = Vec::new();

    log::info!(
        "BTR-IRV: {} ballots, majority above {}",
        ballots.len(),
        threshold
    );

    loop {
        let candidates = live_candidates(&ballots);
        let scores = plurality_scores(&ballots, &candidates);

        let (top, top_score) = match leader(&scores) {
            Some((top, score)) => (top.clone(), score),
            None => return Err(TabulationError::NoCandidates),
        };

        if top_score > threshold || scores.len() == 1 {
            let round = Round {
                scores,
                winners: vec![top.clone()],
                losers: Vec::new(),
                ballot_count: ballots.len(),
                exhausted_count: exhausted_count(&ballots),
                exhausted_weight: exhausted_weight(&ballots),
            };
            log_round(TabulationMethod::BottomTwoRunoff, rounds.len() + 1, &round);
            rounds.push(round);

            return Ok(TabulationResult {
                winners: vec![top],
                rounds,
                ballots,
            });
        }

        let (upper, lower) = bottom_two(&scores);
        let loser = pairwise_loser(&ballots, &upper, &lower);
        remove_everywhere(&mut ballots, &loser);

        let round = Round {
            scores,
            winners: Vec::new(),
            losers: vec![loser],
            ballot_count: ballots.len(),
            exhausted_count: exhausted_count(&ballots),
            exhausted_weight: exhausted_weight(&ballots),
        };
        log_round(TabulationMethod::BottomTwoRunoff, rounds.len() + 1, &round);
        rounds.push(round);
    }
}

/// The last two entries of the frequency ranking, higher scorer first.
/// `scores` must hold at least two candidates.
fn bottom_two(scores: &Scores) -> (Candidate, Candidate) {
    let mut ranked: Vec<_> = scores.iter().collect();
    ranked.sort_by(|a, b| by_score_desc(*a, *b));
    let n = ranked.len();
    (ranked[n - 2].0.clone(), ranked[n - 1].0.clone())
}

/// Of two candidates, the one ranked ahead on fewer of the ballots that rank
/// both. A dead heat eliminates `lower`.
pub fn pairwise_loser(ballots: &[Ballot], upper: &Candidate, lower: &Candidate) -> Candidate {
    let mut upper_wins = 0usize;
    let mut lower_wins = 0usize;

    for ballot in ballots {
        if ballot.outranks(upper, lower) {
            upper_wins += 1;
        } else if ballot.outranks(lower, upper) {
            lower_wins += 1;
        }
    }

    if upper_wins < lower_wins {
        upper.clone()
    } else {
        lower.clone()
    }
}

#[cfg(test)]
mod btr_irv_test {
    use super::*;
    use crate::tabulator::test_util::*;

    #[test]
    fn majority_wins_first_round() {
        let b = ballots(&[(&["A", "B"], 3), (&["B", "A"], 2)]);
        let result = btr_irv(b).unwrap();

        assert_eq!(names(&result.winners), vec!["A"]);
        assert_eq!(result.rounds.len(), 1);
    }

    #[test]
    fn exact_half_is_not_a_majority() {
        let b = ballots(&[(&["A"], 2), (&["B", "A"], 1), (&["C", "B"], 1)]);
        let result = btr_irv(b).unwrap();

        // A holds 2 of 4, not more than half
        assert!(result.rounds[0].winners.is_empty());
        assert_eq!(names(&result.winners), vec!["A"]);
    }

    #[test]
    fn pairwise_loser_beats_plurality_order() {
        // D and C are the bottom two; C has fewer first preferences but
        // beats D head to head, so D goes.
        let b = ballots(&[
            (&["A", "C", "D"], 8),
            (&["B", "C"], 7),
            (&["D", "C"], 4),
            (&["C", "D"], 3),
        ]);
        let result = btr_irv(b).unwrap();

        let first = &result.rounds[0];
        assert_eq!(first.scores[&Candidate::from("D")], 4.0);
        assert_eq!(first.scores[&Candidate::from("C")], 3.0);
        assert_eq!(names(&first.losers), vec!["D"]);
    }

    #[test]
    fn pairwise_loser_ignores_ballots_missing_either() {
        let b = ballots(&[(&["X", "A"], 5), (&["A", "B"], 1), (&["B", "A"], 2)]);
        assert_eq!(
            pairwise_loser(&b, &"A".into(), &"B".into()),
            Candidate::from("A")
        );
    }

    #[test]
    fn pairwise_tie_eliminates_lower() {
        let b = ballots(&[(&["A", "B"], 1), (&["B", "A"], 1)]);
        assert_eq!(
            pairwise_loser(&b, &"A".into(), &"B".into()),
            Candidate::from("B")
        );
    }

    #[test]
    fn last_candidate_standing_wins() {
        // exhausted ballots keep A below a majority of all ballots
        let b = ballots(&[(&["A"], 2), (&["B"], 1), (&["C"], 1), (&[], 2)]);
        let result = btr_irv(b).unwrap();

        assert_eq!(names(&result.winners), vec!["A"]);
        let last = result.rounds.last().unwrap();
        assert_eq!(last.scores.len(), 1);
        assert_eq!(last.exhausted_count, 4);
    }

    #[test]
    fn exhausted_ballots_are_not_scored() {
        let b = ballots(&[(&["A", "B"], 3), (&[], 3)]);
        let result = btr_irv(b).unwrap();
        assert_eq!(result.rounds[0].total_score(), 3.0);
    }
}
