//! Plain-text tables for tabulation output. Colouring is left to the caller.

use crate::condorcet::PreferenceMatrix;
use crate::model::{Candidate, Round, TabulationResult};
use crate::proportional::{SeatMap, VoteMap};
use itertools::Itertools;
use std::collections::BTreeMap;

/// Whole numbers print bare, fractional weights to four places.
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        format!("{:.4}", score)
    }
}

fn format_share(share: f64) -> String {
    format!("{:.4}%", share * 100.0)
}

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the headers.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = (0..headers.len())
        .map(|i| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(headers[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: Vec<String>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![
        line(headers.iter().map(|h| h.to_string()).collect()),
        line(widths.iter().map(|w| "-".repeat(*w)).collect()),
    ];
    out.extend(rows.iter().map(|row| line(row.clone())));
    out.join("\n")
}

/// One row per candidate, most votes first, then the exhausted ballots.
pub fn render_round(round: &Round) -> String {
    let mut rows: Vec<Vec<String>> = round
        .ranked_scores()
        .into_iter()
        .map(|(candidate, score)| {
            vec![
                candidate.to_string(),
                format_score(score),
                format_share(round.share(score)),
                if round.elected(candidate) { "Yes" } else { "No" }.to_string(),
            ]
        })
        .collect();

    let exhausted = round.exhausted_count as f64;
    rows.push(vec![
        "EXHAUSTED".to_string(),
        round.exhausted_count.to_string(),
        format_share(round.share(exhausted)),
        "No".to_string(),
    ]);

    table(&["Name", "Votes", "Percentage", "Won"], &rows)
}

pub fn render_result(result: &TabulationResult) -> String {
    let mut out = vec![
        format!("{} ballots cast", result.ballot_count()),
        format!("{} seats elected", result.winners.len()),
    ];

    for (i, round) in result.rounds.iter().enumerate() {
        out.push(format!("Round {}:", i + 1));
        out.push(render_round(round));
    }

    for (i, winner) in result.winners.iter().enumerate() {
        out.push(format!("Seat {}: {} wins", i + 1, winner));
    }

    out.join("\n")
}

/// Head-to-head counts, or margins when `diff` is set. Rows are runners,
/// columns opponents.
pub fn render_matrix(matrix: &PreferenceMatrix, diff: bool) -> String {
    let candidates = matrix.candidates();
    let names: Vec<String> = candidates.iter().map(|c| c.to_string()).collect();
    let headers: Vec<&str> = std::iter::once("vs.")
        .chain(names.iter().map(|n| n.as_str()))
        .collect();

    let rows: Vec<Vec<String>> = candidates
        .iter()
        .map(|runner| {
            std::iter::once(runner.to_string())
                .chain(candidates.iter().map(|opponent| {
                    if diff {
                        matrix.margin(runner, opponent).to_string()
                    } else {
                        matrix.get(runner, opponent).to_string()
                    }
                }))
                .collect()
        })
        .collect();

    table(&headers, &rows)
}

pub fn render_copeland(scores: &BTreeMap<Candidate, f64>) -> String {
    let rows: Vec<Vec<String>> = scores
        .iter()
        .sorted_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)))
        .map(|(c, s)| vec![c.to_string(), format_score(*s)])
        .collect();
    table(&["Candidate", "Copeland"], &rows)
}

/// Parties by seats won, then name.
pub fn render_apportionment(votes: &VoteMap, seats: &SeatMap) -> String {
    let total_votes: u64 = votes.values().sum();
    let total_seats: usize = seats.values().sum();

    let rows: Vec<Vec<String>> = seats
        .iter()
        .sorted_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)))
        .map(|(party, &won)| {
            let v = votes.get(party).copied().unwrap_or(0);
            vec![
                party.clone(),
                v.to_string(),
                format_share(ratio(v as f64, total_votes as f64)),
                won.to_string(),
                format_share(ratio(won as f64, total_seats as f64)),
            ]
        })
        .collect();

    table(&["Party", "Votes", "Vote Share", "Seats", "Seat Share"], &rows)
}

fn ratio(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole
    }
}
