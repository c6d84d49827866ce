//! Party-list proportional representation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Votes per party, ordered by party name.
pub type VoteMap = BTreeMap<String, u64>;

/// Seats per party.
pub type SeatMap = BTreeMap<String, usize>;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ApportionError {
    #[error("At least one seat must be apportioned")]
    NoSeats,
    #[error("No votes cast for any party")]
    NoVotes,
}

pub type Result<T> = std::result::Result<T, ApportionError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApportionMethod {
    Dhondt,
    Webster,
    Hamilton,
}

impl fmt::Display for ApportionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApportionMethod::Dhondt => write!(f, "D'Hondt"),
            ApportionMethod::Webster => write!(f, "Webster"),
            ApportionMethod::Hamilton => write!(f, "Hamilton"),
        }
    }
}

impl FromStr for ApportionMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dhondt" | "d'hondt" | "jefferson" => Ok(ApportionMethod::Dhondt),
            "webster" | "sainte-lague" => Ok(ApportionMethod::Webster),
            "hamilton" | "largest-remainder" => Ok(ApportionMethod::Hamilton),
            other => Err(format!("unknown apportionment method: {}", other)),
        }
    }
}

pub fn apportion(method: ApportionMethod, votes: &VoteMap, seats: usize) -> Result<SeatMap> {
    match method {
        ApportionMethod::Dhondt => dhondt(votes, seats),
        ApportionMethod::Webster => webster(votes, seats),
        ApportionMethod::Hamilton => hamilton(votes, seats),
    }
}

fn check(votes: &VoteMap, seats: usize) -> Result<u64> {
    if seats == 0 {
        return Err(ApportionError::NoSeats);
    }
    let total: u64 = votes.values().sum();
    if total == 0 {
        return Err(ApportionError::NoVotes);
    }
    Ok(total)
}

/// Awards seats one at a time to the party with the largest
/// `votes / divisor(seats already won)`. Ties go to the first party by name.
fn highest_averages(
    votes: &VoteMap,
    seats: usize,
    divisor: impl Fn(usize) -> f64,
) -> Result<SeatMap> {
    check(votes, seats)?;

    let mut result: SeatMap = votes.keys().map(|p| (p.clone(), 0)).collect();

    for _ in 0..seats {
        let mut best: Option<(&String, f64)> = None;
        for (party, &v) in votes {
            let quotient = v as f64 / divisor(result[party]);
            match best {
                Some((_, q)) if quotient <= q => {}
                _ => best = Some((party, quotient)),
            }
        }
        if let Some((party, _)) = best {
            *result.entry(party.clone()).or_insert(0) += 1;
        }
    }

    Ok(result)
}

pub fn dhondt(votes: &VoteMap, seats: usize) -> Result<SeatMap> {
    highest_averages(votes, seats, |won| (won + 1) as f64)
}

/// Webster / Sainte-Laguë: odd divisors.
pub fn webster(votes: &VoteMap, seats: usize) -> Result<SeatMap> {
    highest_averages(votes, seats, |won| (2 * won + 1) as f64)
}

/// Largest remainder with the Hare quota.
pub fn hamilton(votes: &VoteMap, seats: usize) -> Result<SeatMap> {
    let total = check(votes, seats)? as u128;

    let mut result = SeatMap::new();
    let mut remainders = Vec::with_capacity(votes.len());
    for (party, &v) in votes {
        let share = v as u128 * seats as u128;
        result.insert(party.clone(), (share / total) as usize);
        remainders.push((party, share % total));
    }

    let awarded: usize = result.values().sum();
    remainders.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    for (party, _) in remainders.into_iter().take(seats - awarded) {
        *result.entry(party.clone()).or_insert(0) += 1;
    }

    Ok(result)
}

/// Mixed-member proportional top-up.
///
/// Parties whose district seats already meet their Webster share keep
/// exactly those seats. The rest of the chamber is re-apportioned by
/// Webster among the remaining parties. `total_seats` defaults to twice the
/// district seats.
pub fn mmp(
    party_votes: &VoteMap,
    district_seats: &SeatMap,
    total_seats: Option<usize>,
) -> Result<SeatMap> {
    let mut seats = district_seats.clone();
    let mut remaining = total_seats.unwrap_or_else(|| district_seats.values().sum::<usize>() * 2);

    let ideal = webster(party_votes, remaining)?;

    let mut topped_up = VoteMap::new();
    for (party, &votes) in party_votes {
        let won = district_seats.get(party).copied().unwrap_or(0);
        if won >= ideal[party] {
            remaining = remaining.saturating_sub(won);
        } else {
            topped_up.insert(party.clone(), votes);
        }
    }

    if remaining == 0 || topped_up.values().sum::<u64>() == 0 {
        log::warn!("mmp: no seats left to top up after district overhang");
        return Ok(seats);
    }

    for (party, n) in webster(&topped_up, remaining)? {
        seats.insert(party, n);
    }

    Ok(seats)
}
