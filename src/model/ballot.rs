use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque candidate identifier, compared and hashed by value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(String);

impl Candidate {
    pub fn new(name: impl Into<String>) -> Self {
        Candidate(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Candidate {
    fn from(name: &str) -> Self {
        Candidate(name.to_string())
    }
}

impl From<String> for Candidate {
    fn from(name: String) -> Self {
        Candidate(name)
    }
}

/// One voter's weighted, ordered list of live preferences.
///
/// Candidates are removed from the front (or anywhere) of the ranking as
/// they are elected or eliminated. The ranking as it stood before the first
/// removal is kept so the ballot can be reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ballot {
    ranking: Vec<Candidate>,
    weight: f64,
    #[serde(skip)]
    initial_ranking: Option<Vec<Candidate>>,
}

impl Ballot {
    pub fn new(ranking: Vec<Candidate>) -> Self {
        Self::with_weight(ranking, 1.0)
    }

    pub fn with_weight(ranking: Vec<Candidate>, weight: f64) -> Self {
        Ballot {
            ranking,
            weight,
            initial_ranking: None,
        }
    }

    pub fn ranking(&self) -> &[Candidate] {
        &self.ranking
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Most preferred candidate still on the ballot, `None` once exhausted.
    pub fn top_live_choice(&self) -> Option<&Candidate> {
        self.ranking.first()
    }

    pub fn is_exhausted(&self) -> bool {
        self.ranking.is_empty()
    }

    pub fn ranks(&self, candidate: &Candidate) -> bool {
        self.ranking.contains(candidate)
    }

    fn position(&self, candidate: &Candidate) -> Option<usize> {
        self.ranking.iter().position(|c| c == candidate)
    }

    /// True iff both candidates are still ranked and `runner` comes first.
    pub fn outranks(&self, runner: &Candidate, opponent: &Candidate) -> bool {
        match (self.position(runner), self.position(opponent)) {
            (Some(r), Some(o)) => r < o,
            _ => false,
        }
    }

    /// Removes `candidate` if present. Removing an absent candidate is a no-op.
    pub fn remove(&mut self, candidate: &Candidate) {
        if self.initial_ranking.is_none() {
            self.initial_ranking = Some(self.ranking.clone());
        }
        if let Some(i) = self.position(candidate) {
            self.ranking.remove(i);
        }
    }

    /// Restores the ranking captured before the first removal.
    /// Does nothing if the ballot was never mutated.
    pub fn reset(&mut self) {
        if let Some(initial) = &self.initial_ranking {
            self.ranking = initial.clone();
        }
    }

    /// Multiplies the weight by `fraction`, which must lie in `[0, 1]`.
    pub(crate) fn scale_weight(&mut self, fraction: f64) {
        debug_assert!((0.0..=1.0).contains(&fraction), "fraction {} out of range", fraction);
        self.weight *= fraction;
    }

    pub(crate) fn first_duplicate(&self) -> Option<&Candidate> {
        self.ranking
            .iter()
            .enumerate()
            .find(|(i, c)| self.ranking[..*i].contains(*c))
            .map(|(_, c)| c)
    }
}

#[cfg(test)]
mod ballot_test {
    use super::*;

    fn ballot(names: &[&str]) -> Ballot {
        Ballot::new(names.iter().map(|n| Candidate::from(*n)).collect())
    }

    #[test]
    fn top_live_choice() {
        let mut b = ballot(&["dog", "cat"]);
        assert_eq!(b.top_live_choice(), Some(&Candidate::from("dog")));

        b.remove(&"dog".into());
        assert_eq!(b.top_live_choice(), Some(&Candidate::from("cat")));

        b.remove(&"cat".into());
        assert_eq!(b.top_live_choice(), None);
        assert!(b.is_exhausted());
    }

    #[test]
    fn outranks() {
        let b = ballot(&["dog", "cat", "bat"]);
        assert!(b.outranks(&"dog".into(), &"bat".into()));
        assert!(!b.outranks(&"bat".into(), &"dog".into()));
        assert!(!b.outranks(&"dog".into(), &"dog".into()));
        assert!(!b.outranks(&"dog".into(), &"rat".into()));
        assert!(!b.outranks(&"rat".into(), &"dog".into()));
    }

    #[test]
    fn outranks_after_removal() {
        let mut b = ballot(&["dog", "cat"]);
        b.remove(&"cat".into());
        assert!(!b.outranks(&"dog".into(), &"cat".into()));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut b = ballot(&["dog", "cat"]);
        b.remove(&"rat".into());
        assert_eq!(b.ranking().len(), 2);
        b.remove(&"cat".into());
        b.remove(&"cat".into());
        assert_eq!(b.ranking(), &[Candidate::from("dog")]);
    }

    #[test]
    fn reset_restores_first_snapshot() {
        let mut b = ballot(&["dog", "cat", "bat"]);
        b.remove(&"cat".into());
        b.remove(&"dog".into());
        b.reset();
        assert_eq!(b.ranking(), ballot(&["dog", "cat", "bat"]).ranking());
    }

    #[test]
    fn reset_before_removal_is_noop() {
        let mut b = ballot(&["dog", "cat"]);
        b.reset();
        assert_eq!(b.ranking().len(), 2);
    }

    #[test]
    fn duplicate_detection() {
        assert_eq!(ballot(&["dog", "cat"]).first_duplicate(), None);
        assert_eq!(
            ballot(&["dog", "cat", "dog"]).first_duplicate(),
            Some(&Candidate::from("dog"))
        );
    }
}
