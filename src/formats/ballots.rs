use super::{FormatError, Result};
use crate::model::{Ballot, Candidate};
use crate::util::read_serialized;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One line of a ballot file: a ranking cast `count` times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotRecord {
    pub ranking: Vec<Candidate>,
    #[serde(default = "one")]
    pub count: u64,
}

fn one() -> u64 {
    1
}

/// One unit-weight ballot per counted vote, in record order.
pub fn expand_records(records: &[BallotRecord]) -> Result<Vec<Ballot>> {
    let mut ballots = Vec::new();

    for (i, record) in records.iter().enumerate() {
        let mut seen = HashSet::new();
        if let Some(dup) = record.ranking.iter().find(|c| !seen.insert(*c)) {
            return Err(FormatError::DuplicateCandidate {
                record: i,
                candidate: dup.clone(),
            });
        }

        for _ in 0..record.count {
            ballots.push(Ballot::new(record.ranking.clone()));
        }
    }

    if ballots.is_empty() {
        return Err(FormatError::NoBallots);
    }

    Ok(ballots)
}

pub fn parse_ballots(json: &str) -> Result<Vec<Ballot>> {
    let records: Vec<BallotRecord> = serde_json::from_str(json)?;
    expand_records(&records)
}

pub fn read_ballots(path: &Path) -> Result<Vec<Ballot>> {
    let records: Vec<BallotRecord> = read_serialized(path)?;
    log::debug!("read {} ballot records from {}", records.len(), path.display());
    expand_records(&records)
}

#[cfg(test)]
mod ballots_test {
    use super::*;

    #[test]
    fn count_defaults_to_one() {
        let ballots = parse_ballots(r#"[{"ranking": ["A", "B"]}, {"ranking": ["B"], "count": 3}]"#)
            .unwrap();

        assert_eq!(ballots.len(), 4);
        assert_eq!(ballots[0].top_live_choice(), Some(&Candidate::from("A")));
        assert!(ballots[1..]
            .iter()
            .all(|b| b.top_live_choice() == Some(&Candidate::from("B"))));
        assert!(ballots.iter().all(|b| b.weight() == 1.0));
    }

    #[test]
    fn expanded_ballots_are_independent() {
        let mut ballots = parse_ballots(r#"[{"ranking": ["A", "B"], "count": 2}]"#).unwrap();
        ballots[0].remove(&"A".into());
        assert_eq!(ballots[1].ranking().len(), 2);
    }

    #[test]
    fn empty_ranking_is_allowed() {
        let ballots = parse_ballots(r#"[{"ranking": []}, {"ranking": ["A"]}]"#).unwrap();
        assert!(ballots[0].is_exhausted());
    }

    #[test]
    fn rejects_duplicates() {
        let err = parse_ballots(r#"[{"ranking": ["A"]}, {"ranking": ["B", "A", "B"]}]"#)
            .unwrap_err();
        match err {
            FormatError::DuplicateCandidate { record, candidate } => {
                assert_eq!(record, 1);
                assert_eq!(candidate, Candidate::from("B"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(parse_ballots("[]"), Err(FormatError::NoBallots)));
        assert!(matches!(
            parse_ballots(r#"[{"ranking": ["A"], "count": 0}]"#),
            Err(FormatError::NoBallots)
        ));
    }

    #[test]
    fn missing_ballot_file() {
        let path = std::env::temp_dir().join("ranked-tally-no-such-ballots.json");
        assert!(matches!(
            read_ballots(&path),
            Err(FormatError::File(crate::util::FileError::Io(_)))
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_ballots(r#"[{"count": 2}]"#),
            Err(FormatError::Json(_))
        ));
    }
}
