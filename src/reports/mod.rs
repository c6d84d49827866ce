use crate::model::Candidate;
use crate::tabulator::TabulationMethod;
use crate::util::{write_serialized, FileError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub mod generator;
pub mod render;

pub use generator::generate_contest_report;
pub use render::{render_apportionment, render_copeland, render_matrix, render_result, render_round};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Output error: {0}")]
    Output(#[from] FileError),
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// Full contest report, the JSON form of a tabulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestReport {
    pub method: TabulationMethod,
    #[serde(rename = "ballotCount")]
    pub ballot_count: usize,
    pub seats: usize,
    pub candidates: Vec<Candidate>,
    pub results: Vec<RoundResult>,
    pub summary: ResultSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: usize,
    pub tally: BTreeMap<Candidate, f64>,
    pub elected: Vec<Candidate>,
    pub eliminated: Vec<Candidate>,
    pub exhausted: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub winners: Vec<Candidate>,
    #[serde(rename = "totalRounds")]
    pub total_rounds: usize,
    #[serde(rename = "totalBallots")]
    pub total_ballots: usize,
}

impl ContestReport {
    pub fn to_json(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> ReportResult<()> {
        write_serialized(path, self)?;
        Ok(())
    }
}
