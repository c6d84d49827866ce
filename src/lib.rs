//! Ranked-ballot tabulation: STV, bottom-up multi-winner RCV and BTR-IRV,
//! plus Condorcet/Copeland and party-list apportionment.

pub mod condorcet;
pub mod formats;
pub mod model;
pub mod proportional;
pub mod reports;
pub mod tabulator;
pub mod util;

pub use model::{Ballot, Candidate, Round, TabulationResult};
pub use tabulator::{tabulate, TabulationError, TabulationMethod, TabulationOptions};
