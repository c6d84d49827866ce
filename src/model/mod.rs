pub mod ballot;
pub mod round;

pub use ballot::{Ballot, Candidate};
pub use round::{Round, Scores, TabulationResult};
