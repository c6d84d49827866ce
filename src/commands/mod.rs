mod apportion;
mod condorcet;
mod pr2stv;
mod tabulate;

pub use apportion::{apportion, mmp};
pub use condorcet::condorcet_file;
pub use pr2stv::pr2stv;
pub use tabulate::tabulate_file;
