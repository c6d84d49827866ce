mod commands;

use crate::commands::{apportion, condorcet_file, mmp, pr2stv, tabulate_file};
use clap::{Parser, Subcommand};
use ranked_tally::proportional::ApportionMethod;
use ranked_tally::{TabulationMethod, TabulationOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(name = "ranked-tally", about = "Tabulate ranked-choice and party-list elections")]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Single transferable vote with Droop quota.
    Stv {
        /// Ballot file (JSON, optionally gzipped)
        ballot_file: PathBuf,
        /// Number of seats to fill
        #[clap(long, short, default_value = "1")]
        seats: usize,
        /// Print the report as JSON instead of tables
        #[clap(long)]
        json: bool,
        /// Also write the JSON report to this path
        #[clap(long)]
        report: Option<PathBuf>,
    },
    /// Multi-winner ranked choice, eliminating from the bottom.
    Rcv {
        /// Ballot file (JSON, optionally gzipped)
        ballot_file: PathBuf,
        /// Number of seats to fill
        #[clap(long, short, default_value = "1")]
        seats: usize,
        /// Print the report as JSON instead of tables
        #[clap(long)]
        json: bool,
        /// Also write the JSON report to this path
        #[clap(long)]
        report: Option<PathBuf>,
    },
    /// Bottom-two runoff instant runoff voting (single seat).
    BtrIrv {
        /// Ballot file (JSON, optionally gzipped)
        ballot_file: PathBuf,
        /// Print the report as JSON instead of tables
        #[clap(long)]
        json: bool,
        /// Also write the JSON report to this path
        #[clap(long)]
        report: Option<PathBuf>,
    },
    /// Pairwise preference matrix and Copeland scores.
    Condorcet {
        /// Ballot file (JSON, optionally gzipped)
        ballot_file: PathBuf,
        /// Show head-to-head margins instead of raw counts
        #[clap(long)]
        diff: bool,
    },
    /// Party-list apportionment.
    Apportion {
        /// Vote map file: {"party": votes}
        vote_map_file: PathBuf,
        /// Number of seats to apportion
        #[clap(long, short)]
        seats: usize,
        /// dhondt, webster or hamilton
        #[clap(long, short, default_value = "dhondt")]
        method: ApportionMethod,
    },
    /// Mixed-member proportional top-up over district results.
    Mmp {
        /// Vote map file: {"party": votes}
        vote_map_file: PathBuf,
        /// District seats file: {"party": seats}
        district_seats_file: PathBuf,
        /// Chamber size (defaults to twice the district seats)
        #[clap(long, short)]
        seats: Option<usize>,
    },
    /// Convert a party vote map into an STV ballot file.
    Pr2stv {
        /// Vote map file: {"party": votes}
        vote_map_file: PathBuf,
        /// Seats, i.e. list candidates per party
        #[clap(long, short)]
        seats: usize,
        /// Ballot file to write
        #[clap(long, short, alias = "out")]
        output: PathBuf,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Stv { .. } => "stv",
            Command::Rcv { .. } => "rcv",
            Command::BtrIrv { .. } => "btr-irv",
            Command::Condorcet { .. } => "condorcet",
            Command::Apportion { .. } => "apportion",
            Command::Mmp { .. } => "mmp",
            Command::Pr2stv { .. } => "pr2stv",
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("ranked_tally=info"))
        .init();

    let opts = Opts::parse();
    let name = opts.command.name();

    let outcome = match opts.command {
        Command::Stv {
            ballot_file,
            seats,
            json,
            report,
        } => {
            let options = TabulationOptions {
                method: TabulationMethod::Stv,
                seats,
            };
            tabulate_file(&ballot_file, &options, json, report.as_deref())
        }
        Command::Rcv {
            ballot_file,
            seats,
            json,
            report,
        } => {
            let options = TabulationOptions {
                method: TabulationMethod::BottomUp,
                seats,
            };
            tabulate_file(&ballot_file, &options, json, report.as_deref())
        }
        Command::BtrIrv {
            ballot_file,
            json,
            report,
        } => {
            let options = TabulationOptions {
                method: TabulationMethod::BottomTwoRunoff,
                ..TabulationOptions::default()
            };
            tabulate_file(&ballot_file, &options, json, report.as_deref())
        }
        Command::Condorcet { ballot_file, diff } => condorcet_file(&ballot_file, diff),
        Command::Apportion {
            vote_map_file,
            seats,
            method,
        } => apportion(&vote_map_file, seats, method),
        Command::Mmp {
            vote_map_file,
            district_seats_file,
            seats,
        } => mmp(&vote_map_file, &district_seats_file, seats),
        Command::Pr2stv {
            vote_map_file,
            seats,
            output,
        } => pr2stv(&vote_map_file, &output, seats),
    };

    if let Err(e) = outcome {
        eprintln!("❌ {} failed: {}", name, e);
        std::process::exit(1);
    }
}
