pub mod directory;
pub mod eligibility;
pub mod engine;
pub mod eras;
pub mod ledger;
pub mod markup;
pub mod report;
pub mod schedule;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{
    CandidatePool, PlayerDirectory, PlayerRecord, ReportRow, SearchOutcome, TeamEra, WinLedger,
};
pub use crate::domain::ports::{PageFetcher, Pipeline, ReportViewer, Storage};
pub use crate::utils::error::Result;
