//! CSV interchange of a stable's horse roster

pub mod codec;
mod report;

pub use codec::{read_roster, write_roster, RosterRow, RowError, HEADER};
pub use report::{ImportReport, RowOutcome, RowReport};
