//! Core value types shared across the commence workspace.
//!
//! Nothing in here talks to the automation object. These are the plain
//! values the cursor layer renders into wire strings and hands back to
//! callers.

mod connection;
mod filter;
mod policy;
mod values;

pub use connection::Connection;
pub use filter::{CmcFilter, FilterArray, FilterCondition, FilterKind};
pub use policy::{Existing, NoneFound};
pub use values::{cmc_date, cmc_time, RowData, CMC_DATE_FORMAT, CMC_TIME_FORMAT};
