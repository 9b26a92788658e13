//! Personal screen-time tracker. Days are saved into a table keyed by date through
//! [store::RecordStore], and [analytics] turns whatever was saved into averages, goal counts,
//! a trailing streak and a weekday profile for any range of days.
//!

pub mod analytics;
pub mod cli;
pub mod store;
pub mod utils;
