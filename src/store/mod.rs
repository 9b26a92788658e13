//! Storage of daily records is organized through [RecordStore].
//!  The basic idea is:
//!   - A table holds at most one record per calendar day, the date is the key.
//!   - Records are only ever inserted or updated through [RecordStore::upsert], never deleted.
//!   - [json_lines::JsonLinesStore] keeps a table as a file with one JSON row per line.

pub mod entities;
pub mod json_lines;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use entities::{DailyRecord, Source, UpsertOutcome};

/// Interface for abstracting storage of records. Analytics only ever see what [load_all]
/// returns, so any durable table keyed by date can stand behind it.
///
/// [load_all]: RecordStore::load_all
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every stored record ordered by date. An empty table is not an error.
    async fn load_all(&self) -> Result<Vec<DailyRecord>>;

    /// Inserts a record for `date` or overwrites minutes, source and update time of the existing
    /// one.
    async fn upsert(&self, date: NaiveDate, minutes: u32, source: Source) -> Result<UpsertOutcome>;
}
