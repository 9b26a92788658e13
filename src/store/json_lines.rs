use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use fs4::tokio::AsyncFileExt;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::utils::{clock::Clock, time::timestamp_to_record};

use super::{
    entities::{DailyRecord, RawRecord, Source, UpsertOutcome},
    RecordStore,
};

const TABLE_EXTENSION: &str = "jsonl";

/// The main realization of [RecordStore]. A table is a single file inside `record_dir`.
///
/// Saving never edits the table in place. The new content goes to `<table>.jsonl.tmp` and is
/// renamed over the table, so an interrupted save leaves the previous table intact. Readers and
/// writers coordinate through `<table>.jsonl.lock`, which survives the rename.
pub struct JsonLinesStore {
    table_path: PathBuf,
    clock: Box<dyn Clock>,
}

/// A raw line of the table without its newline. Kept as bytes so rows that aren't valid UTF-8
/// can be skipped on read and written back untouched.
type Row = Vec<u8>;

impl JsonLinesStore {
    pub fn new(record_dir: PathBuf, table: &str, clock: Box<dyn Clock>) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&record_dir)?;
        let table_path = record_dir.join(format!("{table}.{TABLE_EXTENSION}"));

        Ok(Self { table_path, clock })
    }

    pub fn table_path(&self) -> &Path {
        &self.table_path
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self.table_path.clone().into_os_string();
        name.push(suffix);
        PathBuf::from(name)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.sibling_path(".lock")
    }

    pub fn temp_path(&self) -> PathBuf {
        self.sibling_path(".tmp")
    }

    async fn open_lock(&self) -> Result<File> {
        File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path())
            .await
            .with_context(|| format!("Failed to open lock for table {:?}", self.table_path))
    }

    async fn read_rows(&self) -> Result<Vec<Row>> {
        debug!("Reading table {:?}", self.table_path);
        match tokio::fs::read(&self.table_path).await {
            Ok(content) => Ok(split_rows(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(vec![]),
            Err(e) => Err(e).with_context(|| format!("Failed to read table {:?}", self.table_path)),
        }
    }

    /// Replaces the table with `rows`. Must be called while holding the exclusive lock.
    async fn replace_table(&self, rows: &[Row]) -> Result<()> {
        let mut buffer = Vec::<u8>::new();
        for row in rows {
            buffer.extend_from_slice(row);
            buffer.push(b'\n');
        }

        let temp_path = self.temp_path();
        let mut temp = File::create(&temp_path)
            .await
            .with_context(|| format!("Failed to create {temp_path:?}"))?;
        temp.write_all(&buffer).await?;
        temp.flush().await?;
        temp.sync_all().await?;
        drop(temp);

        tokio::fs::rename(&temp_path, &self.table_path)
            .await
            .with_context(|| format!("Failed to replace table {:?}", self.table_path))?;
        Ok(())
    }

    async fn upsert_locked(&self, record: &DailyRecord) -> Result<UpsertOutcome> {
        let mut rows = self.read_rows().await?;
        let outcome = upsert_row(&mut rows, record)?;
        self.replace_table(&rows).await?;
        Ok(outcome)
    }
}

#[async_trait]
impl RecordStore for JsonLinesStore {
    async fn load_all(&self) -> Result<Vec<DailyRecord>> {
        let lock = self.open_lock().await?;
        lock.lock_shared()?;
        let rows = self.read_rows().await;
        lock.unlock_async().await?;

        let mut records = rows?
            .iter()
            .filter_map(|row| parse_row(row))
            .collect::<Vec<_>>();
        // Stable, so rows sharing a date keep their table order.
        records.sort_by_key(|record| record.date);
        debug!("Loaded {} records from {:?}", records.len(), self.table_path);
        Ok(records)
    }

    async fn upsert(&self, date: NaiveDate, minutes: u32, source: Source) -> Result<UpsertOutcome> {
        let record = DailyRecord {
            date,
            minutes,
            source,
            updated_at: timestamp_to_record(self.clock.time()),
        };

        // Semi-safe acquire-release for a file
        let lock = self.open_lock().await?;
        lock.lock_exclusive()?;
        let result = self.upsert_locked(&record).await;
        lock.unlock_async().await?;
        let outcome = result?;

        info!(
            "Saved {} minutes for {} ({outcome})",
            record.minutes, record.date
        );
        Ok(outcome)
    }
}

/// Splits table content on newlines, dropping blank lines.
fn split_rows(content: &[u8]) -> Vec<Row> {
    content
        .split(|byte| *byte == b'\n')
        .filter(|row| !row.iter().all(u8::is_ascii_whitespace))
        .map(<[u8]>::to_vec)
        .collect()
}

/// Rows that can't be understood are skipped here but left untouched in the table.
fn parse_row(row: &[u8]) -> Option<DailyRecord> {
    match std::str::from_utf8(row) {
        Ok(line) => parse_line(line),
        Err(e) => {
            warn!(
                "Skipping row that isn't valid UTF-8 ({e}): {}",
                String::from_utf8_lossy(row)
            );
            None
        }
    }
}

fn parse_line(line: &str) -> Option<DailyRecord> {
    if line.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<RawRecord>(line) {
        Ok(raw) => {
            let record = raw.into_record();
            if record.is_none() {
                warn!("Skipping row without a readable date: {line}");
            }
            record
        }
        Err(e) => {
            warn!("Found illegal json row {line}: {e}");
            None
        }
    }
}

/// First row wins when a date somehow appears more than once.
fn index_by_date(rows: &[Row]) -> HashMap<NaiveDate, usize> {
    let mut index = HashMap::new();
    for (position, row) in rows.iter().enumerate() {
        if let Some(record) = parse_row(row) {
            index.entry(record.date).or_insert(position);
        }
    }
    index
}

fn upsert_row(rows: &mut Vec<Row>, record: &DailyRecord) -> Result<UpsertOutcome> {
    let serialized = serde_json::to_vec(record)?;
    match index_by_date(rows).get(&record.date) {
        Some(&position) => {
            rows[position] = serialized;
            Ok(UpsertOutcome::Updated)
        }
        None => {
            rows.push(serialized);
            Ok(UpsertOutcome::Inserted)
        }
    }
}
