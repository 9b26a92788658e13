use std::path::PathBuf;

use anyhow::Result;

use crate::utils::dir::{create_application_default_path, ensure_dir};

pub const DEFAULT_TABLE: &str = "screen_time";
pub const DEFAULT_GOAL_MINUTES: u32 = 10;
pub const DEFAULT_STREAK_THRESHOLD_MINUTES: u32 = 10;
/// Upper bound for anything typed in minutes.
pub const MAX_MINUTES: u32 = 2000;

/// Where data lives. Resolved once from arguments/environment and passed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub table: String,
}

impl Config {
    pub fn resolve(dir: Option<PathBuf>, table: String) -> Result<Self> {
        let data_dir = match dir {
            Some(dir) => ensure_dir(dir)?,
            None => create_application_default_path()?,
        };
        Ok(Self { data_dir, table })
    }

    pub fn records_dir(&self) -> PathBuf {
        self.data_dir.join("records")
    }
}
