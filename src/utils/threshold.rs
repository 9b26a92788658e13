use std::{fmt::Display, ops::Deref, str::FromStr};

use anyhow::anyhow;
use serde::Serialize;

/// A daily minutes limit, used both as the goal ceiling and as the streak threshold.
/// Zero is not a meaningful limit, so it can't be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Threshold(u32);

impl Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Threshold {
    pub fn new_opt(minutes: u32) -> Option<Threshold> {
        if minutes == 0 {
            None
        } else {
            Some(Threshold(minutes))
        }
    }

    /// Infallible constructor for constants, 0 is raised to 1.
    pub const fn at_least_one(minutes: u32) -> Threshold {
        if minutes == 0 {
            Threshold(1)
        } else {
            Threshold(minutes)
        }
    }
}

impl FromStr for Threshold {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Allows both "90" and "90m"
        let s = s.trim().trim_end_matches('m');
        let v = s.parse::<u32>()?;
        Threshold::new_opt(v).ok_or_else(|| anyhow!("Threshold has to be at least 1 minute, got {s}"))
    }
}

impl Deref for Threshold {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
