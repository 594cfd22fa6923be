use anyhow::Result;

use crate::model::AppEntry;

/// Outcome of scanning a descriptor source: the launchable entries
/// plus how many descriptor files were skipped as unreadable or
/// malformed. Skips are never surfaced in the UI, only logged.
pub struct Scan {
    pub entries: Vec<AppEntry>,
    pub skipped: usize,
}

pub trait Source {
    fn scan(&self) -> Result<Scan>;
}

pub mod desktop;
