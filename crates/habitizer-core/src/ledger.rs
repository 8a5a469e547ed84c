//! Completion ledger: reward habit name → last day it was completed.
//!
//! Stored as a flat JSON object (`{"Meditate": "2024-05-01"}`). Entries are
//! only ever overwritten with a newer day, never removed.

use crate::error::Result;
use crate::paths;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionLedger {
    entries: BTreeMap<String, NaiveDate>,
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_completed(&self, name: &str) -> Option<NaiveDate> {
        self.entries.get(name).copied()
    }

    pub fn is_completed_on(&self, name: &str, day: NaiveDate) -> bool {
        self.last_completed(name) == Some(day)
    }

    pub fn record(&mut self, name: &str, day: NaiveDate) {
        self.entries.insert(name.to_string(), day);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    /// Load the ledger; a missing file is an empty ledger.
    pub fn load(root: &Path) -> Result<Self> {
        match crate::io::read_optional(&paths::ledger_path(root))? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Self::new()),
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_json::to_string(self)?;
        crate::io::atomic_write(&paths::ledger_path(root), data.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn day(s: &str) -> NaiveDate {
        crate::types::parse_date(s).unwrap()
    }

    #[test]
    fn record_overwrites_previous_day() {
        let mut ledger = CompletionLedger::new();
        ledger.record("Meditate", day("2024-05-01"));
        ledger.record("Meditate", day("2024-05-02"));
        assert_eq!(ledger.len(), 1);
        assert!(ledger.is_completed_on("Meditate", day("2024-05-02")));
        assert!(!ledger.is_completed_on("Meditate", day("2024-05-01")));
    }

    #[test]
    fn json_shape_is_flat_name_to_date() {
        let mut ledger = CompletionLedger::new();
        ledger.record("Sleep Early", day("2024-01-31"));
        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(json, r#"{"Sleep Early":"2024-01-31"}"#);
    }

    #[test]
    fn reads_flat_name_to_date_object() {
        let raw = r#"{"Meditate":"2024-05-01","Read 10 Pages":"2024-04-30"}"#;
        let ledger: CompletionLedger = serde_json::from_str(raw).unwrap();
        assert_eq!(ledger.last_completed("Read 10 Pages"), Some(day("2024-04-30")));
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        assert!(CompletionLedger::load(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut ledger = CompletionLedger::new();
        ledger.record("Green Veggies", day("2024-02-29"));
        ledger.save(dir.path()).unwrap();
        assert_eq!(CompletionLedger::load(dir.path()).unwrap(), ledger);
    }
}
