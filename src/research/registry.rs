//! Citation bookkeeping for a research run.
//!
//! Every distinct URL seen during a run gets one citation number, assigned in
//! first-seen order starting at 1. Numbers are never reused or renumbered, so
//! `[n]` references in syntheses and the final report stay consistent.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A registered source and the citation number it was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub url: String,
    pub citation_number: u32,
    /// Zero-based round in which the URL was first registered
    pub first_seen_round: usize,
}

/// Append-only map from URL to citation number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RegistryRecord")]
pub struct SourceRegistry {
    /// Entries in citation-number order; index `i` holds number `i + 1`
    entries: Vec<SourceEntry>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `url`, returning its citation number.
    ///
    /// Registering a URL that is already known returns the existing number and
    /// leaves its first-seen round untouched.
    pub fn register(&mut self, url: &str, round: usize) -> u32 {
        if let Some(&position) = self.index.get(url) {
            return self.entries[position].citation_number;
        }

        let citation_number = self.entries.len() as u32 + 1;
        self.index.insert(url.to_string(), self.entries.len());
        self.entries.push(SourceEntry {
            url: url.to_string(),
            citation_number,
            first_seen_round: round,
        });

        tracing::debug!(url, citation_number, round, "Registered new source");
        citation_number
    }

    /// Citation number already assigned to `url`, if any.
    pub fn citation_for(&self, url: &str) -> Option<u32> {
        self.index
            .get(url)
            .map(|&position| self.entries[position].citation_number)
    }

    /// All entries ordered by citation number.
    pub fn entries(&self) -> &[SourceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reference list with one `[n] URL` line per source.
    pub fn references(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("[{}] {}", entry.citation_number, entry.url))
            .collect::<Vec<_>>()
            .join("\n")
    }

}

/// Serialized form of a registry; the URL index is rebuilt on load.
#[derive(Deserialize)]
struct RegistryRecord {
    entries: Vec<SourceEntry>,
}

impl From<RegistryRecord> for SourceRegistry {
    fn from(record: RegistryRecord) -> Self {
        let index = record
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.url.clone(), position))
            .collect();
        Self {
            entries: record.entries,
            index,
        }
    }
}
