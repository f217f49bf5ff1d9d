//! CSV-backed symbol lookup table.
//!
//! Loaded once at startup and injected into the pipeline; never refreshed
//! during the process lifetime.

use advisor_core::error::DataError;
use advisor_core::traits::{SymbolInfo, SymbolResolver};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// One row of the exchange listing file.
#[derive(Debug, Deserialize)]
struct ListingRecord {
    #[serde(alias = "Code", alias = "code")]
    code: String,
    #[serde(alias = "Name", alias = "name")]
    name: String,
}

/// Code <-> name lookup over an exchange listing.
#[derive(Debug, Default)]
pub struct SymbolTable {
    name_by_code: HashMap<String, String>,
    code_by_name: HashMap<String, String>,
}

impl SymbolTable {
    /// An empty table: codes resolve to themselves, names to nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the listing from a CSV file with `Code,Name` columns.
    pub fn from_csv_path(path: &Path) -> Result<Self, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| DataError::Parse(e.to_string()))?;

        let mut table = Self::default();
        for result in reader.deserialize() {
            let record: ListingRecord = result.map_err(|e| DataError::Parse(e.to_string()))?;
            table.insert(record.code, record.name);
        }

        info!(entries = table.name_by_code.len(), "symbol table loaded");
        Ok(table)
    }

    /// Build a table from `(code, name)` pairs.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut table = Self::default();
        for (code, name) in entries {
            table.insert(code, name);
        }
        table
    }

    fn insert(&mut self, code: String, name: String) {
        self.code_by_name.insert(name.clone(), code.clone());
        self.name_by_code.insert(code, name);
    }
}

impl SymbolResolver for SymbolTable {
    fn resolve(&self, input: &str) -> Option<SymbolInfo> {
        let keyword = input.trim();
        if keyword.is_empty() {
            return None;
        }

        // Numeric input is a code; a code missing from the listing still
        // resolves to itself so direct code queries always work.
        if keyword.chars().all(|c| c.is_ascii_digit()) {
            let name = self
                .name_by_code
                .get(keyword)
                .cloned()
                .unwrap_or_else(|| keyword.to_string());
            return Some(SymbolInfo {
                code: keyword.to_string(),
                name,
            });
        }

        self.code_by_name.get(keyword).map(|code| SymbolInfo {
            code: code.clone(),
            name: keyword.to_string(),
        })
    }
}
