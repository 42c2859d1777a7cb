//! Tabular output of the CLI: rows of numbers streamed to a writer thread.

pub mod writer;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How rows are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Comma-separated values with one header row.
    #[default]
    Csv,
    /// One JSON object per line, keyed by column name.
    Json,
}

/// One output row, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record(pub Vec<Value>);

impl Record {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
