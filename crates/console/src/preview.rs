//! Masking preview projector.
//!
//! Requests a bounded sample of original-vs-masked rows for operator
//! review before execution. An empty sample is its own state — the
//! table simply has no rows — and is never conflated with loading or
//! failure.

use std::collections::BTreeSet;
use std::sync::Arc;

use maskadmin_core::workflow::Id;

use crate::services::{PreviewPayload, PreviewService};

/// Allowed sample sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSize {
    Two,
    Five,
    Ten,
    Fifteen,
}

/// All sizes, as offered to the operator.
pub const ALL_SAMPLE_SIZES: [SampleSize; 4] = [
    SampleSize::Two,
    SampleSize::Five,
    SampleSize::Ten,
    SampleSize::Fifteen,
];

impl SampleSize {
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Five => 5,
            Self::Ten => 10,
            Self::Fifteen => 15,
        }
    }
}

impl Default for SampleSize {
    fn default() -> Self {
        Self::Five
    }
}

/// One column's original/masked pair within a sampled row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewCell {
    pub column: String,
    pub original: String,
    pub masked: String,
    /// The rendered values differ.
    pub changed: bool,
    /// The workflow's mapping flags this column as PII.
    pub is_pii: bool,
}

/// One sampled row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRecord {
    pub cells: Vec<PreviewCell>,
}

/// A loaded preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewView {
    pub schema_name: String,
    pub table_name: String,
    pub total_records: i64,
    pub sample_count: i64,
    pub records: Vec<PreviewRecord>,
}

/// Projector state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewState {
    Idle,
    Loading,
    Loaded(PreviewView),
    /// The preview returned no rows at all.
    NoRecords,
    Failed(String),
}

/// Preview projector for one workflow.
pub struct PreviewProjector {
    service: Arc<dyn PreviewService>,
    workflow_id: Id,
    /// Column names the workflow's mapping flags as PII.
    pii_columns: BTreeSet<String>,
    state: PreviewState,
}

impl PreviewProjector {
    pub fn new(
        service: Arc<dyn PreviewService>,
        workflow_id: Id,
        pii_columns: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            service,
            workflow_id,
            pii_columns: pii_columns.into_iter().collect(),
            state: PreviewState::Idle,
        }
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    /// Load a sample. Clears any previously loaded data first.
    pub async fn load(&mut self, sample: SampleSize) -> &PreviewState {
        self.state = PreviewState::Loading;

        match self.service.preview(self.workflow_id, sample.as_u8()).await {
            Ok(payload) if payload.preview_results.is_empty() => {
                self.state = PreviewState::NoRecords;
            }
            Ok(payload) => {
                self.state = PreviewState::Loaded(self.project(payload));
            }
            Err(e) => {
                self.state = PreviewState::Failed(e.to_string());
            }
        }
        &self.state
    }

    fn project(&self, payload: PreviewPayload) -> PreviewView {
        let records = payload
            .preview_results
            .iter()
            .map(|pair| {
                // Column order follows the original row's keys.
                let cells = pair
                    .original
                    .keys()
                    .map(|column| {
                        let original = render_value(pair.original.get(column));
                        let masked = render_value(pair.masked.get(column));
                        PreviewCell {
                            changed: original != masked,
                            is_pii: self.pii_columns.contains(column),
                            column: column.clone(),
                            original,
                            masked,
                        }
                    })
                    .collect();
                PreviewRecord { cells }
            })
            .collect();

        PreviewView {
            schema_name: payload.schema_name,
            table_name: payload.table_name,
            total_records: payload.total_records,
            sample_count: payload.sample_count,
            records,
        }
    }
}

/// Render a cell value for comparison and display. Nulls and missing
/// columns render as the literal `null`, never as an empty string.
fn render_value(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => "null".to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
