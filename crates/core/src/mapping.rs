//! Column descriptors and PII column mappings.

use serde::{Deserialize, Serialize};

/// A column as reported by catalog discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub data_type: String,
}

/// One column's masking assignment within a workflow.
///
/// Invariant: `pii_attribute` is `None` whenever `is_pii` is false.
/// Mutate through [`set_is_pii`](Self::set_is_pii) and
/// [`set_attribute`](Self::set_attribute) to preserve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub column_name: String,
    pub is_pii: bool,
    pub pii_attribute: Option<String>,
}

impl ColumnMapping {
    /// A fresh non-PII mapping for a discovered column.
    pub fn new(column_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            is_pii: false,
            pii_attribute: None,
        }
    }

    /// Toggle the PII flag. Turning it off clears the attribute as a
    /// side effect; turning it on never picks one.
    pub fn set_is_pii(&mut self, is_pii: bool) {
        self.is_pii = is_pii;
        if !is_pii {
            self.pii_attribute = None;
        }
    }

    /// Assign a masking attribute. Empty strings are stored as `None`.
    pub fn set_attribute(&mut self, attribute: Option<String>) {
        self.pii_attribute = attribute.filter(|a| !a.is_empty());
    }

    /// The attribute to submit: only carried when the column is flagged
    /// PII and an attribute is actually set.
    pub fn effective_attribute(&self) -> Option<&str> {
        if self.is_pii {
            self.pii_attribute.as_deref().filter(|a| !a.is_empty())
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
