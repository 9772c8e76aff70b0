//! Row filter conditions for workflow submissions.
//!
//! A workflow may carry a list of WHERE-style conditions restricting
//! which rows are masked. Incomplete conditions are silently dropped at
//! submission time rather than rejected.

use serde::{Deserialize, Serialize};

/// Comparison operator for a row filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "LIKE")]
    Like,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "IS_PHONE")]
    IsPhone,
    #[serde(rename = "IS_EMAIL")]
    IsEmail,
}

impl FilterOperator {
    /// Pattern operators match on the column's own shape and take no
    /// comparison value.
    pub fn requires_value(self) -> bool {
        !matches!(self, Self::IsPhone | Self::IsEmail)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Like => "LIKE",
            Self::In => "IN",
            Self::IsPhone => "IS_PHONE",
            Self::IsEmail => "IS_EMAIL",
        }
    }
}

/// How a condition combines with the previous one. Meaningful only for
/// conditions after the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicOp {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

/// One row filter condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFilterCondition {
    pub column: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: String,
    #[serde(default = "default_logic")]
    pub logic: LogicOp,
}

fn default_logic() -> LogicOp {
    LogicOp::And
}

impl RowFilterCondition {
    /// An empty condition as first offered by the filter editor.
    pub fn empty() -> Self {
        Self {
            column: String::new(),
            operator: FilterOperator::Eq,
            value: String::new(),
            logic: LogicOp::And,
        }
    }

    /// A condition is complete when it names a column and either uses a
    /// pattern operator or carries a non-empty value.
    pub fn is_complete(&self) -> bool {
        !self.column.is_empty() && (!self.operator.requires_value() || !self.value.is_empty())
    }
}

/// The conditions actually submitted: complete ones, in order.
/// Incomplete members are excluded silently.
pub fn submittable_conditions(conditions: &[RowFilterCondition]) -> Vec<RowFilterCondition> {
    conditions.iter().filter(|c| c.is_complete()).cloned().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
