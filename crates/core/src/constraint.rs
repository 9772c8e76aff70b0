//! Constraint check kinds and per-table results.
//!
//! Six independent read-only checks exist per table. Results are held
//! per (table, kind) with a status derived from the row count: foreign
//! keys present warrant a warning (masking a referenced column can
//! break referential integrity), triggers present are informational,
//! everything else is a plain success.

use serde::Deserialize;

/// One category of schema metadata checked per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    PrimaryKeys,
    ForeignKeys,
    UniqueConstraints,
    CheckConstraints,
    Triggers,
    Indexes,
}

/// All kinds, in the order the aggregate check issues and displays
/// them.
pub const ALL_KINDS: [ConstraintKind; 6] = [
    ConstraintKind::PrimaryKeys,
    ConstraintKind::ForeignKeys,
    ConstraintKind::UniqueConstraints,
    ConstraintKind::CheckConstraints,
    ConstraintKind::Triggers,
    ConstraintKind::Indexes,
];

impl ConstraintKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryKeys => "primary_keys",
            Self::ForeignKeys => "foreign_keys",
            Self::UniqueConstraints => "unique_constraints",
            Self::CheckConstraints => "check_constraints",
            Self::Triggers => "triggers",
            Self::Indexes => "indexes",
        }
    }

    /// Status assigned to a completed check of this kind with `count`
    /// rows.
    pub fn status_for_count(self, count: usize) -> ConstraintStatus {
        match self {
            Self::ForeignKeys if count > 0 => ConstraintStatus::Warning,
            Self::Triggers if count > 0 => ConstraintStatus::Info,
            _ => ConstraintStatus::Success,
        }
    }
}

/// Severity of a completed constraint check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintStatus {
    Success,
    Warning,
    Info,
}

/// Result of one kind's check for one table.
#[derive(Debug, Clone)]
pub struct ConstraintCheckState {
    pub status: ConstraintStatus,
    pub count: usize,
    pub rows: Vec<serde_json::Value>,
}

impl ConstraintCheckState {
    pub fn from_rows(kind: ConstraintKind, rows: Vec<serde_json::Value>) -> Self {
        Self {
            status: kind.status_for_count(rows.len()),
            count: rows.len(),
            rows,
        }
    }
}

/// A foreign-key row with its structural classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRef {
    pub constraint_name: String,
    pub column_name: String,
    pub referenced_schema: String,
    pub referenced_table: String,
    pub referenced_column: String,
    /// The reference points back at the checked table itself.
    pub self_referencing: bool,
    /// The service reported the referenced parent row/table as absent.
    pub parent_missing: bool,
}

#[derive(Debug, Deserialize)]
struct ForeignKeyRow {
    #[serde(default)]
    constraint_name: String,
    #[serde(default)]
    column_name: String,
    #[serde(default)]
    referenced_schema: String,
    #[serde(default)]
    referenced_table: String,
    #[serde(default)]
    referenced_column: String,
    #[serde(default)]
    parent_missing: bool,
}

/// Classify raw foreign-key rows against the table being checked.
///
/// `parent_missing` is taken from the data as reported, never
/// recomputed here. Rows that do not decode as foreign-key shapes are
/// skipped.
pub fn classify_foreign_keys(
    rows: &[serde_json::Value],
    schema_name: &str,
    table_name: &str,
) -> Vec<ForeignKeyRef> {
    rows.iter()
        .filter_map(|row| serde_json::from_value::<ForeignKeyRow>(row.clone()).ok())
        .map(|row| {
            let self_referencing = row.referenced_table == table_name
                && (row.referenced_schema.is_empty() || row.referenced_schema == schema_name);
            ForeignKeyRef {
                constraint_name: row.constraint_name,
                column_name: row.column_name,
                referenced_schema: row.referenced_schema,
                referenced_table: row.referenced_table,
                referenced_column: row.referenced_column,
                self_referencing,
                parent_missing: row.parent_missing,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn foreign_keys_with_rows_warn() {
        assert_eq!(
            ConstraintKind::ForeignKeys.status_for_count(2),
            ConstraintStatus::Warning
        );
        assert_eq!(
            ConstraintKind::ForeignKeys.status_for_count(0),
            ConstraintStatus::Success
        );
    }

    #[test]
    fn triggers_with_rows_are_informational() {
        assert_eq!(
            ConstraintKind::Triggers.status_for_count(1),
            ConstraintStatus::Info
        );
        assert_eq!(
            ConstraintKind::Triggers.status_for_count(0),
            ConstraintStatus::Success
        );
    }

    #[test]
    fn other_kinds_always_succeed() {
        for kind in [
            ConstraintKind::PrimaryKeys,
            ConstraintKind::UniqueConstraints,
            ConstraintKind::CheckConstraints,
            ConstraintKind::Indexes,
        ] {
            assert_eq!(kind.status_for_count(5), ConstraintStatus::Success, "{kind:?}");
        }
    }

    #[test]
    fn state_from_rows_counts() {
        let state = ConstraintCheckState::from_rows(
            ConstraintKind::Indexes,
            vec![json!({"index_name": "ix_a"}), json!({"index_name": "ix_b"})],
        );
        assert_eq!(state.count, 2);
        assert_eq!(state.status, ConstraintStatus::Success);
    }

    #[test]
    fn self_reference_classification() {
        let rows = vec![
            json!({
                "constraint_name": "fk_manager",
                "column_name": "manager_id",
                "referenced_schema": "dbo",
                "referenced_table": "employees",
                "referenced_column": "id"
            }),
            json!({
                "constraint_name": "fk_dept",
                "column_name": "dept_id",
                "referenced_schema": "dbo",
                "referenced_table": "departments",
                "referenced_column": "id",
                "parent_missing": true
            }),
        ];
        let refs = classify_foreign_keys(&rows, "dbo", "employees");
        assert!(refs[0].self_referencing);
        assert!(!refs[0].parent_missing);
        assert!(!refs[1].self_referencing);
        assert!(refs[1].parent_missing);
    }

    #[test]
    fn schema_mismatch_is_not_self_referencing() {
        let rows = vec![json!({
            "constraint_name": "fk_x",
            "column_name": "x_id",
            "referenced_schema": "audit",
            "referenced_table": "employees",
            "referenced_column": "id"
        })];
        let refs = classify_foreign_keys(&rows, "dbo", "employees");
        assert!(!refs[0].self_referencing);
    }

    #[test]
    fn undecodable_rows_are_skipped() {
        let rows = vec![json!("not an object")];
        assert!(classify_foreign_keys(&rows, "dbo", "t").is_empty());
    }
}
