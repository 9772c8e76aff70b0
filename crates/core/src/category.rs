//! SQL data type → attribute category classification.
//!
//! Columns are grouped into five coarse categories so the mapping step
//! can offer only the masking attributes that make sense for a column's
//! type. Classification is total: anything unrecognized is treated as a
//! string column.

use serde::{Deserialize, Serialize};

/// Coarse category of a column's SQL data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeCategory {
    String,
    Date,
    Datetime,
    Numeric,
    Boolean,
}

/// All categories, in the order the catalog lists them.
pub const ALL_CATEGORIES: [AttributeCategory; 5] = [
    AttributeCategory::String,
    AttributeCategory::Date,
    AttributeCategory::Datetime,
    AttributeCategory::Numeric,
    AttributeCategory::Boolean,
];

/// Classify a raw SQL data type name into an [`AttributeCategory`].
///
/// Matching is case-insensitive and substring-based, mirroring the
/// variety of vendor type names (`int`, `bigint`, `numeric(10,2)`,
/// `timestamp with time zone`, ...). Bare `date` is a date; anything
/// carrying a time component is a datetime. Unknown or empty types
/// default to [`AttributeCategory::String`].
pub fn classify_data_type(data_type: &str) -> AttributeCategory {
    let ty = data_type.to_ascii_lowercase();
    if ty.is_empty() {
        return AttributeCategory::String;
    }

    if ["int", "numeric", "decimal", "float", "real", "money"]
        .iter()
        .any(|t| ty.contains(t))
    {
        return AttributeCategory::Numeric;
    }

    if ty == "date" {
        return AttributeCategory::Date;
    }

    if ty.contains("datetime") || ty.contains("timestamp") || ty.contains("time") {
        return AttributeCategory::Datetime;
    }

    if ty == "bit" || ty == "bool" || ty == "boolean" {
        return AttributeCategory::Boolean;
    }

    AttributeCategory::String
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_types() {
        for ty in ["int", "bigint", "numeric(10,2)", "decimal", "float8", "real", "money", "INTEGER"] {
            assert_eq!(classify_data_type(ty), AttributeCategory::Numeric, "{ty}");
        }
    }

    #[test]
    fn bare_date_is_date() {
        assert_eq!(classify_data_type("date"), AttributeCategory::Date);
        assert_eq!(classify_data_type("DATE"), AttributeCategory::Date);
    }

    #[test]
    fn time_bearing_types_are_datetime() {
        for ty in ["datetime", "datetime2", "timestamp", "timestamp with time zone", "time"] {
            assert_eq!(classify_data_type(ty), AttributeCategory::Datetime, "{ty}");
        }
    }

    #[test]
    fn boolean_types() {
        for ty in ["bit", "bool", "boolean", "BOOLEAN"] {
            assert_eq!(classify_data_type(ty), AttributeCategory::Boolean, "{ty}");
        }
    }

    #[test]
    fn everything_else_is_string() {
        for ty in ["varchar(255)", "nvarchar", "char", "text", "ntext", "uuid", "xml", ""] {
            assert_eq!(classify_data_type(ty), AttributeCategory::String, "{ty:?}");
        }
    }
}
