//! Catalog of masking attributes offered per data-type category.
//!
//! The attribute endpoint has two historical wire shapes: a categorized
//! object (`{ "string": [...], "date": [...], ... }`) and a legacy flat
//! array (`["first_name", "email", ...]`). Both must be accepted; the
//! flat shape means every category sees every attribute.

use serde::Deserialize;

use crate::category::{classify_data_type, AttributeCategory};
use crate::mapping::ColumnDescriptor;

/// Raw attribute payload as returned by the workflow service.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PiiAttributePayload {
    /// Categorized shape. Missing categories default to empty.
    Categorized {
        #[serde(default)]
        string: Vec<String>,
        #[serde(default)]
        date: Vec<String>,
        #[serde(default)]
        datetime: Vec<String>,
        #[serde(default)]
        numeric: Vec<String>,
        #[serde(default)]
        boolean: Vec<String>,
    },
    /// Legacy flat list.
    Flat(Vec<String>),
}

/// Masking attributes grouped by category, with a flat view retained
/// for display and for columns whose type is unknown.
#[derive(Debug, Clone, Default)]
pub struct PiiAttributeCatalog {
    string: Vec<String>,
    date: Vec<String>,
    datetime: Vec<String>,
    numeric: Vec<String>,
    boolean: Vec<String>,
    all: Vec<String>,
}

impl PiiAttributeCatalog {
    /// Build a catalog from either wire shape. Per-category lists are
    /// sorted alphabetically; the flat view preserves the union.
    pub fn from_payload(payload: PiiAttributePayload) -> Self {
        match payload {
            PiiAttributePayload::Categorized {
                string,
                date,
                datetime,
                numeric,
                boolean,
            } => {
                let mut all = Vec::new();
                all.extend(string.iter().cloned());
                all.extend(date.iter().cloned());
                all.extend(datetime.iter().cloned());
                all.extend(numeric.iter().cloned());
                all.extend(boolean.iter().cloned());
                Self {
                    string: sorted(string),
                    date: sorted(date),
                    datetime: sorted(datetime),
                    numeric: sorted(numeric),
                    boolean: sorted(boolean),
                    all,
                }
            }
            PiiAttributePayload::Flat(list) => {
                let per_category = sorted(list.clone());
                Self {
                    string: per_category.clone(),
                    date: per_category.clone(),
                    datetime: per_category.clone(),
                    numeric: per_category.clone(),
                    boolean: per_category,
                    all: list,
                }
            }
        }
    }

    /// Attributes applicable to one category.
    pub fn for_category(&self, category: AttributeCategory) -> &[String] {
        match category {
            AttributeCategory::String => &self.string,
            AttributeCategory::Date => &self.date,
            AttributeCategory::Datetime => &self.datetime,
            AttributeCategory::Numeric => &self.numeric,
            AttributeCategory::Boolean => &self.boolean,
        }
    }

    /// Attributes offered for a named column, inferred from its
    /// descriptor. Columns without a known descriptor fall back to the
    /// full flat list.
    pub fn attributes_for_column<'a>(
        &'a self,
        columns: &[ColumnDescriptor],
        column_name: &str,
    ) -> &'a [String] {
        match columns.iter().find(|c| c.name == column_name) {
            Some(col) if !col.data_type.is_empty() => {
                self.for_category(classify_data_type(&col.data_type))
            }
            _ => &self.all,
        }
    }

    /// The flat union of every attribute, in wire order.
    pub fn all_attributes(&self) -> &[String] {
        &self.all
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

fn sorted(mut v: Vec<String>) -> Vec<String> {
    v.sort();
    v
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str, ty: &str) -> ColumnDescriptor {
        ColumnDescriptor {
            name: name.to_string(),
            data_type: ty.to_string(),
        }
    }

    #[test]
    fn categorized_payload_deserializes() {
        let json = r#"{"string": ["email", "first_name"], "numeric": ["salary"]}"#;
        let payload: PiiAttributePayload = serde_json::from_str(json).unwrap();
        let catalog = PiiAttributeCatalog::from_payload(payload);
        assert_eq!(catalog.for_category(AttributeCategory::String), ["email", "first_name"]);
        assert_eq!(catalog.for_category(AttributeCategory::Numeric), ["salary"]);
        assert!(catalog.for_category(AttributeCategory::Date).is_empty());
    }

    #[test]
    fn flat_payload_populates_every_category() {
        let json = r#"["phone", "email"]"#;
        let payload: PiiAttributePayload = serde_json::from_str(json).unwrap();
        let catalog = PiiAttributeCatalog::from_payload(payload);
        for category in crate::category::ALL_CATEGORIES {
            assert_eq!(catalog.for_category(category), ["email", "phone"]);
        }
    }

    #[test]
    fn per_category_lists_are_sorted() {
        let payload = PiiAttributePayload::Categorized {
            string: vec!["zip".into(), "address".into(), "email".into()],
            date: vec![],
            datetime: vec![],
            numeric: vec![],
            boolean: vec![],
        };
        let catalog = PiiAttributeCatalog::from_payload(payload);
        assert_eq!(catalog.for_category(AttributeCategory::String), ["address", "email", "zip"]);
    }

    #[test]
    fn column_lookup_filters_by_inferred_category() {
        let payload = PiiAttributePayload::Categorized {
            string: vec!["email".into()],
            date: vec!["birth_date".into()],
            datetime: vec![],
            numeric: vec!["salary".into()],
            boolean: vec![],
        };
        let catalog = PiiAttributeCatalog::from_payload(payload);
        let columns = vec![descriptor("email", "varchar(255)"), descriptor("dob", "date")];

        assert_eq!(catalog.attributes_for_column(&columns, "email"), ["email"]);
        assert_eq!(catalog.attributes_for_column(&columns, "dob"), ["birth_date"]);
    }

    #[test]
    fn unknown_column_falls_back_to_flat_list() {
        let payload = PiiAttributePayload::Categorized {
            string: vec!["email".into()],
            date: vec![],
            datetime: vec![],
            numeric: vec!["salary".into()],
            boolean: vec![],
        };
        let catalog = PiiAttributeCatalog::from_payload(payload);
        assert_eq!(
            catalog.attributes_for_column(&[], "mystery"),
            ["email", "salary"]
        );
    }
}
