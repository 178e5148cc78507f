//! Raw extraction rows as handed over by the documentation scraper.

use serde::{Deserialize, Serialize};

/// Prefix the documentation prints in front of default values.
const DEFAULT_PREFIX: &str = "default: ";

/// One documented field, exactly as scraped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawField {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_tag: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub default: String,
    /// Literal values found in formatted spans of the description
    #[serde(default)]
    pub enum_values: Vec<String>,
}

impl RawField {
    pub fn new(name: &str, type_tag: &str, desc: &str) -> Self {
        Self {
            name: name.to_string(),
            type_tag: type_tag.to_string(),
            desc: desc.to_string(),
            ..Default::default()
        }
    }

    pub fn with_enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Default text without the `default: ` label.
    pub fn default_text(&self) -> &str {
        self.default
            .strip_prefix(DEFAULT_PREFIX)
            .unwrap_or(&self.default)
    }
}

/// One documented type: name, description and its field rows in document
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub fields: Vec<RawField>,
}

impl RawRow {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_desc(mut self, desc: &str) -> Self {
        self.desc = desc.to_string();
        self
    }

    pub fn with_field(mut self, field: RawField) -> Self {
        self.fields.push(field);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_text_strips_label() {
        let mut field = RawField::new("visible", "Boolean", "");
        field.default = "default: true".to_string();
        assert_eq!(field.default_text(), "true");

        field.default = "0".to_string();
        assert_eq!(field.default_text(), "0");
    }

    #[test]
    fn test_deserialize_sparse_row() {
        let row: RawRow = serde_json::from_str(
            r#"{"name": "Color", "fields": [{"name": "r", "type": "Number"}]}"#,
        )
        .unwrap();
        assert_eq!(row.desc, "");
        assert_eq!(row.fields[0].type_tag, "Number");
        assert!(row.fields[0].enum_values.is_empty());
    }
}
