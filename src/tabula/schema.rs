use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::model::{Draft, FieldValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Select(Vec<String>),
    Number,
}

/// Describes one field of an entity kind: its key, display label, type,
/// whether it must be non-empty, whether search looks at it, and the value
/// a blank draft starts from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub searchable: bool,
    pub default: FieldValue,
}

impl FieldSpec {
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Text,
            required: false,
            searchable: false,
            default: FieldValue::text(""),
        }
    }

    pub fn select(name: &str, label: &str, options: &[&str]) -> Self {
        let options: Vec<String> = options.iter().map(|s| s.to_string()).collect();
        let default = options.first().cloned().unwrap_or_default();
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Select(options),
            required: false,
            searchable: false,
            default: FieldValue::Text(default),
        }
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Number,
            required: false,
            searchable: false,
            default: FieldValue::number(0.0),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn default_value(mut self, value: FieldValue) -> Self {
        self.default = value;
        self
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == FieldKind::Number
    }
}

/// The shape of one entity kind. The engine is driven entirely by these
/// descriptions; screens differ only in the schema they are handed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Singular key, e.g. "user".
    pub name: String,
    /// Singular display label, e.g. "User".
    pub label: String,
    /// Plural display form, e.g. "users".
    pub plural: String,
    pub fields: Vec<FieldSpec>,
    /// Whether records support manual position moves.
    pub reorderable: bool,
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn searchable_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.searchable)
    }

    /// A draft populated with every field's default value.
    pub fn blank_draft(&self) -> Draft {
        let mut draft = Draft::default();
        for field in &self.fields {
            draft.set(field.name.as_str(), field.default.clone());
        }
        draft
    }
}

pub static USERS: Lazy<EntitySchema> = Lazy::new(|| EntitySchema {
    name: "user".to_string(),
    label: "User".to_string(),
    plural: "users".to_string(),
    fields: vec![
        FieldSpec::text("name", "Name").required().searchable(),
        FieldSpec::text("email", "Email").required().searchable(),
        FieldSpec::select("role", "Role", &["Admin", "Editor", "Viewer"])
            .default_value(FieldValue::text("Viewer")),
        FieldSpec::select("status", "Status", &["active", "inactive", "pending"])
            .default_value(FieldValue::text("inactive")),
    ],
    reorderable: false,
});

pub static PRODUCTS: Lazy<EntitySchema> = Lazy::new(|| EntitySchema {
    name: "product".to_string(),
    label: "Product".to_string(),
    plural: "products".to_string(),
    fields: vec![
        FieldSpec::text("name", "Name").required().searchable(),
        FieldSpec::text("description", "Description").required().searchable(),
        FieldSpec::number("price", "Price"),
        FieldSpec::text("category", "Category").required().searchable(),
        FieldSpec::number("stock", "Stock"),
    ],
    reorderable: false,
});

pub static DOCUMENTS: Lazy<EntitySchema> = Lazy::new(|| EntitySchema {
    name: "document".to_string(),
    label: "Document".to_string(),
    plural: "documents".to_string(),
    fields: vec![
        FieldSpec::text("title", "Title").required().searchable(),
        FieldSpec::text("content", "Content").searchable(),
    ],
    reorderable: true,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_user_draft_uses_form_defaults() {
        let draft = USERS.blank_draft();
        assert_eq!(draft.get("name"), Some(&FieldValue::text("")));
        assert_eq!(draft.get("role"), Some(&FieldValue::text("Viewer")));
        assert_eq!(draft.get("status"), Some(&FieldValue::text("inactive")));
    }

    #[test]
    fn blank_product_draft_zeroes_numeric_fields() {
        let draft = PRODUCTS.blank_draft();
        assert_eq!(draft.get("price"), Some(&FieldValue::number(0.0)));
        assert_eq!(draft.get("stock"), Some(&FieldValue::number(0.0)));
    }

    #[test]
    fn searchable_fields_match_the_search_boxes() {
        let names: Vec<&str> = USERS.searchable_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "email"]);

        let names: Vec<&str> = PRODUCTS
            .searchable_fields()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["name", "description", "category"]);
    }

    #[test]
    fn unknown_field_lookup_is_none() {
        assert!(USERS.field("price").is_none());
        assert!(PRODUCTS.field("price").is_some());
    }
}
