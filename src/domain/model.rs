// src/domain/model.rs
use crate::domain::errors::{SlugError, SlugResult};
use std::collections::HashMap;

/// Table metadata for a model: its name and the mapping from in-code field
/// names to storage column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    name: String,
    table: String,
    columns: HashMap<String, String>,
}

impl ModelSchema {
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            columns: HashMap::new(),
        }
    }

    /// Register a field stored under a column of the same name.
    pub fn field(self, field: impl Into<String>) -> Self {
        let field = field.into();
        self.column(field.clone(), field)
    }

    /// Register a field stored under a differently named column.
    pub fn column(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.columns.insert(field.into(), column.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn column_name(&self, field: &str) -> SlugResult<&str> {
        self.columns
            .get(field)
            .map(String::as_str)
            .ok_or_else(|| SlugError::UnknownField {
                model: self.name.clone(),
                field: field.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_renamed_column() {
        let schema = ModelSchema::new("Post", "posts")
            .field("title")
            .column("permalink", "slug");
        assert_eq!(schema.column_name("title").unwrap(), "title");
        assert_eq!(schema.column_name("permalink").unwrap(), "slug");
    }

    #[test]
    fn unknown_field_is_an_error() {
        let schema = ModelSchema::new("Post", "posts");
        let err = schema.column_name("slug").unwrap_err();
        assert_eq!(err.code(), "E_UNKNOWN_SLUGIFY_FIELD");
    }
}
