// src/domain/row.rs
use crate::domain::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The slice of a persisted row the slug lifecycle needs: read and write
/// named attributes and tell whether one changed since the last save.
pub trait SlugRow: Send + Sync {
    /// Current value of `field`. `None` when the attribute is absent or null.
    fn value(&self, field: &str) -> Option<FieldValue>;

    fn set_value(&mut self, field: &str, value: FieldValue);

    /// Whether `field` carries an in-flight change that has not been persisted.
    fn is_dirty(&self, field: &str) -> bool;
}

/// Attribute bag with a snapshot of the last persisted state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    attributes: BTreeMap<String, FieldValue>,
    #[serde(skip)]
    original: BTreeMap<String, FieldValue>,
    #[serde(skip)]
    persisted: bool,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a record from values that already live in storage.
    pub fn hydrate<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let attributes: BTreeMap<String, FieldValue> = attributes
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            original: attributes.clone(),
            attributes,
            persisted: true,
        }
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.attributes.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.attributes.get(field)
    }

    pub fn attributes(&self) -> &BTreeMap<String, FieldValue> {
        &self.attributes
    }

    /// Attributes whose value differs from the persisted snapshot.
    pub fn dirty(&self) -> BTreeMap<&str, &FieldValue> {
        self.attributes
            .iter()
            .filter(|(field, value)| self.original.get(field.as_str()) != Some(*value))
            .map(|(field, value)| (field.as_str(), value))
            .collect()
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Called by the persistence layer once the row has been written.
    pub fn sync_original(&mut self) {
        self.original = self.attributes.clone();
        self.persisted = true;
    }
}

impl SlugRow for Record {
    fn value(&self, field: &str) -> Option<FieldValue> {
        self.attributes
            .get(field)
            .filter(|value| !value.is_null())
            .cloned()
    }

    fn set_value(&mut self, field: &str, value: FieldValue) {
        self.attributes.insert(field.to_string(), value);
    }

    fn is_dirty(&self, field: &str) -> bool {
        match self.attributes.get(field) {
            Some(value) => self.original.get(field) != Some(value),
            None => false,
        }
    }
}
