//! Domain types for the wit entity API.
//!
//! # Design
//! These types mirror the service's JSON resource model field for field.
//! The mock-server crate keeps its own copies; integration tests catch any
//! schema drift between the two.
//!
//! Response bodies from the service sometimes omit `doc`, `builtin` or the
//! value lists, or send them as `null`; every field except the identifiers
//! falls back to its default in both cases.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A named classification category known to the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub builtin: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub doc: String,
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Vec<EntityValue>,
}

impl Entity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn with_value(mut self, value: EntityValue) -> Self {
        self.values.push(value);
        self
    }

    /// Look up a canonical value by name.
    pub fn value(&self, value: &str) -> Option<&EntityValue> {
        self.values.iter().find(|v| v.value == value)
    }
}

/// A canonical value under an entity together with its alternate phrasings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityValue {
    pub value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expressions: Vec<String>,
}

impl EntityValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expressions: Vec::new(),
        }
    }

    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expressions.push(expression.into());
        self
    }
}

/// Entity ids as returned by the listing endpoint, in service order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Entities(pub Vec<String>);

impl Entities {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|e| e == id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl IntoIterator for Entities {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
