//! Model descriptor for compiled aggregates

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::field::Field;
use super::relationship::RelationshipNames;

/// Compiled descriptor of one entity
///
/// `fields` is keyed by the original member name and has no meaningful
/// iteration order. Renderers walk fields through [`Model::ordered_fields`] or
/// [`Model::iterate_fields`], which visit primary keys first, then plain fields
/// sorted by member name, then timestamps.
///
/// # Example
///
/// ```rust
/// use relational_model::models::Model;
///
/// let model = Model::new("User".to_string());
/// assert_eq!(model.id, Model::generate_id("User"));
/// assert!(model.fields.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Deterministic identifier derived from the normalized name
    pub id: Uuid,
    /// Normalized entity name
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Raw entity-level storage tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_tag: Option<String>,
    #[serde(default)]
    pub cached: bool,
    /// Cache duration in seconds, zero unless `cached`
    #[serde(default)]
    pub cache_duration: i64,
    #[serde(default)]
    pub dynamic_table_name: bool,
    #[serde(default)]
    pub role_based: bool,
    #[serde(default)]
    pub exclude_media: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(serialize_with = "super::serialize_sorted")]
    pub fields: HashMap<String, Field>,
    /// Primary key fields in member-name order
    #[serde(default)]
    pub primary_keys: Vec<Field>,
    #[serde(default)]
    pub relationship_names: RelationshipNames,
}

impl Model {
    pub fn new(name: String) -> Self {
        let id = Self::generate_id(&name);
        Self {
            id,
            name,
            table_name: None,
            alias: None,
            sql_tag: None,
            cached: false,
            cache_duration: 0,
            dynamic_table_name: false,
            role_based: false,
            exclude_media: false,
            description: None,
            fields: HashMap::new(),
            primary_keys: Vec::new(),
            relationship_names: RelationshipNames::default(),
        }
    }

    /// Generate a deterministic UUID v5 for a model from its normalized name
    pub fn generate_id(name: &str) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_DNS, name.as_bytes())
    }

    /// Field compiled from the given member
    pub fn field(&self, member: &str) -> Option<&Field> {
        self.fields.get(member)
    }

    /// Column names of the primary keys, in key order
    pub fn primary_key_columns(&self) -> Vec<&str> {
        self.primary_keys
            .iter()
            .map(|pk| pk.column_name.as_str())
            .collect()
    }

    /// Parameterized lookup predicate over the primary keys, e.g. `id = ? AND tenant_id = ?`
    ///
    /// Returns `None` when the model has no primary key.
    pub fn primary_key_predicate(&self) -> Option<String> {
        if self.primary_keys.is_empty() {
            return None;
        }
        let clauses: Vec<String> = self
            .primary_key_columns()
            .into_iter()
            .map(|column| format!("{} = ?", column))
            .collect();
        Some(clauses.join(" AND "))
    }

    /// Fields in canonical visitation order
    ///
    /// Primary keys come first, then fields that are neither keys nor
    /// timestamps, then timestamps. Each bucket is ordered by member name. A
    /// field that is both a key and a timestamp is visited once, as a key.
    pub fn ordered_fields(&self) -> Vec<&Field> {
        let mut members: Vec<&String> = self.fields.keys().collect();
        members.sort();

        let mut keys = Vec::new();
        let mut plain = Vec::new();
        let mut timestamps = Vec::new();
        for member in members {
            let field = &self.fields[member];
            if field.primary_key {
                keys.push(field);
            } else if field.timestamp {
                timestamps.push(field);
            } else {
                plain.push(field);
            }
        }

        keys.into_iter().chain(plain).chain(timestamps).collect()
    }

    /// Visit every field in canonical order, stopping at the first error
    pub fn iterate_fields<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&Field) -> Result<(), E>,
    {
        for field in self.ordered_fields() {
            visit(field)?;
        }
        Ok(())
    }
}
