//! Relationship references between entities
//!
//! Targets are kept as bare entity names. Resolving them to compiled models is
//! left to a linking pass over the whole design, since entities may reference
//! each other in either declaration order.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of relationship a field declares
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum RelationshipKind {
    BelongsTo,
    HasOne,
    HasMany,
    ManyToMany,
}

impl RelationshipKind {
    /// All kinds in processing order; later kinds take precedence
    pub const ALL: [RelationshipKind; 4] = [
        RelationshipKind::BelongsTo,
        RelationshipKind::HasOne,
        RelationshipKind::HasMany,
        RelationshipKind::ManyToMany,
    ];
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RelationshipKind::BelongsTo => "belongsTo",
            RelationshipKind::HasOne => "hasOne",
            RelationshipKind::HasMany => "hasMany",
            RelationshipKind::ManyToMany => "manyToMany",
        };
        f.write_str(s)
    }
}

/// A field's reference to another entity by name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "target", rename_all = "camelCase")]
pub enum Relationship {
    BelongsTo(String),
    HasOne(String),
    HasMany(String),
    ManyToMany(String),
}

impl Relationship {
    pub fn new(kind: RelationshipKind, target: &str) -> Self {
        let target = target.to_string();
        match kind {
            RelationshipKind::BelongsTo => Relationship::BelongsTo(target),
            RelationshipKind::HasOne => Relationship::HasOne(target),
            RelationshipKind::HasMany => Relationship::HasMany(target),
            RelationshipKind::ManyToMany => Relationship::ManyToMany(target),
        }
    }

    pub fn kind(&self) -> RelationshipKind {
        match self {
            Relationship::BelongsTo(_) => RelationshipKind::BelongsTo,
            Relationship::HasOne(_) => RelationshipKind::HasOne,
            Relationship::HasMany(_) => RelationshipKind::HasMany,
            Relationship::ManyToMany(_) => RelationshipKind::ManyToMany,
        }
    }

    /// Name of the referenced entity
    pub fn target(&self) -> &str {
        match self {
            Relationship::BelongsTo(t)
            | Relationship::HasOne(t)
            | Relationship::HasMany(t)
            | Relationship::ManyToMany(t) => t,
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.target())
    }
}

/// Referenced entity names collected per relationship kind
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipNames {
    #[serde(default)]
    pub belongs_to: BTreeSet<String>,
    #[serde(default)]
    pub has_one: BTreeSet<String>,
    #[serde(default)]
    pub has_many: BTreeSet<String>,
    #[serde(default)]
    pub many_to_many: BTreeSet<String>,
}

impl RelationshipNames {
    /// Record the target of a relationship under its kind
    pub fn insert(&mut self, relationship: &Relationship) {
        self.names_mut(relationship.kind())
            .insert(relationship.target().to_string());
    }

    pub fn names(&self, kind: RelationshipKind) -> &BTreeSet<String> {
        match kind {
            RelationshipKind::BelongsTo => &self.belongs_to,
            RelationshipKind::HasOne => &self.has_one,
            RelationshipKind::HasMany => &self.has_many,
            RelationshipKind::ManyToMany => &self.many_to_many,
        }
    }

    fn names_mut(&mut self, kind: RelationshipKind) -> &mut BTreeSet<String> {
        match kind {
            RelationshipKind::BelongsTo => &mut self.belongs_to,
            RelationshipKind::HasOne => &mut self.has_one,
            RelationshipKind::HasMany => &mut self.has_many,
            RelationshipKind::ManyToMany => &mut self.many_to_many,
        }
    }

    pub fn is_empty(&self) -> bool {
        RelationshipKind::ALL
            .iter()
            .all(|kind| self.names(*kind).is_empty())
    }

    /// Every referenced entity name, across all kinds, without duplicates
    pub fn all_targets(&self) -> BTreeSet<&str> {
        RelationshipKind::ALL
            .iter()
            .flat_map(|kind| self.names(*kind).iter().map(String::as_str))
            .collect()
    }
}
