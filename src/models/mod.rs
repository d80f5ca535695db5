//! Models module
//!
//! Value objects produced by the compiler and consumed read-only by renderers.

pub mod datatype;
pub mod field;
pub mod model;
pub mod relationship;

use std::collections::{BTreeMap, HashMap};

use serde::{Serialize, Serializer};

pub use datatype::{Datatype, TypeError};
pub use field::Field;
pub use model::Model;
pub use relationship::{Relationship, RelationshipKind, RelationshipNames};

/// Serialize a hash map with its keys in sorted order
pub(crate) fn serialize_sorted<S, V>(map: &HashMap<String, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    let sorted: BTreeMap<&String, &V> = map.iter().collect();
    sorted.serialize(serializer)
}
