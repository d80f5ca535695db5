//! Field model for compiled members

use serde::{Deserialize, Serialize};

use super::datatype::Datatype;
use super::relationship::Relationship;

/// Compiled descriptor of one aggregate member
///
/// Fields are produced by the field compiler and owned by their parent
/// [`Model`](super::Model). Nothing mutates a field once compilation of its
/// model has finished.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Normalized identifier (e.g. `UserID` for member `userId`)
    pub name: String,
    /// Storage column name, `name` unless aliased
    pub column_name: String,
    pub datatype: Datatype,
    pub nullable: bool,
    #[serde(default)]
    pub primary_key: bool,
    /// Created, updated or deleted timestamp
    #[serde(default)]
    pub timestamp: bool,
    /// Literal storage type, copied verbatim from the design
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_type: Option<String>,
    /// Whether the column name was overridden; renderers must then emit it explicitly
    #[serde(default)]
    pub aliased: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<Relationship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Field {
    /// Create a plain nullable field whose column name matches its name
    pub fn new(name: String, datatype: Datatype) -> Self {
        Self {
            column_name: name.clone(),
            name,
            datatype,
            nullable: true,
            primary_key: false,
            timestamp: false,
            raw_type: None,
            aliased: false,
            relationship: None,
            description: None,
        }
    }

    /// Neither a primary key nor a timestamp
    pub fn is_plain(&self) -> bool {
        !self.primary_key && !self.timestamp
    }
}
