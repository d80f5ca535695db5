//! Annotated design input
//!
//! A design is a set of named aggregates. Each aggregate is a flat object of
//! members, and both aggregates and members carry free-form string annotations.
//! Designs are usually written in YAML:
//!
//! ```yaml
//! types:
//!   User:
//!     kind: object
//!     required: [email]
//!     annotations:
//!       model:tablename: users
//!     members:
//!       id: { type: integer }
//!       email: { type: string }
//!       deletedAt:
//!         type: datetime
//!         annotations: { "model:timestampdeleted": "" }
//! ```
//!
//! The compiler only reads designs; nothing here is mutated during compilation.

pub mod annotations;
mod error;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

pub use annotations::{Annotation, AnnotationKeys, lookup};
pub use error::DesignError;

/// Annotation map attached to members and aggregates
pub type Metadata = BTreeMap<String, String>;

/// One named, typed, annotated slot inside an aggregate
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Member {
    /// Declared type tag (e.g. `integer`, `array<string>`, `User`)
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "metadata")]
    pub annotations: Metadata,
}

impl Member {
    pub fn new(type_tag: &str) -> Self {
        Self {
            type_tag: type_tag.to_string(),
            ..Default::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn annotate(mut self, key: &str, value: &str) -> Self {
        self.annotations.insert(key.to_string(), value.to_string());
        self
    }
}

/// Shape of an aggregate's definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AggregateBody {
    /// Flat named-member object, the only shape that compiles to a model
    Object {
        #[serde(default)]
        members: HashMap<String, Member>,
    },
    /// Collection of another type
    Array { element: String },
    /// Bare primitive
    Primitive {
        #[serde(rename = "type")]
        type_tag: String,
    },
}

impl AggregateBody {
    /// Short name of the shape, used in error messages
    pub fn shape_name(&self) -> &'static str {
        match self {
            AggregateBody::Object { .. } => "object",
            AggregateBody::Array { .. } => "array",
            AggregateBody::Primitive { .. } => "primitive",
        }
    }
}

/// Annotated aggregate whose members become the fields of one entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeDefinition {
    #[serde(flatten)]
    pub body: AggregateBody,
    /// Members the aggregate itself marks as required
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "metadata")]
    pub annotations: Metadata,
}

impl TypeDefinition {
    /// Object aggregate with the given members
    pub fn object<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = (S, Member)>,
        S: Into<String>,
    {
        Self {
            body: AggregateBody::Object {
                members: members.into_iter().map(|(n, m)| (n.into(), m)).collect(),
            },
            required: Vec::new(),
            description: String::new(),
            annotations: Metadata::new(),
        }
    }

    pub fn with_required(mut self, member: &str) -> Self {
        self.required.push(member.to_string());
        self
    }

    pub fn annotate(mut self, key: &str, value: &str) -> Self {
        self.annotations.insert(key.to_string(), value.to_string());
        self
    }

    /// Whether the aggregate marks `member` as required
    pub fn is_required(&self, member: &str) -> bool {
        self.required.iter().any(|r| r == member)
    }

    /// Members of an object aggregate, `None` for any other shape
    pub fn members(&self) -> Option<&HashMap<String, Member>> {
        match &self.body {
            AggregateBody::Object { members } => Some(members),
            _ => None,
        }
    }
}

/// A complete design document: every aggregate by name
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Design {
    #[serde(default)]
    pub types: BTreeMap<String, TypeDefinition>,
}

impl Design {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, name: &str, definition: TypeDefinition) -> Self {
        self.types.insert(name.to_string(), definition);
        self
    }

    /// Parse a design from YAML
    pub fn from_yaml_str(content: &str) -> Result<Self, DesignError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a design from JSON
    pub fn from_json_str(content: &str) -> Result<Self, DesignError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read a design file, picking the format from its extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DesignError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let content = std::fs::read_to_string(path).map_err(|source| DesignError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let design = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            _ => return Err(DesignError::UnsupportedFormat(path.to_path_buf())),
        };

        info!(
            "Loaded {} aggregate(s) from {}",
            design.types.len(),
            path.display()
        );
        Ok(design)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_design() {
        let yaml = r#"
types:
  User:
    kind: object
    required: [email]
    annotations:
      "model:tablename": users
    members:
      id:
        type: integer
      email:
        type: string
        description: Login address
"#;
        let design = Design::from_yaml_str(yaml).unwrap();
        let user = &design.types["User"];

        assert!(user.is_required("email"));
        assert!(!user.is_required("id"));
        assert_eq!(user.annotations["model:tablename"], "users");

        let members = user.members().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members["email"].type_tag, "string");
        assert_eq!(members["email"].description, "Login address");
    }

    #[test]
    fn test_parse_non_object_shapes() {
        let json = r#"{
            "types": {
                "Tags": { "kind": "array", "element": "string" },
                "Age": { "kind": "primitive", "type": "integer" }
            }
        }"#;
        let design = Design::from_json_str(json).unwrap();

        assert!(design.types["Tags"].members().is_none());
        assert_eq!(design.types["Tags"].body.shape_name(), "array");
        assert_eq!(design.types["Age"].body.shape_name(), "primitive");
    }

    #[test]
    fn test_metadata_alias() {
        let yaml = r#"
types:
  Post:
    kind: object
    members:
      title:
        type: string
        metadata:
          "model:alias": headline
"#;
        let design = Design::from_yaml_str(yaml).unwrap();
        let members = design.types["Post"].members().unwrap();
        assert_eq!(members["title"].annotations["model:alias"], "headline");
    }

    #[test]
    fn test_invalid_yaml() {
        let result = Design::from_yaml_str("types: [not, a, map");
        assert!(matches!(result, Err(DesignError::Yaml(_))));
    }
}
