//! Semantic column types
//!
//! Member type tags are translated into a [`Datatype`]. The tag grammar is
//! small: builtin scalars, `array<T>`, `hash<K,V>` and capitalized user type
//! names. Generic arguments may nest, e.g. `hash<string,array<integer>>`.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

static GENERIC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(array|hash)\s*<(.*)>$").unwrap());

/// Deepest generic nesting accepted in a type tag
pub const MAX_NESTING_DEPTH: usize = 64;

static USER_TYPE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9_]*(\.[A-Z][A-Za-z0-9_]*)*$").unwrap());

/// Failure translating a member's declared type tag
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("empty type tag")]
    Empty,

    #[error("unknown type tag `{0}`")]
    Unknown(String),

    #[error("malformed type tag `{0}`")]
    Malformed(String),

    #[error("hash key must be a scalar type, found `{0}`")]
    NonScalarKey(String),
}

/// Semantic type of a field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Datatype {
    Boolean,
    Integer,
    Number,
    String,
    DateTime,
    Uuid,
    /// Untyped value
    Any,
    /// Free-form object without declared members
    Object,
    Array(Box<Datatype>),
    Hash(Box<Datatype>, Box<Datatype>),
    /// Reference to another named type in the design
    UserType(String),
}

impl Datatype {
    /// Scalars can be used as hash keys and stored in a single column
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Datatype::Boolean
                | Datatype::Integer
                | Datatype::Number
                | Datatype::String
                | Datatype::DateTime
                | Datatype::Uuid
        )
    }

    fn parse_builtin(tag: &str) -> Option<Self> {
        let datatype = match tag.to_ascii_lowercase().as_str() {
            "boolean" | "bool" => Datatype::Boolean,
            "integer" | "int" => Datatype::Integer,
            "number" | "float" => Datatype::Number,
            "string" => Datatype::String,
            "datetime" => Datatype::DateTime,
            "uuid" => Datatype::Uuid,
            "any" => Datatype::Any,
            "object" => Datatype::Object,
            _ => return None,
        };
        Some(datatype)
    }
}

/// Split generic arguments on top-level commas only
fn split_arguments(inner: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (idx, ch) in inner.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(inner[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(inner[start..].trim());
    parts
}

impl FromStr for Datatype {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tag(s, 0)
    }
}

fn parse_tag(s: &str, depth: usize) -> Result<Datatype, TypeError> {
    let tag = s.trim();
    if tag.is_empty() {
        return Err(TypeError::Empty);
    }

    if let Some(datatype) = Datatype::parse_builtin(tag) {
        return Ok(datatype);
    }

    if let Some(caps) = GENERIC_REGEX.captures(tag) {
        if depth >= MAX_NESTING_DEPTH {
            return Err(TypeError::Malformed(tag.to_string()));
        }
        let args = split_arguments(&caps[2]);
        if args.iter().any(|a| a.is_empty()) {
            return Err(TypeError::Malformed(tag.to_string()));
        }
        return match (caps[1].to_ascii_lowercase().as_str(), args.as_slice()) {
            ("array", [element]) => Ok(Datatype::Array(Box::new(parse_tag(element, depth + 1)?))),
            ("hash", [key, value]) => {
                let key = parse_tag(key, depth + 1)?;
                if !key.is_scalar() {
                    return Err(TypeError::NonScalarKey(key.to_string()));
                }
                Ok(Datatype::Hash(Box::new(key), Box::new(parse_tag(value, depth + 1)?)))
            }
            _ => Err(TypeError::Malformed(tag.to_string())),
        };
    }

    if tag.contains(['<', '>', ',']) {
        return Err(TypeError::Malformed(tag.to_string()));
    }

    if USER_TYPE_REGEX.is_match(tag) {
        return Ok(Datatype::UserType(tag.to_string()));
    }

    Err(TypeError::Unknown(tag.to_string()))
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datatype::Boolean => f.write_str("boolean"),
            Datatype::Integer => f.write_str("integer"),
            Datatype::Number => f.write_str("number"),
            Datatype::String => f.write_str("string"),
            Datatype::DateTime => f.write_str("datetime"),
            Datatype::Uuid => f.write_str("uuid"),
            Datatype::Any => f.write_str("any"),
            Datatype::Object => f.write_str("object"),
            Datatype::Array(element) => write!(f, "array<{}>", element),
            Datatype::Hash(key, value) => write!(f, "hash<{},{}>", key, value),
            Datatype::UserType(name) => f.write_str(name),
        }
    }
}

impl Serialize for Datatype {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Datatype {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}
