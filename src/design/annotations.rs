//! Recognized annotation keys
//!
//! Every key the compiler reacts to is listed in [`Annotation`]. Concrete key
//! strings are rendered through [`AnnotationKeys`] so that callers can namespace
//! them (the default prefix is `model:`, giving e.g. `model:primarykey`).

use super::Metadata;

/// Default prefix prepended to every annotation suffix
pub const DEFAULT_PREFIX: &str = "model:";

/// Annotation keys understood by the field and model compilers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Annotation {
    /// Marks a member as part of the primary key when its value contains the marker token
    PrimaryKey,
    /// Literal storage type for a member, or a raw tag for the whole entity
    SqlTag,
    /// Creation timestamp
    TimestampCreated,
    /// Last-update timestamp
    TimestampUpdated,
    /// Soft-delete timestamp
    TimestampDeleted,
    /// Column name override on a member, entity alias on an aggregate
    Alias,
    BelongsTo,
    HasOne,
    HasMany,
    ManyToMany,
    /// Entity cache flag; the value is the cache duration in seconds
    Cached,
    TableName,
    DynamicTableName,
    /// Entity participates in role-based access
    RoleBased,
    /// Entity excludes media fields
    NoMedia,
}

impl Annotation {
    /// Key suffix, appended to the configured prefix
    pub const fn suffix(self) -> &'static str {
        match self {
            Annotation::PrimaryKey => "primarykey",
            Annotation::SqlTag => "sqltag",
            Annotation::TimestampCreated => "timestampcreated",
            Annotation::TimestampUpdated => "timestampupdated",
            Annotation::TimestampDeleted => "timestampdeleted",
            Annotation::Alias => "alias",
            Annotation::BelongsTo => "belongsto",
            Annotation::HasOne => "hasone",
            Annotation::HasMany => "hasmany",
            Annotation::ManyToMany => "manytomany",
            Annotation::Cached => "cached",
            Annotation::TableName => "tablename",
            Annotation::DynamicTableName => "dynamictablename",
            Annotation::RoleBased => "roler",
            Annotation::NoMedia => "nomedia",
        }
    }
}

/// Renders concrete annotation keys for a given prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationKeys {
    prefix: String,
}

impl Default for AnnotationKeys {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl AnnotationKeys {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Full key string for an annotation
    pub fn key(&self, annotation: Annotation) -> String {
        format!("{}{}", self.prefix, annotation.suffix())
    }

    /// Look up an annotation value in a metadata map
    pub fn get<'a>(&self, annotations: &'a Metadata, annotation: Annotation) -> Option<&'a str> {
        lookup(annotations, &self.key(annotation))
    }

    /// Whether the annotation is present, regardless of its value
    pub fn has(&self, annotations: &Metadata, annotation: Annotation) -> bool {
        self.get(annotations, annotation).is_some()
    }
}

/// Typed accessor over an annotation map
pub fn lookup<'a>(annotations: &'a Metadata, key: &str) -> Option<&'a str> {
    annotations.get(key).map(String::as_str)
}
