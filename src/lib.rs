//! Relational Model - compiles annotated type designs into relational model descriptors
//!
//! Provides:
//! - Design input types (annotated aggregates and members) with YAML/JSON loading
//! - Field compilation (naming, types, primary keys, timestamps, aliases, relationships)
//! - Model compilation (table options, primary-key and relationship collection)
//! - A canonical field ordering for renderers
//!
//! Rendering models into a concrete declaration syntax and resolving
//! relationship names to models are left to downstream consumers.

pub mod compiler;
pub mod design;
pub mod models;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use compiler::{
    CompileError, CompileResult, Compiler, CompilerConfig, FieldCompileError, ModelCompileFailure,
    compile_field, compile_model,
};
pub use design::{AggregateBody, Annotation, AnnotationKeys, Design, DesignError, Member, Metadata, TypeDefinition};
pub use models::{Datatype, Field, Model, Relationship, RelationshipKind, RelationshipNames, TypeError};
