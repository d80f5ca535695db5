//! Annotated design compiler
//!
//! Turns annotated aggregates into [`Model`] descriptors in two stages:
//!
//! - **Field compilation** - one member becomes one [`Field`]: name
//!   normalization, type translation, primary-key and timestamp
//!   classification, column alias, raw storage type and relationship
//! - **Model compilation** - table options are read from the aggregate's own
//!   annotations, then every member is compiled in sorted name order and the
//!   primary keys and relationship names are collected
//!
//! Compilation is a pure function of its input. A [`Compiler`] holds only
//! read-only configuration, so one instance can be shared across threads.
//!
//! ## Example
//!
//! ```rust
//! use relational_model::compiler::compile_model;
//! use relational_model::design::{Member, TypeDefinition};
//!
//! let user = TypeDefinition::object([
//!     ("id", Member::new("integer")),
//!     ("email", Member::new("string")),
//! ])
//! .with_required("email");
//!
//! let model = compile_model("User", &user).unwrap();
//! assert_eq!(model.primary_key_columns(), vec!["ID"]);
//! assert!(!model.fields["email"].nullable);
//! ```

mod config;
mod design;
mod error;
mod field;
mod model;
pub mod naming;

pub use config::{CompilerConfig, CompilerConfigBuilder, DEFAULT_PRIMARY_KEY_MARKER};
pub use design::{CompileResult, ModelCompileFailure};
pub use error::{CompileError, FieldCompileError};
pub use naming::Naming;

use crate::design::{AnnotationKeys, Member, TypeDefinition};
use crate::models::{Field, Model};

/// Field and model compiler
#[derive(Debug, Clone)]
pub struct Compiler {
    config: CompilerConfig,
    keys: AnnotationKeys,
    naming: Naming,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::with_config(CompilerConfig::default())
    }
}

impl Compiler {
    /// Create a compiler with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compiler with custom configuration
    pub fn with_config(config: CompilerConfig) -> Self {
        let keys = AnnotationKeys::new(&config.annotation_prefix);
        let naming = Naming::new(&config.extra_initialisms, config.strip_model_suffix);
        Self {
            config,
            keys,
            naming,
        }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Annotation keys this compiler recognizes
    pub fn keys(&self) -> &AnnotationKeys {
        &self.keys
    }
}

/// Compile one member with the default configuration
pub fn compile_field(name: &str, member: &Member) -> Result<Field, FieldCompileError> {
    Compiler::new().compile_field(name, member)
}

/// Compile one aggregate with the default configuration
pub fn compile_model(name: &str, definition: &TypeDefinition) -> Result<Model, CompileError> {
    Compiler::new().compile_model(name, definition)
}
