//! Error types for compilation

use std::num::ParseIntError;

use thiserror::Error;

use crate::models::TypeError;

/// A member's declared type could not be translated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("field `{member}` has an invalid type `{type_tag}`: {source}")]
pub struct FieldCompileError {
    pub member: String,
    pub type_tag: String,
    #[source]
    pub source: TypeError,
}

/// Errors that abort the compilation of one model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The aggregate is not a flat named-member object
    #[error("aggregate `{model}` is a {found}, expected an object with named members")]
    UnsupportedAggregateShape { model: String, found: &'static str },

    /// Cache flag present with a duration that is not an integer number of seconds
    #[error("aggregate `{model}` has an invalid cache duration `{value}`: {source}")]
    InvalidCacheDuration {
        model: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A member failed to compile
    #[error(transparent)]
    FieldCompile(#[from] FieldCompileError),
}
