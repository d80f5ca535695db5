//! Whole-design compilation
//!
//! Each aggregate compiles independently; one failing entity is reported in
//! [`CompileResult::errors`] and leaves the others untouched. What to do with
//! the failures is up to the caller.

use tracing::{info, warn};

use super::{CompileError, Compiler};
use crate::design::Design;
use crate::models::Model;

/// An aggregate that failed to compile
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCompileFailure {
    /// Aggregate name as written in the design
    pub name: String,
    pub error: CompileError,
}

/// Result of compiling a design
#[derive(Debug, Default)]
pub struct CompileResult {
    /// Compiled models, in aggregate name order
    pub models: Vec<Model>,
    /// Aggregates that failed, in aggregate name order
    pub errors: Vec<ModelCompileFailure>,
}

impl CompileResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Compiled model by normalized name
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    fn collect<'a, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, Result<Model, CompileError>)>,
    {
        let mut result = CompileResult::default();
        for (name, outcome) in outcomes {
            match outcome {
                Ok(model) => result.models.push(model),
                Err(error) => {
                    warn!("Failed to compile aggregate {}: {}", name, error);
                    result.errors.push(ModelCompileFailure {
                        name: name.clone(),
                        error,
                    });
                }
            }
        }
        result
    }
}

impl Compiler {
    /// Compile every aggregate of a design
    pub fn compile_design(&self, design: &Design) -> CompileResult {
        let result = CompileResult::collect(
            design
                .types
                .iter()
                .map(|(name, definition)| (name, self.compile_model(name, definition))),
        );
        info!(
            "Compiled {} model(s), {} failed",
            result.models.len(),
            result.errors.len()
        );
        result
    }

    /// Compile every aggregate of a design on the rayon thread pool
    ///
    /// Produces the same result as [`Compiler::compile_design`].
    #[cfg(feature = "parallel")]
    pub fn compile_design_parallel(&self, design: &Design) -> CompileResult {
        use rayon::prelude::*;

        let outcomes: Vec<(&String, Result<Model, CompileError>)> = design
            .types
            .par_iter()
            .map(|(name, definition)| (name, self.compile_model(name, definition)))
            .collect();
        let result = CompileResult::collect(outcomes);
        info!(
            "Compiled {} model(s) in parallel, {} failed",
            result.models.len(),
            result.errors.len()
        );
        result
    }
}
