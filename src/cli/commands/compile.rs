//! Compile command implementation

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::cli::CliError;
use crate::cli::output::{OutputFormat, format_output};
use crate::compiler::{CompileResult, Compiler, CompilerConfig};
use crate::design::Design;

/// Load a design from a file, or from stdin when `input` is `-`
///
/// Stdin content is parsed as YAML, which also accepts JSON documents.
fn load_design(input: &str) -> Result<Design, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(Design::from_yaml_str(&content)?)
    } else {
        Ok(Design::from_path(input)?)
    }
}

fn load_config(path: Option<&Path>) -> Result<CompilerConfig, CliError> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| CliError::FileReadError(PathBuf::from(path), e.to_string()))?;
            Ok(CompilerConfig::from_yaml_str(&content)?)
        }
        None => Ok(CompilerConfig::default()),
    }
}

/// Compile a loaded design and render it
pub fn compile_to_string(
    design: &Design,
    config: CompilerConfig,
    format: OutputFormat,
) -> Result<(String, CompileResult), CliError> {
    let result = Compiler::with_config(config).compile_design(design);
    let output = format_output(&result, format)?;
    Ok((output, result))
}

/// Handle the compile command
pub fn handle_compile(
    input: &str,
    format: OutputFormat,
    config: Option<&Path>,
) -> Result<(), CliError> {
    let design = load_design(input)?;
    let config = load_config(config)?;

    let (output, result) = compile_to_string(&design, config, format)?;
    println!("{}", output);

    if result.is_success() {
        Ok(())
    } else {
        Err(CliError::CompileFailed(result.errors.len()))
    }
}
