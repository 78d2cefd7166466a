//! Tool spec and client code generation for API2GEN
//!
//! This crate turns a parsed OpenAPI document into the two output artifacts:
//! - the function-spec file (JSON array of tool definitions)
//! - the generated client code calling the API

mod emitter;
mod openai;
mod python;
mod templates;

pub use emitter::{Argument, CallableDescriptor, CodeEmitter, Injection};
pub use openai::OpenAiGenerator;
pub use templates::{PREAMBLE, PREAMBLE_VERSION};

use api2gen_common::{GenerationConfig, GeneratorError, Result, ToolFamily, ToolFunction};
use api2gen_parser::{BuildOutput, OpenApiDocument, SkippedOperation};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// A generator for one tool family
#[cfg_attr(test, mockall::automock)]
pub trait ToolGenerator {
    /// Tool family this generator targets
    fn family(&self) -> ToolFamily;

    /// Translate the document into function specs
    fn gen_spec(&self, document: &OpenApiDocument) -> Result<BuildOutput>;

    /// Render client code for the given functions
    fn gen_code(&self, document: &OpenApiDocument, functions: &[ToolFunction]) -> Result<String>;
}

/// Look up the generator for a tool family
///
/// Only [`ToolFamily::OpenAi`] is wired; the other families are a
/// configuration error.
pub fn generator_for(
    family: ToolFamily,
    config: GenerationConfig,
) -> Result<Box<dyn ToolGenerator>> {
    match family {
        ToolFamily::OpenAi => Ok(Box::new(OpenAiGenerator::new(config)?)),
        ToolFamily::Mcp | ToolFamily::Vertex => Err(GeneratorError::Config(format!(
            "tool family {} is not implemented",
            family
        ))),
    }
}

/// What a generation run produced
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    pub functions: usize,
    pub skipped: Vec<SkippedOperation>,
    pub spec_path: PathBuf,
    pub code_path: PathBuf,
}

/// Generate both artifacts and write them to disk
///
/// Both artifacts are rendered in memory before anything is written. The
/// spec file is written first; if writing the code file then fails, the
/// spec file stays behind.
pub fn process(
    generator: &dyn ToolGenerator,
    document: &OpenApiDocument,
    spec_path: &Path,
    code_path: &Path,
) -> Result<GenerationSummary> {
    let output = generator.gen_spec(document)?;
    let spec_json = serde_json::to_string_pretty(&output.functions)?;
    let code = generator.gen_code(document, &output.functions)?;

    write_artifact(spec_path, &spec_json)?;
    write_artifact(code_path, &code)?;

    info!(
        family = %generator.family(),
        functions = output.functions.len(),
        spec = %spec_path.display(),
        code = %code_path.display(),
        "Wrote generated artifacts"
    );

    Ok(GenerationSummary {
        functions: output.functions.len(),
        skipped: output.skipped,
        spec_path: spec_path.to_path_buf(),
        code_path: code_path.to_path_buf(),
    })
}

fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            GeneratorError::Generation(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    fs::write(path, contents).map_err(|e| {
        GeneratorError::Generation(format!("Failed to write {}: {}", path.display(), e))
    })
}
