//! OpenAPI parsing and function-spec translation
//!
//! This crate walks an OpenAPI 2.0 or 3.x document and produces the
//! normalized function specifications (`ToolFunction`) consumed by the
//! generator.
//!
//! ## Translation Strategy
//!
//! Every `GET`, `POST`, `PUT`, `DELETE` and `PATCH` operation with an
//! `operationId` yields one function per subset of its optional parameters:
//! - `listPets` (no optional parameters selected)
//! - `listPets_limit`
//! - `listPets_tag`
//! - `listPets_limit_tag`

pub mod openapi;
mod type_mapper;

pub use openapi::{
    resolve_reference, BuildOutput, FunctionSpecBuilder, OpenApiDocument, SkipReason,
    SkippedOperation,
};
pub use type_mapper::TypeMapper;

use api2gen_common::{GenerationConfig, Result};
use std::path::Path;

/// Load a document and translate it in one call
///
/// # Arguments
/// * `spec_path` - OpenAPI document (JSON or YAML)
/// * `config` - Generation settings
///
/// # Returns
/// * `BuildOutput` - Generated functions plus skipped operations
pub fn translate_file(spec_path: &Path, config: &GenerationConfig) -> Result<BuildOutput> {
    let document = OpenApiDocument::from_file(spec_path)?;
    Ok(FunctionSpecBuilder::new(&document, config).build())
}
