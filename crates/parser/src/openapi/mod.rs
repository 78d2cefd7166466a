//! OpenAPI 2.0 / 3.x translation
//!
//! Turns the operations of an OpenAPI document into tool-calling function
//! specs.
//!
//! ## Pipeline
//! - [`OpenApiDocument`] loads the JSON (or YAML) tree once
//! - [`resolve_reference`] follows local `#/...` pointers, one level deep
//! - [`ParameterSet`] splits required/optional parameters and enumerates
//!   every optional subset
//! - [`crate::TypeMapper`] coerces types and picks the response schema
//! - [`FunctionSpecBuilder`] drives the above per operation
//!
//! ## Usage
//! ```rust,ignore
//! use api2gen_parser::openapi::{FunctionSpecBuilder, OpenApiDocument};
//!
//! let document = OpenApiDocument::from_file("petstore.json")?;
//! let output = FunctionSpecBuilder::new(&document, &config).build();
//! ```

mod builder;
mod document;
mod expander;
mod resolver;

pub use builder::{
    BuildOutput, FunctionSpecBuilder, SkipReason, SkippedOperation, REQUEST_BODY_PARAM,
};
pub use document::OpenApiDocument;
pub use expander::{Parameter, ParameterSet, Variant};
pub use resolver::resolve_reference;
