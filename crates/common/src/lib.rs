//! Common types and utilities for API2GEN
//!
//! This crate contains shared data structures, error types, and utilities
//! used across the parser, generator, and CLI components.

mod config;
mod function_spec;

pub use config::GenerationConfig;
pub use function_spec::{
    FunctionBinding, FunctionSpec, ParamBinding, ParameterSchema, PropertySchema,
    ResponseProperties, ResponseSpec, ResponseValue, ToolFunction, RESPONSE_DESCRIPTION,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during translation and generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Load error: {0}")]
    Load(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Tool family a generator targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolFamily {
    /// OpenAI-style function calling
    OpenAi,
    /// Model Context Protocol tools
    Mcp,
    /// Vertex AI function declarations
    Vertex,
}

impl fmt::Display for ToolFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolFamily::OpenAi => write!(f, "OpenAI"),
            ToolFamily::Mcp => write!(f, "MCP"),
            ToolFamily::Vertex => write!(f, "Vertex"),
        }
    }
}

/// Type vocabulary of a function spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappedType {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl MappedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MappedType::String => "string",
            MappedType::Number => "number",
            MappedType::Boolean => "boolean",
            MappedType::Array => "array",
            MappedType::Object => "object",
        }
    }
}

/// HTTP methods that produce functions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Parse a path-item key (case-insensitive). Keys such as `parameters`,
    /// `head` or `options` return `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "DELETE" => Some(HttpMethod::Delete),
            "PATCH" => Some(HttpMethod::Patch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter location (`in` field)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
    Body,
    Header,
    FormData,
    Cookie,
    Other(String),
}

impl ParamLocation {
    pub fn parse(value: &str) -> Self {
        match value {
            "path" => ParamLocation::Path,
            "query" => ParamLocation::Query,
            "body" => ParamLocation::Body,
            "header" => ParamLocation::Header,
            "formData" => ParamLocation::FormData,
            "cookie" => ParamLocation::Cookie,
            other => ParamLocation::Other(other.to_string()),
        }
    }
}
