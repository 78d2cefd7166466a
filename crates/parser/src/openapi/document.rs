//! OpenAPI document loading

use api2gen_common::{GeneratorError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Host used when a document declares neither `host` nor `servers`
const DEFAULT_HOST: &str = "http://localhost";

/// A parsed OpenAPI 2.0 or 3.x document
///
/// Kept as an untyped JSON tree so that `$ref` pointers can be resolved by
/// walking path segments. The tree is never mutated after loading.
#[derive(Debug, Clone)]
pub struct OpenApiDocument {
    root: Value,
    version: String,
}

impl OpenApiDocument {
    /// Load a document from disk
    ///
    /// Files ending in `.yaml` or `.yml` are read as YAML, everything else
    /// as JSON.
    ///
    /// # Example
    /// ```rust,ignore
    /// let document = OpenApiDocument::from_file("petstore.json")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Load(format!(
                "Failed to read OpenAPI file {}: {}",
                path.display(),
                e
            ))
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );

        let parsed = if is_yaml {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        };

        parsed.map_err(|e| match e {
            GeneratorError::Load(msg) => {
                GeneratorError::Load(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse a document from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json)
            .map_err(|e| GeneratorError::Load(format!("Failed to parse OpenAPI JSON: {}", e)))?;
        Self::from_value(root)
    }

    /// Parse a document from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(yaml)
            .map_err(|e| GeneratorError::Load(format!("Failed to parse OpenAPI YAML: {}", e)))?;
        Self::from_value(root)
    }

    /// Wrap an already-parsed JSON tree
    pub fn from_value(root: Value) -> Result<Self> {
        let Some(object) = root.as_object() else {
            return Err(GeneratorError::Load(
                "OpenAPI document must be a JSON object".to_string(),
            ));
        };

        let version = object
            .get("openapi")
            .or_else(|| object.get("swagger"))
            .and_then(Value::as_str)
            .unwrap_or("2.0")
            .to_string();

        Ok(Self { root, version })
    }

    /// The whole document, root of every `$ref`
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Declared `openapi` or `swagger` version, `"2.0"` when absent
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_v3(&self) -> bool {
        self.version.starts_with("3.")
    }

    /// The `paths` mapping, if present and well-formed
    pub fn paths(&self) -> Option<&Map<String, Value>> {
        self.root.get("paths").and_then(Value::as_object)
    }

    /// Base URL for generated calls
    ///
    /// `host` + `basePath` for 2.0-style documents, prefixed with the first
    /// declared scheme (or `http`) when the host carries none. Documents
    /// without a host fall back to the first `servers[].url`, then to
    /// `http://localhost`.
    pub fn base_url(&self) -> String {
        let base_path = self
            .root
            .get("basePath")
            .and_then(Value::as_str)
            .unwrap_or("");

        if let Some(host) = self.root.get("host").and_then(Value::as_str) {
            if host.contains("://") {
                return format!("{}{}", host, base_path);
            }
            let scheme = self
                .root
                .get("schemes")
                .and_then(Value::as_array)
                .and_then(|schemes| schemes.first())
                .and_then(Value::as_str)
                .unwrap_or("http");
            return format!("{}://{}{}", scheme, host, base_path);
        }

        if let Some(url) = self
            .root
            .get("servers")
            .and_then(Value::as_array)
            .and_then(|servers| servers.first())
            .and_then(|server| server.get("url"))
            .and_then(Value::as_str)
        {
            let url = url.trim_end_matches('/');
            if url.contains("://") {
                return url.to_string();
            }
            // Relative server URLs are resolved against the default host
            let separator = if url.starts_with('/') || url.is_empty() { "" } else { "/" };
            return format!("{}{}{}", DEFAULT_HOST, separator, url);
        }

        format!("{}{}", DEFAULT_HOST, base_path)
    }
}
