//! Python client emission
//!
//! Each [`ToolFunction`] becomes a [`CallableDescriptor`]; the whole list is
//! rendered in a single pass of the `client.py` template.

use crate::python;
use crate::templates::{self, CLIENT_TEMPLATE, PREAMBLE, PREAMBLE_VERSION};
use api2gen_common::{GeneratorError, ParamLocation, Result, ToolFunction};
use serde::Serialize;
use std::collections::HashSet;
use tera::Tera;
use tracing::debug;

/// One argument in a generated signature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Argument {
    pub ident: String,
    pub annotation: &'static str,
}

/// An argument routed into the HTTP call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Injection {
    /// Original parameter name (dict key, header name)
    pub key: String,

    /// Python argument holding the value
    pub ident: String,

    /// `{key}` as it appears in the path template
    pub placeholder: String,
}

impl Injection {
    fn new(key: &str, ident: &str) -> Self {
        Self {
            key: key.to_string(),
            ident: ident.to_string(),
            placeholder: format!("{{{}}}", key),
        }
    }
}

/// Code model of one generated callable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallableDescriptor {
    pub ident: String,
    pub docstring: String,
    pub signature: Vec<Argument>,
    pub path: String,
    pub method: &'static str,
    pub path_params: Vec<Injection>,
    pub query_params: Vec<Injection>,
    pub body_params: Vec<Injection>,
    pub header_params: Vec<Injection>,
}

impl CallableDescriptor {
    /// Build the descriptor for a function
    ///
    /// Every property lands in the signature. Only path, query, body and
    /// header parameters are routed into the call; the rest (no `in`,
    /// `formData`, `cookie`) are accepted and ignored.
    pub fn from_function(function: &ToolFunction) -> Self {
        let spec = &function.function;
        let binding = &function.binding;

        let mut descriptor = Self {
            ident: python::function_identifier(&spec.name),
            docstring: python::docstring(&spec.description),
            signature: Vec::with_capacity(spec.parameters.properties.len()),
            path: binding.path.clone(),
            method: binding.method.as_str(),
            path_params: Vec::new(),
            query_params: Vec::new(),
            body_params: Vec::new(),
            header_params: Vec::new(),
        };

        // Distinct OpenAPI names can sanitize to the same identifier
        let mut taken = HashSet::new();
        for (name, property) in &spec.parameters.properties {
            let ident = python::unique_identifier(python::argument_identifier(name), &taken);
            taken.insert(ident.clone());
            descriptor.signature.push(Argument {
                ident: ident.clone(),
                annotation: python::annotation(property.property_type),
            });

            let target = match binding.location_of(name) {
                Some(ParamLocation::Path) => &mut descriptor.path_params,
                Some(ParamLocation::Query) => &mut descriptor.query_params,
                Some(ParamLocation::Body) => &mut descriptor.body_params,
                Some(ParamLocation::Header) => &mut descriptor.header_params,
                _ => continue,
            };
            target.push(Injection::new(name, &ident));
        }

        descriptor
    }
}

/// Renders the Python client for a list of functions
pub struct CodeEmitter {
    tera: Tera,
    token_placeholder: String,
}

impl CodeEmitter {
    pub fn new(token_placeholder: impl Into<String>) -> Result<Self> {
        Ok(Self {
            tera: templates::load_templates()?,
            token_placeholder: token_placeholder.into(),
        })
    }

    /// Render the preamble followed by one callable per function, in order
    pub fn emit(
        &self,
        functions: &[ToolFunction],
        base_url: &str,
        openapi_version: &str,
    ) -> Result<String> {
        let descriptors: Vec<CallableDescriptor> = functions
            .iter()
            .map(CallableDescriptor::from_function)
            .collect();
        debug!(callables = descriptors.len(), base_url, "Rendering Python client");

        let mut context = tera::Context::new();
        context.insert("preamble", PREAMBLE.trim_end());
        context.insert("preamble_version", PREAMBLE_VERSION);
        context.insert("token_placeholder", &self.token_placeholder);
        context.insert("base_url", base_url);
        context.insert("openapi_version", openapi_version);
        context.insert("functions", &descriptors);

        self.tera
            .render(CLIENT_TEMPLATE, &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {:?}", e)))
    }
}
