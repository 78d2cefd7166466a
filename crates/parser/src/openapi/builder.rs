//! Builds function specs from an OpenAPI document
//!
//! One pass over `paths` in document order. Each supported operation expands
//! into one [`ToolFunction`] per optional-parameter subset. Malformed
//! operations are recorded in [`BuildOutput::skipped`] and never abort the
//! pass.

use super::document::OpenApiDocument;
use super::expander::{Parameter, ParameterSet};
use super::resolver::resolve_reference;
use crate::TypeMapper;
use api2gen_common::{
    FunctionBinding, FunctionSpec, GenerationConfig, HttpMethod, ParamBinding, ParamLocation,
    ParameterSchema, PropertySchema, ResponseSpec, ToolFunction,
};
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Name given to a 3.x `requestBody` when surfaced as a parameter
pub const REQUEST_BODY_PARAM: &str = "body";

/// Why an operation produced no functions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("operation has no operationId")]
    MissingOperationId,

    #[error("operation is not an object")]
    NotAnObject,

    #[error("`parameters` is not an array")]
    ParametersNotArray,

    #[error("parameter #{0} is not an object with a name")]
    MalformedParameter(usize),

    #[error("parameter `{0}` is declared in more than one location")]
    DuplicateParameterName(String),

    #[error("{count} optional parameters exceed the limit of {max}")]
    TooManyOptionalParameters { count: usize, max: usize },
}

/// An operation left out of the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedOperation {
    pub path: String,
    pub method: HttpMethod,
    pub operation_id: Option<String>,
    pub reason: SkipReason,
}

/// Result of one translation pass
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    /// Functions in document traversal order
    pub functions: Vec<ToolFunction>,

    pub skipped: Vec<SkippedOperation>,
}

/// Walks a document and emits function specs
pub struct FunctionSpecBuilder<'a> {
    document: &'a OpenApiDocument,
    config: &'a GenerationConfig,
}

impl<'a> FunctionSpecBuilder<'a> {
    pub fn new(document: &'a OpenApiDocument, config: &'a GenerationConfig) -> Self {
        Self { document, config }
    }

    /// Translate every supported operation in the document
    pub fn build(&self) -> BuildOutput {
        let mut output = BuildOutput::default();

        let Some(paths) = self.document.paths() else {
            warn!("Document has no `paths` object; nothing to translate");
            return output;
        };

        for (path, path_item) in paths {
            let Some(operations) = path_item.as_object() else {
                warn!(path = %path, "Path item is not an object, skipping");
                continue;
            };

            for (key, operation) in operations {
                let Some(method) = HttpMethod::from_key(key) else {
                    debug!(path = %path, key = %key, "Not a supported method, skipping");
                    continue;
                };

                match self.build_operation(path, method, operation) {
                    Ok(functions) => output.functions.extend(functions),
                    Err(reason) => {
                        let operation_id = operation
                            .get("operationId")
                            .and_then(Value::as_str)
                            .map(String::from);
                        if reason == SkipReason::MissingOperationId {
                            debug!(path = %path, %method, "Skipping operation: {}", reason);
                        } else {
                            warn!(path = %path, %method, "Skipping operation: {}", reason);
                        }
                        output.skipped.push(SkippedOperation {
                            path: path.clone(),
                            method,
                            operation_id,
                            reason,
                        });
                    }
                }
            }
        }

        warn_duplicate_names(&output.functions);

        info!(
            functions = output.functions.len(),
            skipped = output.skipped.len(),
            "Translated OpenAPI {} document",
            self.document.version()
        );

        output
    }

    /// Expand one operation into its variants
    pub fn build_operation(
        &self,
        path: &str,
        method: HttpMethod,
        operation: &'a Value,
    ) -> Result<Vec<ToolFunction>, SkipReason> {
        let operation = operation.as_object().ok_or(SkipReason::NotAnObject)?;

        let operation_id = operation
            .get("operationId")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or(SkipReason::MissingOperationId)?;

        let description = operation
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("");

        let params = self.collect_parameters(operation)?;
        let set = ParameterSet::partition(params);

        let optional_count = set.optional().len();
        if optional_count > self.config.max_optional_params {
            return Err(SkipReason::TooManyOptionalParameters {
                count: optional_count,
                max: self.config.max_optional_params,
            });
        }

        // Response shape does not depend on the parameter subset
        let response_schema = TypeMapper::response_schema(
            operation.get("responses"),
            self.document.root(),
            self.document.is_v3(),
        );
        let responses = ResponseSpec::new(
            TypeMapper::response_type(&response_schema),
            response_schema,
        );

        let functions = set
            .variants(operation_id)
            .into_iter()
            .map(|variant| {
                debug!(name = %variant.name, "Generated function variant");
                let (parameters, binding) =
                    self.variant_parameters(path, method, &variant.params);
                ToolFunction::new(
                    FunctionSpec {
                        name: variant.name,
                        description: description.to_string(),
                        parameters,
                        responses: responses.clone(),
                    },
                    binding,
                )
            })
            .collect();

        Ok(functions)
    }

    /// Declared parameters (with `$ref` entries resolved), plus the 3.x
    /// `requestBody` surfaced as a body parameter
    fn collect_parameters(
        &self,
        operation: &'a Map<String, Value>,
    ) -> Result<Vec<Parameter<'a>>, SkipReason> {
        let root = self.document.root();

        let declared = match operation.get("parameters") {
            None => &[][..],
            Some(Value::Array(items)) => items.as_slice(),
            Some(_) => return Err(SkipReason::ParametersNotArray),
        };

        let mut params = declared
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                Parameter::from_value(resolve_reference(raw, root))
                    .ok_or(SkipReason::MalformedParameter(index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(body) = operation
            .get("requestBody")
            .map(|body| resolve_reference(body, root))
        {
            params.push(request_body_parameter(body, root));
        }

        // Names key the properties map and the variant suffixes
        let mut seen = HashSet::new();
        if let Some(duplicate) = params.iter().find(|param| !seen.insert(param.name)) {
            return Err(SkipReason::DuplicateParameterName(duplicate.name.to_string()));
        }

        Ok(params)
    }

    /// Property schema and binding for one variant; `file` parameters drop out
    fn variant_parameters(
        &self,
        path: &str,
        method: HttpMethod,
        params: &[Parameter<'_>],
    ) -> (ParameterSchema, FunctionBinding) {
        let mut schema = ParameterSchema::default();
        let mut binding = FunctionBinding {
            path: path.to_string(),
            method,
            params: Vec::with_capacity(params.len()),
        };

        for param in params {
            let Some(property_type) = TypeMapper::parameter_type(param, self.document.root())
            else {
                continue;
            };

            schema.properties.insert(
                param.name.to_string(),
                PropertySchema {
                    property_type,
                    description: param.description.to_string(),
                },
            );
            if param.required {
                schema.required.push(param.name.to_string());
            }
            binding.params.push(ParamBinding {
                name: param.name.to_string(),
                location: param.location.map(ParamLocation::parse),
            });
        }

        (schema, binding)
    }
}

/// A 3.x `requestBody` seen as a `body` parameter typed by its first content
/// entry
fn request_body_parameter<'v>(body: &'v Value, root: &'v Value) -> Parameter<'v> {
    let schema = body
        .get("content")
        .and_then(Value::as_object)
        .and_then(|content| content.values().next())
        .and_then(|media| media.get("schema"))
        .map(|schema| resolve_reference(schema, root));

    Parameter {
        name: REQUEST_BODY_PARAM,
        location: Some("body"),
        required: body
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        description: body
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or(""),
        raw: schema.unwrap_or(body),
    }
}

fn warn_duplicate_names(functions: &[ToolFunction]) {
    let mut seen = HashSet::new();
    for function in functions {
        if !seen.insert(function.name()) {
            warn!(name = %function.name(), "Duplicate function name in output");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api2gen_common::MappedType;
    use serde_json::json;

    fn build(document: Value) -> BuildOutput {
        let document = OpenApiDocument::from_value(document).unwrap();
        let config = GenerationConfig::default();
        FunctionSpecBuilder::new(&document, &config).build()
    }

    #[test]
    fn test_required_list_excludes_selected_optionals() {
        let output = build(json!({
            "swagger": "2.0",
            "paths": {
                "/items/{id}": {
                    "get": {
                        "operationId": "getItem",
                        "parameters": [
                            {"name": "id", "in": "path", "required": true, "type": "integer"},
                            {"name": "verbose", "in": "query", "type": "boolean"}
                        ]
                    }
                }
            }
        }));

        assert_eq!(output.functions.len(), 2);
        let with_verbose = &output.functions[1].function;
        assert_eq!(with_verbose.name, "getItem_verbose");
        assert_eq!(with_verbose.parameters.required, vec!["id".to_string()]);
        assert_eq!(
            with_verbose.parameters.properties["id"].property_type,
            MappedType::Number
        );
        assert_eq!(
            with_verbose.parameters.properties["verbose"].property_type,
            MappedType::Boolean
        );
    }

    #[test]
    fn test_file_parameters_dropped() {
        let output = build(json!({
            "swagger": "2.0",
            "paths": {
                "/upload": {
                    "post": {
                        "operationId": "upload",
                        "parameters": [
                            {"name": "file", "in": "formData", "required": true, "type": "file"},
                            {"name": "note", "in": "formData", "required": true, "type": "string"}
                        ]
                    }
                }
            }
        }));

        let function = &output.functions[0];
        assert_eq!(function.function.parameters.properties.len(), 1);
        assert_eq!(function.function.parameters.required, vec!["note".to_string()]);
        assert_eq!(function.binding.params.len(), 1);
    }

    #[test]
    fn test_parameter_ref_resolved() {
        let output = build(json!({
            "swagger": "2.0",
            "parameters": {
                "Limit": {"name": "limit", "in": "query", "type": "integer"}
            },
            "paths": {
                "/things": {
                    "get": {
                        "operationId": "listThings",
                        "parameters": [{"$ref": "#/parameters/Limit"}]
                    }
                }
            }
        }));

        let names: Vec<&str> = output.functions.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["listThings", "listThings_limit"]);
        assert_eq!(
            output.functions[1].binding.location_of("limit"),
            Some(&ParamLocation::Query)
        );
    }

    #[test]
    fn test_malformed_parameter_skips_operation() {
        let output = build(json!({
            "swagger": "2.0",
            "paths": {
                "/broken": {
                    "get": {"operationId": "broken", "parameters": [{"in": "query"}]}
                },
                "/fine": {
                    "get": {"operationId": "fine"}
                }
            }
        }));

        assert_eq!(output.functions.len(), 1);
        assert_eq!(output.functions[0].name(), "fine");
        assert_eq!(output.skipped.len(), 1);
        assert_eq!(output.skipped[0].reason, SkipReason::MalformedParameter(0));
        assert_eq!(output.skipped[0].operation_id.as_deref(), Some("broken"));
    }

    #[test]
    fn test_repeated_parameter_name_skips_operation() {
        let output = build(json!({
            "openapi": "3.0.0",
            "paths": {
                "/things/{id}": {
                    "get": {
                        "operationId": "g",
                        "parameters": [
                            {"name": "id", "in": "path", "required": true},
                            {"name": "id", "in": "header", "required": true},
                            {"name": "v", "in": "query"},
                            {"name": "v", "in": "header"}
                        ]
                    }
                },
                "/upload": {
                    "post": {
                        "operationId": "upload",
                        "parameters": [{"name": "body", "in": "query"}],
                        "requestBody": {
                            "content": {"application/json": {"schema": {"type": "object"}}}
                        }
                    }
                },
                "/fine": {
                    "get": {"operationId": "fine"}
                }
            }
        }));

        let names: Vec<&str> = output.functions.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["fine"]);
        assert_eq!(output.skipped.len(), 2);
        assert_eq!(
            output.skipped[0].reason,
            SkipReason::DuplicateParameterName("id".to_string())
        );
        assert_eq!(
            output.skipped[1].reason,
            SkipReason::DuplicateParameterName("body".to_string())
        );
    }

    #[test]
    fn test_too_many_optional_parameters() {
        let params: Vec<Value> = (0..4)
            .map(|i| json!({"name": format!("p{}", i), "in": "query"}))
            .collect();
        let document = OpenApiDocument::from_value(json!({
            "swagger": "2.0",
            "paths": {"/wide": {"get": {"operationId": "wide", "parameters": params}}}
        }))
        .unwrap();
        let config = GenerationConfig::default().with_max_optional_params(3);
        let output = FunctionSpecBuilder::new(&document, &config).build();

        assert!(output.functions.is_empty());
        assert_eq!(
            output.skipped[0].reason,
            SkipReason::TooManyOptionalParameters { count: 4, max: 3 }
        );
    }

    #[test]
    fn test_request_body_surfaces_as_parameter() {
        let output = build(json!({
            "openapi": "3.0.0",
            "components": {
                "schemas": {"Pet": {"type": "object"}}
            },
            "paths": {
                "/pets": {
                    "post": {
                        "operationId": "createPet",
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {"schema": {"$ref": "#/components/schemas/Pet"}}
                            }
                        }
                    }
                }
            }
        }));

        assert_eq!(output.functions.len(), 1);
        let function = &output.functions[0];
        assert_eq!(
            function.function.parameters.properties["body"].property_type,
            MappedType::Object
        );
        assert_eq!(function.function.parameters.required, vec!["body".to_string()]);
        assert_eq!(function.binding.location_of("body"), Some(&ParamLocation::Body));
    }

    #[test]
    fn test_path_level_parameters_key_ignored() {
        let output = build(json!({
            "swagger": "2.0",
            "paths": {
                "/users": {
                    "parameters": [{"name": "tenant", "in": "header"}],
                    "head": {"operationId": "headUsers"},
                    "get": {"operationId": "listUsers"}
                }
            }
        }));

        assert_eq!(output.functions.len(), 1);
        assert!(output.skipped.is_empty());
    }
}
