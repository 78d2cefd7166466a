//! Type mapping from OpenAPI types to the function-spec vocabulary
//!
//! Maps OpenAPI `type` names onto [`MappedType`] and picks the response
//! schema out of 2.0 or 3.x response objects.

use crate::openapi::{resolve_reference, Parameter};
use api2gen_common::MappedType;
use serde_json::Value;

/// Maps OpenAPI types to MappedType
pub struct TypeMapper;

impl TypeMapper {
    /// Map a parameter type name
    ///
    /// `None` means the parameter is dropped (`file`). Missing or unknown
    /// types become `string`.
    ///
    /// # Examples
    /// ```
    /// use api2gen_parser::TypeMapper;
    /// use api2gen_common::MappedType;
    ///
    /// assert_eq!(TypeMapper::map_parameter_type(Some("integer")), Some(MappedType::Number));
    /// assert_eq!(TypeMapper::map_parameter_type(None), Some(MappedType::String));
    /// assert_eq!(TypeMapper::map_parameter_type(Some("file")), None);
    /// ```
    pub fn map_parameter_type(type_name: Option<&str>) -> Option<MappedType> {
        match type_name {
            Some("file") => None,
            Some(name) => Some(Self::map_known(name).unwrap_or(MappedType::String)),
            None => Some(MappedType::String),
        }
    }

    /// Map a response type name; missing or unknown types become `object`
    pub fn map_response_type(type_name: Option<&str>) -> MappedType {
        match type_name {
            // Binary download, handed back as raw content
            Some("file") => MappedType::String,
            Some(name) => Self::map_known(name).unwrap_or(MappedType::Object),
            None => MappedType::Object,
        }
    }

    fn map_known(name: &str) -> Option<MappedType> {
        match name {
            "integer" | "number" => Some(MappedType::Number),
            "string" => Some(MappedType::String),
            "boolean" => Some(MappedType::Boolean),
            "array" => Some(MappedType::Array),
            "object" => Some(MappedType::Object),
            _ => None,
        }
    }

    /// Resolve and map the type of one parameter
    ///
    /// Looks at the resolved `schema.type` first, then the 2.0-style `type`
    /// on the parameter itself.
    pub fn parameter_type(param: &Parameter<'_>, document: &Value) -> Option<MappedType> {
        let schema_type = param
            .raw
            .get("schema")
            .map(|schema| resolve_reference(schema, document))
            .and_then(|schema| schema.get("type"))
            .and_then(Value::as_str);

        let type_name = schema_type.or_else(|| param.raw.get("type").and_then(Value::as_str));
        Self::map_parameter_type(type_name)
    }

    /// Pick and resolve the success response schema of an operation
    ///
    /// Uses the `200` response, else `default`. For 3.x documents the schema
    /// comes from the first entry of `content`; otherwise from `schema`.
    /// Returns an empty object when nothing is declared.
    pub fn response_schema(responses: Option<&Value>, document: &Value, is_v3: bool) -> Value {
        let response = responses.and_then(|r| r.get("200").or_else(|| r.get("default")));
        let Some(response) = response else {
            return Value::Object(Default::default());
        };

        let first_content_schema = response
            .get("content")
            .and_then(Value::as_object)
            .and_then(|content| content.values().next())
            .map(|media| media.get("schema"));

        let schema = match (is_v3, first_content_schema) {
            (true, Some(schema)) => schema,
            _ => response.get("schema"),
        };

        schema
            .map(|schema| resolve_reference(schema, document).clone())
            .unwrap_or_else(|| Value::Object(Default::default()))
    }

    /// Coerced type of a resolved response schema
    pub fn response_type(schema: &Value) -> MappedType {
        Self::map_response_type(schema.get("type").and_then(Value::as_str))
    }
}
