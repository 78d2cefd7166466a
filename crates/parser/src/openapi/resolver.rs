//! Local `$ref` resolution
//!
//! Resolution is a single lookup: a target that itself carries a `$ref` is
//! returned as-is and is not followed further. Anything that cannot be
//! resolved degrades to the original schema.

use serde_json::Value;

const REF_KEY: &str = "$ref";
const LOCAL_PREFIX: &str = "#/";

/// Resolve `schema` against `document`
///
/// Returns `schema` itself when it has no `$ref`, when the reference is not
/// local (`#/...`), or when any path segment is missing.
///
/// # Examples
/// ```
/// use api2gen_parser::resolve_reference;
/// use serde_json::json;
///
/// let document = json!({"definitions": {"User": {"type": "object"}}});
/// let schema = json!({"$ref": "#/definitions/User"});
///
/// assert_eq!(resolve_reference(&schema, &document), &json!({"type": "object"}));
/// ```
pub fn resolve_reference<'a>(schema: &'a Value, document: &'a Value) -> &'a Value {
    let Some(ref_path) = schema.get(REF_KEY).and_then(Value::as_str) else {
        return schema;
    };

    match lookup(ref_path, document) {
        // A target pointing straight back at itself stays unresolved
        Some(target) if target.get(REF_KEY).and_then(Value::as_str) == Some(ref_path) => schema,
        Some(target) => target,
        None => schema,
    }
}

/// Walk the segments of a `#/a/b/c` reference
fn lookup<'a>(ref_path: &str, document: &'a Value) -> Option<&'a Value> {
    let pointer = ref_path.strip_prefix(LOCAL_PREFIX)?;

    pointer
        .split('/')
        .filter(|segment| !segment.is_empty())
        .try_fold(document, |node, segment| {
            let segment = decode_segment(segment);
            match node {
                Value::Object(map) => map.get(segment.as_str()),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            }
        })
}

/// JSON-pointer escapes: `~1` is `/`, `~0` is `~`
fn decode_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "definitions": {
                "User": {"type": "object", "properties": {"name": {"type": "string"}}},
                "Alias": {"$ref": "#/definitions/User"},
                "Loop": {"$ref": "#/definitions/Loop"}
            },
            "components": {
                "schemas": {
                    "a/b": {"type": "string"}
                }
            },
            "tags": [{"name": "first"}]
        })
    }

    #[test]
    fn test_no_ref_is_identity() {
        let doc = document();
        let schema = json!({"type": "integer"});
        assert!(std::ptr::eq(resolve_reference(&schema, &doc), &schema));
    }

    #[test]
    fn test_resolves_local_ref() {
        let doc = document();
        let schema = json!({"$ref": "#/definitions/User"});
        assert_eq!(
            resolve_reference(&schema, &doc)["properties"]["name"]["type"],
            "string"
        );
    }

    #[test]
    fn test_dangling_ref_returns_original() {
        let doc = document();
        let schema = json!({"$ref": "#/definitions/Missing"});
        assert_eq!(resolve_reference(&schema, &doc), &schema);
    }

    #[test]
    fn test_external_ref_returns_original() {
        let doc = document();
        let schema = json!({"$ref": "other.json#/definitions/User"});
        assert_eq!(resolve_reference(&schema, &doc), &schema);
    }

    #[test]
    fn test_single_level_only() {
        let doc = document();
        let schema = json!({"$ref": "#/definitions/Alias"});
        assert_eq!(
            resolve_reference(&schema, &doc),
            &json!({"$ref": "#/definitions/User"})
        );
    }

    #[test]
    fn test_self_reference_degrades() {
        let doc = document();
        let schema = json!({"$ref": "#/definitions/Loop"});
        assert!(std::ptr::eq(resolve_reference(&schema, &doc), &schema));
    }

    #[test]
    fn test_escaped_segment() {
        let doc = document();
        let schema = json!({"$ref": "#/components/schemas/a~1b"});
        assert_eq!(resolve_reference(&schema, &doc), &json!({"type": "string"}));
    }

    #[test]
    fn test_array_index_segment() {
        let doc = document();
        let schema = json!({"$ref": "#/tags/0"});
        assert_eq!(resolve_reference(&schema, &doc), &json!({"name": "first"}));
    }

    #[test]
    fn test_non_string_ref_is_ignored() {
        let doc = document();
        let schema = json!({"$ref": 42});
        assert_eq!(resolve_reference(&schema, &doc), &schema);
    }
}
