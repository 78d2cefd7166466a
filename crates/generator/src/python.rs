//! Python naming and literal helpers

use api2gen_common::MappedType;
use std::collections::HashSet;

/// Reserved words that cannot be used as identifiers
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Locals every generated function body assigns
const FUNCTION_LOCALS: &[&str] = &[
    "base_url",
    "path",
    "method",
    "headers",
    "url_params",
    "body_params",
    "url",
];

/// Module-level names defined by the preamble and header
const MODULE_NAMES: &[&str] = &[
    "requests",
    "urlencode",
    "get_bearer_token",
    "get_url",
    "_call_api",
    "DEFAULT_BEARER_TOKEN",
    "BASE_URL",
];

/// Identifier for a generated function argument
pub fn argument_identifier(name: &str) -> String {
    avoid(identifier(name), FUNCTION_LOCALS)
}

/// Identifier for a generated function
pub fn function_identifier(name: &str) -> String {
    avoid(identifier(name), MODULE_NAMES)
}

/// `ident`, or `ident_2`, `ident_3`, ... when already in `taken`
pub fn unique_identifier(ident: String, taken: &HashSet<String>) -> String {
    if !taken.contains(&ident) {
        return ident;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", ident, n);
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn avoid(mut ident: String, taken: &[&str]) -> String {
    if taken.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// Turn an OpenAPI name into a valid Python identifier
///
/// Characters outside `[A-Za-z0-9_]` become `_`, a leading digit gets a `_`
/// prefix and keywords get a `_` suffix.
pub fn identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();

    if ident.is_empty() || ident.starts_with(|ch: char| ch.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    if PYTHON_KEYWORDS.contains(&ident.as_str()) {
        ident.push('_');
    }

    ident
}

/// Type annotation for a mapped type
pub fn annotation(mapped: MappedType) -> &'static str {
    match mapped {
        MappedType::String => "str",
        MappedType::Number => "float",
        MappedType::Boolean => "bool",
        MappedType::Array => "list",
        MappedType::Object => "dict",
    }
}

/// Escape text for the body of a `"""` docstring indented by four spaces
pub fn docstring(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace("\"\"\"", "\\\"\\\"\\\"");
    escaped.trim().lines().collect::<Vec<_>>().join("\n    ")
}

/// Double-quoted string literal
///
/// JSON string escaping is valid Python string syntax.
pub fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier() {
        assert_eq!(identifier("userId"), "userId");
        assert_eq!(identifier("X-Request-Id"), "X_Request_Id");
        assert_eq!(identifier("2fa"), "_2fa");
        assert_eq!(identifier("from"), "from_");
        assert_eq!(identifier("page.size"), "page_size");
        assert_eq!(identifier(""), "_");
    }

    #[test]
    fn test_unique_identifier() {
        let mut taken = HashSet::new();
        assert_eq!(unique_identifier("id".to_string(), &taken), "id");

        taken.insert("id".to_string());
        taken.insert("id_2".to_string());
        assert_eq!(unique_identifier("id".to_string(), &taken), "id_3");
    }

    #[test]
    fn test_reserved_names() {
        assert_eq!(argument_identifier("path"), "path_");
        assert_eq!(argument_identifier("limit"), "limit");
        assert_eq!(function_identifier("get_url"), "get_url_");
        assert_eq!(function_identifier("getUser"), "getUser");
    }

    #[test]
    fn test_annotation() {
        assert_eq!(annotation(MappedType::Number), "float");
        assert_eq!(annotation(MappedType::Object), "dict");
    }

    #[test]
    fn test_docstring_escapes() {
        assert_eq!(docstring("Says \"\"\"hi\"\"\""), "Says \\\"\\\"\\\"hi\\\"\\\"\\\"");
        assert_eq!(docstring("C:\\path"), "C:\\\\path");
        assert_eq!(docstring("First\nSecond\n"), "First\n    Second");
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(string_literal("/users/{id}"), "\"/users/{id}\"");
        assert_eq!(string_literal("a\"b"), "\"a\\\"b\"");
    }
}
