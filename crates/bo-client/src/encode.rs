//! The platform's form-parameter encoding scheme.
//!
//! A mapping of named values becomes a single `key=value&key=value` string.
//! Each value is classified by shape, in a fixed order; a value matching an
//! earlier shape is never re-tested against later ones:
//!
//! 1. object with `name` and `content` → document,
//!    `id|<id or 0>|name|<name>|content|<content>` (any leading
//!    `data:…;base64,` prefix is stripped from the content first)
//! 2. object with `object` and `row_id` → object reference,
//!    `object|<object>|row_id|<row_id>`
//! 3. array → one `key=value` pair per element, order preserved
//! 4. anything else → rendered as a plain string
//!
//! Values are percent-encoded; keys are emitted as-is.

use serde_json::{Map, Value};

/// Encode a parameter mapping into a single form-encoded string.
pub fn encode_params(data: &Map<String, Value>) -> String {
    let mut out = String::new();

    for (key, value) in data {
        match classify(value) {
            Shape::Document { id, name, content } => {
                let content = strip_data_url(&content);
                push_pair(
                    &mut out,
                    key,
                    &format!("id|{id}|name|{name}|content|{content}"),
                );
            }
            Shape::ObjectRef { object, row_id } => {
                push_pair(&mut out, key, &format!("object|{object}|row_id|{row_id}"));
            }
            Shape::Array(items) => {
                for item in items {
                    push_pair(&mut out, key, &scalar(item));
                }
            }
            Shape::Scalar => push_pair(&mut out, key, &scalar(value)),
        }
    }

    out
}

enum Shape<'a> {
    Document {
        id: String,
        name: String,
        content: String,
    },
    ObjectRef {
        object: String,
        row_id: String,
    },
    Array(&'a Vec<Value>),
    Scalar,
}

/// Shape tests in the documented order; first match wins.
fn classify(value: &Value) -> Shape<'_> {
    if let Some(map) = value.as_object() {
        if let (Some(name), Some(content)) = (non_empty(map.get("name")), non_empty(map.get("content"))) {
            let id = non_empty(map.get("id")).unwrap_or_else(|| "0".to_string());
            return Shape::Document { id, name, content };
        }
        if let (Some(object), Some(row_id)) =
            (non_empty(map.get("object")), non_empty(map.get("row_id")))
        {
            return Shape::ObjectRef { object, row_id };
        }
    }
    if let Some(items) = value.as_array() {
        return Shape::Array(items);
    }
    Shape::Scalar
}

/// Render a scalar field as a non-empty string, None otherwise.
fn non_empty(value: Option<&Value>) -> Option<String> {
    let s = scalar(value?);
    (!s.is_empty()).then_some(s)
}

/// Render a value as a plain string: strings unquoted, null empty, everything
/// else through its JSON representation.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Strip a leading `data:…;base64,` prefix from document content.
fn strip_data_url(content: &str) -> String {
    if content.starts_with("data:") {
        let re = regex_lite::Regex::new(r"^data:[^,]*;base64,").unwrap();
        return re.replace(content, "").to_string();
    }
    content.to_string()
}

fn push_pair(out: &mut String, key: &str, value: &str) {
    if !out.is_empty() {
        out.push('&');
    }
    out.push_str(key);
    out.push('=');
    out.push_str(&urlencoding::encode(value));
}
