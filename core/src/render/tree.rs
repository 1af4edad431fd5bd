use super::urlize::{escape_html, urlize};
use serde_json::Value;

// Keys become <dt> terms with the first character upper-cased.
pub fn render_tree(node: &Value) -> String {
    let mut html = String::from("<dl>");
    match node {
        Value::Object(map) => {
            for (key, value) in map {
                push_entry(&mut html, key, value);
            }
        }
        Value::Array(items) => push_items(&mut html, items),
        scalar => push_definition(&mut html, &urlize(&scalar_text(scalar))),
    }
    html.push_str("</dl>");
    html
}

fn push_entry(html: &mut String, key: &str, value: &Value) {
    html.push_str("<dt>");
    html.push_str(&escape_html(&capitalize_first(key)));
    html.push_str("</dt>");
    match value {
        Value::Object(_) => push_definition(html, &render_tree(value)),
        Value::Array(items) => push_items(html, items),
        scalar => push_definition(html, &urlize(&scalar_text(scalar))),
    }
}

fn push_items(html: &mut String, items: &[Value]) {
    for item in items {
        match item {
            Value::Object(_) | Value::Array(_) => push_definition(html, &render_tree(item)),
            scalar => push_definition(html, &urlize(&scalar_text(scalar))),
        }
    }
}

fn push_definition(html: &mut String, inner: &str) {
    html.push_str("<dd>");
    html.push_str(inner);
    html.push_str("</dd>");
}

pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

pub fn capitalize_first(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
