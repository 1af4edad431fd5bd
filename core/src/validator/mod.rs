use crate::render::urlize::escape_html;
use crate::schema::{ApiVersion, SchemaRegistry};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Records older than this validate with a warning even when they conform.
pub const MIN_CURRENT_API: ApiVersion = ApiVersion::new(0, 4, 0);

pub const UPGRADE_ADVISORY: &str = "API version too old! You should upgrade your file";

/// Bookkeeping fields a discovery crawler adds to fetched records.
const CRAWLER_FIELDS: [&str; 3] = ["mtime", "etime", "error"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Valid,
    Warning,
    Invalid,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Valid => "valid",
            ValidationStatus::Warning => "warning",
            ValidationStatus::Invalid => "invalid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ValidationStatus::Valid => "Valid",
            ValidationStatus::Warning => "Warning",
            ValidationStatus::Invalid => "Invalid",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    pub status_text: String,
    pub result: String, // HTML fragment, empty when valid
}

impl ValidationResult {
    fn new(status: ValidationStatus, result: String) -> Self {
        Self {
            status,
            status_text: status.label().to_string(),
            result,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub path: Vec<String>,
    pub message: String,
}

impl SchemaViolation {
    pub fn render_line(&self) -> String {
        let path: Vec<String> = self.path.iter().map(|seg| escape_html(seg)).collect();
        format!("Error in {}: {}", path.join("->"), escape_html(&self.message))
    }
}

/// Classifies a community record against the schema for its `api` version.
///
/// Returns `None` when the record's version has no schema in the registry;
/// callers render such records without a validation badge. The record is
/// never modified; transient and legacy fields are stripped from a copy.
pub fn validate_community(registry: &SchemaRegistry, record: &Value) -> Option<ValidationResult> {
    let api = record.get("api").and_then(Value::as_str);
    let (api, validator) = match api.and_then(|v| registry.validator(v).map(|c| (v, c))) {
        Some(found) => found,
        None => {
            let url = record.get("url").and_then(Value::as_str).unwrap_or("<no url>");
            warn!(
                api = api.unwrap_or("<missing>"),
                url, "invalid or unknown API version"
            );
            return None;
        }
    };

    let mut instance = record.clone();
    if let Value::Object(map) = &mut instance {
        for field in CRAWLER_FIELDS {
            map.remove(field);
        }
        if api.starts_with("0.5.") {
            strip_legacy_coordinates(map);
        }
    }

    let violations = collect_violations(validator, &instance);
    Some(classify(api, &violations))
}

pub fn collect_violations(
    validator: &jsonschema::Validator,
    instance: &Value,
) -> Vec<SchemaViolation> {
    let mut violations: Vec<SchemaViolation> = validator
        .iter_errors(instance)
        .map(|err| SchemaViolation {
            path: pointer_segments(&err.instance_path.to_string()),
            message: err.to_string(),
        })
        .collect();
    violations.sort_by_cached_key(|v| v.render_line());
    violations.dedup();
    violations
}

fn classify(api: &str, violations: &[SchemaViolation]) -> ValidationResult {
    if !violations.is_empty() {
        let items: String = violations
            .iter()
            .map(|v| format!("<li>{}</li>", v.render_line()))
            .collect();
        return ValidationResult::new(ValidationStatus::Invalid, format!("<ul>{}</ul>", items));
    }

    // An unparsable version that still has a schema is treated as current.
    match ApiVersion::parse(api) {
        Some(v) if v < MIN_CURRENT_API => {
            ValidationResult::new(ValidationStatus::Warning, UPGRADE_ADVISORY.to_string())
        }
        _ => ValidationResult::new(ValidationStatus::Valid, String::new()),
    }
}

// 0.5.x moved coordinates; top-level and per-location lat/lon are legacy duplicates.
fn strip_legacy_coordinates(record: &mut Map<String, Value>) {
    let Some(Value::Object(location)) = record.get_mut("location") else {
        return;
    };
    location.remove("lat");
    location.remove("lon");
    if let Some(Value::Array(extra)) = location.get_mut("additionalLocations") {
        for entry in extra.iter_mut() {
            if let Value::Object(entry) = entry {
                entry.remove("lat");
                entry.remove("lon");
            }
        }
    }
}

fn pointer_segments(pointer: &str) -> Vec<String> {
    pointer
        .split('/')
        .skip(1)
        .map(|seg| seg.replace("~1", "/").replace("~0", "~"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pointer_segments_unescape() {
        assert_eq!(
            pointer_segments("/location/additionalLocations/0/a~1b~0c"),
            vec!["location", "additionalLocations", "0", "a/b~c"]
        );
        assert!(pointer_segments("").is_empty());
    }

    #[test]
    fn legacy_coordinates_tolerate_partial_shapes() {
        let mut rec = json!({
            "location": {
                "lat": 1.0,
                "additionalLocations": [{"lon": 2.0, "city": "x"}, "odd", {}]
            }
        });
        strip_legacy_coordinates(rec.as_object_mut().unwrap());
        assert_eq!(
            rec,
            json!({"location": {"additionalLocations": [{"city": "x"}, "odd", {}]}})
        );

        let mut no_location = json!({"name": "a"});
        strip_legacy_coordinates(no_location.as_object_mut().unwrap());
        assert_eq!(no_location, json!({"name": "a"}));

        let mut scalar_extra = json!({"location": {"additionalLocations": 3}});
        strip_legacy_coordinates(scalar_extra.as_object_mut().unwrap());
        assert_eq!(scalar_extra, json!({"location": {"additionalLocations": 3}}));
    }

    #[test]
    fn violation_path_segments_are_escaped_but_joined_with_arrows() {
        let v = SchemaViolation {
            path: vec!["location".to_string(), "<x>".to_string(), "lat".to_string()],
            message: "bad".to_string(),
        };
        assert_eq!(v.render_line(), "Error in location->&lt;x&gt;->lat: bad");
    }

    #[test]
    fn violation_line_escapes_markup() {
        let v = SchemaViolation {
            path: vec!["contact".to_string(), "email".to_string()],
            message: "\"<b>\" is not a \"email\"".to_string(),
        };
        assert_eq!(
            v.render_line(),
            "Error in contact->email: &quot;&lt;b&gt;&quot; is not a &quot;email&quot;"
        );
    }
}
