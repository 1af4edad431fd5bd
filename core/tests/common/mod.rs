#![allow(dead_code)]

use ffdir_core::schema::SchemaRegistry;
use serde_json::{json, Value};

pub fn schema_v4() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["name", "url", "api", "location"],
        "additionalProperties": false,
        "properties": {
            "name": {"type": "string"},
            "url": {"type": "string"},
            "api": {"type": "string"},
            "location": {
                "type": "object",
                "required": ["city"],
                "properties": {
                    "city": {"type": "string"},
                    "lat": {"type": "number"},
                    "lon": {"type": "number"}
                }
            },
            "state": {
                "type": "object",
                "properties": {"lastchange": {"type": "string"}}
            },
            "contact": {
                "type": "object",
                "properties": {"email": {"type": "string"}}
            }
        }
    })
}

// 0.5.x: coordinates are not allowed at the old places.
pub fn schema_v5() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["name", "url", "api", "location"],
        "properties": {
            "name": {"type": "string"},
            "url": {"type": "string"},
            "api": {"type": "string"},
            "location": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "city": {"type": "string"},
                    "geoCode": {"type": "object"},
                    "additionalLocations": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "additionalProperties": false,
                            "properties": {"city": {"type": "string"}}
                        }
                    }
                }
            }
        }
    })
}

pub fn registry() -> SchemaRegistry {
    SchemaRegistry::from_documents([
        ("0.3.5".to_string(), schema_v4()),
        ("0.4.0".to_string(), schema_v4()),
        ("0.10.0".to_string(), schema_v4()),
        ("0.5.2".to_string(), schema_v5()),
    ])
    .unwrap()
}

pub fn community(name: &str, api: &str) -> Value {
    json!({
        "name": name,
        "url": format!("https://{}.example.org/api.json", name.to_lowercase()),
        "api": api,
        "location": {"city": "Berlin", "lat": 52.5, "lon": 13.4},
        "state": {"lastchange": "2026-10-18T08:00:00Z"},
        "contact": {"email": "info@example.org"}
    })
}
