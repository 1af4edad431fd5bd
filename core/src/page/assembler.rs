use super::context::{BoundingBox, RenderContext};
use super::lastchange::{display_timestamp, normalize_lastchange};
use crate::error::AssembleError;
use crate::render::render_tree;
use crate::schema::SchemaRegistry;
use crate::validator::validate_community;
use serde_json::{Map, Value};
use time::OffsetDateTime;

/// Keys that never reach the tree renderer: identity fields shown by the
/// template itself, the computed validation, and crawler bookkeeping.
const EXTRACTED_FIELDS: [&str; 7] = ["name", "url", "api", "validation", "mtime", "etime", "error"];

#[derive(Debug, Clone, Copy)]
pub struct PageAssembler<'a> {
    registry: &'a SchemaRegistry,
    now: OffsetDateTime,
}

impl<'a> PageAssembler<'a> {
    pub fn new(registry: &'a SchemaRegistry, now: OffsetDateTime) -> Self {
        Self { registry, now }
    }

    pub fn now_display(&self) -> String {
        display_timestamp(self.now)
    }

    pub fn assemble(&self, record: &Value) -> Result<RenderContext, AssembleError> {
        let validation = validate_community(self.registry, record);

        let community = string_field(record, "name")?;
        let url = string_field(record, "url")?;
        let api = string_field(record, "api")?;
        let (lat, lon) = coordinates(record)?;

        let mut reduced = reduced_copy(record);
        normalize_state(&mut reduced);

        Ok(RenderContext {
            community,
            url,
            api,
            latlon: (lat, lon),
            bbox: BoundingBox::around(lat, lon),
            now: self.now_display(),
            validation,
            data: render_tree(&Value::Object(reduced)),
        })
    }
}

pub fn assemble(
    record: &Value,
    registry: &SchemaRegistry,
    now: OffsetDateTime,
) -> Result<RenderContext, AssembleError> {
    PageAssembler::new(registry, now).assemble(record)
}

fn string_field(record: &Value, field: &'static str) -> Result<String, AssembleError> {
    record
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(AssembleError::MissingField(field))
}

fn reduced_copy(record: &Value) -> Map<String, Value> {
    match record {
        Value::Object(map) => map
            .iter()
            .filter(|(k, _)| !EXTRACTED_FIELDS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        _ => Map::new(),
    }
}

// Unparsable timestamps are left exactly as the community published them.
fn normalize_state(reduced: &mut Map<String, Value>) {
    let Some(Value::Object(state)) = reduced.get_mut("state") else {
        return;
    };
    let Some(raw) = state.get_mut("lastchange") else {
        return;
    };
    if let Some(display) = normalize_lastchange(raw) {
        *raw = Value::String(display);
    }
}

/// Top-level `location.lat`/`lon`, falling back to the first usable entry of
/// `location.additionalLocations` (the 0.5.x layout).
pub fn coordinates(record: &Value) -> Result<(f64, f64), AssembleError> {
    let location = record
        .get("location")
        .filter(|l| l.is_object())
        .ok_or(AssembleError::MissingCoordinates)?;

    if let Some(pair) = coordinate_pair(location)? {
        return Ok(pair);
    }

    if let Some(Value::Array(extra)) = location.get("additionalLocations") {
        for entry in extra {
            if let Some(pair) = coordinate_pair(entry)? {
                return Ok(pair);
            }
        }
    }

    Err(AssembleError::MissingCoordinates)
}

fn coordinate_pair(node: &Value) -> Result<Option<(f64, f64)>, AssembleError> {
    let lat = coordinate(node, "lat")?;
    let lon = coordinate(node, "lon")?;
    Ok(lat.zip(lon))
}

fn coordinate(node: &Value, field: &'static str) -> Result<Option<f64>, AssembleError> {
    let parsed = match node.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(AssembleError::InvalidCoordinate {
            field,
            value: node.get(field).map(Value::to_string).unwrap_or_default(),
        }),
    }
}
