use crate::validator::ValidationResult;
use serde::{Serialize, Serializer};
use std::fmt;

/// Map window around a community: `(min_lon, min_lat, max_lon, max_lat)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub const LON_MARGIN: f64 = 0.05;
    pub const LAT_MARGIN: f64 = 0.01;

    pub fn around(lat: f64, lon: f64) -> Self {
        Self {
            min_lon: lon - Self::LON_MARGIN,
            min_lat: lat - Self::LAT_MARGIN,
            max_lon: lon + Self::LON_MARGIN,
            max_lat: lat + Self::LAT_MARGIN,
        }
    }

    fn parts(&self) -> [String; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat].map(format_coordinate)
    }

    /// Form used inside a query string, with the commas percent-encoded.
    pub fn url_param(&self) -> String {
        self.parts().join("%2C")
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts().join(","))
    }
}

impl Serialize for BoundingBox {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// Six decimals hides float noise such as 13.350000000000001.
pub fn format_coordinate(value: f64) -> String {
    let fixed = format!("{:.6}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    pub community: String,
    pub url: String,
    pub api: String,
    pub latlon: (f64, f64),
    pub bbox: BoundingBox,
    pub now: String,
    pub validation: Option<ValidationResult>,
    pub data: String, // pre-rendered HTML
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexEntry {
    pub key: String,
    pub community: String,
    pub url: String,
    pub api: String,
    pub page: String,
    pub validation: Option<ValidationResult>,
}

impl IndexEntry {
    pub fn from_context(key: &str, page: &str, ctx: &RenderContext) -> Self {
        Self {
            key: key.to_string(),
            community: ctx.community.clone(),
            url: ctx.url.clone(),
            api: ctx.api.clone(),
            page: page.to_string(),
            validation: ctx.validation.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexContext {
    pub communities: Vec<IndexEntry>, // ordered by key
    pub now: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_orders_lon_before_lat() {
        let bbox = BoundingBox::around(52.5, 13.4);
        assert_eq!(bbox.to_string(), "13.35,52.49,13.45,52.51");
        assert_eq!(bbox.url_param(), "13.35%2C52.49%2C13.45%2C52.51");
    }

    #[test]
    fn coordinates_trim_trailing_zeros() {
        assert_eq!(format_coordinate(10.0), "10");
        assert_eq!(format_coordinate(-0.0000001), "0");
        assert_eq!(format_coordinate(-7.25), "-7.25");
    }

    #[test]
    fn bbox_serializes_as_string() {
        let v = serde_json::to_value(BoundingBox::around(0.0, 0.0)).unwrap();
        assert_eq!(v, serde_json::json!("-0.05,-0.01,0.05,0.01"));
    }
}
