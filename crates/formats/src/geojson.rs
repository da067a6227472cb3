//! GeoJSON output for computed overlays.

use foundation::math::GeoPoint;
use serde_json::{Map, Value, json};

fn position(p: &GeoPoint) -> Value {
    json!([p.lon_deg, p.lat_deg])
}

/// One `MultiPolygon` feature, each part a single outer ring in `[lon, lat]`
/// order. Parts that are not already closed are closed here.
pub fn multipolygon_feature(parts: &[Vec<GeoPoint>], properties: Map<String, Value>) -> Value {
    let polygons: Vec<Value> = parts
        .iter()
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut ring: Vec<Value> = part.iter().map(position).collect();
            if let (Some(first), Some(last)) = (part.first(), part.last())
                && first != last
            {
                ring.push(position(first));
            }
            json!([ring])
        })
        .collect();

    json!({
        "type": "Feature",
        "geometry": { "type": "MultiPolygon", "coordinates": polygons },
        "properties": Value::Object(properties),
    })
}

pub fn feature_collection(features: Vec<Value>) -> Value {
    json!({ "type": "FeatureCollection", "features": features })
}
