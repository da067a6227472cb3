//! Tectonic plate boundary (fault line) GeoJSON.
//!
//! Only line geometries are kept. Point and polygon features, and features
//! with a null geometry, are skipped.

use foundation::math::GeoPoint;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct FaultLine {
    pub name: Option<String>,
    pub points: Vec<GeoPoint>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaultLines {
    pub lines: Vec<FaultLine>,
}

impl FaultLines {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.lines.iter().map(|l| l.points.len()).sum()
    }
}

#[derive(Debug)]
pub enum TectonicError {
    Json(serde_json::Error),
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for TectonicError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TectonicError::Json(e) => write!(f, "JSON parse error: {e}"),
            TectonicError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            TectonicError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for TectonicError {}

impl FaultLines {
    pub fn from_geojson_str(payload: &str) -> Result<Self, TectonicError> {
        let value: Value = serde_json::from_str(payload).map_err(TectonicError::Json)?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_value(value: &Value) -> Result<Self, TectonicError> {
        let obj = value
            .as_object()
            .ok_or(TectonicError::NotAFeatureCollection)?;
        if obj.get("type").and_then(|v| v.as_str()) != Some("FeatureCollection") {
            return Err(TectonicError::NotAFeatureCollection);
        }
        let features = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(TectonicError::NotAFeatureCollection)?;

        let mut lines = Vec::new();
        for (index, feature) in features.iter().enumerate() {
            let invalid = |reason: String| TectonicError::InvalidFeature { index, reason };
            let feat_obj = feature
                .as_object()
                .ok_or_else(|| invalid("feature must be an object".to_string()))?;

            let name = feat_obj
                .get("properties")
                .and_then(|p| p.as_object())
                .and_then(|p| p.get("Name").or_else(|| p.get("name")))
                .and_then(|v| v.as_str())
                .map(str::to_string);

            let Some(geometry) = feat_obj.get("geometry").and_then(|g| g.as_object()) else {
                continue;
            };
            let ty = geometry
                .get("type")
                .and_then(|v| v.as_str())
                .ok_or_else(|| invalid("geometry missing type".to_string()))?;
            let coords = || {
                geometry
                    .get("coordinates")
                    .ok_or_else(|| invalid("geometry missing coordinates".to_string()))
            };

            match ty {
                "LineString" => {
                    let points = parse_line(coords()?).map_err(invalid)?;
                    lines.push(FaultLine { name, points });
                }
                "MultiLineString" => {
                    let members = coords()?.as_array().ok_or_else(|| {
                        invalid("MultiLineString coordinates must be an array".to_string())
                    })?;
                    for member in members {
                        let points = parse_line(member).map_err(invalid)?;
                        lines.push(FaultLine {
                            name: name.clone(),
                            points,
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(Self { lines })
    }
}

fn parse_line(coords: &Value) -> Result<Vec<GeoPoint>, String> {
    let arr = coords
        .as_array()
        .ok_or("line coordinates must be an array".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for pos in arr {
        let pair = pos
            .as_array()
            .filter(|p| p.len() >= 2)
            .ok_or("position must be [lon, lat]".to_string())?;
        let lon = pair[0].as_f64().ok_or("lon must be a number".to_string())?;
        let lat = pair[1].as_f64().ok_or("lat must be a number".to_string())?;
        out.push(GeoPoint::new(lat, lon));
    }
    Ok(out)
}
