use compute::EarthquakeDataset;
use serde::Serialize;

use crate::layer::{Layer, LayerId, SEISMIC_POINTS_LAYER};
use crate::symbology::{LayerStyle, SEISMIC_POINT_STYLE};

/// Scatter markers in parallel arrays, one entry per event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerTrace {
    pub name: &'static str,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub magnitude: Vec<f64>,
    /// Hover text (the event's place).
    pub text: Vec<String>,
    pub style: LayerStyle,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointLayer {
    id: LayerId,
    style: LayerStyle,
}

impl Default for PointLayer {
    fn default() -> Self {
        Self {
            id: SEISMIC_POINTS_LAYER,
            style: SEISMIC_POINT_STYLE,
        }
    }
}

impl PointLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extract(&self, dataset: &EarthquakeDataset) -> MarkerTrace {
        let records = dataset.records();
        MarkerTrace {
            name: self.name(),
            lat: records.iter().map(|r| r.latitude).collect(),
            lon: records.iter().map(|r| r.longitude).collect(),
            magnitude: records.iter().map(|r| r.magnitude).collect(),
            text: records.iter().map(|r| r.place.clone()).collect(),
            style: self.style,
        }
    }
}

impl Layer for PointLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn name(&self) -> &'static str {
        "Earthquakes"
    }
}

#[cfg(test)]
mod tests {
    use super::PointLayer;
    use compute::EarthquakeDataset;
    use formats::EarthquakeRecord;

    #[test]
    fn extracts_parallel_arrays() {
        let ds = EarthquakeDataset::from_records(vec![EarthquakeRecord {
            time: None,
            latitude: 36.1,
            longitude: 140.2,
            depth_km: None,
            magnitude: 5.1,
            mag_type: None,
            id: None,
            place: "15 km NE of Ishige, Japan".to_string(),
        }]);
        let trace = PointLayer::new().extract(&ds);
        assert_eq!(trace.lat, vec![36.1]);
        assert_eq!(trace.lon, vec![140.2]);
        assert_eq!(trace.magnitude, vec![5.1]);
        assert_eq!(trace.text, vec!["15 km NE of Ishige, Japan".to_string()]);
    }
}
