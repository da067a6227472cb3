use formats::FaultLines;
use serde::Serialize;

use crate::layer::{FAULT_LINES_LAYER, Layer, LayerId};
use crate::symbology::{FAULT_LINE_STYLE, LayerStyle};

/// All fault polylines in a single line trace. `None` entries break the line
/// between polylines; there is no trailing break.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTrace {
    pub name: &'static str,
    pub lat: Vec<Option<f64>>,
    pub lon: Vec<Option<f64>>,
    pub style: LayerStyle,
}

impl LineTrace {
    pub fn segment_count(&self) -> usize {
        if self.lat.is_empty() {
            0
        } else {
            self.lat.iter().filter(|v| v.is_none()).count() + 1
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FaultLayer {
    id: LayerId,
    style: LayerStyle,
}

impl Default for FaultLayer {
    fn default() -> Self {
        Self {
            id: FAULT_LINES_LAYER,
            style: FAULT_LINE_STYLE,
        }
    }
}

impl FaultLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extract(&self, faults: &FaultLines) -> LineTrace {
        let capacity = faults.vertex_count() + faults.len();
        let mut lat = Vec::with_capacity(capacity);
        let mut lon = Vec::with_capacity(capacity);

        for line in faults.lines.iter().filter(|l| !l.points.is_empty()) {
            if !lat.is_empty() {
                lat.push(None);
                lon.push(None);
            }
            for p in &line.points {
                lat.push(Some(p.lat_deg));
                lon.push(Some(p.lon_deg));
            }
        }

        LineTrace {
            name: self.name(),
            lat,
            lon,
            style: self.style,
        }
    }
}

impl Layer for FaultLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn name(&self) -> &'static str {
        "Tectonic faults"
    }
}

#[cfg(test)]
mod tests {
    use super::FaultLayer;
    use formats::{FaultLine, FaultLines};
    use foundation::math::GeoPoint;
    use pretty_assertions::assert_eq;

    fn line(points: &[(f64, f64)]) -> FaultLine {
        FaultLine {
            name: None,
            points: points.iter().map(|&(lat, lon)| GeoPoint::new(lat, lon)).collect(),
        }
    }

    #[test]
    fn separates_polylines_without_trailing_break() {
        let faults = FaultLines {
            lines: vec![
                line(&[(1.0, 2.0), (3.0, 4.0)]),
                line(&[]),
                line(&[(5.0, 6.0)]),
            ],
        };
        let trace = FaultLayer::new().extract(&faults);
        assert_eq!(trace.lat, vec![Some(1.0), Some(3.0), None, Some(5.0)]);
        assert_eq!(trace.lon, vec![Some(2.0), Some(4.0), None, Some(6.0)]);
        assert_eq!(trace.segment_count(), 2);
    }

    #[test]
    fn empty_faults_give_empty_trace() {
        let trace = FaultLayer::new().extract(&FaultLines::default());
        assert!(trace.lat.is_empty());
        assert_eq!(trace.segment_count(), 0);
    }
}
