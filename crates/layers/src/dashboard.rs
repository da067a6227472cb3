//! One dashboard refresh as a pure function of the current control state.
//!
//! Every UI event (slider, style dropdown, layer checkboxes, hover, sidebar
//! button) produces a full [`DashboardInputs`]; [`recompute`] turns it into the
//! frame the client renders. Nothing is cached between calls.

use compute::analysis::{Histogram, SpatialAnalysis, Statistics, Summary};
use compute::{
    AnalysisError, EarthquakeDataset, FeltArea, FeltAreaConfig, MagnitudeRange, compute_felt_area,
};
use formats::FaultLines;
use foundation::{GeoError, MAX_CIRCLE_POINTS};
use foundation::math::{GeoPoint, Orthographic};
use serde::{Deserialize, Serialize};

use crate::faults::{FaultLayer, LineTrace};
use crate::felt_area::{FeltAreaLayer, FeltAreaOverlay};
use crate::points::{MarkerTrace, PointLayer};
use crate::symbology::{GlobePalette, MapStyle};
use crate::view::{Hover, HoverSource, LayerToggles, SidebarLayout, SidebarState, ViewMode};

pub const DEFAULT_HOVER_TOLERANCE_KM: f64 = 50.0;
pub const DEFAULT_HISTOGRAM_BIN_WIDTH: f64 = 0.1;
pub const MAP_ZOOM: f64 = 1.0;
pub const GLOBE_SCALE: f64 = 0.85;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardInputs {
    /// `[min, max]`; the full dataset range when absent.
    pub magnitude_range: Option<[f64; 2]>,
    pub map_style: MapStyle,
    pub view_mode: ViewMode,
    pub layers: LayerToggles,
    pub hover: Option<Hover>,
    pub sidebar: SidebarState,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DashboardConfig {
    pub felt_area: FeltAreaConfig,
    pub hover_tolerance_km: f64,
    pub histogram_bin_width: f64,
}

impl DashboardConfig {
    pub fn new(felt_area: FeltAreaConfig) -> Self {
        Self {
            felt_area,
            hover_tolerance_km: DEFAULT_HOVER_TOLERANCE_KM,
            histogram_bin_width: DEFAULT_HISTOGRAM_BIN_WIDTH,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.felt_area.calibration.is_finite() {
            return Err(format!(
                "felt calibration must be a number, got {}",
                self.felt_area.calibration
            ));
        }
        if !(3..=MAX_CIRCLE_POINTS).contains(&self.felt_area.n_points) {
            return Err(format!(
                "felt-area ring needs between 3 and {MAX_CIRCLE_POINTS} points, got {}",
                self.felt_area.n_points
            ));
        }
        if !self.hover_tolerance_km.is_finite() || self.hover_tolerance_km < 0.0 {
            return Err(format!(
                "hover tolerance must be a non-negative number of km, got {}",
                self.hover_tolerance_km
            ));
        }
        if !self.histogram_bin_width.is_finite() || self.histogram_bin_width <= 0.0 {
            return Err(format!(
                "histogram bin width must be positive, got {}",
                self.histogram_bin_width
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub style: MapStyle,
    pub base_style: &'static str,
    pub raster_source: Option<&'static str>,
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: f64,
    pub points: Option<MarkerTrace>,
    pub faults: Option<LineTrace>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobeView {
    pub projection: &'static str,
    pub scale: f64,
    /// Point the globe is rotated to face.
    pub center_lat: f64,
    pub center_lon: f64,
    /// Events on the hemisphere facing the viewer.
    pub facing_quakes: usize,
    pub palette: GlobePalette,
    pub points: Option<MarkerTrace>,
    pub faults: Option<LineTrace>,
    pub felt_area: Option<FeltAreaOverlay>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardFrame {
    pub range: MagnitudeRange,
    pub summary: Summary,
    pub histogram: Histogram,
    pub map: Option<MapView>,
    pub globe: Option<GlobeView>,
    pub sidebar: SidebarState,
    pub layout: SidebarLayout,
    /// Why the hovered event has no overlay, if the felt-area path failed.
    pub overlay_error: Option<String>,
}

pub fn recompute(
    dataset: &EarthquakeDataset,
    faults: &FaultLines,
    inputs: &DashboardInputs,
    config: &DashboardConfig,
) -> Result<DashboardFrame, AnalysisError> {
    let range = match inputs.magnitude_range {
        Some([min, max]) => MagnitudeRange::new(min, max),
        None => dataset.full_range(),
    };
    let filtered = dataset.filter_magnitude(range);
    let magnitudes = filtered.magnitudes();
    let summary = Statistics::summarize(&magnitudes);
    let histogram = Histogram::build(&magnitudes, config.histogram_bin_width)?;

    let points = inputs
        .layers
        .seismic_points
        .then(|| PointLayer::new().extract(&filtered));
    let fault_trace = inputs
        .layers
        .fault_lines
        .then(|| FaultLayer::new().extract(faults));

    // Only the globe draws a felt area; map hovers just show the marker tooltip.
    let (felt, overlay_error) = match inputs.hover {
        Some(hover) if hover.source == HoverSource::Globe => {
            match hovered_felt_area(&filtered, hover, config) {
                Ok(area) => (area, None),
                Err(e) => (None, Some(e.to_string())),
            }
        }
        _ => (None, None),
    };

    let center = filtered.mean_center();
    let map = inputs.view_mode.shows_map().then(|| MapView {
        style: inputs.map_style,
        base_style: inputs.map_style.base_style(),
        raster_source: inputs.map_style.raster_source(),
        center_lat: center.lat_deg,
        center_lon: center.lon_deg,
        zoom: MAP_ZOOM,
        points: points.clone(),
        faults: fault_trace.clone(),
    });
    let globe = inputs.view_mode.shows_globe().then(|| GlobeView {
        projection: "orthographic",
        scale: GLOBE_SCALE,
        center_lat: center.lat_deg,
        center_lon: center.lon_deg,
        facing_quakes: facing_count(&filtered, center),
        palette: inputs.map_style.globe_palette(),
        points,
        faults: fault_trace,
        felt_area: felt
            .as_ref()
            .map(|area| FeltAreaLayer::new().extract(area, true)),
    });

    Ok(DashboardFrame {
        range,
        summary,
        histogram,
        map,
        globe,
        sidebar: inputs.sidebar,
        layout: inputs.sidebar.layout(),
        overlay_error,
    })
}

fn facing_count(dataset: &EarthquakeDataset, center: GeoPoint) -> usize {
    let proj = Orthographic::new(center, GLOBE_SCALE);
    dataset
        .records()
        .iter()
        .filter(|r| proj.project(r.point()).is_some())
        .count()
}

fn hovered_felt_area(
    dataset: &EarthquakeDataset,
    hover: Hover,
    config: &DashboardConfig,
) -> Result<Option<FeltArea>, GeoError> {
    let target = GeoPoint::try_new(hover.lat, hover.lon)?;
    let Some(record) =
        SpatialAnalysis::find_hovered(dataset.records(), target, config.hover_tolerance_km)
    else {
        return Ok(None);
    };
    compute_felt_area(record.point(), record.magnitude, &config.felt_area).map(Some)
}

#[cfg(test)]
mod tests {
    use super::{DashboardConfig, DashboardInputs, recompute};
    use crate::view::{Hover, HoverSource, LayerToggles, SidebarState, ViewMode};
    use compute::{EarthquakeDataset, FeltAreaConfig};
    use formats::{EarthquakeRecord, FaultLine, FaultLines};
    use foundation::MAX_CIRCLE_POINTS;
    use foundation::math::GeoPoint;
    use pretty_assertions::assert_eq;

    fn quake(lat: f64, lon: f64, mag: f64, place: &str) -> EarthquakeRecord {
        EarthquakeRecord {
            time: None,
            latitude: lat,
            longitude: lon,
            depth_km: Some(10.0),
            magnitude: mag,
            mag_type: None,
            id: None,
            place: place.to_string(),
        }
    }

    fn dataset() -> EarthquakeDataset {
        EarthquakeDataset::from_records(vec![
            quake(-17.87, -178.45, 4.7, "Fiji"),
            quake(36.1, 140.2, 5.1, "Japan"),
            quake(-33.4, -70.6, 6.3, "Chile"),
        ])
    }

    fn faults() -> FaultLines {
        FaultLines {
            lines: vec![FaultLine {
                name: Some("PA-NA".to_string()),
                points: vec![GeoPoint::new(30.0, -120.0), GeoPoint::new(35.0, -118.0)],
            }],
        }
    }

    fn config() -> DashboardConfig {
        DashboardConfig::new(FeltAreaConfig::new(1.0).with_points(36))
    }

    #[test]
    fn default_inputs_show_full_range_on_map() {
        let frame = recompute(&dataset(), &faults(), &DashboardInputs::default(), &config()).unwrap();
        assert_eq!(frame.summary.count, 3);
        assert_eq!(frame.range.min, 4.7);
        assert_eq!(frame.range.max, 6.3);
        assert_eq!(frame.histogram.total(), 3);
        let map = frame.map.unwrap();
        assert_eq!(map.base_style, "open-street-map");
        assert_eq!(map.points.unwrap().lat.len(), 3);
        assert!(map.faults.is_some());
        assert!(frame.globe.is_none());
        assert_eq!(frame.layout.sidebar_width_px, 300);
    }

    #[test]
    fn slider_filters_every_output() {
        let inputs = DashboardInputs {
            magnitude_range: Some([5.0, 7.0]),
            ..DashboardInputs::default()
        };
        let frame = recompute(&dataset(), &faults(), &inputs, &config()).unwrap();
        assert_eq!(frame.summary.count, 2);
        assert_eq!(frame.summary.mean_magnitude, Some(5.7));
        assert_eq!(frame.map.unwrap().points.unwrap().text, vec!["Japan", "Chile"]);
    }

    #[test]
    fn unchecked_layers_are_omitted() {
        let inputs = DashboardInputs {
            layers: LayerToggles {
                seismic_points: false,
                fault_lines: false,
            },
            view_mode: ViewMode::Both,
            ..DashboardInputs::default()
        };
        let frame = recompute(&dataset(), &faults(), &inputs, &config()).unwrap();
        let map = frame.map.unwrap();
        let globe = frame.globe.unwrap();
        // Mean center (-5.1, -36.3) faces the Atlantic: only Chile is on the near side.
        assert_eq!(globe.facing_quakes, 1);
        assert!(map.points.is_none() && map.faults.is_none());
        assert!(globe.points.is_none() && globe.faults.is_none());
    }

    #[test]
    fn globe_hover_attaches_overlay_to_globe_only() {
        let inputs = DashboardInputs {
            view_mode: ViewMode::Both,
            hover: Some(Hover {
                source: HoverSource::Globe,
                lat: -17.87,
                lon: -178.45,
            }),
            ..DashboardInputs::default()
        };
        let frame = recompute(&dataset(), &faults(), &inputs, &config()).unwrap();
        let overlay = frame.globe.unwrap().felt_area.unwrap();
        assert_eq!(overlay.magnitude, 4.7);
        assert!(overlay.fills.len() >= 2);
        assert!(!overlay.triangles_ecef.is_empty());
        assert!(frame.overlay_error.is_none());
    }

    #[test]
    fn map_hover_draws_no_felt_area() {
        let inputs = DashboardInputs {
            view_mode: ViewMode::Both,
            hover: Some(Hover {
                source: HoverSource::Map,
                lat: 36.1,
                lon: 140.2,
            }),
            ..DashboardInputs::default()
        };
        let frame = recompute(&dataset(), &faults(), &inputs, &config()).unwrap();
        assert!(frame.globe.unwrap().felt_area.is_none());
        assert!(frame.overlay_error.is_none());
    }

    #[test]
    fn hover_far_from_any_event_draws_nothing() {
        let inputs = DashboardInputs {
            hover: Some(Hover {
                source: HoverSource::Globe,
                lat: 0.0,
                lon: 0.0,
            }),
            view_mode: ViewMode::Globe,
            ..DashboardInputs::default()
        };
        let frame = recompute(&dataset(), &faults(), &inputs, &config()).unwrap();
        assert!(frame.globe.unwrap().felt_area.is_none());
        assert!(frame.overlay_error.is_none());
    }

    #[test]
    fn bad_hover_coordinate_degrades_to_no_overlay() {
        let inputs = DashboardInputs {
            hover: Some(Hover {
                source: HoverSource::Globe,
                lat: f64::NAN,
                lon: 140.2,
            }),
            view_mode: ViewMode::Globe,
            ..DashboardInputs::default()
        };
        let frame = recompute(&dataset(), &faults(), &inputs, &config()).unwrap();
        assert!(frame.globe.unwrap().felt_area.is_none());
        assert!(frame.overlay_error.is_some());
    }

    #[test]
    fn closed_sidebar_widens_content() {
        let inputs = DashboardInputs {
            sidebar: SidebarState::Closed,
            ..DashboardInputs::default()
        };
        let frame = recompute(&dataset(), &faults(), &inputs, &config()).unwrap();
        assert_eq!(frame.layout.content_margin_px, 20);
    }

    #[test]
    fn inputs_deserialize_from_partial_json() {
        let inputs: DashboardInputs = serde_json::from_str(
            r#"{"magnitude_range": [4.5, 6.0], "map_style": "carto-darkmatter", "view_mode": "globe"}"#,
        )
        .unwrap();
        assert_eq!(inputs.magnitude_range, Some([4.5, 6.0]));
        assert_eq!(inputs.view_mode, ViewMode::Globe);
        assert!(inputs.layers.seismic_points);
        assert!(inputs.hover.is_none());
    }

    #[test]
    fn config_validation() {
        assert!(config().validate().is_ok());
        let mut bad = config();
        bad.histogram_bin_width = 0.0;
        assert!(bad.validate().is_err());
        let mut bad = config();
        bad.felt_area = FeltAreaConfig::new(f64::NAN);
        assert!(bad.validate().is_err());
        let mut bad = config();
        bad.felt_area = FeltAreaConfig::new(1.0).with_points(MAX_CIRCLE_POINTS + 1);
        assert!(bad.validate().is_err());
    }
}
