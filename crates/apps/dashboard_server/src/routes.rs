use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use compute::analysis::{Histogram, Statistics, Summary};
use compute::{compute_felt_area, EarthquakeDataset, MagnitudeRange};
use formats::{multipolygon_feature, FaultLines};
use foundation::math::{EarthModel, GeoPoint};
use layers::faults::{FaultLayer, LineTrace};
use layers::points::{MarkerTrace, PointLayer};
use layers::symbology::{GlobePalette, MapStyle};
use layers::{recompute, DashboardConfig, DashboardFrame, DashboardInputs};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;

#[derive(Clone)]
pub struct AppState {
    dataset: EarthquakeDataset,
    faults: Arc<FaultLines>,
    config: DashboardConfig,
}

impl AppState {
    pub fn new(dataset: EarthquakeDataset, faults: FaultLines, config: DashboardConfig) -> Self {
        Self {
            dataset,
            faults: Arc::new(faults),
            config,
        }
    }

    /// Missing bounds fall back to the dataset's own min/max.
    fn range(&self, min_mag: Option<f64>, max_mag: Option<f64>) -> MagnitudeRange {
        let full = self.dataset.full_range();
        MagnitudeRange::new(min_mag.unwrap_or(full.min), max_mag.unwrap_or(full.max))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/summary", get(get_summary))
        .route("/api/histogram", get(get_histogram))
        .route("/api/quakes", get(get_quakes))
        .route("/api/felt-area", get(get_felt_area))
        .route("/api/faults", get(get_faults))
        .route("/api/styles", get(get_styles))
        .route("/api/dashboard", post(post_dashboard))
        .with_state(state)
}

fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message.into() })))
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub min_mag: Option<f64>,
    pub max_mag: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistogramQuery {
    pub min_mag: Option<f64>,
    pub max_mag: Option<f64>,
    pub bin_width: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub range: MagnitudeRange,
    pub summary: Summary,
}

async fn get_summary(
    State(state): State<AppState>,
    Query(q): Query<RangeQuery>,
) -> ApiResult<SummaryResponse> {
    let range = state.range(q.min_mag, q.max_mag);
    let filtered = state.dataset.filter_magnitude(range);
    Ok(Json(SummaryResponse {
        range,
        summary: Statistics::summarize(&filtered.magnitudes()),
    }))
}

async fn get_histogram(
    State(state): State<AppState>,
    Query(q): Query<HistogramQuery>,
) -> ApiResult<Histogram> {
    let range = state.range(q.min_mag, q.max_mag);
    let bin_width = q.bin_width.unwrap_or(state.config.histogram_bin_width);
    let filtered = state.dataset.filter_magnitude(range);
    Histogram::build(&filtered.magnitudes(), bin_width)
        .map(Json)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))
}

async fn get_quakes(
    State(state): State<AppState>,
    Query(q): Query<RangeQuery>,
) -> ApiResult<MarkerTrace> {
    let range = state.range(q.min_mag, q.max_mag);
    let filtered = state.dataset.filter_magnitude(range);
    Ok(Json(PointLayer::new().extract(&filtered)))
}

#[derive(Debug, Deserialize)]
pub struct FeltAreaQuery {
    pub lat: f64,
    pub lon: f64,
    pub mag: f64,
    pub points: Option<usize>,
    pub model: Option<String>,
}

/// Felt-radius polygon for an arbitrary event, as a GeoJSON `MultiPolygon`
/// feature (one polygon per dateline-free part).
async fn get_felt_area(
    State(state): State<AppState>,
    Query(q): Query<FeltAreaQuery>,
) -> ApiResult<Value> {
    let mut config = state.config.felt_area;
    if let Some(points) = q.points {
        config = config.with_points(points);
    }
    if let Some(model) = q.model.as_deref() {
        let model = EarthModel::parse(model).ok_or_else(|| {
            api_error(
                StatusCode::BAD_REQUEST,
                format!("unknown model {model:?} (expected sphere or wgs84)"),
            )
        })?;
        config = config.with_model(model);
    }

    let center = GeoPoint::new(q.lat, q.lon);
    let area = compute_felt_area(center, q.mag, &config).map_err(|e| {
        warn!("felt area rejected: {e}");
        api_error(StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let mut props = Map::new();
    props.insert("magnitude".to_string(), json!(area.magnitude));
    props.insert("radius_km".to_string(), json!(area.radius_km));
    props.insert("calibration".to_string(), json!(config.calibration));
    props.insert("model".to_string(), json!(config.model.as_str()));
    props.insert("n_points".to_string(), json!(config.n_points));
    Ok(Json(multipolygon_feature(&area.parts, props)))
}

async fn get_faults(State(state): State<AppState>) -> ApiResult<LineTrace> {
    Ok(Json(FaultLayer::new().extract(&state.faults)))
}

#[derive(Debug, Serialize)]
pub struct StyleEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub base_style: &'static str,
    pub raster_source: Option<&'static str>,
    pub globe_palette: GlobePalette,
}

async fn get_styles() -> ApiResult<Vec<StyleEntry>> {
    let styles = MapStyle::ALL
        .into_iter()
        .map(|style| StyleEntry {
            id: style.id(),
            label: style.label(),
            base_style: style.base_style(),
            raster_source: style.raster_source(),
            globe_palette: style.globe_palette(),
        })
        .collect();
    Ok(Json(styles))
}

async fn post_dashboard(
    State(state): State<AppState>,
    Json(inputs): Json<DashboardInputs>,
) -> ApiResult<DashboardFrame> {
    let frame = recompute(&state.dataset, &state.faults, &inputs, &state.config)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;
    if let Some(reason) = &frame.overlay_error {
        warn!("felt-area overlay dropped: {reason}");
    }
    Ok(Json(frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use compute::FeltAreaConfig;
    use formats::{EarthquakeRecord, FaultLine};
    use layers::view::{Hover, HoverSource, ViewMode};

    fn quake(lat: f64, lon: f64, mag: f64, place: &str) -> EarthquakeRecord {
        EarthquakeRecord {
            time: None,
            latitude: lat,
            longitude: lon,
            depth_km: None,
            magnitude: mag,
            mag_type: None,
            id: None,
            place: place.to_string(),
        }
    }

    fn state() -> AppState {
        let dataset = EarthquakeDataset::from_records(vec![
            quake(-17.87, -178.45, 4.7, "Fiji"),
            quake(36.1, 140.2, 5.1, "Japan"),
            quake(-33.4, -70.6, 6.3, "Chile"),
        ]);
        let faults = FaultLines {
            lines: vec![FaultLine {
                name: None,
                points: vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)],
            }],
        };
        AppState::new(
            dataset,
            faults,
            DashboardConfig::new(FeltAreaConfig::new(1.0).with_points(36)),
        )
    }

    #[tokio::test]
    async fn summary_defaults_to_full_range() {
        let Json(resp) = get_summary(State(state()), Query(RangeQuery::default()))
            .await
            .unwrap();
        assert_eq!(resp.summary.count, 3);
        assert_eq!(resp.range.min, 4.7);
        assert_eq!(resp.range.max, 6.3);
    }

    #[tokio::test]
    async fn summary_honours_partial_range() {
        let q = RangeQuery {
            min_mag: Some(5.0),
            max_mag: None,
        };
        let Json(resp) = get_summary(State(state()), Query(q)).await.unwrap();
        assert_eq!(resp.summary.count, 2);
        assert_eq!(resp.summary.max_magnitude, Some(6.3));
    }

    #[tokio::test]
    async fn histogram_rejects_bad_bin_width() {
        let q = HistogramQuery {
            bin_width: Some(0.0),
            ..HistogramQuery::default()
        };
        let (status, body) = get_histogram(State(state()), Query(q)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.0["error"].as_str().unwrap().contains("bin width"));
    }

    #[tokio::test]
    async fn histogram_rejects_width_needing_too_many_bins() {
        let q = HistogramQuery {
            bin_width: Some(1e-9),
            ..HistogramQuery::default()
        };
        let (status, body) = get_histogram(State(state()), Query(q)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.0["error"].as_str().unwrap().contains("bins"));
    }

    #[tokio::test]
    async fn felt_area_returns_geojson_parts() {
        let q = FeltAreaQuery {
            lat: -17.87,
            lon: -178.45,
            mag: 4.7,
            points: None,
            model: Some("wgs84".to_string()),
        };
        let Json(feature) = get_felt_area(State(state()), Query(q)).await.unwrap();
        assert_eq!(feature["geometry"]["type"], "MultiPolygon");
        assert!(feature["geometry"]["coordinates"].as_array().unwrap().len() >= 2);
        assert_eq!(feature["properties"]["model"], "wgs84");
        assert_eq!(feature["properties"]["n_points"], 36);
    }

    #[tokio::test]
    async fn felt_area_rejects_bad_input() {
        let bad_model = FeltAreaQuery {
            lat: 0.0,
            lon: 0.0,
            mag: 5.0,
            points: None,
            model: Some("flat".to_string()),
        };
        let (status, _) = get_felt_area(State(state()), Query(bad_model))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let bad_points = FeltAreaQuery {
            lat: 0.0,
            lon: 0.0,
            mag: 5.0,
            points: Some(2),
            model: None,
        };
        let (status, _) = get_felt_area(State(state()), Query(bad_points))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let huge_points = FeltAreaQuery {
            lat: 0.0,
            lon: 0.0,
            mag: 5.0,
            points: Some(foundation::MAX_CIRCLE_POINTS + 1),
            model: None,
        };
        let (status, _) = get_felt_area(State(state()), Query(huge_points))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn styles_list_every_basemap() {
        let Json(styles) = get_styles().await.unwrap();
        assert_eq!(styles.len(), MapStyle::ALL.len());
        assert!(styles.iter().any(|s| s.id == "ocean-esri" && s.raster_source.is_some()));
    }

    #[tokio::test]
    async fn faults_are_served_as_one_trace() {
        let Json(trace) = get_faults(State(state())).await.unwrap();
        assert_eq!(trace.lat, vec![Some(0.0), Some(1.0)]);
    }

    #[tokio::test]
    async fn dashboard_attaches_overlay_to_hovered_globe() {
        let inputs = DashboardInputs {
            view_mode: ViewMode::Both,
            hover: Some(Hover {
                source: HoverSource::Globe,
                lat: 36.1,
                lon: 140.2,
            }),
            ..DashboardInputs::default()
        };
        let Json(frame) = post_dashboard(State(state()), Json(inputs)).await.unwrap();
        assert!(frame.globe.unwrap().felt_area.is_some());
        assert!(frame.map.is_some());
    }

    #[tokio::test]
    async fn dashboard_ignores_map_hover_for_overlay() {
        let inputs = DashboardInputs {
            view_mode: ViewMode::Both,
            hover: Some(Hover {
                source: HoverSource::Map,
                lat: 36.1,
                lon: 140.2,
            }),
            ..DashboardInputs::default()
        };
        let Json(frame) = post_dashboard(State(state()), Json(inputs)).await.unwrap();
        assert!(frame.globe.unwrap().felt_area.is_none());
        assert!(frame.overlay_error.is_none());
    }
}
