use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use compute::FeltAreaConfig;
use foundation::math::EarthModel;
use foundation::DEFAULT_CIRCLE_POINTS;
use layers::dashboard::{DEFAULT_HISTOGRAM_BIN_WIDTH, DEFAULT_HOVER_TOLERANCE_KM};
use layers::DashboardConfig;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8050";
pub const DEFAULT_DATA_PATH: &str = "data/cleaned/earthquakes.csv";
pub const DEFAULT_TECTONIC_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub data_path: PathBuf,
    /// URL or local path of the plate-boundary GeoJSON.
    pub tectonic_source: String,
    pub dashboard: DashboardConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let addr_raw = env_var_string(&lookup, "QUAKES_ADDR", DEFAULT_ADDR);
        let addr: SocketAddr = addr_raw
            .parse()
            .map_err(|e| format!("invalid QUAKES_ADDR {addr_raw:?}: {e}"))?;

        let model_raw = env_var_string(&lookup, "FELT_MODEL", EarthModel::Sphere.as_str());
        let model = EarthModel::parse(&model_raw)
            .ok_or_else(|| format!("invalid FELT_MODEL {model_raw:?} (expected sphere or wgs84)"))?;

        let felt_area = FeltAreaConfig::new(required_f64(&lookup, "FELT_CALIBRATION")?)
            .with_points(env_var_usize(&lookup, "FELT_POINTS", DEFAULT_CIRCLE_POINTS))
            .with_model(model);

        let mut dashboard = DashboardConfig::new(felt_area);
        dashboard.hover_tolerance_km =
            env_var_f64(&lookup, "HOVER_TOLERANCE_KM", DEFAULT_HOVER_TOLERANCE_KM);
        dashboard.histogram_bin_width =
            env_var_f64(&lookup, "HISTOGRAM_BIN_WIDTH", DEFAULT_HISTOGRAM_BIN_WIDTH);
        dashboard.validate()?;

        Ok(Self {
            addr,
            data_path: PathBuf::from(env_var_string(&lookup, "QUAKES_DATA", DEFAULT_DATA_PATH)),
            tectonic_source: env_var_string(&lookup, "TECTONIC_URL", DEFAULT_TECTONIC_URL),
            dashboard,
        })
    }
}

fn env_var_string(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_var_usize(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: usize) -> usize {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn required_f64(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<f64, String> {
    let raw = lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("{key} is required"))?;
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("invalid {key} {raw:?}"))
}

fn env_var_f64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> f64 {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
