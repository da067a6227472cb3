use foundation::math::{EarthModel, GeoPoint};
use foundation::{
    DEFAULT_CIRCLE_POINTS, FeltRadiusModel, GeoError, GeodesicCircleBuilder, Polygon, fillable,
    split_at_dateline,
};

/// Parameters for the felt-radius overlay. There is no default calibration;
/// it always comes from configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FeltAreaConfig {
    pub calibration: f64,
    pub n_points: usize,
    pub model: EarthModel,
}

impl FeltAreaConfig {
    pub fn new(calibration: f64) -> Self {
        Self {
            calibration,
            n_points: DEFAULT_CIRCLE_POINTS,
            model: EarthModel::Sphere,
        }
    }

    pub fn with_points(mut self, n_points: usize) -> Self {
        self.n_points = n_points;
        self
    }

    pub fn with_model(mut self, model: EarthModel) -> Self {
        self.model = model;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeltArea {
    pub center: GeoPoint,
    pub magnitude: f64,
    pub radius_km: f64,
    /// Closed ring straight from the circle builder.
    pub ring: Polygon,
    /// Seam-free parts with at least three vertices, ready to fill.
    pub parts: Vec<Polygon>,
}

/// magnitude -> radius -> geodesic ring -> dateline split -> fillable parts.
pub fn compute_felt_area(
    center: GeoPoint,
    magnitude: f64,
    config: &FeltAreaConfig,
) -> Result<FeltArea, GeoError> {
    if !magnitude.is_finite() {
        return Err(GeoError::invalid(format!(
            "magnitude must be a number, got {magnitude}"
        )));
    }
    let radius_km = FeltRadiusModel::new(config.calibration).radius_km(magnitude);
    let ring = GeodesicCircleBuilder::new()
        .with_points(config.n_points)
        .with_model(config.model)
        .build(center, radius_km)?;
    let parts = fillable(split_at_dateline(&ring)?);

    Ok(FeltArea {
        center,
        magnitude,
        radius_km,
        ring,
        parts,
    })
}
