use crate::error::GeoError;
use crate::math::{EarthModel, GeoPoint};

/// Ordered sequence of points. Rings from [`GeodesicCircleBuilder`] are closed
/// (first point repeated at the end); dateline parts need not be.
pub type Polygon = Vec<GeoPoint>;

/// Vertex count used for felt-area rings unless configured otherwise.
pub const DEFAULT_CIRCLE_POINTS: usize = 72;

/// Largest vertex count `build` accepts.
pub const MAX_CIRCLE_POINTS: usize = 4096;

/// Builds rings of points at a fixed geodesic distance around a center.
///
/// Circles large enough to reach a pole or span a hemisphere are not corrected:
/// the ring may self-intersect or wrap around the pole, and only the ±180°
/// seam is handled downstream by [`crate::dateline::split_at_dateline`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeodesicCircleBuilder {
    n_points: usize,
    model: EarthModel,
}

impl Default for GeodesicCircleBuilder {
    fn default() -> Self {
        Self {
            n_points: DEFAULT_CIRCLE_POINTS,
            model: EarthModel::Sphere,
        }
    }
}

impl GeodesicCircleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_points(mut self, n_points: usize) -> Self {
        self.n_points = n_points;
        self
    }

    pub fn with_model(mut self, model: EarthModel) -> Self {
        self.model = model;
        self
    }

    pub fn n_points(&self) -> usize {
        self.n_points
    }

    pub fn model(&self) -> EarthModel {
        self.model
    }

    /// Returns `n_points + 1` points, starting at bearing 0° (north) and
    /// stepping clockwise by `360 / n_points`, with the first point repeated last.
    pub fn build(&self, center: GeoPoint, radius_km: f64) -> Result<Polygon, GeoError> {
        if !(radius_km.is_finite() && radius_km > 0.0) {
            return Err(GeoError::invalid(format!(
                "radius_km must be a positive number, got {radius_km}"
            )));
        }
        if !(3..=MAX_CIRCLE_POINTS).contains(&self.n_points) {
            return Err(GeoError::invalid(format!(
                "n_points must be in [3, {MAX_CIRCLE_POINTS}], got {}",
                self.n_points
            )));
        }
        center.validate()?;

        let step = 360.0 / self.n_points as f64;
        let mut ring = Vec::with_capacity(self.n_points + 1);
        for i in 0..self.n_points {
            let bearing = i as f64 * step;
            ring.push(self.model.destination(center, bearing, radius_km));
        }
        ring.push(ring[0]);
        Ok(ring)
    }
}

/// Shorthand for `GeodesicCircleBuilder` on the sphere.
pub fn geodesic_circle(
    center: GeoPoint,
    radius_km: f64,
    n_points: usize,
) -> Result<Polygon, GeoError> {
    GeodesicCircleBuilder::new()
        .with_points(n_points)
        .build(center, radius_km)
}
