//! Orthographic globe projection. Input in degrees; the far hemisphere is hidden.

use super::{GeoPoint, Vec2};

/// Orthographic projection onto a disk of radius `scale`, viewed from above `center`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Orthographic {
    pub center: GeoPoint,
    pub scale: f64,
}

impl Orthographic {
    pub fn new(center: GeoPoint, scale: f64) -> Self {
        Self { center, scale }
    }

    /// Returns `None` when `p` lies on the hemisphere facing away from the viewer.
    pub fn project(&self, p: GeoPoint) -> Option<Vec2> {
        let phi0 = self.center.lat_deg.to_radians();
        let lambda0 = self.center.lon_deg.to_radians();
        let phi = p.lat_deg.to_radians();
        let d_lambda = p.lon_deg.to_radians() - lambda0;

        let cos_c = phi0.sin() * phi.sin() + phi0.cos() * phi.cos() * d_lambda.cos();
        if cos_c < 0.0 {
            return None;
        }

        let x = phi.cos() * d_lambda.sin();
        let y = phi0.cos() * phi.sin() - phi0.sin() * phi.cos() * d_lambda.cos();
        Some(Vec2::new(x * self.scale, y * self.scale))
    }
}

impl Default for Orthographic {
    fn default() -> Self {
        Self::new(GeoPoint::new(0.0, 0.0), 1.0)
    }
}
