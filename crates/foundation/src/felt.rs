/// Empirical radius (km) within which an event of `magnitude` is felt:
/// `10^(0.5 * magnitude + calibration)`.
///
/// `calibration` has no single established value; callers pass it in from
/// configuration.
pub fn felt_radius_km(magnitude: f64, calibration: f64) -> f64 {
    10f64.powf(0.5 * magnitude + calibration)
}

/// Magnitude-to-radius mapping with a fixed calibration constant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FeltRadiusModel {
    pub calibration: f64,
}

impl FeltRadiusModel {
    pub const fn new(calibration: f64) -> Self {
        Self { calibration }
    }

    pub fn radius_km(&self, magnitude: f64) -> f64 {
        felt_radius_km(magnitude, self.calibration)
    }
}

#[cfg(test)]
mod tests {
    use super::{FeltRadiusModel, felt_radius_km};

    #[test]
    fn magnitude_five_with_minus_two_and_a_half_is_one_km() {
        assert!((felt_radius_km(5.0, -2.5) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn calibration_shifts_by_decades() {
        assert!((felt_radius_km(4.0, 0.0) - 100.0).abs() < 1e-9);
        assert!((felt_radius_km(4.0, 1.0) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn radius_increases_with_magnitude() {
        let model = FeltRadiusModel::new(1.0);
        let mut prev = 0.0;
        for tenths in 0..100 {
            let r = model.radius_km(tenths as f64 / 10.0);
            assert!(r > prev);
            prev = r;
        }
    }
}
