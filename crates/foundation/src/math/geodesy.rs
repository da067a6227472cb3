use super::Vec3;
use crate::error::GeoError;

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 semi-minor axis (meters).
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);
/// WGS84 first eccentricity squared.
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);

/// IUGG mean Earth radius (kilometers), used by the spherical model.
pub const MEAN_EARTH_RADIUS_KM: f64 = 6_371.008_8;

/// A position on the Earth's surface, in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl GeoPoint {
    /// Unchecked constructor; see [`GeoPoint::try_new`] for validated input.
    pub const fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    pub fn try_new(lat_deg: f64, lon_deg: f64) -> Result<Self, GeoError> {
        let p = Self::new(lat_deg, lon_deg);
        p.validate()?;
        Ok(p)
    }

    pub fn is_finite(&self) -> bool {
        self.lat_deg.is_finite() && self.lon_deg.is_finite()
    }

    pub fn validate(&self) -> Result<(), GeoError> {
        if !self.is_finite() {
            return Err(GeoError::invalid(format!(
                "non-numeric coordinate ({}, {})",
                self.lat_deg, self.lon_deg
            )));
        }
        if !(-90.0..=90.0).contains(&self.lat_deg) {
            return Err(GeoError::invalid(format!(
                "latitude {} outside [-90, 90]",
                self.lat_deg
            )));
        }
        if !(-180.0..=180.0).contains(&self.lon_deg) {
            return Err(GeoError::invalid(format!(
                "longitude {} outside [-180, 180]",
                self.lon_deg
            )));
        }
        Ok(())
    }

    /// ECEF position (meters) on the WGS84 ellipsoid surface.
    pub fn to_ecef(self) -> Vec3 {
        geodetic_to_ecef(Geodetic::new(
            self.lat_deg.to_radians(),
            self.lon_deg.to_radians(),
            0.0,
        ))
    }
}

/// Geodetic coordinates in radians and meters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Geodetic {
    pub lat_rad: f64,
    pub lon_rad: f64,
    pub alt_m: f64,
}

impl Geodetic {
    pub fn new(lat_rad: f64, lon_rad: f64, alt_m: f64) -> Self {
        Self {
            lat_rad,
            lon_rad,
            alt_m,
        }
    }
}

pub fn geodetic_to_ecef(geo: Geodetic) -> Vec3 {
    let sin_lat = geo.lat_rad.sin();
    let cos_lat = geo.lat_rad.cos();
    let sin_lon = geo.lon_rad.sin();
    let cos_lon = geo.lon_rad.cos();

    let n = WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
    let x = (n + geo.alt_m) * cos_lat * cos_lon;
    let y = (n + geo.alt_m) * cos_lat * sin_lon;
    let z = (n * (1.0 - WGS84_E2) + geo.alt_m) * sin_lat;

    Vec3::new(x, y, z)
}

/// Wraps a longitude into `[-180, 180)`.
pub fn normalize_lon_deg(lon_deg: f64) -> f64 {
    (lon_deg + 180.0).rem_euclid(360.0) - 180.0
}

/// Shape of the Earth used when walking along a geodesic.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum EarthModel {
    /// Sphere of radius [`MEAN_EARTH_RADIUS_KM`].
    #[default]
    Sphere,
    /// WGS84 ellipsoid (Vincenty direct).
    Wgs84,
}

impl EarthModel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sphere" | "spherical" => Some(EarthModel::Sphere),
            "wgs84" | "ellipsoid" | "ellipsoidal" => Some(EarthModel::Wgs84),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EarthModel::Sphere => "sphere",
            EarthModel::Wgs84 => "wgs84",
        }
    }

    /// Point reached from `start` after `distance_km` along the geodesic leaving at
    /// `bearing_deg` (clockwise from north). Output longitude is in `[-180, 180)`.
    pub fn destination(self, start: GeoPoint, bearing_deg: f64, distance_km: f64) -> GeoPoint {
        match self {
            EarthModel::Sphere => spherical_destination(start, bearing_deg, distance_km),
            EarthModel::Wgs84 => vincenty_destination(start, bearing_deg, distance_km),
        }
    }
}

fn spherical_destination(start: GeoPoint, bearing_deg: f64, distance_km: f64) -> GeoPoint {
    let delta = distance_km / MEAN_EARTH_RADIUS_KM;
    let theta = bearing_deg.to_radians();
    let phi1 = start.lat_deg.to_radians();
    let lambda1 = start.lon_deg.to_radians();

    let sin_phi2 = phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos();
    let phi2 = sin_phi2.clamp(-1.0, 1.0).asin();
    let y = theta.sin() * delta.sin() * phi1.cos();
    let x = delta.cos() - phi1.sin() * sin_phi2;
    let lambda2 = lambda1 + y.atan2(x);

    GeoPoint::new(phi2.to_degrees(), normalize_lon_deg(lambda2.to_degrees()))
}

const VINCENTY_MAX_ITERATIONS: usize = 200;
const VINCENTY_EPSILON: f64 = 1e-12;

fn vincenty_destination(start: GeoPoint, bearing_deg: f64, distance_km: f64) -> GeoPoint {
    let (a, b, f) = (WGS84_A, WGS84_B, WGS84_F);
    let s = distance_km * 1000.0;
    let alpha1 = bearing_deg.to_radians();
    let (sin_alpha1, cos_alpha1) = alpha1.sin_cos();

    let tan_u1 = (1.0 - f) * start.lat_deg.to_radians().tan();
    let cos_u1 = 1.0 / (1.0 + tan_u1 * tan_u1).sqrt();
    let sin_u1 = tan_u1 * cos_u1;

    let sigma1 = tan_u1.atan2(cos_alpha1);
    let sin_alpha = cos_u1 * sin_alpha1;
    let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
    let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
    let big_a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

    let mut sigma = s / (b * big_a);
    let mut cos_2sigma_m;
    let mut sin_sigma;
    let mut cos_sigma;
    let mut iterations = 0;
    loop {
        cos_2sigma_m = (2.0 * sigma1 + sigma).cos();
        sin_sigma = sigma.sin();
        cos_sigma = sigma.cos();
        let delta_sigma = big_b
            * sin_sigma
            * (cos_2sigma_m
                + big_b / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                        - big_b / 6.0
                            * cos_2sigma_m
                            * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                            * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));
        let prev = sigma;
        sigma = s / (b * big_a) + delta_sigma;
        iterations += 1;
        if (sigma - prev).abs() <= VINCENTY_EPSILON || iterations >= VINCENTY_MAX_ITERATIONS {
            break;
        }
    }

    let x = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
    let phi2 = (sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1)
        .atan2((1.0 - f) * (sin_alpha * sin_alpha + x * x).sqrt());
    let lambda = (sin_sigma * sin_alpha1).atan2(cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1);
    let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
    let l = lambda
        - (1.0 - c)
            * f
            * sin_alpha
            * (sigma
                + c * sin_sigma
                    * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));
    let lon2 = start.lon_deg + l.to_degrees();

    GeoPoint::new(phi2.to_degrees(), normalize_lon_deg(lon2))
}

/// Great-circle distance on the mean-radius sphere (haversine).
pub fn great_circle_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat_deg.to_radians();
    let phi2 = b.lat_deg.to_radians();
    let d_phi = phi2 - phi1;
    let d_lambda = (b.lon_deg - a.lon_deg).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * MEAN_EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::{
        EarthModel, GeoPoint, Geodetic, MEAN_EARTH_RADIUS_KM, WGS84_A, geodetic_to_ecef,
        great_circle_distance_km, normalize_lon_deg,
    };

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn geodetic_to_ecef_equator_prime_meridian() {
        let ecef = geodetic_to_ecef(Geodetic::new(0.0, 0.0, 0.0));
        assert_close(ecef.x, WGS84_A, 1e-6);
        assert_close(ecef.y, 0.0, 1e-6);
        assert_close(ecef.z, 0.0, 1e-6);
    }

    #[test]
    fn geo_point_to_ecef_equator_90e() {
        let ecef = GeoPoint::new(0.0, 90.0).to_ecef();
        assert_close(ecef.x, 0.0, 1e-6);
        assert_close(ecef.y, WGS84_A, 1e-6);
        assert_close(ecef.z, 0.0, 1e-6);
    }

    #[test]
    fn try_new_rejects_out_of_range_and_nan() {
        assert!(GeoPoint::try_new(91.0, 0.0).is_err());
        assert!(GeoPoint::try_new(0.0, -180.5).is_err());
        assert!(GeoPoint::try_new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::try_new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn normalize_lon_wraps_into_half_open_range() {
        assert_close(normalize_lon_deg(190.0), -170.0, 1e-12);
        assert_close(normalize_lon_deg(-190.0), 170.0, 1e-12);
        assert_close(normalize_lon_deg(180.0), -180.0, 1e-12);
        assert_close(normalize_lon_deg(45.0), 45.0, 1e-12);
    }

    #[test]
    fn spherical_destination_one_degree_north() {
        let one_deg_km = MEAN_EARTH_RADIUS_KM * 1f64.to_radians();
        let p = EarthModel::Sphere.destination(GeoPoint::new(0.0, 0.0), 0.0, one_deg_km);
        assert_close(p.lat_deg, 1.0, 1e-9);
        assert_close(p.lon_deg, 0.0, 1e-9);
    }

    #[test]
    fn spherical_destination_crosses_antimeridian() {
        let p = EarthModel::Sphere.destination(GeoPoint::new(0.0, 179.5), 90.0, 111.195);
        assert!(p.lon_deg < -179.0, "lon {}", p.lon_deg);
    }

    #[test]
    fn vincenty_destination_along_equator_matches_ellipsoid_arc() {
        // One degree of equatorial arc on WGS84.
        let arc_km = WGS84_A * 1f64.to_radians() / 1000.0;
        let p = EarthModel::Wgs84.destination(GeoPoint::new(0.0, 0.0), 90.0, arc_km);
        assert_close(p.lat_deg, 0.0, 1e-9);
        assert_close(p.lon_deg, 1.0, 1e-6);
    }

    #[test]
    fn vincenty_and_sphere_agree_roughly() {
        let start = GeoPoint::new(35.0, 139.0);
        let a = EarthModel::Sphere.destination(start, 45.0, 500.0);
        let b = EarthModel::Wgs84.destination(start, 45.0, 500.0);
        assert_close(a.lat_deg, b.lat_deg, 0.05);
        assert_close(a.lon_deg, b.lon_deg, 0.05);
    }

    #[test]
    fn haversine_quarter_meridian() {
        let d = great_circle_distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(90.0, 0.0));
        assert_close(d, MEAN_EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2, 1e-6);
    }

    #[test]
    fn earth_model_parse() {
        assert_eq!(EarthModel::parse("WGS84"), Some(EarthModel::Wgs84));
        assert_eq!(EarthModel::parse("sphere"), Some(EarthModel::Sphere));
        assert_eq!(EarthModel::parse("flat"), None);
    }
}
