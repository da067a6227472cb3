use compute::FeltArea;
use earcutr::earcut;
use foundation::Polygon;
use foundation::math::{Vec3, WGS84_A, WGS84_B};
use serde::Serialize;

use crate::layer::{FELT_AREA_LAYER, Layer, LayerId};
use crate::symbology::{FELT_AREA_FILL_STYLE, LayerStyle};

/// One filled shape per seam-free part, as parallel lat/lon arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillTrace {
    pub name: &'static str,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub style: LayerStyle,
}

/// Felt-radius overlay for one hovered event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeltAreaOverlay {
    pub center_lat: f64,
    pub center_lon: f64,
    pub magnitude: f64,
    pub radius_km: f64,
    pub fills: Vec<FillTrace>,
    /// Flat triangle list (3 vertices per triangle) in ECEF meters, for globe
    /// renderers that draw meshes. Empty for the flat map.
    pub triangles_ecef: Vec<[f64; 3]>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FeltAreaLayer {
    id: LayerId,
    style: LayerStyle,
}

impl Default for FeltAreaLayer {
    fn default() -> Self {
        Self {
            id: FELT_AREA_LAYER,
            style: FELT_AREA_FILL_STYLE,
        }
    }
}

impl FeltAreaLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extract(&self, area: &FeltArea, with_mesh: bool) -> FeltAreaOverlay {
        let fills = area
            .parts
            .iter()
            .map(|part| FillTrace {
                name: self.name(),
                lat: part.iter().map(|p| p.lat_deg).collect(),
                lon: part.iter().map(|p| p.lon_deg).collect(),
                style: self.style,
            })
            .collect();

        let triangles_ecef = if with_mesh {
            area.parts
                .iter()
                .flat_map(triangulate_part)
                .map(Vec3::as_array)
                .collect()
        } else {
            Vec::new()
        };

        FeltAreaOverlay {
            center_lat: area.center.lat_deg,
            center_lon: area.center.lon_deg,
            magnitude: area.magnitude,
            radius_km: area.radius_km,
            fills,
            triangles_ecef,
        }
    }
}

impl Layer for FeltAreaLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn name(&self) -> &'static str {
        "Felt area"
    }
}

// Triangulates in a local tangent plane at the centroid of the part.
fn triangulate_part(part: &Polygon) -> Vec<Vec3> {
    let mut vertices: Vec<Vec3> = part.iter().map(|p| p.to_ecef()).collect();
    drop_closing_duplicate(&mut vertices);
    if vertices.len() < 3 {
        return Vec::new();
    }

    let origin = centroid(&vertices);
    let n = ellipsoid_normal_ecef(origin);
    let up = if n.z.abs() < 0.99 {
        Vec3::new(0.0, 0.0, 1.0)
    } else {
        Vec3::new(0.0, 1.0, 0.0)
    };
    let east = up.cross(n).normalize();
    let north = n.cross(east);

    let mut coords_2d: Vec<f64> = Vec::with_capacity(vertices.len() * 2);
    for v in &vertices {
        let d = *v - origin;
        coords_2d.push(d.dot(east));
        coords_2d.push(d.dot(north));
    }

    let indices = match earcut(&coords_2d, &[], 2) {
        Ok(ix) => ix,
        Err(_) => return Vec::new(),
    };
    indices
        .into_iter()
        .filter_map(|idx| vertices.get(idx).copied())
        .collect()
}

fn drop_closing_duplicate(points: &mut Vec<Vec3>) {
    let closed = matches!(
        points.as_slice(),
        [first, .., last] if (*first - *last).length() < 1e-6
    );
    if closed {
        points.pop();
    }
}

fn ellipsoid_normal_ecef(p: Vec3) -> Vec3 {
    // Gradient of x^2/A^2 + y^2/A^2 + z^2/B^2.
    let a2 = WGS84_A * WGS84_A;
    let b2 = WGS84_B * WGS84_B;
    Vec3::new(p.x / a2, p.y / a2, p.z / b2).normalize()
}

fn centroid(vertices: &[Vec3]) -> Vec3 {
    let mut sum = Vec3::new(0.0, 0.0, 0.0);
    for v in vertices {
        sum = sum + *v;
    }
    let n = vertices.len() as f64;
    Vec3::new(sum.x / n, sum.y / n, sum.z / n)
}
