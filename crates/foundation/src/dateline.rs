//! Antimeridian splitting for rings drawn on lon/lat renderers.
//!
//! The split is a single forward pass with no lookback. It does not compute
//! where the ring actually meets ±180° and inserts no boundary vertices, so
//! fills stop one vertex short of the seam on either side.

use crate::circle::Polygon;
use crate::error::GeoError;
use crate::math::GeoPoint;

/// Longitude jump (degrees) between consecutive points that marks a seam crossing.
pub const SEAM_JUMP_DEG: f64 = 180.0;

/// Minimum vertex count for a part to be drawn as a filled shape.
pub const MIN_FILL_POINTS: usize = 3;

/// Splits `ring` wherever consecutive longitudes differ by more than 180°.
///
/// Each point is compared with the last point of the part being built, and a
/// crossing starts a new part at the current point. Parts keep their original
/// order and are not re-closed. Empty input yields no parts.
pub fn split_at_dateline(ring: &[GeoPoint]) -> Result<Vec<Polygon>, GeoError> {
    let mut parts: Vec<Polygon> = Vec::new();
    let Some((first, rest)) = ring.split_first() else {
        return Ok(parts);
    };
    check_point(0, first)?;

    let mut current: Polygon = vec![*first];
    for (offset, point) in rest.iter().enumerate() {
        check_point(offset + 1, point)?;
        let prev_lon = current.last().map(|p| p.lon_deg).unwrap_or(point.lon_deg);
        if (point.lon_deg - prev_lon).abs() > SEAM_JUMP_DEG {
            parts.push(std::mem::replace(&mut current, vec![*point]));
        } else {
            current.push(*point);
        }
    }
    parts.push(current);
    Ok(parts)
}

/// Drops parts with fewer than [`MIN_FILL_POINTS`] vertices.
pub fn fillable(parts: Vec<Polygon>) -> Vec<Polygon> {
    parts
        .into_iter()
        .filter(|p| p.len() >= MIN_FILL_POINTS)
        .collect()
}

fn check_point(index: usize, p: &GeoPoint) -> Result<(), GeoError> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(GeoError::invalid(format!(
            "point {index} has non-numeric coordinates ({}, {})",
            p.lat_deg, p.lon_deg
        )))
    }
}
