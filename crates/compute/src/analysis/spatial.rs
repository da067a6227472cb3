use formats::EarthquakeRecord;
use foundation::math::{GeoPoint, great_circle_distance_km};

pub struct SpatialAnalysis;

impl SpatialAnalysis {
    /// Returns (index, great-circle distance in km).
    pub fn nearest(records: &[EarthquakeRecord], target: GeoPoint) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, r) in records.iter().enumerate() {
            let d = great_circle_distance_km(r.point(), target);
            if best.map(|(_, bd)| d < bd).unwrap_or(true) {
                best = Some((i, d));
            }
        }
        best
    }

    /// Resolves a hover coordinate to the event under the cursor.
    ///
    /// An event at exactly the hovered coordinate wins; otherwise the nearest
    /// event within `tolerance_km` is returned.
    pub fn find_hovered(
        records: &[EarthquakeRecord],
        target: GeoPoint,
        tolerance_km: f64,
    ) -> Option<&EarthquakeRecord> {
        if let Some(exact) = records
            .iter()
            .find(|r| r.latitude == target.lat_deg && r.longitude == target.lon_deg)
        {
            return Some(exact);
        }
        let (idx, dist) = Self::nearest(records, target)?;
        (dist <= tolerance_km).then(|| &records[idx])
    }
}
