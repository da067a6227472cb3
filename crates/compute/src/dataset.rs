use std::path::Path;
use std::sync::Arc;

use formats::{CleanReport, CsvError, EarthquakeRecord, read_earthquake_csv_path};
use foundation::math::GeoPoint;
use serde::{Deserialize, Serialize};

/// Inclusive magnitude window, as set by the range slider.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeRange {
    pub min: f64,
    pub max: f64,
}

impl MagnitudeRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Both ends inclusive. A reversed range contains nothing.
    pub fn contains(&self, magnitude: f64) -> bool {
        magnitude >= self.min && magnitude <= self.max
    }
}

/// Immutable, cheaply clonable handle over a cleaned earthquake catalog.
///
/// The hosting application owns its lifecycle; filtering returns a new handle.
#[derive(Debug, Clone, Default)]
pub struct EarthquakeDataset {
    records: Arc<[EarthquakeRecord]>,
}

impl EarthquakeDataset {
    pub fn from_records(records: Vec<EarthquakeRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn load_csv(path: impl AsRef<Path>) -> Result<(Self, CleanReport), CsvError> {
        let (records, report) = read_earthquake_csv_path(path)?;
        Ok((Self::from_records(records), report))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[EarthquakeRecord] {
        &self.records
    }

    pub fn magnitudes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.magnitude).collect()
    }

    /// `(min, max)` magnitude, or `None` for an empty dataset.
    pub fn magnitude_bounds(&self) -> Option<(f64, f64)> {
        crate::analysis::Statistics::min_max(&self.magnitudes())
    }

    /// Full slider range; `(0, 0)` when empty.
    pub fn full_range(&self) -> MagnitudeRange {
        let (min, max) = self.magnitude_bounds().unwrap_or((0.0, 0.0));
        MagnitudeRange::new(min, max)
    }

    pub fn filter_magnitude(&self, range: MagnitudeRange) -> Self {
        if self
            .magnitude_bounds()
            .is_some_and(|(min, max)| range.min <= min && range.max >= max)
        {
            return self.clone();
        }
        Self::from_records(
            self.records
                .iter()
                .filter(|r| range.contains(r.magnitude))
                .cloned()
                .collect(),
        )
    }

    /// Arithmetic mean of latitudes and longitudes, `(0, 0)` when empty.
    pub fn mean_center(&self) -> GeoPoint {
        let lats: Vec<f64> = self.records.iter().map(|r| r.latitude).collect();
        let lons: Vec<f64> = self.records.iter().map(|r| r.longitude).collect();
        match (
            crate::analysis::Statistics::mean(&lats),
            crate::analysis::Statistics::mean(&lons),
        ) {
            (Some(lat), Some(lon)) => GeoPoint::new(lat, lon),
            _ => GeoPoint::new(0.0, 0.0),
        }
    }
}
