use serde::Serialize;

use crate::error::AnalysisError;

// Keeps values sitting exactly on a bin edge (4.5 / 0.1) from rounding into the lower bin.
const EDGE_EPSILON: f64 = 1e-9;

/// Upper bound on the number of bins a single histogram may allocate.
pub const MAX_BINS: usize = 10_000;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub start: f64,
    /// Exclusive upper edge (inclusive for the last bin).
    pub end: f64,
    pub count: usize,
}

/// Fixed-width histogram with edges aligned to multiples of `bin_width`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bin_width: f64,
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Non-finite values are ignored. No values yields no bins.
    pub fn build(values: &[f64], bin_width: f64) -> Result<Self, AnalysisError> {
        if !(bin_width.is_finite() && bin_width > 0.0) {
            return Err(AnalysisError::InvalidBinWidth(bin_width));
        }

        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let Some((min, max)) = super::Statistics::min_max(&finite) else {
            return Ok(Self {
                bin_width,
                bins: Vec::new(),
            });
        };

        let origin = (min / bin_width + EDGE_EPSILON).floor() * bin_width;
        let span_bins = ((max - origin) / bin_width + EDGE_EPSILON).floor() + 1.0;
        if !(span_bins.is_finite() && span_bins <= MAX_BINS as f64) {
            return Err(AnalysisError::TooManyBins {
                bin_width,
                requested: span_bins,
            });
        }
        let n_bins = span_bins as usize;

        let mut bins: Vec<HistogramBin> = (0..n_bins)
            .map(|i| HistogramBin {
                start: origin + i as f64 * bin_width,
                end: origin + (i + 1) as f64 * bin_width,
                count: 0,
            })
            .collect();

        for v in finite {
            let idx = ((v - origin) / bin_width + EDGE_EPSILON).floor() as usize;
            bins[idx.min(n_bins - 1)].count += 1;
        }

        Ok(Self { bin_width, bins })
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}
