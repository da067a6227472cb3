use serde::Serialize;

pub struct Statistics;

/// Headline figures shown next to the charts.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    /// Rounded to two decimals.
    pub mean_magnitude: Option<f64>,
    pub min_magnitude: Option<f64>,
    pub max_magnitude: Option<f64>,
}

impl Statistics {
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let mut sum = 0.0;
        for &v in values {
            sum += v;
        }
        Some(sum / values.len() as f64)
    }

    pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
        let first = *values.first()?;
        let mut min = first;
        let mut max = first;
        for &v in values.iter().skip(1) {
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }

    pub fn summarize(magnitudes: &[f64]) -> Summary {
        let bounds = Self::min_max(magnitudes);
        Summary {
            count: magnitudes.len(),
            mean_magnitude: Self::mean(magnitudes).map(|m| round_to(m, 2)),
            min_magnitude: bounds.map(|(min, _)| min),
            max_magnitude: bounds.map(|(_, max)| max),
        }
    }
}

fn round_to(v: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (v * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::{Statistics, Summary};
    use pretty_assertions::assert_eq;

    #[test]
    fn mean_works() {
        let m = Statistics::mean(&[1.0, 2.0, 3.0]).unwrap();
        assert!((m - 2.0).abs() < 1e-9);
    }

    #[test]
    fn summary_rounds_mean_to_two_decimals() {
        let s = Statistics::summarize(&[4.5, 4.6, 5.0]);
        assert_eq!(
            s,
            Summary {
                count: 3,
                mean_magnitude: Some(4.7),
                min_magnitude: Some(4.5),
                max_magnitude: Some(5.0),
            }
        );
        assert_eq!(Statistics::summarize(&[4.5, 4.5, 4.6]).mean_magnitude, Some(4.53));
    }

    #[test]
    fn empty_summary_has_no_figures() {
        assert_eq!(Statistics::summarize(&[]), Summary::default());
    }
}
