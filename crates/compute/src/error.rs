#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    InvalidBinWidth(f64),
    TooManyBins { bin_width: f64, requested: f64 },
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::InvalidBinWidth(w) => {
                write!(f, "histogram bin width must be a positive number, got {w}")
            }
            AnalysisError::TooManyBins {
                bin_width,
                requested,
            } => write!(
                f,
                "histogram bin width {bin_width} needs {requested} bins, more than {}",
                crate::analysis::MAX_BINS
            ),
        }
    }
}

impl std::error::Error for AnalysisError {}
