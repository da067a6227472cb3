/// Error type for geometric primitives.
///
/// Every failure in this crate is a local, recoverable input problem; callers
/// are expected to skip the affected overlay rather than abort.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoError {
    InvalidArgument { reason: String },
}

impl GeoError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        GeoError::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for GeoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoError::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
        }
    }
}

impl std::error::Error for GeoError {}
