//! Error types for timed_elastic_band

use thiserror::Error;

/// Recoverable conditions reported by band operations.
///
/// Index misuse and non-positive time differences are programming errors and
/// panic instead; see the individual methods.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BandError {
    /// Initialization requested on a band that already holds states
    #[error("band already initialized ({poses} poses, {time_diffs} time diffs)")]
    AlreadyInitialized { poses: usize, time_diffs: usize },
    /// The operation would break the pose/time-diff count invariant
    #[error("invalid band structure: {0}")]
    InvalidStructure(String),
    /// Invalid parameter
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for band operations
pub type BandResult<T> = Result<T, BandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BandError::AlreadyInitialized { poses: 4, time_diffs: 3 };
        assert_eq!(format!("{}", err), "band already initialized (4 poses, 3 time diffs)");

        let err = BandError::InvalidParameter("dt_ref must be positive".to_string());
        assert_eq!(format!("{}", err), "invalid parameter: dt_ref must be positive");
    }
}
