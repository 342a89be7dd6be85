//! Error types for the insight engine
//!
//! Only programmer errors surface here. Per-record data problems (missing
//! fields, bad timestamps) are recovered locally by skipping the record.

/// Invalid [`InsightConfig`](crate::InsightConfig)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Trailing window is empty or unreasonably long
    #[error("trailing_months must be between 1 and {max}, got {value}")]
    InvalidTrailingMonths {
        /// Supplied value
        value: u32,
        /// Largest accepted value
        max: u32,
    },

    /// Minimum keyword length out of range
    #[error("keyword min_token_length must be between 1 and {max}, got {value}")]
    InvalidTokenLength {
        /// Supplied value
        value: usize,
        /// Largest accepted value
        max: usize,
    },

    /// UTC offset of a day or more
    #[error("utc_offset_minutes must be within +/-1439, got {0}")]
    InvalidUtcOffset(i32),

    /// Keyword pattern failed to compile
    #[error("keyword pattern error: {0}")]
    Pattern(String),
}

/// Main engine error type
#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    /// Configuration rejected at the composer boundary
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Inputs could not be fingerprinted for caching
    #[error("fingerprint failed: {0}")]
    Fingerprint(#[from] serde_json::Error),
}

impl InsightError {
    /// Check if error is a configuration problem
    #[inline]
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Result type alias for engine operations
pub type InsightResult<T> = Result<T, InsightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_months_display() {
        let err = ConfigError::InvalidTrailingMonths { value: 0, max: 240 };
        assert_eq!(
            err.to_string(),
            "trailing_months must be between 1 and 240, got 0"
        );
    }

    #[test]
    fn config_error_converts() {
        let err: InsightError = ConfigError::InvalidUtcOffset(1440).into();
        assert!(err.is_config());
        assert!(err.to_string().starts_with("configuration error"));
    }
}
