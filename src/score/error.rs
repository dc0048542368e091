//! Error types for signal acquisition.

use thiserror::Error;

/// Errors from an environmental signal lookup.
///
/// These never reach the caller of a scoring evaluation: the engine logs
/// each failure and substitutes the signal's documented default. Sources
/// still return them so failures carry enough context to log.
#[derive(Error, Debug)]
pub enum SignalError {
    /// Transport-level failure talking to a signal endpoint.
    #[error("Signal request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with something the source cannot interpret.
    #[error("Unexpected signal payload: {0}")]
    UnexpectedPayload(String),

    /// The crime dataset has no figure for the resolved region.
    #[error("No crime figure for region: {0}")]
    RegionUnknown(String),
}

/// Result type alias for signal lookups.
pub type SignalResult<T> = std::result::Result<T, SignalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_payload_display() {
        let err = SignalError::UnexpectedPayload("missing field".to_string());
        assert_eq!(err.to_string(), "Unexpected signal payload: missing field");
    }

    #[test]
    fn region_unknown_display() {
        let err = SignalError::RegionUnknown("Atlantis".to_string());
        assert_eq!(err.to_string(), "No crime figure for region: Atlantis");
    }
}
