//! Error taxonomy for catalog queries, ingestion and cart pricing.

use thiserror::Error;

/// Errors surfaced by the catalog engine and its data sources.
///
/// Every variant is locally recoverable: callers fall back to defaults,
/// drop the offending item, or show an empty state with a retry option.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Malformed or out-of-range filter, sort, promo or shipping input.
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),

    /// The catalog source did not return usable data.
    #[error("Upstream fetch failed: {0}")]
    UpstreamFetchFailure(String),

    /// An item is missing a required field or violates an invariant.
    #[error("Item '{id}' rejected: {reason}")]
    DataShapeViolation { id: String, reason: String },

    /// A progress stage change that is not allowed.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

impl CatalogError {
    pub fn invalid_criteria(msg: impl Into<String>) -> Self {
        CatalogError::InvalidCriteria(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        CatalogError::UpstreamFetchFailure(msg.into())
    }

    pub fn data_shape(id: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::DataShapeViolation { id: id.into(), reason: reason.into() }
    }

    /// Returns true if retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::UpstreamFetchFailure(_))
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::UpstreamFetchFailure(format!("invalid catalog payload: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = CatalogError::invalid_criteria("unknown sort key 'cheapest'");
        assert_eq!(err.to_string(), "Invalid criteria: unknown sort key 'cheapest'");

        let err = CatalogError::data_shape("42", "negative price");
        assert_eq!(err.to_string(), "Item '42' rejected: negative price");

        let err = CatalogError::InvalidTransition {
            from: "shipped".to_string(),
            to: "pending".to_string(),
        };
        assert!(err.to_string().contains("from shipped to pending"));
    }

    #[test]
    fn test_only_upstream_is_retryable() {
        assert!(CatalogError::upstream("timeout").is_retryable());
        assert!(!CatalogError::invalid_criteria("x").is_retryable());
        assert!(!CatalogError::data_shape("1", "x").is_retryable());
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err: CatalogError = err.into();
        assert!(err.is_retryable());
        assert!(err.to_string().contains("invalid catalog payload"));
    }
}
