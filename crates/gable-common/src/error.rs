//! Error types for gable - shared across the CMS crates.

use miette::Diagnostic;

/// Main error type for CMS operations.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum CmsError {
    /// Persistence service failure
    #[error(transparent)]
    #[diagnostic_source]
    Store(#[from] StoreError),

    /// Invalid document structure
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

/// Failure reported by the external document store.
///
/// The store is a black box: its timeout and retry behavior are its
/// own. Every failure carries the message the service rejected with,
/// which is surfaced to the operator through the notice channel.
#[derive(thiserror::Error, Debug, Clone, Diagnostic)]
#[non_exhaustive]
pub enum StoreError {
    /// Call rejected by the service (network, permission, quota).
    #[error("document store rejected the call: {0}")]
    Rejected(String),

    /// No document with the requested id.
    #[error("document not found")]
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_wrap_into_cms_error() {
        let err = CmsError::from(StoreError::Rejected("quota exceeded".into()));
        assert_eq!(
            err.to_string(),
            "document store rejected the call: quota exceeded"
        );
    }

    #[test]
    fn not_found_message() {
        assert_eq!(StoreError::NotFound.to_string(), "document not found");
    }
}
