//! Error types for canvas operations.

use thiserror::Error;

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in canvas operations.
///
/// None of these are shown to the user as a blocking failure; the dispatch
/// layer turns them into a logged no-op.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Element not found on the canvas.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Drop payload or factory tag outside the fixed set of block types.
    #[error("Unknown element type: {0:?}")]
    UnknownElementType(String),

    /// Snapshot serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_message_quotes_tag() {
        let err = CanvasError::UnknownElementType("widget".to_string());
        assert_eq!(err.to_string(), "Unknown element type: \"widget\"");
    }
}
