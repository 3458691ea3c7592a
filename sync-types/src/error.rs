//! Error types for SyncLog documents.

use thiserror::Error;

/// Errors that can occur while reading or writing a SyncLog document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The XML text could not be parsed
    #[error("malformed document: {0}")]
    Malformed(String),

    /// The XML writer failed
    #[error("failed to write document: {0}")]
    Write(String),

    /// The document contains no root element
    #[error("document has no root element")]
    NoRootElement,

    /// A required attribute is missing
    #[error("<{element}> is missing attribute `{attribute}`")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// An attribute value could not be interpreted
    #[error("<{element}> has invalid `{attribute}` value {value:?}")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Raw attribute value.
        value: String,
    },

    /// An element was found where another was expected
    #[error("unexpected element: expected <{expected}>, got <{actual}>")]
    UnexpectedElement {
        /// Expected element name.
        expected: String,
        /// Actual element name.
        actual: String,
    },

    /// Invalid major result code
    #[error("invalid major code: {0}")]
    InvalidMajorCode(i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DocumentError::InvalidMajorCode(99);
        assert_eq!(err.to_string(), "invalid major code: 99");

        let err = DocumentError::MissingAttribute {
            element: "syncresults".into(),
            attribute: "majorcode".into(),
        };
        assert_eq!(
            err.to_string(),
            "<syncresults> is missing attribute `majorcode`"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DocumentError>();
    }
}
