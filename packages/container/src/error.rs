//! Error types for container access.

use crate::query::{Query, QueryError};

/// Errors raised while building, reading, or converting containers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A query failed validation.
    #[error("query error: {0}")]
    Query(#[from] QueryError),

    /// A write tried to descend through a scalar entry.
    #[error("cannot descend into '{part}' while writing {query}: not a container")]
    NotAContainer { query: Query, part: String },

    /// A tree could not be decoded into the requested type.
    #[error("decode error (json): {message}")]
    Decode { message: String },

    /// A value could not be encoded into a tree.
    #[error("encode error (json): {message}")]
    Encode { message: String },
}

impl Error {
    pub fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Error::Encode {
            message: message.into(),
        }
    }
}

/// Result alias for container operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn query_error_converts_and_keeps_source() {
        let err: Error = Query::parse("bad-part").unwrap_err().into();
        assert!(matches!(err, Error::Query(_)));
        assert!(err.to_string().starts_with("query error"));
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn decode_display_names_format() {
        let err = Error::decode("expected integer");
        let display = err.to_string();
        assert!(display.contains("decode error"));
        assert!(display.contains("json"));
        assert!(display.contains("expected integer"));
    }
}
