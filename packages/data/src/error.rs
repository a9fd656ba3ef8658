//! Error types for the data layer.
//!
//! Only contract violations live here. A mutation that is legitimately
//! refused (out of bounds, host said no, nothing to remove) is reported as a
//! failed [`crate::DataTransactionResult`] instead.

use aspect_container::Query;
use thiserror::Error;

use crate::KeyId;

/// Programmer errors raised by keys, manipulators, and registries.
#[derive(Debug, Error)]
pub enum DataError {
    /// The manipulator does not declare this aspect.
    #[error("{manipulator} does not support key {key}")]
    UnsupportedKey {
        key: KeyId,
        manipulator: &'static str,
    },

    /// A value was routed through a key of a different value type.
    #[error("key {key} expects values of type {expected}")]
    TypeMismatch { key: KeyId, expected: &'static str },

    /// A key id was declared twice.
    #[error("key {0} is already registered")]
    DuplicateKey(KeyId),

    /// A registry was modified after it was frozen.
    #[error("registry is frozen; register processors during startup")]
    RegistryFrozen,

    /// A dual processor was bound to a manipulator whose aspects differ from
    /// the processor's key.
    #[error("{manipulator} cannot be served by a single processor for key {key}")]
    IncompatibleManipulator {
        manipulator: &'static str,
        key: KeyId,
    },

    /// A container entry could not be decoded into the key's value type.
    #[error("entry at {query} is not a valid {expected}")]
    InvalidEntry {
        query: Query,
        expected: &'static str,
    },

    /// Container access failed.
    #[error("container error: {0}")]
    Container(#[from] aspect_container::Error),
}

/// Result alias for data-layer operations.
pub type Result<T> = std::result::Result<T, DataError>;
