//! Error types for catalog registries.

use thiserror::Error;

/// Contract violations raised by catalog registries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A lookup or registration used an empty id.
    #[error("catalog id must not be empty")]
    EmptyId,

    /// A registration arrived after the catalog was closed.
    #[error("catalog {catalog} is closed; cannot register {id}")]
    RegistrationClosed { catalog: &'static str, id: String },

    /// A registration arrived before the static entries were loaded.
    #[error("catalog {0} has not been populated")]
    NotPopulated(&'static str),

    /// The static entries were loaded twice.
    #[error("catalog {0} is already populated")]
    AlreadyPopulated(&'static str),
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_catalog() {
        let err = CatalogError::RegistrationClosed {
            catalog: "enum_trait",
            id: "stone_variant".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "catalog enum_trait is closed; cannot register stone_variant"
        );
        assert_eq!(
            CatalogError::NotPopulated("horse_color").to_string(),
            "catalog horse_color has not been populated"
        );
    }
}
