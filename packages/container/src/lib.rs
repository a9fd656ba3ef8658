//! Aspect containers: the serialization boundary of the aspect framework.
//!
//! - `Query`: validated, dot-separated path naming one entry
//! - `Data`: the structured tree a manipulator serializes into
//! - `convert`: bridges `Data` to serde types and JSON
//!
//! # Example
//!
//! ```rust
//! use aspect_container::{query, Data};
//!
//! let data = Data::container()
//!     .with(&query!("Horse.Color"), "white")
//!     .unwrap();
//! assert_eq!(data.get(&query!("Horse.Color")), Some(&Data::from("white")));
//! ```

pub mod convert;
mod data;
mod error;
mod query;

pub use convert::{from_data, to_data};
pub use data::Data;
pub use error::{Error, Result};
pub use query::{Query, QueryError};

