//! Query paths addressing entries inside a data container.

use std::fmt;

use thiserror::Error;

/// Errors raised while parsing or building a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A query part is not a valid Unicode identifier.
    #[error("invalid query part '{part}' at position {position}: {message}")]
    InvalidPart {
        part: String,
        position: usize,
        message: String,
    },
}

/// A validated, dot-separated query into a data container.
///
/// Every aspect key carries one of these as its serialization path. Parts
/// must be Unicode identifiers (per UAX#31) so a query can be written as a
/// field name in any structured format.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Query {
    parts: Vec<String>,
}

impl Query {
    /// The separator between query parts.
    pub const SEPARATOR: char = '.';

    /// Parse a query string, validating each part.
    ///
    /// Empty parts are ignored, so `"Horse..Color."` and `"Horse.Color"`
    /// are the same query.
    ///
    /// ```rust
    /// use aspect_container::Query;
    ///
    /// let query = Query::parse("Horse.Color").unwrap();
    /// assert_eq!(query.len(), 2);
    /// assert_eq!(query.last(), Some("Color"));
    /// ```
    pub fn parse(s: &str) -> Result<Self, QueryError> {
        let parts: Vec<String> = s
            .split(Self::SEPARATOR)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        Self::try_from_parts(parts)
    }

    /// Build a query from parts, validating each.
    pub fn try_from_parts(parts: Vec<String>) -> Result<Self, QueryError> {
        for (i, part) in parts.iter().enumerate() {
            Self::validate_part(part, i)?;
        }
        Ok(Query { parts })
    }

    fn validate_part(part: &str, position: usize) -> Result<(), QueryError> {
        let invalid = |message: String| QueryError::InvalidPart {
            part: part.to_string(),
            position,
            message,
        };

        let mut chars = part.chars();
        let first = chars
            .next()
            .ok_or_else(|| invalid("empty part".to_string()))?;

        let valid_start = unicode_ident::is_xid_start(first)
            || (first == '_'
                && chars
                    .clone()
                    .next()
                    .is_some_and(unicode_ident::is_xid_continue));
        if !valid_start {
            return Err(invalid(
                "must start with a letter or underscore followed by letter/digit".to_string(),
            ));
        }

        if let Some(c) = chars.find(|c| !unicode_ident::is_xid_continue(*c)) {
            return Err(invalid(format!("invalid character '{}' in identifier", c)));
        }

        Ok(())
    }

    /// Whether this is the root query (no parts).
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(String::as_str)
    }

    /// The final part, the entry name inside its parent.
    pub fn last(&self) -> Option<&str> {
        self.parts.last().map(String::as_str)
    }

    /// The query of the enclosing container, if any.
    pub fn parent(&self) -> Option<Query> {
        if self.parts.is_empty() {
            return None;
        }
        Some(Query {
            parts: self.parts[..self.parts.len() - 1].to_vec(),
        })
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in &self.parts {
            if !first {
                write!(f, "{}", Self::SEPARATOR)?;
            }
            write!(f, "{}", part)?;
            first = false;
        }
        Ok(())
    }
}

impl std::str::FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Query::parse(s)
    }
}

/// Build a query from a literal, panicking if it is invalid.
///
/// ```rust
/// use aspect_container::query;
///
/// let q = query!("Arrows.Stuck");
/// assert_eq!(q.len(), 2);
/// ```
#[macro_export]
macro_rules! query {
    ($s:expr) => {
        $crate::Query::parse($s).expect("invalid query literal")
    };
}
