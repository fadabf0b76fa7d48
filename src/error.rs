//! The crate-wide error taxonomy.
//!
//! Pure queries answer with `bool`/`Option`; operations that require existence
//! or a non-empty structure surface a [GraphError] instead.

use thiserror::Error;

/// Errors raised by graph operations, the heap contract and the algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An operation required a vertex, edge or key that does not exist.
    #[error("the requested vertex, edge or key does not exist")]
    NotFound,

    /// An operation is not valid for this graph's configuration.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    /// A structure was empty when a value was required (e.g. peeking a queue).
    #[error("the structure is empty")]
    Empty,
}
