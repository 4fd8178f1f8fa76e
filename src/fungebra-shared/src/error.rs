//! Error types for fungebra
//!
//! Every failure raised by a wrapped function, a builtin or a helper is an
//! [`Error`]. Errors are grouped into [`ErrorKind`]s so that helpers such as
//! `suppress` can intercept some kinds and let the others through.

use std::fmt;
use std::str::FromStr;

/// Result type alias for fungebra operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for fungebra operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Wrong argument shape, unsupported operand types, calling a non-callable
    #[error("type error: {0}")]
    Type(String),

    /// Missing key in a mapping
    #[error("key error: {0}")]
    Key(String),

    /// Sequence index out of range
    #[error("index error: {0}")]
    Index(String),

    /// Missing attribute or method
    #[error("attribute error: {0}")]
    Attribute(String),

    /// Right type, unacceptable value
    #[error("value error: {0}")]
    Value(String),

    /// Division or modulo by zero
    #[error("division by zero: {0}")]
    ZeroDivision(String),

    /// Iteration ran past the end of a sequence
    #[error("stop iteration: {0}")]
    StopIteration(String),

    /// Generic runtime failure
    #[error("runtime error: {0}")]
    Runtime(String),

    /// Failure bubbled up from user code
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Classification of [`Error`] values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::Type`]
    Type,
    /// See [`Error::Key`]
    Key,
    /// See [`Error::Index`]
    Index,
    /// See [`Error::Attribute`]
    Attribute,
    /// See [`Error::Value`]
    Value,
    /// See [`Error::ZeroDivision`]
    ZeroDivision,
    /// See [`Error::StopIteration`]
    StopIteration,
    /// See [`Error::Runtime`] and [`Error::Other`]
    Runtime,
}

impl ErrorKind {
    /// All kinds, in declaration order
    pub const ALL: [ErrorKind; 8] = [
        ErrorKind::Type,
        ErrorKind::Key,
        ErrorKind::Index,
        ErrorKind::Attribute,
        ErrorKind::Value,
        ErrorKind::ZeroDivision,
        ErrorKind::StopIteration,
        ErrorKind::Runtime,
    ];

    /// Snake-case name of the kind
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Type => "type",
            ErrorKind::Key => "key",
            ErrorKind::Index => "index",
            ErrorKind::Attribute => "attribute",
            ErrorKind::Value => "value",
            ErrorKind::ZeroDivision => "zero_division",
            ErrorKind::StopIteration => "stop_iteration",
            ErrorKind::Runtime => "runtime",
        }
    }

    /// Build an error of this kind
    pub fn error(self, msg: impl Into<String>) -> Error {
        let msg = msg.into();
        match self {
            ErrorKind::Type => Error::Type(msg),
            ErrorKind::Key => Error::Key(msg),
            ErrorKind::Index => Error::Index(msg),
            ErrorKind::Attribute => Error::Attribute(msg),
            ErrorKind::Value => Error::Value(msg),
            ErrorKind::ZeroDivision => Error::ZeroDivision(msg),
            ErrorKind::StopIteration => Error::StopIteration(msg),
            ErrorKind::Runtime => Error::Runtime(msg),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ErrorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::Value(format!("unknown error kind '{s}'")))
    }
}

impl Error {
    /// Kind of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Type(_) => ErrorKind::Type,
            Error::Key(_) => ErrorKind::Key,
            Error::Index(_) => ErrorKind::Index,
            Error::Attribute(_) => ErrorKind::Attribute,
            Error::Value(_) => ErrorKind::Value,
            Error::ZeroDivision(_) => ErrorKind::ZeroDivision,
            Error::StopIteration(_) => ErrorKind::StopIteration,
            Error::Runtime(_) | Error::Other(_) => ErrorKind::Runtime,
        }
    }

    /// Check if this error belongs to any of `kinds`
    #[must_use]
    pub fn is_any_of(&self, kinds: &[ErrorKind]) -> bool {
        kinds.contains(&self.kind())
    }

    /// Message without the kind prefix
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Error::Type(msg)
            | Error::Key(msg)
            | Error::Index(msg)
            | Error::Attribute(msg)
            | Error::Value(msg)
            | Error::ZeroDivision(msg)
            | Error::StopIteration(msg)
            | Error::Runtime(msg) => msg.clone(),
            Error::Other(e) => e.to_string(),
        }
    }
}

/// Create a type error
pub fn type_error(msg: impl Into<String>) -> Error {
    Error::Type(msg.into())
}

/// Create a key error
pub fn key_error(msg: impl Into<String>) -> Error {
    Error::Key(msg.into())
}

/// Create an index error
pub fn index_error(msg: impl Into<String>) -> Error {
    Error::Index(msg.into())
}

/// Create an attribute error
pub fn attribute_error(msg: impl Into<String>) -> Error {
    Error::Attribute(msg.into())
}

/// Create a value error
pub fn value_error(msg: impl Into<String>) -> Error {
    Error::Value(msg.into())
}

/// Create an arity error for `name`
pub fn arity_error(name: &str, expected: &str, actual: usize) -> Error {
    Error::Type(format!("{name}() takes {expected} ({actual} given)"))
}
