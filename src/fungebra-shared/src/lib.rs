//! fungebra-shared: core types for fungebra
//!
//! This crate contains the dynamic value model and the composable function
//! wrapper that the helper library and the facade crate build on.
//!
//! # Features
//!
//! - **Values**: dynamically typed [`Value`] with JSON conversion
//! - **Argument bundles**: positional and keyword [`Args`], built with [`args!`]
//! - **Function wrapper**: [`Function`] with composition, partial application,
//!   lazy map and filter, folding, and operator overloads
//! - **Errors**: one [`Error`] variant per [`ErrorKind`]
//! - **Version Information**: build and version metadata

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::doc_markdown,
    clippy::type_complexity,
    clippy::uninlined_format_args,
    clippy::manual_let_else
)]

/// Argument bundles
pub mod args;

/// Error types
pub mod error;

/// The function wrapper
pub mod function;

/// Value-level operations
pub mod ops;

/// Lazy sequences
pub mod seq;

/// Core value types
pub mod value;

pub use args::Args;
pub use error::{Error, ErrorKind, Result};
pub use function::{compose, identity, pipeline, Function};
pub use seq::LazySeq;
pub use value::{is_truthy, Map, Record, Value};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build information structure
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Package version
    pub version: &'static str,
    /// Git commit hash (if available)
    pub git_hash: Option<&'static str>,
    /// Build timestamp (if available)
    pub build_date: Option<&'static str>,
    /// Rust compiler version (if available)
    pub rust_version: Option<&'static str>,
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "fungebra {}", self.version)?;

        if let Some(hash) = self.git_hash {
            writeln!(f, "Git hash: {hash}")?;
        }

        if let Some(date) = self.build_date {
            writeln!(f, "Built: {date}")?;
        }

        if let Some(rust_ver) = self.rust_version {
            writeln!(f, "Rust: {rust_ver}")?;
        }

        Ok(())
    }
}
