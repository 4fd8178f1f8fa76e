//! fungebra: function algebra
//!
//! Wrap callables in [`Function`] and build pipelines out of operators
//! instead of explicit `compose`/`partial`/`map` calls.
//!
//! # Quick Start
//!
//! ```rust
//! use fungebra::{args, builtin, Function, Value, F};
//!
//! let double: F = Function::unary(|x| x | builtin("operator.mul")? >> vec![Value::Int(2)]);
//! let sum = builtin("sum")?;
//!
//! // `sum` runs first, then `double`
//! let total = (&double + &sum).call1(vec![1, 2, 3])?;
//! assert_eq!(total, Value::Int(12));
//!
//! // partial application chains; `args | f` spreads the bundle
//! let add = builtin("operator.add")?;
//! assert_eq!((args![1, 2] | &add)?, Value::Int(3));
//! assert_eq!((&add << vec![Value::Int(1)]).call1(2)?, Value::Int(3));
//! # Ok::<(), fungebra::Error>(())
//! ```
//!
//! # Operators
//!
//! | Operator | Meaning |
//! |---|---|
//! | `f + g` | compose: `g` runs first |
//! | `f \| g` | pipe: `f` runs first |
//! | `value \| f` / `args \| f` | call |
//! | `f << args` / `f >> args` | bind leading / trailing arguments |
//! | `-f` | lazy map |
//! | `f - g` | `f`, then map `g` |
//! | `!f` | negate |
//!
//! Filtering and folding are methods: [`Function::filter`],
//! [`Function::filter_by`], [`Function::map_filter`], [`Function::reduce`],
//! [`Function::reduce_by`] and [`Function::map_reduce`].
//!
//! # Architecture
//!
//! - [`fungebra_shared`] - `Value`, `Args`, errors and the `Function` wrapper
//! - [`fungebra_functions`] - builtins, the `operator` namespace and helpers
//! - this crate - the facade, aliases and build metadata

#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

use std::sync::LazyLock;

pub use fungebra_functions::{
    attrgetter, builtin, caller, collect, constantly, duxt, equals, expand, fnot, greater, iffy,
    iffy_or, is_, itemgetter, juxt, less, methodcaller, operator_module, raiser, registry,
    suppress, suppressing, taker, BuiltinRegistry, ModuleWrapper,
};
pub use fungebra_shared::{
    args, compose, identity, is_truthy, pipeline, Args, BuildInfo, Error, ErrorKind, Function,
    LazySeq, Map, Record, Result, Value, VERSION,
};

/// Short alias for [`Function`]
pub type F = Function;

/// Alias for [`Function`]
pub type Func = Function;

/// The identity function, pre-wrapped
pub static I: LazyLock<Function> = LazyLock::new(identity);

/// Build information for fungebra
pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: VERSION,
    git_hash: option_env!("GIT_HASH"),
    build_date: option_env!("BUILD_DATE"),
    rust_version: option_env!("RUSTC_VERSION"),
};

/// Build information captured at compile time
pub fn build_info() -> &'static BuildInfo {
    &BUILD_INFO
}

/// The `operator` namespace with every callable attribute coerced to a
/// [`Function`]
///
/// ```rust
/// let operator = fungebra::operator()?;
/// let add = operator.function("add")?;
/// assert_eq!(add.call2(1, 2)?, fungebra::Value::Int(3));
/// # Ok::<(), fungebra::Error>(())
/// ```
pub fn operator() -> Result<ModuleWrapper> {
    let coerce = iffy(&builtin("callable")?, &builtin("Function")?);
    Ok(ModuleWrapper::with_decorator(operator_module()?, &coerce))
}
