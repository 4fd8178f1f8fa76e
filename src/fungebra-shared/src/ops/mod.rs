//! Value-level operations
//!
//! Arithmetic, comparison, membership and access on dynamic values. The
//! builtin `operator` namespace and the getter helpers are thin wrappers
//! around these.

pub mod access_ops;
pub mod methods;
pub mod utils;

#[cfg(test)]
mod tests;

pub use access_ops::{getattr, getitem};
pub use methods::bound_method;
pub use utils::{
    add_values, compare_values, contains_value, floordiv_values, ge_values, gt_values, is_same,
    le_values, lt_values, mod_values, mul_values, neg_value, sub_values, truediv_values,
};
