//! Builtin callables, one per file
//!
//! Every file submits its builtin(s) to the registry with
//! `inventory::submit!`.

pub mod bool;
pub mod callable;
pub mod chain;
pub mod dict;
pub mod function;
pub mod len;
pub mod list;
pub mod minmax;
pub mod next;
pub mod operator;
pub mod range;
pub mod sorted;
pub mod str;
pub mod sum;
