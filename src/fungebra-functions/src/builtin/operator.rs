//! The `operator` namespace
//!
//! Plain-function forms of the value operations, registered under the
//! `operator` module so that they can be composed like any other builtin.

use fungebra_shared::error::type_error;
use fungebra_shared::ops::{
    add_values, contains_value, floordiv_values, ge_values, getitem, gt_values, is_same,
    le_values, lt_values, mod_values, mul_values, neg_value, sub_values, truediv_values,
};
use fungebra_shared::{Args, Result, Value};
use inventory;

fn unary(args: Args, name: &str, op: impl Fn(&Value) -> Result<Value>) -> Result<Value> {
    op(&args.exactly_one(name)?)
}

fn binary(args: Args, name: &str, op: impl Fn(&Value, &Value) -> Result<Value>) -> Result<Value> {
    let (a, b) = args.exactly_two(name)?;
    op(&a, &b)
}

fn predicate(args: Args, name: &str, op: impl Fn(&Value, &Value) -> Result<bool>) -> Result<Value> {
    binary(args, name, |a, b| op(a, b).map(Value::Bool))
}

/// `add(a, b)`
pub fn builtin_add(args: Args) -> Result<Value> {
    binary(args, "add", add_values)
}

/// `sub(a, b)`
pub fn builtin_sub(args: Args) -> Result<Value> {
    binary(args, "sub", sub_values)
}

/// `mul(a, b)`
pub fn builtin_mul(args: Args) -> Result<Value> {
    binary(args, "mul", mul_values)
}

/// `truediv(a, b)`
pub fn builtin_truediv(args: Args) -> Result<Value> {
    binary(args, "truediv", truediv_values)
}

/// `floordiv(a, b)`
pub fn builtin_floordiv(args: Args) -> Result<Value> {
    binary(args, "floordiv", floordiv_values)
}

/// `mod(a, b)`
pub fn builtin_mod(args: Args) -> Result<Value> {
    binary(args, "mod", mod_values)
}

/// `neg(a)`
pub fn builtin_neg(args: Args) -> Result<Value> {
    unary(args, "neg", neg_value)
}

/// `not_(a)`
pub fn builtin_not(args: Args) -> Result<Value> {
    unary(args, "not_", |a| Ok(Value::Bool(!a.is_truthy())))
}

/// `truth(a)`
pub fn builtin_truth(args: Args) -> Result<Value> {
    unary(args, "truth", |a| Ok(Value::Bool(a.is_truthy())))
}

/// `eq(a, b)`
pub fn builtin_eq(args: Args) -> Result<Value> {
    predicate(args, "eq", |a, b| Ok(a == b))
}

/// `ne(a, b)`
pub fn builtin_ne(args: Args) -> Result<Value> {
    predicate(args, "ne", |a, b| Ok(a != b))
}

/// `lt(a, b)`
pub fn builtin_lt(args: Args) -> Result<Value> {
    predicate(args, "lt", lt_values)
}

/// `le(a, b)`
pub fn builtin_le(args: Args) -> Result<Value> {
    predicate(args, "le", le_values)
}

/// `gt(a, b)`
pub fn builtin_gt(args: Args) -> Result<Value> {
    predicate(args, "gt", gt_values)
}

/// `ge(a, b)`
pub fn builtin_ge(args: Args) -> Result<Value> {
    predicate(args, "ge", ge_values)
}

/// `is_(a, b)`
pub fn builtin_is(args: Args) -> Result<Value> {
    predicate(args, "is_", |a, b| Ok(is_same(a, b)))
}

/// `is_not(a, b)`
pub fn builtin_is_not(args: Args) -> Result<Value> {
    predicate(args, "is_not", |a, b| Ok(!is_same(a, b)))
}

/// `contains(container, item)`
pub fn builtin_contains(args: Args) -> Result<Value> {
    predicate(args, "contains", contains_value)
}

/// `getitem(container, key)`
pub fn builtin_getitem(args: Args) -> Result<Value> {
    binary(args, "getitem", getitem)
}

/// `concat(a, b)`: sequence concatenation only
pub fn builtin_concat(args: Args) -> Result<Value> {
    binary(args, "concat", |a, b| match (a, b) {
        (Value::String(_), Value::String(_)) | (Value::Array(_), Value::Array(_)) => {
            add_values(a, b)
        }
        _ => Err(type_error(format!(
            "'{}' object can't be concatenated",
            a.type_name()
        ))),
    })
}

macro_rules! register_operator {
    ($($name:literal => $func:path),* $(,)?) => {
        $(
            inventory::submit! {
                crate::FunctionRegistration {
                    name: $name,
                    module: Some("operator"),
                    func: $func,
                }
            }
        )*
    };
}

register_operator! {
    "add" => builtin_add,
    "sub" => builtin_sub,
    "mul" => builtin_mul,
    "truediv" => builtin_truediv,
    "floordiv" => builtin_floordiv,
    "mod" => builtin_mod,
    "neg" => builtin_neg,
    "not_" => builtin_not,
    "truth" => builtin_truth,
    "eq" => builtin_eq,
    "ne" => builtin_ne,
    "lt" => builtin_lt,
    "le" => builtin_le,
    "gt" => builtin_gt,
    "ge" => builtin_ge,
    "is_" => builtin_is,
    "is_not" => builtin_is_not,
    "contains" => builtin_contains,
    "getitem" => builtin_getitem,
    "concat" => builtin_concat,
}
