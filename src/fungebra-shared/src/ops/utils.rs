//! Value arithmetic and comparison
//!
//! Integer arithmetic is checked: overflow is a value error rather than a
//! wrap-around. Division and modulo follow floor semantics, so the sign of a
//! remainder follows the divisor.

#![allow(clippy::cast_precision_loss)]

use crate::error::{type_error, value_error, Error, Result};
use crate::value::Value;
use std::cmp::Ordering;

#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

fn number(value: &Value) -> Option<Number> {
    match value {
        Value::Bool(b) => Some(Number::Int(i64::from(*b))),
        Value::Int(i) => Some(Number::Int(*i)),
        Value::Float(f) => Some(Number::Float(*f)),
        _ => None,
    }
}

fn as_float(n: Number) -> f64 {
    match n {
        Number::Int(i) => i as f64,
        Number::Float(f) => f,
    }
}

fn overflow() -> Error {
    value_error("integer overflow")
}

fn unsupported(op: &str, a: &Value, b: &Value) -> Error {
    type_error(format!(
        "unsupported operand type(s) for {op}: '{}' and '{}'",
        a.type_name(),
        b.type_name()
    ))
}

fn numeric_op(
    a: &Value,
    b: &Value,
    op: &str,
    int_op: impl Fn(i64, i64) -> Option<i64>,
    float_op: impl Fn(f64, f64) -> f64,
) -> Result<Value> {
    match (number(a), number(b)) {
        (Some(Number::Int(x)), Some(Number::Int(y))) => {
            int_op(x, y).map(Value::Int).ok_or_else(overflow)
        }
        (Some(x), Some(y)) => Ok(Value::Float(float_op(as_float(x), as_float(y)))),
        _ => Err(unsupported(op, a, b)),
    }
}

/// Compare two values for ordering
///
/// Numbers compare across int and float, strings and booleans among
/// themselves, arrays lexicographically. Anything else is a type error.
pub fn compare_values(a: &Value, b: &Value) -> Result<Ordering> {
    match (a, b) {
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        (Value::Array(x), Value::Array(y)) => {
            for (left, right) in x.iter().zip(y) {
                if left != right {
                    return compare_values(left, right);
                }
            }
            Ok(x.len().cmp(&y.len()))
        }
        _ => match (number(a), number(b)) {
            (Some(Number::Int(x)), Some(Number::Int(y))) => Ok(x.cmp(&y)),
            // NaN is unordered; report it as equal so sorting stays total
            (Some(x), Some(y)) => Ok(as_float(x)
                .partial_cmp(&as_float(y))
                .unwrap_or(Ordering::Equal)),
            _ => Err(type_error(format!(
                "'<' not supported between instances of '{}' and '{}'",
                a.type_name(),
                b.type_name()
            ))),
        },
    }
}

/// Check if `a < b`
pub fn lt_values(a: &Value, b: &Value) -> Result<bool> {
    Ok(float_aware(a, b, compare_values(a, b)?) == Some(Ordering::Less))
}

/// Check if `a > b`
pub fn gt_values(a: &Value, b: &Value) -> Result<bool> {
    Ok(float_aware(a, b, compare_values(a, b)?) == Some(Ordering::Greater))
}

/// Check if `a <= b`
pub fn le_values(a: &Value, b: &Value) -> Result<bool> {
    Ok(matches!(
        float_aware(a, b, compare_values(a, b)?),
        Some(Ordering::Less | Ordering::Equal)
    ))
}

/// Check if `a >= b`
pub fn ge_values(a: &Value, b: &Value) -> Result<bool> {
    Ok(matches!(
        float_aware(a, b, compare_values(a, b)?),
        Some(Ordering::Greater | Ordering::Equal)
    ))
}

// Every comparison against NaN is false.
fn float_aware(a: &Value, b: &Value, ordering: Ordering) -> Option<Ordering> {
    let is_nan = |v: &Value| matches!(v, Value::Float(f) if f.is_nan());
    if is_nan(a) || is_nan(b) {
        None
    } else {
        Some(ordering)
    }
}

/// Add two values: numbers, string concatenation or array concatenation
pub fn add_values(a: &Value, b: &Value) -> Result<Value> {
    match (a, b) {
        (Value::String(x), Value::String(y)) => Ok(Value::String(format!("{x}{y}"))),
        (Value::Array(x), Value::Array(y)) => {
            Ok(Value::Array(x.iter().chain(y).cloned().collect()))
        }
        _ => numeric_op(a, b, "+", i64::checked_add, |x, y| x + y),
    }
}

/// Subtract two values
pub fn sub_values(a: &Value, b: &Value) -> Result<Value> {
    numeric_op(a, b, "-", i64::checked_sub, |x, y| x - y)
}

/// Multiply two values; a string or array times an integer repeats it
pub fn mul_values(a: &Value, b: &Value) -> Result<Value> {
    match (a, b) {
        (Value::String(s), Value::Int(n)) | (Value::Int(n), Value::String(s)) => {
            let count = repeat_count(s.len(), *n)?;
            Ok(Value::String(s.repeat(count)))
        }
        (Value::Array(items), Value::Int(n)) | (Value::Int(n), Value::Array(items)) => {
            let count = repeat_count(items.len(), *n)?;
            Ok(Value::Array(
                (0..count).flat_map(|_| items.iter().cloned()).collect(),
            ))
        }
        _ => numeric_op(a, b, "*", i64::checked_mul, |x, y| x * y),
    }
}

/// Longest sequence a repetition may produce
const MAX_REPEAT_LEN: usize = 1 << 28;

/// Number of copies for `len * n`; negative counts repeat zero times
fn repeat_count(len: usize, n: i64) -> Result<usize> {
    let count = usize::try_from(n).unwrap_or(0);
    match len.checked_mul(count) {
        Some(0) => Ok(0),
        Some(total) if total <= MAX_REPEAT_LEN => Ok(count),
        _ => Err(value_error("repeated sequence is too long")),
    }
}

/// True division, always producing a float
pub fn truediv_values(a: &Value, b: &Value) -> Result<Value> {
    match (number(a), number(b)) {
        (Some(_), Some(y)) if as_float(y) == 0.0 => {
            Err(Error::ZeroDivision("division by zero".to_string()))
        }
        (Some(x), Some(y)) => Ok(Value::Float(as_float(x) / as_float(y))),
        _ => Err(unsupported("/", a, b)),
    }
}

/// Floor division
pub fn floordiv_values(a: &Value, b: &Value) -> Result<Value> {
    match (number(a), number(b)) {
        (Some(Number::Int(_)), Some(Number::Int(0))) => Err(Error::ZeroDivision(
            "integer division or modulo by zero".to_string(),
        )),
        (Some(Number::Int(x)), Some(Number::Int(y))) => {
            let quotient = x.checked_div(y).ok_or_else(overflow)?;
            if x % y != 0 && (x < 0) != (y < 0) {
                Ok(Value::Int(quotient - 1))
            } else {
                Ok(Value::Int(quotient))
            }
        }
        (Some(_), Some(y)) if as_float(y) == 0.0 => Err(Error::ZeroDivision(
            "float floor division by zero".to_string(),
        )),
        (Some(x), Some(y)) => Ok(Value::Float((as_float(x) / as_float(y)).floor())),
        _ => Err(unsupported("//", a, b)),
    }
}

/// Modulo; the result takes the sign of the divisor
pub fn mod_values(a: &Value, b: &Value) -> Result<Value> {
    match (number(a), number(b)) {
        (Some(Number::Int(_)), Some(Number::Int(0))) => Err(Error::ZeroDivision(
            "integer division or modulo by zero".to_string(),
        )),
        (Some(Number::Int(x)), Some(Number::Int(y))) => {
            let remainder = x.checked_rem(y).ok_or_else(overflow)?;
            if remainder != 0 && (remainder < 0) != (y < 0) {
                Ok(Value::Int(remainder + y))
            } else {
                Ok(Value::Int(remainder))
            }
        }
        (Some(_), Some(y)) if as_float(y) == 0.0 => {
            Err(Error::ZeroDivision("float modulo".to_string()))
        }
        (Some(x), Some(y)) => {
            let (x, y) = (as_float(x), as_float(y));
            let remainder = x % y;
            if remainder != 0.0 && (remainder < 0.0) != (y < 0.0) {
                Ok(Value::Float(remainder + y))
            } else {
                Ok(Value::Float(remainder))
            }
        }
        _ => Err(unsupported("%", a, b)),
    }
}

/// Arithmetic negation
pub fn neg_value(a: &Value) -> Result<Value> {
    match number(a) {
        Some(Number::Int(i)) => i.checked_neg().map(Value::Int).ok_or_else(overflow),
        Some(Number::Float(f)) => Ok(Value::Float(-f)),
        None => Err(type_error(format!(
            "bad operand type for unary -: '{}'",
            a.type_name()
        ))),
    }
}

/// Membership test: substring, array element, object key, or an element
/// of a lazy sequence (consuming it up to the match)
pub fn contains_value(container: &Value, item: &Value) -> Result<bool> {
    match container {
        Value::String(s) => match item {
            Value::String(needle) => Ok(s.contains(needle.as_str())),
            other => Err(type_error(format!(
                "'in <string>' requires string as left operand, not '{}'",
                other.type_name()
            ))),
        },
        Value::Array(items) => Ok(items.contains(item)),
        Value::Object(obj) => Ok(match item {
            Value::String(key) => obj.contains_key(key),
            _ => false,
        }),
        Value::Seq(seq) => {
            for element in seq.clone() {
                if element? == *item {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        other => Err(type_error(format!(
            "argument of type '{}' is not iterable",
            other.type_name()
        ))),
    }
}

/// Identity check: reference identity for functions and lazy sequences,
/// value equality for data
#[must_use]
pub fn is_same(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Function(x), Value::Function(y)) => x.ptr_eq(y),
        (Value::Seq(x), Value::Seq(y)) => x.ptr_eq(y),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            a.type_name() == b.type_name() && a == b
        }
        _ => a == b,
    }
}
