//! Bound methods of built-in value types
//!
//! `getattr` falls back to these for strings, arrays and objects, so that
//! `methodcaller("split", ...)` or `attrgetter("keys")` work on plain data.

use crate::args::Args;
use crate::error::{arity_error, type_error, value_error, Result};
use crate::function::Function;
use crate::value::{Map, Value};
use itertools::Itertools;

const STRING_METHODS: &[&str] = &[
    "split",
    "upper",
    "lower",
    "strip",
    "startswith",
    "endswith",
    "replace",
    "join",
];
const ARRAY_METHODS: &[&str] = &["count", "index", "copy"];
const OBJECT_METHODS: &[&str] = &["get", "keys", "values", "items"];

/// Look up a method on `receiver`, bound to a copy of it
#[must_use]
pub fn bound_method(receiver: &Value, name: &str) -> Option<Function> {
    let known = match receiver {
        Value::String(_) => STRING_METHODS,
        Value::Array(_) => ARRAY_METHODS,
        Value::Object(_) => OBJECT_METHODS,
        _ => return None,
    };
    let method = *known.iter().find(|m| **m == name)?;
    let receiver = receiver.clone();
    let qualified = format!("{}.{method}", receiver.type_name());
    let label = qualified.clone();
    Some(
        Function::new(move |args: Args| call_method(&receiver, method, &label, args))
            .named(qualified),
    )
}

/// Positional method arguments, between `min` and `max` of them
fn method_args(args: Args, name: &str, min: usize, max: usize) -> Result<Vec<Value>> {
    args.reject_keywords(name)?;
    let count = args.positional.len();
    if count < min || count > max {
        let expected = if min == max {
            format!("exactly {min} argument(s)")
        } else {
            format!("{min} to {max} arguments")
        };
        return Err(arity_error(name, &expected, count));
    }
    Ok(args.positional)
}

fn call_method(receiver: &Value, method: &str, label: &str, args: Args) -> Result<Value> {
    match (receiver, method) {
        (Value::String(s), "split") => {
            let params = method_args(args, label, 0, 2)?;
            split(s, params.first(), params.get(1))
        }
        (Value::String(s), "upper") => {
            method_args(args, label, 0, 0)?;
            Ok(Value::String(s.to_uppercase()))
        }
        (Value::String(s), "lower") => {
            method_args(args, label, 0, 0)?;
            Ok(Value::String(s.to_lowercase()))
        }
        (Value::String(s), "strip") => {
            let params = method_args(args, label, 0, 1)?;
            match params.first() {
                None | Some(Value::Null) => Ok(Value::string(s.trim())),
                Some(chars) => {
                    let chars = chars.as_str()?;
                    Ok(Value::string(s.trim_matches(|c: char| chars.contains(c))))
                }
            }
        }
        (Value::String(s), "startswith") => {
            let params = method_args(args, label, 1, 1)?;
            Ok(Value::Bool(s.starts_with(params[0].as_str()?)))
        }
        (Value::String(s), "endswith") => {
            let params = method_args(args, label, 1, 1)?;
            Ok(Value::Bool(s.ends_with(params[0].as_str()?)))
        }
        (Value::String(s), "replace") => {
            let params = method_args(args, label, 2, 2)?;
            Ok(Value::String(
                s.replace(params[0].as_str()?, params[1].as_str()?),
            ))
        }
        (Value::String(s), "join") => {
            let params = method_args(args, label, 1, 1)?;
            join(s, &params[0])
        }
        (Value::Array(items), "count") => {
            let params = method_args(args, label, 1, 1)?;
            let count = items.iter().filter(|item| **item == params[0]).count();
            Ok(Value::Int(i64::try_from(count).unwrap_or(i64::MAX)))
        }
        (Value::Array(items), "index") => {
            let params = method_args(args, label, 1, 1)?;
            items
                .iter()
                .position(|item| *item == params[0])
                .map(|i| Value::Int(i64::try_from(i).unwrap_or(i64::MAX)))
                .ok_or_else(|| value_error(format!("{} is not in list", params[0].repr())))
        }
        (Value::Array(items), "copy") => {
            method_args(args, label, 0, 0)?;
            Ok(Value::Array(items.clone()))
        }
        (Value::Object(obj), "get") => {
            let mut params = method_args(args, label, 1, 2)?.into_iter();
            let key = params.next().unwrap_or(Value::Null);
            let default = params.next().unwrap_or(Value::Null);
            Ok(match &key {
                Value::String(k) => obj.get(k).cloned().unwrap_or(default),
                _ => default,
            })
        }
        (Value::Object(obj), "keys") => {
            method_args(args, label, 0, 0)?;
            Ok(Value::Array(obj.keys().cloned().map(Value::String).collect()))
        }
        (Value::Object(obj), "values") => {
            method_args(args, label, 0, 0)?;
            Ok(Value::Array(obj.values().cloned().collect()))
        }
        (Value::Object(obj), "items") => {
            method_args(args, label, 0, 0)?;
            Ok(Value::Array(items_of(obj)))
        }
        _ => Err(type_error(format!("{label} is not callable on '{}'", receiver.type_name()))),
    }
}

fn split(s: &str, sep: Option<&Value>, maxsplit: Option<&Value>) -> Result<Value> {
    let limit = match maxsplit {
        None => None,
        Some(v) => usize::try_from(v.as_int()?).ok(),
    };
    let parts: Vec<Value> = match sep {
        None | Some(Value::Null) => match limit {
            None => s.split_whitespace().map(Value::string).collect(),
            Some(limit) => split_whitespace_n(s, limit),
        },
        Some(sep) => {
            let sep = sep.as_str()?;
            if sep.is_empty() {
                return Err(value_error("empty separator"));
            }
            match limit {
                None => s.split(sep).map(Value::string).collect(),
                Some(limit) => s.splitn(limit + 1, sep).map(Value::string).collect(),
            }
        }
    };
    Ok(Value::Array(parts))
}

fn split_whitespace_n(s: &str, limit: usize) -> Vec<Value> {
    let mut parts = Vec::new();
    let mut rest = s.trim_start();
    while !rest.is_empty() {
        if parts.len() == limit {
            parts.push(Value::string(rest));
            break;
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        parts.push(Value::string(&rest[..end]));
        rest = rest[end..].trim_start();
    }
    parts
}

fn join(sep: &str, iterable: &Value) -> Result<Value> {
    let items = iterable.to_vec()?;
    let pieces = items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s.as_str()),
            other => Err(type_error(format!(
                "sequence item {i}: expected string instance, {} found",
                other.type_name()
            ))),
        })
        .collect::<Result<Vec<&str>>>()?;
    Ok(Value::String(pieces.iter().join(sep)))
}

pub(crate) fn items_of(obj: &Map) -> Vec<Value> {
    obj.iter()
        .map(|(k, v)| Value::Array(vec![Value::String(k.clone()), v.clone()]))
        .collect()
}
