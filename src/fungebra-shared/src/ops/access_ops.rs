//! Item and attribute access
//!
//! Items are what subscripting sees (object keys, array and string
//! positions); attributes are record fields, function derivations and bound
//! methods. The two never overlap: an object key is not an attribute.

use super::methods::bound_method;
use crate::args::Args;
use crate::error::{attribute_error, index_error, key_error, type_error, Result};
use crate::function::Function;
use crate::value::Value;

/// Subscript `container` with `key`
///
/// Negative positions count from the end. Missing object keys are key
/// errors, positions out of range are index errors, and subscripting
/// anything else is a type error.
pub fn getitem(container: &Value, key: &Value) -> Result<Value> {
    match container {
        Value::Object(obj) => match key {
            Value::String(k) => obj.get(k).cloned().ok_or_else(|| key_error(key.repr())),
            _ => Err(key_error(key.repr())),
        },
        Value::Array(items) => {
            let index = position(key, items.len(), "list")?
                .ok_or_else(|| index_error("list index out of range"))?;
            Ok(items[index].clone())
        }
        Value::String(s) => {
            let chars: Vec<char> = s.chars().collect();
            let index = position(key, chars.len(), "string")?
                .ok_or_else(|| index_error("string index out of range"))?;
            Ok(Value::String(chars[index].to_string()))
        }
        other => Err(type_error(format!(
            "'{}' object is not subscriptable",
            other.type_name()
        ))),
    }
}

fn position(key: &Value, len: usize, kind: &str) -> Result<Option<usize>> {
    let raw = match key {
        Value::Int(i) => *i,
        Value::Bool(b) => i64::from(*b),
        other => {
            return Err(type_error(format!(
                "{kind} indices must be integers, not '{}'",
                other.type_name()
            )))
        }
    };
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let resolved = if raw < 0 { raw + len } else { raw };
    Ok(usize::try_from(resolved).ok().filter(|_| resolved < len))
}

/// Look up attribute `name` on `value`
///
/// Records expose their fields; functions expose `name` and their `map`,
/// `lmap`, `filter` and `reduce` derivations; strings, arrays and objects
/// expose bound methods.
pub fn getattr(value: &Value, name: &str) -> Result<Value> {
    let found = match value {
        Value::Record(rec) => rec.get(name).cloned(),
        Value::Function(func) => match name {
            "name" => Some(Value::string(func.name())),
            "map" => Some(Value::Function(func.map())),
            "lmap" => Some(Value::Function(func.lmap())),
            "filter" => Some(Value::Function(func.filter())),
            "reduce" => Some(Value::Function(func.reduce())),
            "partial" => Some(Value::Function(binder(func, |f, bound| f.partial(bound)))),
            "rpartial" => Some(Value::Function(binder(func, |f, bound| f.rpartial(bound)))),
            _ => None,
        },
        other => bound_method(other, name).map(Value::Function),
    };
    found.ok_or_else(|| missing_attribute(value, name))
}

/// One-argument function binding a spread array or object onto `func`
fn binder(func: &Function, bind: fn(&Function, Args) -> Function) -> Function {
    let func = func.clone();
    let name = format!("{}.bind", func.name());
    Function::unary(move |bound| Ok(Value::Function(bind(&func, Args::try_from(bound)?))))
        .named(name)
}

fn missing_attribute(value: &Value, name: &str) -> crate::error::Error {
    match value {
        Value::Record(rec) => attribute_error(format!(
            "'{}' object has no attribute '{name}'",
            rec.name()
        )),
        other => attribute_error(format!(
            "'{}' object has no attribute '{name}'",
            other.type_name()
        )),
    }
}
