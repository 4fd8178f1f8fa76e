use super::sorted::{key_function, keyed};
use fungebra_shared::error::{type_error, value_error};
use fungebra_shared::ops::compare_values;
use fungebra_shared::{Args, Result, Value};
use inventory;
use std::cmp::Ordering;

/// `min(iterable, key=None, default=?)` or `min(a, b, ...)`
pub fn builtin_min(args: Args) -> Result<Value> {
    extreme(args, "min", Ordering::Less)
}

/// `max(iterable, key=None, default=?)` or `max(a, b, ...)`
pub fn builtin_max(args: Args) -> Result<Value> {
    extreme(args, "max", Ordering::Greater)
}

/// First item whose key compares `wanted` against every other key
fn extreme(mut args: Args, name: &str, wanted: Ordering) -> Result<Value> {
    let key = key_function(&mut args)?;
    let default = args.take_keyword("default");
    args.reject_keywords(name)?;

    let items = match args.positional.len() {
        0 => return Err(type_error(format!("{name} expected at least 1 argument, got 0"))),
        1 => args.positional.remove(0).to_vec()?,
        _ if default.is_some() => {
            return Err(type_error(format!(
                "cannot specify a default for {name}() with multiple positional arguments"
            )))
        }
        _ => args.positional,
    };

    let mut best: Option<(Value, Value)> = None;
    for (sort_key, item) in keyed(items, key.as_ref())? {
        best = match best {
            Some((best_key, best_item)) => {
                if compare_values(&sort_key, &best_key)? == wanted {
                    Some((sort_key, item))
                } else {
                    Some((best_key, best_item))
                }
            }
            None => Some((sort_key, item)),
        };
    }
    match (best, default) {
        (Some((_, item)), _) => Ok(item),
        (None, Some(default)) => Ok(default),
        (None, None) => Err(value_error(format!("{name}() arg is an empty sequence"))),
    }
}

inventory::submit! {
    crate::FunctionRegistration {
        name: "min",
        module: None,
        func: builtin_min,
    }
}

inventory::submit! {
    crate::FunctionRegistration {
        name: "max",
        module: None,
        func: builtin_max,
    }
}
