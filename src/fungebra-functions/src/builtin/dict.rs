use fungebra_shared::error::{arity_error, type_error, value_error};
use fungebra_shared::{Args, Map, Result, Value};
use inventory;

/// `dict(source=(), **keywords)`
///
/// `source` is an object, a record (its fields) or an iterable of key/value
/// pairs. Keywords are applied last.
pub fn builtin_dict(args: Args) -> Result<Value> {
    let (positional, keywords) = args.into_parts();
    let mut out = Map::new();
    match positional.as_slice() {
        [] => {}
        [Value::Object(obj)] => out.extend(obj.clone()),
        [Value::Record(rec)] => out.extend(rec.fields().clone()),
        [pairs] => {
            for (i, pair) in pairs.iter()?.enumerate() {
                let (key, value) = match pair?.to_vec()?.as_slice() {
                    [Value::String(key), value] => (key.clone(), value.clone()),
                    [key, _] => {
                        return Err(type_error(format!(
                            "dict keys must be strings, not '{}'",
                            key.type_name()
                        )))
                    }
                    other => {
                        return Err(value_error(format!(
                            "dictionary update sequence element #{i} has length {}; 2 is required",
                            other.len()
                        )))
                    }
                };
                out.insert(key, value);
            }
        }
        other => return Err(arity_error("dict", "at most 1 positional argument", other.len())),
    }
    out.extend(keywords);
    Ok(Value::Object(out))
}

inventory::submit! {
    crate::FunctionRegistration {
        name: "dict",
        module: None,
        func: builtin_dict,
    }
}
