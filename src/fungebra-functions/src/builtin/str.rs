use fungebra_shared::error::arity_error;
use fungebra_shared::{Args, Result, Value};
use inventory;

/// `str(value="")`: human-readable rendering
pub fn builtin_str(args: Args) -> Result<Value> {
    args.reject_keywords("str")?;
    match args.positional.as_slice() {
        [] => Ok(Value::string("")),
        [value] => Ok(Value::String(value.to_string())),
        other => Err(arity_error("str", "at most 1 argument", other.len())),
    }
}

inventory::submit! {
    crate::FunctionRegistration {
        name: "str",
        module: None,
        func: builtin_str,
    }
}
