use fungebra_shared::error::arity_error;
use fungebra_shared::{Args, Result, Value};
use inventory;

/// `bool(value=false)`: truthiness as a boolean
pub fn builtin_bool(args: Args) -> Result<Value> {
    args.reject_keywords("bool")?;
    match args.positional.as_slice() {
        [] => Ok(Value::Bool(false)),
        [value] => Ok(Value::Bool(value.is_truthy())),
        other => Err(arity_error("bool", "at most 1 argument", other.len())),
    }
}

inventory::submit! {
    crate::FunctionRegistration {
        name: "bool",
        module: None,
        func: builtin_bool,
    }
}
