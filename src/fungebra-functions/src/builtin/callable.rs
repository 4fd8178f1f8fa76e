use fungebra_shared::{Args, Result, Value};
use inventory;

/// `callable(value)`
pub fn builtin_callable(args: Args) -> Result<Value> {
    Ok(Value::Bool(args.exactly_one("callable")?.is_callable()))
}

inventory::submit! {
    crate::FunctionRegistration {
        name: "callable",
        module: None,
        func: builtin_callable,
    }
}
