use fungebra_shared::{Args, Function, Result, Value};
use inventory;

/// `Function(value)`: coerce a value to a wrapper, failing when it is not callable
pub fn builtin_function(args: Args) -> Result<Value> {
    let func = Function::try_from(args.exactly_one("Function")?)?;
    Ok(Value::Function(Function::wrap(&func)))
}

inventory::submit! {
    crate::FunctionRegistration {
        name: "Function",
        module: None,
        func: builtin_function,
    }
}
