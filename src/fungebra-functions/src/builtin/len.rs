use fungebra_shared::error::type_error;
use fungebra_shared::{Args, Result, Value};
use inventory;

/// `len(value)`: size of a string, array, object or record
pub fn builtin_len(args: Args) -> Result<Value> {
    let value = args.exactly_one("len")?;
    match value.len() {
        Some(len) => Ok(Value::Int(i64::try_from(len).unwrap_or(i64::MAX))),
        None => Err(type_error(format!(
            "object of type '{}' has no len()",
            value.type_name()
        ))),
    }
}

inventory::submit! {
    crate::FunctionRegistration {
        name: "len",
        module: None,
        func: builtin_len,
    }
}
