use fungebra_shared::error::arity_error;
use fungebra_shared::ops::add_values;
use fungebra_shared::{Args, Result, Value};
use inventory;

/// `sum(iterable, start=0)`
pub fn builtin_sum(mut args: Args) -> Result<Value> {
    let start = args.take_keyword("start");
    args.reject_keywords("sum")?;
    let count = args.positional.len();
    let mut positional = args.positional.into_iter();
    let (iterable, start) = match (positional.next(), positional.next(), positional.next(), start)
    {
        (Some(iterable), None, None, start) => (iterable, start.unwrap_or(Value::Int(0))),
        (Some(iterable), Some(start), None, None) => (iterable, start),
        _ => return Err(arity_error("sum", "1 or 2 arguments", count)),
    };

    let mut total = start;
    for item in iterable.iter()? {
        total = add_values(&total, &item?)?;
    }
    Ok(total)
}

inventory::submit! {
    crate::FunctionRegistration {
        name: "sum",
        module: None,
        func: builtin_sum,
    }
}
