use fungebra_shared::error::{arity_error, value_error};
use fungebra_shared::{Args, LazySeq, Result, Value};
use inventory;

/// `range(stop)` or `range(start, stop, step=1)`: lazy integer sequence
pub fn builtin_range(args: Args) -> Result<Value> {
    args.reject_keywords("range")?;
    let bounds = args
        .positional
        .iter()
        .map(Value::as_int)
        .collect::<Result<Vec<i64>>>()?;
    let (start, stop, step) = match bounds.as_slice() {
        [stop] => (0, *stop, 1),
        [start, stop] => (*start, *stop, 1),
        [start, stop, step] => (*start, *stop, *step),
        other => return Err(arity_error("range", "1 to 3 arguments", other.len())),
    };
    if step == 0 {
        return Err(value_error("range() arg 3 must not be zero"));
    }

    let mut current = Some(start);
    let values = std::iter::from_fn(move || {
        let value = current?;
        let in_range = if step > 0 { value < stop } else { value > stop };
        if !in_range {
            return None;
        }
        current = value.checked_add(step);
        Some(Ok(Value::Int(value)))
    });
    Ok(Value::Seq(LazySeq::new(values)))
}

inventory::submit! {
    crate::FunctionRegistration {
        name: "range",
        module: None,
        func: builtin_range,
    }
}
