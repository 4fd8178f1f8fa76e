use fungebra_shared::error::{arity_error, type_error, Error};
use fungebra_shared::{Args, Result, Value};
use inventory;

/// `next(sequence, default?)`: pull one element from a lazy sequence
///
/// An exhausted sequence yields `default` when given, a stop-iteration
/// error otherwise.
pub fn builtin_next(args: Args) -> Result<Value> {
    args.reject_keywords("next")?;
    let count = args.positional.len();
    let mut positional = args.positional.into_iter();
    let (source, default) = match (positional.next(), positional.next(), positional.next()) {
        (Some(source), default, None) => (source, default),
        _ => return Err(arity_error("next", "1 or 2 arguments", count)),
    };

    let seq = match source {
        Value::Seq(seq) => seq,
        other => {
            return Err(type_error(format!(
                "'{}' object is not an iterator",
                other.type_name()
            )))
        }
    };
    match (seq.next_value(), default) {
        (Some(item), _) => item,
        (None, Some(default)) => Ok(default),
        (None, None) => Err(Error::StopIteration("sequence is exhausted".to_string())),
    }
}

inventory::submit! {
    crate::FunctionRegistration {
        name: "next",
        module: None,
        func: builtin_next,
    }
}
