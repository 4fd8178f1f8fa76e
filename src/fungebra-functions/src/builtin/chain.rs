use fungebra_shared::seq::ValueIter;
use fungebra_shared::{Args, LazySeq, Result, Value};
use inventory;

/// `chain(*iterables)`: lazily concatenate iterables
pub fn builtin_chain(args: Args) -> Result<Value> {
    args.reject_keywords("chain")?;
    let sources = args
        .positional
        .iter()
        .map(Value::iter)
        .collect::<Result<Vec<ValueIter>>>()?;
    Ok(Value::Seq(LazySeq::new(sources.into_iter().flatten())))
}

inventory::submit! {
    crate::FunctionRegistration {
        name: "chain",
        module: None,
        func: builtin_chain,
    }
}
