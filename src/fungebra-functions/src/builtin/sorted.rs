use fungebra_shared::ops::compare_values;
use fungebra_shared::{Args, Error, Function, Result, Value};
use inventory;
use std::cmp::Ordering;

/// Optional `key=` keyword: null means "no key function"
pub(crate) fn key_function(args: &mut Args) -> Result<Option<Function>> {
    match args.take_keyword("key") {
        None | Some(Value::Null) => Ok(None),
        Some(key) => Function::try_from(key).map(Some),
    }
}

/// Sort key of every item, computed once
pub(crate) fn keyed(items: Vec<Value>, key: Option<&Function>) -> Result<Vec<(Value, Value)>> {
    items
        .into_iter()
        .map(|item| {
            let sort_key = match key {
                Some(key) => key.call1(item.clone())?,
                None => item.clone(),
            };
            Ok((sort_key, item))
        })
        .collect()
}

/// `sorted(iterable, key=None, reverse=False)`: stable sort into a new array
pub fn builtin_sorted(mut args: Args) -> Result<Value> {
    let key = key_function(&mut args)?;
    let reverse = args
        .take_keyword("reverse")
        .is_some_and(|reverse| reverse.is_truthy());
    let iterable = args.exactly_one("sorted")?;

    let mut pairs = keyed(iterable.to_vec()?, key.as_ref())?;
    let mut failure: Option<Error> = None;
    pairs.sort_by(|(a, _), (b, _)| match compare_values(a, b) {
        Ok(ordering) if reverse => ordering.reverse(),
        Ok(ordering) => ordering,
        Err(e) => {
            failure.get_or_insert(e);
            Ordering::Equal
        }
    });
    match failure {
        Some(e) => Err(e),
        None => Ok(Value::Array(pairs.into_iter().map(|(_, item)| item).collect())),
    }
}

inventory::submit! {
    crate::FunctionRegistration {
        name: "sorted",
        module: None,
        func: builtin_sorted,
    }
}
