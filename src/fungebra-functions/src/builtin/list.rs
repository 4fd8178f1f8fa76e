use fungebra_shared::error::arity_error;
use fungebra_shared::{Args, Result, Value};
use inventory;

/// `list(iterable=())`: realize an iterable into an array
pub fn builtin_list(args: Args) -> Result<Value> {
    args.reject_keywords("list")?;
    match args.positional.as_slice() {
        [] => Ok(Value::Array(Vec::new())),
        [iterable] => Ok(Value::Array(iterable.to_vec()?)),
        other => Err(arity_error("list", "at most 1 argument", other.len())),
    }
}

inventory::submit! {
    crate::FunctionRegistration {
        name: "list",
        module: None,
        func: builtin_list,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fungebra_shared::{args, LazySeq};

    #[test]
    fn test_list_empty() {
        assert_eq!(builtin_list(args![]).unwrap(), Value::Array(vec![]));
    }

    #[test]
    fn test_list_realizes_lazy_sequence() {
        let seq = LazySeq::from_values(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(
            builtin_list(args![Value::Seq(seq.clone())]).unwrap(),
            Value::from(vec![1, 2])
        );
        // single pass: the sequence is now exhausted
        assert_eq!(builtin_list(args![Value::Seq(seq)]).unwrap(), Value::Array(vec![]));
    }

    #[test]
    fn test_list_of_string() {
        assert_eq!(
            builtin_list(args!["ab"]).unwrap(),
            Value::from(vec!["a", "b"])
        );
    }

    #[test]
    fn test_list_errors() {
        let err = builtin_list(args![3]).unwrap_err();
        assert_eq!(err.to_string(), "type error: 'int' object is not iterable");
        assert!(builtin_list(args![vec![1], vec![2]]).is_err());
    }

    #[test]
    fn test_list_registered_via_inventory() {
        let found = inventory::iter::<crate::FunctionRegistration>
            .into_iter()
            .any(|func| func.name == "list" && func.module.is_none());
        assert!(found, "list function not found in inventory");
    }
}
