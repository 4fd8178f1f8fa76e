use fungebra::{
    args, builtin, constantly, identity, itemgetter, methodcaller, pipeline, Args, Function, Map,
    Record, Value, F,
};
use pretty_assertions::assert_eq;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn add() -> Function {
    Function::variadic(|items| {
        let mut total = 0;
        for item in items {
            total += item.as_int()?;
        }
        Ok(Value::Int(total))
    })
    .named("add")
}

fn double() -> Function {
    Function::unary(|n| Ok(Value::Int(n.as_int()? * 2))).named("double")
}

fn increment() -> Function {
    Function::unary(|n| Ok(Value::Int(n.as_int()? + 1))).named("increment")
}

fn even() -> Function {
    Function::unary(|n| Ok(Value::Bool(n.as_int()? % 2 == 0))).named("even")
}

fn op(name: &str) -> Function {
    builtin(&format!("operator.{name}")).unwrap()
}

fn ints(items: &[i64]) -> Value {
    Value::from(items.to_vec())
}

fn keywords(pairs: Vec<(&str, Value)>) -> Map {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

fn hash_of(func: &Function) -> u64 {
    let mut hasher = DefaultHasher::new();
    func.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_wrapping_returns_the_same_callable() {
    let wrapped = Function::wrap(&even());
    assert!(Function::wrap(&wrapped).ptr_eq(&wrapped));
}

mod partial_application {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_arguments_with_chaining() {
        let func = add()
            .partial(args![1])
            .partial(args![2, 3])
            .partial(args![4]);
        assert_eq!(func.call0().unwrap(), Value::Int(10));
    }

    #[test]
    fn test_partial_arguments_with_chaining() {
        let func = add().partial(args![1]).partial(args![2, 3]);
        assert_eq!(func.call1(4).unwrap(), Value::Int(10));
    }

    #[test]
    fn test_lshift_chaining() {
        let func = add() << args![1, 2] << args![3, 4];
        assert_eq!(func.call0().unwrap(), Value::Int(10));
    }

    #[test]
    fn test_lshift_argument_ordering() {
        let func = op("sub") << args![1] << args![3];
        assert_eq!(func.call0().unwrap(), Value::Int(-2));
    }

    #[test]
    fn test_lshift_keywords_from_map() {
        let reverse_sorted = builtin("sorted").unwrap() << keywords(vec![("key", op("neg").into())]);
        assert_eq!(reverse_sorted.call1(ints(&[1, 2, 3])).unwrap(), ints(&[3, 2, 1]));
    }

    #[test]
    fn test_lshift_keywords_in_bundle() {
        let func = builtin("sorted").unwrap() << args![ints(&[1, 2, 3]); key = op("neg")];
        assert_eq!(func.call0().unwrap(), ints(&[3, 2, 1]));
    }

    #[test]
    fn test_rshift_chaining() {
        let func = add() >> args![3, 4] >> args![1, 2];
        assert_eq!(func.call0().unwrap(), Value::Int(10));
    }

    #[test]
    fn test_rshift_argument_ordering() {
        let func = op("sub") >> args![3] >> args![1];
        assert_eq!(func.call0().unwrap(), Value::Int(-2));
    }

    #[test]
    fn test_rshift_keywords_from_map() {
        let reverse_sorted = builtin("sorted").unwrap() >> keywords(vec![("key", op("neg").into())]);
        assert_eq!(reverse_sorted.call1(ints(&[1, 2, 3])).unwrap(), ints(&[3, 2, 1]));
    }

    #[test]
    fn test_rshift_keyword_given_twice() {
        let func = builtin("sorted").unwrap() >> args![; reverse = true];
        let err = func.call(args![ints(&[1]); reverse = false]).unwrap_err();
        assert_eq!(err.kind(), fungebra::ErrorKind::Type);
    }
}

mod composition {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sum() -> Function {
        builtin("sum").unwrap()
    }

    #[test]
    fn test_compose_method() {
        let double_sum = double().compose([&sum()]);
        assert_eq!(double_sum.call1(ints(&[1, 2, 3])).unwrap(), Value::Int(12));
    }

    #[test]
    fn test_add_operator() {
        let double_sum = double() + sum();
        assert_eq!(double_sum.call1(ints(&[1, 2, 3])).unwrap(), Value::Int(12));
    }

    #[test]
    fn test_pipe_method() {
        let double_sum = sum().pipe(&double());
        assert_eq!(double_sum.call1(ints(&[1, 2, 3])).unwrap(), Value::Int(12));
    }

    #[test]
    fn test_pipe_operator() {
        let double_sum = sum() | double();
        assert_eq!(double_sum.call1(ints(&[1, 2, 3])).unwrap(), Value::Int(12));
    }

    #[test]
    fn test_function_value_piped_into_function() {
        let double_sum = (Value::from(sum()) | double()).unwrap();
        let double_sum = Function::try_from(double_sum).unwrap();
        assert_eq!(double_sum.call1(ints(&[1, 2, 3])).unwrap(), Value::Int(12));
    }

    #[test]
    fn test_pipeline() {
        let double_sum = pipeline(&[sum(), double()]);
        assert_eq!(double_sum.call1(ints(&[1, 2, 3])).unwrap(), Value::Int(12));
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        assert_eq!(pipeline(&[]).call1("x").unwrap(), Value::string("x"));
    }
}

mod map_filter_reduce {
    use super::*;
    use pretty_assertions::assert_eq;

    fn list() -> Function {
        builtin("list").unwrap()
    }

    #[test]
    fn test_map() {
        let map_double = double().map() | list();
        assert_eq!(map_double.call1(ints(&[1, 2, 3])).unwrap(), ints(&[2, 4, 6]));
    }

    #[test]
    fn test_filter_on_self() {
        let filter_func = even().filter() | list();
        assert_eq!(filter_func.call1(ints(&[1, 2, 3])).unwrap(), ints(&[2]));
    }

    #[test]
    fn test_filter_with_other() {
        let filter_func = identity().filter_by(&even()) | list();
        assert_eq!(filter_func.call1(ints(&[1, 2, 3])).unwrap(), ints(&[2]));
    }

    #[test]
    fn test_reduce_on_self() {
        assert_eq!(op("add").reduce().call1(ints(&[1, 2, 3])).unwrap(), Value::Int(6));
    }

    #[test]
    fn test_reduce_with_other() {
        let reduce_func = identity().reduce_by(&op("add"));
        assert_eq!(reduce_func.call1(ints(&[1, 2, 3])).unwrap(), Value::Int(6));
    }

    #[test]
    fn test_map_chained_to_filter() {
        let map_filter = increment().map_filter(&even()) | list();
        assert_eq!(map_filter.call1(ints(&[1, 2, 3])).unwrap(), ints(&[2, 4]));
    }

    #[test]
    fn test_map_chained_to_reduce() {
        let map_reduce = double().map_reduce(&op("add"));
        assert_eq!(map_reduce.call1(ints(&[1, 2, 3])).unwrap(), Value::Int(12));
    }

    #[test]
    fn test_map_filter_reduce() {
        let func = increment().map_filter(&even()).reduce_by(&op("add"));
        assert_eq!(func.call1(ints(&[1, 2, 3])).unwrap(), Value::Int(6));
    }

    #[test]
    fn test_unary_map_operator() {
        let double_each = -double() | list();
        assert_eq!(double_each.call1(ints(&[1, 2, 3])).unwrap(), ints(&[2, 4, 6]));
    }

    #[test]
    fn test_binary_map_operator() {
        let sort_double = builtin("sorted").unwrap() - double() | list();
        assert_eq!(sort_double.call1(ints(&[3, 2, 1])).unwrap(), ints(&[2, 4, 6]));
    }

    #[test]
    fn test_negation_operator() {
        let odd = !even();
        assert_eq!(odd.call1(3).unwrap(), Value::Bool(true));
        assert_eq!(odd.call1(4).unwrap(), Value::Bool(false));
    }
}

mod argument_pipeline {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_piping_single_argument() {
        let sorted = builtin("sorted").unwrap();
        assert_eq!((ints(&[3, 2, 1]) | &sorted).unwrap(), ints(&[1, 2, 3]));
    }

    #[test]
    fn test_piping_bundle() {
        let sorted = builtin("sorted").unwrap();
        let result = args![ints(&[1, 2, 3]); key = op("neg")] | &sorted;
        assert_eq!(result.unwrap(), ints(&[3, 2, 1]));
    }

    #[test]
    fn test_piping_into_pipeline_function() {
        let func = pipeline(&[
            double().map(),
            builtin("sum").unwrap(),
            builtin("str").unwrap(),
        ]);
        assert_eq!((ints(&[1, 2, 3]) | func).unwrap(), Value::string("12"));
    }

    #[test]
    fn test_piping_into_pipeline_expression() {
        let func = double().map() | builtin("sum").unwrap() | builtin("str").unwrap();
        assert_eq!((ints(&[1, 2, 3]) | func).unwrap(), Value::string("12"));
    }

    #[test]
    fn test_spreading_positional_bundle() {
        assert_eq!((Args::from(vec![Value::Int(1), Value::Int(2)]) | add()).unwrap(), Value::Int(3));
    }
}

#[test]
fn test_decorator_usage() {
    let negative: F = Function::unary(|n| Ok(Value::Int(-n.as_int()?)));
    let func = negative.map_filter(&even()) | builtin("next").unwrap();
    assert_eq!(func.call1(ints(&[1, 2, 3])).unwrap(), Value::Int(-2));
}

#[test]
fn test_hash_of_wrapped_function_is_the_same() {
    let sum = builtin("sum").unwrap();
    let wrapped = Function::wrap(&sum);
    assert_eq!(hash_of(&wrapped), hash_of(&sum));
    assert_eq!(wrapped, sum);
}

#[test]
fn test_debug_of_wrapped_function() {
    assert_eq!(
        format!("{:?}", builtin("sum").unwrap()),
        "Function(<function sum>)"
    );
}

#[test]
fn test_requests_example() {
    let _ = env_logger::builder().is_test(true).try_init();
    let requests_get = Function::new(|mut args: Args| {
        let headers = args.take_keyword("headers").unwrap_or(Value::Null);
        let hits: Vec<Value> = (0..10)
            .map(|val| Value::from(keywords(vec![("value", Value::Int(val))])))
            .collect();
        let body = keywords(vec![("total", Value::Int(10)), ("hits", Value::from(hits))]);
        let response = Record::new("response")
            .with_field("json", constantly(body))
            .with_field("headers", headers);
        Ok(response.into())
    });

    let accept = keywords(vec![("ACCEPT", Value::string("application/json"))]);
    let get_json = requests_get >> keywords(vec![("headers", accept.into())])
        | methodcaller("json", ());
    let get_key = |key: &str| itemgetter(key, None);

    let get_total_records = &get_json | &get_key("total");
    assert_eq!(get_total_records.call1("/posts").unwrap(), Value::Int(10));

    let get_even_record_values = (&get_json | &(get_key("hits") - get_key("value")))
        .filter_by(&even())
        | builtin("list").unwrap();
    assert_eq!(
        get_even_record_values.call1("/posts").unwrap(),
        ints(&[0, 2, 4, 6, 8])
    );

    let get_total_record_values =
        (&get_json | &(get_key("hits") - get_key("value"))).reduce_by(&op("add"));
    assert_eq!(get_total_record_values.call1("/posts").unwrap(), Value::Int(45));
}

mod laws {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_pipeline_runs_left_to_right(x in -1_000i64..1_000, k in -50i64..50) {
            let f = op("add") << args![k];
            let g = op("mul") >> args![3];
            let h = op("neg");
            let expected = -((x + k) * 3);
            prop_assert_eq!(pipeline(&[f.clone(), g.clone(), h.clone()]).call1(x).unwrap(), Value::Int(expected));
            prop_assert_eq!((h + g + f).call1(x).unwrap(), Value::Int(expected));
        }

        #[test]
        fn test_partials_accumulate(items in proptest::collection::vec(-100i64..100, 0..8)) {
            let mut func = add();
            for item in &items {
                func = func << args![*item];
            }
            prop_assert_eq!(func.call0().unwrap(), Value::Int(items.iter().sum()));
        }
    }
}
