//! Tests for value operations

use super::*;
use crate::function::Function;
use crate::seq::LazySeq;
use crate::value::{Map, Record, Value};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cmp::Ordering;

    fn obj(pairs: &[(&str, Value)]) -> Value {
        Value::object(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect::<Map>(),
        )
    }

    #[test]
    fn test_add_values() {
        assert_eq!(add_values(&Value::int(1), &Value::int(2)).unwrap(), Value::int(3));
        assert_eq!(
            add_values(&Value::int(1), &Value::float(0.5)).unwrap(),
            Value::float(1.5)
        );
        assert_eq!(
            add_values(&Value::string("ab"), &Value::string("c")).unwrap(),
            Value::string("abc")
        );
        assert_eq!(
            add_values(&Value::from(vec![1]), &Value::from(vec![2])).unwrap(),
            Value::from(vec![1, 2])
        );
        assert_eq!(add_values(&Value::Bool(true), &Value::int(1)).unwrap(), Value::int(2));

        let err = add_values(&Value::int(1), &Value::string("a")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type error: unsupported operand type(s) for +: 'int' and 'string'"
        );
        assert!(add_values(&Value::int(i64::MAX), &Value::int(1)).is_err());
    }

    #[test]
    fn test_mul_repeats_sequences() {
        assert_eq!(
            mul_values(&Value::from(vec![1, 2]), &Value::int(2)).unwrap(),
            Value::from(vec![1, 2, 1, 2])
        );
        assert_eq!(
            mul_values(&Value::int(3), &Value::string("ab")).unwrap(),
            Value::string("ababab")
        );
        assert_eq!(
            mul_values(&Value::string("ab"), &Value::int(-1)).unwrap(),
            Value::string("")
        );
    }

    #[test]
    fn test_mul_rejects_oversized_repetition() {
        for (seq, count) in [
            (Value::string("ab"), i64::MAX),
            (Value::from(vec![1, 2]), i64::MAX),
            (Value::string("x"), (1 << 28) + 1),
        ] {
            let err = mul_values(&seq, &Value::int(count)).unwrap_err();
            assert_eq!(err.to_string(), "value error: repeated sequence is too long");
        }
        assert_eq!(
            mul_values(&Value::string(""), &Value::int(i64::MAX)).unwrap(),
            Value::string("")
        );
        assert_eq!(
            mul_values(&Value::int(i64::MAX), &Value::from(Vec::<i64>::new())).unwrap(),
            Value::from(Vec::<i64>::new())
        );
    }

    #[test]
    fn test_division_follows_floor_semantics() {
        assert_eq!(
            truediv_values(&Value::int(7), &Value::int(2)).unwrap(),
            Value::float(3.5)
        );
        assert_eq!(floordiv_values(&Value::int(7), &Value::int(2)).unwrap(), Value::int(3));
        assert_eq!(floordiv_values(&Value::int(-7), &Value::int(2)).unwrap(), Value::int(-4));
        assert_eq!(mod_values(&Value::int(-7), &Value::int(2)).unwrap(), Value::int(1));
        assert_eq!(mod_values(&Value::int(7), &Value::int(-2)).unwrap(), Value::int(-1));
        assert_eq!(
            mod_values(&Value::float(-1.0), &Value::float(3.0)).unwrap(),
            Value::float(2.0)
        );
        assert_eq!(
            floordiv_values(&Value::float(-7.0), &Value::int(2)).unwrap(),
            Value::float(-4.0)
        );
    }

    #[test]
    fn test_division_by_zero() {
        for result in [
            truediv_values(&Value::int(1), &Value::int(0)),
            floordiv_values(&Value::int(1), &Value::int(0)),
            mod_values(&Value::int(1), &Value::int(0)),
            truediv_values(&Value::float(1.0), &Value::float(0.0)),
        ] {
            let err = result.unwrap_err();
            assert_eq!(err.kind(), crate::error::ErrorKind::ZeroDivision);
        }
    }

    #[test]
    fn test_neg_value() {
        assert_eq!(neg_value(&Value::int(3)).unwrap(), Value::int(-3));
        assert_eq!(neg_value(&Value::float(-1.5)).unwrap(), Value::float(1.5));
        assert!(neg_value(&Value::string("x")).is_err());
        assert!(neg_value(&Value::int(i64::MIN)).is_err());
    }

    #[test]
    fn test_compare_values() {
        assert_eq!(
            compare_values(&Value::int(1), &Value::float(1.5)).unwrap(),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::string("b"), &Value::string("a")).unwrap(),
            Ordering::Greater
        );
        assert_eq!(
            compare_values(&Value::from(vec![1, 2]), &Value::from(vec![1, 2, 0])).unwrap(),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::from(vec![1, 3]), &Value::from(vec![1, 2, 0])).unwrap(),
            Ordering::Greater
        );

        let err = compare_values(&Value::int(1), &Value::string("1")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type error: '<' not supported between instances of 'int' and 'string'"
        );
    }

    #[test]
    fn test_ordering_predicates() {
        assert!(lt_values(&Value::int(1), &Value::int(2)).unwrap());
        assert!(!gt_values(&Value::int(1), &Value::int(2)).unwrap());
        assert!(le_values(&Value::int(2), &Value::float(2.0)).unwrap());
        assert!(ge_values(&Value::int(2), &Value::int(2)).unwrap());
        assert!(!lt_values(&Value::float(f64::NAN), &Value::int(2)).unwrap());
        assert!(!ge_values(&Value::float(f64::NAN), &Value::int(2)).unwrap());
    }

    #[test]
    fn test_contains_value() {
        assert!(contains_value(&Value::string("hello"), &Value::string("ell")).unwrap());
        assert!(contains_value(&Value::from(vec![1, 2]), &Value::int(2)).unwrap());
        assert!(contains_value(&obj(&[("k", Value::Null)]), &Value::string("k")).unwrap());
        assert!(!contains_value(&obj(&[("k", Value::Null)]), &Value::int(1)).unwrap());
        assert!(contains_value(&Value::string("1"), &Value::int(1)).is_err());
        assert!(contains_value(&Value::int(1), &Value::int(1)).is_err());

        let seq = LazySeq::from_values(vec![Value::int(1), Value::int(2), Value::int(3)]);
        assert!(contains_value(&Value::Seq(seq.clone()), &Value::int(2)).unwrap());
        assert_eq!(seq.collect_values().unwrap(), vec![Value::int(3)]);
    }

    #[test]
    fn test_is_same() {
        let f = Function::new(|_| Ok(Value::Null));
        let g = Function::new(|_| Ok(Value::Null));
        assert!(is_same(&Value::from(&f), &Value::from(&f)));
        assert!(!is_same(&Value::from(&f), &Value::from(&g)));
        assert!(is_same(&Value::int(3), &Value::int(3)));
        assert!(!is_same(&Value::int(1), &Value::float(1.0)));
        assert!(is_same(&Value::Null, &Value::Null));
    }

    #[test]
    fn test_getitem_object() {
        let data = obj(&[("name", Value::string("Alice"))]);
        assert_eq!(getitem(&data, &Value::string("name")).unwrap(), Value::string("Alice"));

        let err = getitem(&data, &Value::string("missing")).unwrap_err();
        assert_eq!(err.to_string(), r#"key error: "missing""#);
    }

    #[test]
    fn test_getitem_sequences() {
        let items = Value::from(vec![10, 20, 30]);
        assert_eq!(getitem(&items, &Value::int(0)).unwrap(), Value::int(10));
        assert_eq!(getitem(&items, &Value::int(-1)).unwrap(), Value::int(30));
        assert_eq!(
            getitem(&items, &Value::int(3)).unwrap_err().to_string(),
            "index error: list index out of range"
        );
        assert_eq!(
            getitem(&items, &Value::int(-4)).unwrap_err().to_string(),
            "index error: list index out of range"
        );
        assert_eq!(
            getitem(&items, &Value::string("0")).unwrap_err().to_string(),
            "type error: list indices must be integers, not 'string'"
        );
        assert_eq!(getitem(&Value::string("héllo"), &Value::int(1)).unwrap(), Value::string("é"));
    }

    #[test]
    fn test_getitem_unsubscriptable() {
        let err = getitem(&Value::int(1), &Value::int(0)).unwrap_err();
        assert_eq!(err.to_string(), "type error: 'int' object is not subscriptable");
        let record = Value::from(Record::new("point").with_field("x", 1));
        assert!(getitem(&record, &Value::string("x")).is_err());
    }

    #[test]
    fn test_getattr_record_fields() {
        let record = Value::from(Record::new("point").with_field("x", 1));
        assert_eq!(getattr(&record, "x").unwrap(), Value::int(1));
        assert_eq!(
            getattr(&record, "y").unwrap_err().to_string(),
            "attribute error: 'point' object has no attribute 'y'"
        );
    }

    #[test]
    fn test_getattr_function_derivations() {
        let double = Function::unary(|v| mul_values(&v, &Value::int(2))).named("double");
        let func = Value::from(&double);
        assert_eq!(getattr(&func, "name").unwrap(), Value::string("double"));

        let lmap = Function::try_from(getattr(&func, "lmap").unwrap()).unwrap();
        assert_eq!(lmap.call1(vec![1, 2]).unwrap(), Value::from(vec![2, 4]));
        assert!(getattr(&func, "nothing").is_err());
    }

    #[test]
    fn test_getattr_partials_spread_their_bundle() {
        let sub = Value::from(Function::binary(|a, b| sub_values(&a, &b)));

        let bind = Function::try_from(getattr(&sub, "partial").unwrap()).unwrap();
        let from_ten = Function::try_from(bind.call1(vec![10]).unwrap()).unwrap();
        assert_eq!(from_ten.call1(3).unwrap(), Value::int(7));

        let rbind = Function::try_from(getattr(&sub, "rpartial").unwrap()).unwrap();
        let minus_ten = Function::try_from(rbind.call1(vec![10]).unwrap()).unwrap();
        assert_eq!(minus_ten.call1(3).unwrap(), Value::int(-7));

        let err = bind.call1(5).unwrap_err();
        assert_eq!(err.to_string(), "type error: 'int' object is not iterable");
    }

    #[test]
    fn test_getattr_data() {
        let split = getattr(&Value::string("a b"), "split").unwrap();
        assert!(split.is_callable());
        assert!(getattr(&obj(&[("keys", Value::Null)]), "keys").unwrap().is_callable());
        assert_eq!(
            getattr(&Value::int(1), "x").unwrap_err().to_string(),
            "attribute error: 'int' object has no attribute 'x'"
        );
    }
}
