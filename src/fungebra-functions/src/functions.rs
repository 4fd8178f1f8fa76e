//! Higher-order helpers
//!
//! Each helper exists twice: as a typed Rust constructor returning a
//! [`Function`], and as a registered builtin taking an [`Args`] bundle and
//! returning a function value. The registered forms are functions
//! themselves, so they compose: `builtin("less")? | builtin("fnot")?` is a
//! greater-or-equal factory.

use fungebra_shared::error::{arity_error, type_error};
use fungebra_shared::ops::{getattr, getitem, gt_values, is_same, lt_values};
use fungebra_shared::{Args, ErrorKind, Function, LazySeq, Map, Result, Value};
use inventory;

const LOOKUP_MISSES: &[ErrorKind] = &[ErrorKind::Key, ErrorKind::Index];
const ATTRIBUTE_MISSES: &[ErrorKind] = &[ErrorKind::Attribute];

// Function manipulation

/// Gather all positional arguments into one array before calling `func`
///
/// `collect(&sum).partial(args![1]).call(args![2, 3])` is `6`.
pub fn collect(func: &Function) -> Function {
    let func = func.clone();
    let name = format!("collect({})", func.name());
    Function::new(move |args: Args| {
        args.reject_keywords("collect")?;
        func.call1(Value::Array(args.positional))
    })
    .named(name)
}

/// Spread a single iterable argument into positional arguments
pub fn expand(func: &Function) -> Function {
    let func = func.clone();
    let name = format!("expand({})", func.name());
    Function::unary(move |iterable| func.call(Args::from_positional(iterable.to_vec()?)))
        .named(name)
}

/// A function that calls its argument with `bound`
pub fn caller(bound: impl Into<Args>) -> Function {
    let bound = bound.into();
    Function::unary(move |target| Function::try_from(target)?.call(bound.clone())).named("caller")
}

/// A function returning `value` whatever it is called with
pub fn constantly(value: impl Into<Value>) -> Function {
    let value = value.into();
    Function::new(move |_| Ok(value.clone())).named("constantly")
}

// Data comparison

/// Identity check against `value`
///
/// Functions and lazy sequences compare by reference, data by value.
pub fn is_(value: impl Into<Value>) -> Function {
    let value = value.into();
    Function::unary(move |x| Ok(Value::Bool(is_same(&value, &x)))).named("is_")
}

/// Equality check against `value`
pub fn equals(value: impl Into<Value>) -> Function {
    let value = value.into();
    Function::unary(move |x| Ok(Value::Bool(value == x))).named("equals")
}

/// Check `x < value`
pub fn less(value: impl Into<Value>) -> Function {
    let value = value.into();
    Function::unary(move |x| lt_values(&x, &value).map(Value::Bool)).named("less")
}

/// Check `x > value`
pub fn greater(value: impl Into<Value>) -> Function {
    let value = value.into();
    Function::unary(move |x| gt_values(&x, &value).map(Value::Bool)).named("greater")
}

/// Logical negation of `func`'s result
pub fn fnot(func: &Function) -> Function {
    func.negate()
}

// Data access

/// Subscript the argument with `key`
///
/// With a default, missing keys and out-of-range positions yield the
/// default instead of failing. Type errors always propagate.
pub fn itemgetter(key: impl Into<Value>, default: Option<Value>) -> Function {
    let key = key.into();
    let name = format!("itemgetter({})", key.repr());
    Function::unary(move |container| match (getitem(&container, &key), &default) {
        (Err(e), Some(default)) if e.is_any_of(LOOKUP_MISSES) => Ok(default.clone()),
        (result, _) => result,
    })
    .named(name)
}

/// Read attribute `attr` of the argument
///
/// With a default, a missing attribute yields the default.
pub fn attrgetter(attr: impl Into<String>, default: Option<Value>) -> Function {
    let attr = attr.into();
    let name = format!("attrgetter({attr:?})");
    Function::unary(move |value| match (getattr(&value, &attr), &default) {
        (Err(e), Some(default)) if e.is_any_of(ATTRIBUTE_MISSES) => Ok(default.clone()),
        (result, _) => result,
    })
    .named(name)
}

/// Call method `method` of the argument with `bound`
pub fn methodcaller(method: impl Into<String>, bound: impl Into<Args>) -> Function {
    let method = method.into();
    let name = format!("methodcaller({method:?})");
    attrgetter(method, None).pipe(&caller(bound)).named(name)
}

/// Lazily take elements while `predicate` holds
///
/// The sequence ends at the first falsy predicate result; an error ends it
/// after being yielded.
pub fn taker(predicate: &Function) -> Function {
    let predicate = predicate.clone();
    Function::unary(move |iterable| {
        let mut source = iterable.iter()?;
        let predicate = predicate.clone();
        let mut done = false;
        let taken = std::iter::from_fn(move || {
            if done {
                return None;
            }
            let item = match source.next()? {
                Ok(item) => item,
                Err(e) => {
                    done = true;
                    return Some(Err(e));
                }
            };
            match predicate.call1(item.clone()) {
                Ok(keep) if keep.is_truthy() => Some(Ok(item)),
                Ok(_) => {
                    done = true;
                    None
                }
                Err(e) => {
                    done = true;
                    Some(Err(e))
                }
            }
        });
        Ok(Value::Seq(LazySeq::new(taken)))
    })
    .named("taker")
}

// Control flow

/// Call `action` when `predicate` holds, otherwise return the argument
pub fn iffy(predicate: &Function, action: &Function) -> Function {
    iffy_or(predicate, action, &fungebra_shared::identity())
}

/// Call `action` when `predicate` holds, otherwise `default`
pub fn iffy_or(predicate: &Function, action: &Function, default: &Function) -> Function {
    let (predicate, action, default) = (predicate.clone(), action.clone(), default.clone());
    Function::unary(move |arg| {
        if predicate.call1(arg.clone())?.is_truthy() {
            action.call1(arg)
        } else {
            default.call1(arg)
        }
    })
    .named("iffy")
}

/// A function that ignores its arguments and fails with `kind`
pub fn raiser(kind: ErrorKind, message: impl Into<String>) -> Function {
    let message = message.into();
    Function::new(move |_| Err(kind.error(message.clone()))).named(format!("raiser({kind})"))
}

/// Decorator returning `default` whenever the decorated function fails
/// with one of `kinds`
///
/// Apply it with [`Function::decorate`], or use [`suppressing`] directly.
pub fn suppress(kinds: impl IntoIterator<Item = ErrorKind>, default: impl Into<Value>) -> Function {
    let kinds: Vec<ErrorKind> = kinds.into_iter().collect();
    let default = default.into();
    Function::unary(move |target| {
        let func = Function::try_from(target)?;
        Ok(Value::Function(suppressing(&func, &kinds, default.clone())))
    })
    .named("suppress")
}

/// `func`, returning `default` instead of failing with one of `kinds`
pub fn suppressing(func: &Function, kinds: &[ErrorKind], default: Value) -> Function {
    let func = func.clone();
    let kinds = kinds.to_vec();
    let name = format!("suppress({})", func.name());
    Function::new(move |args: Args| match func.call(args) {
        Err(e) if e.is_any_of(&kinds) => {
            log::debug!("suppressed {} in {}: {e}", e.kind(), func.name());
            Ok(default.clone())
        }
        result => result,
    })
    .named(name)
}

// Fan-out

/// Apply every function to the same arguments, collecting an array
pub fn juxt(functions: &[Function]) -> Function {
    let functions = functions.to_vec();
    Function::new(move |args: Args| {
        functions
            .iter()
            .map(|func| func.call(args.clone()))
            .collect::<Result<Vec<Value>>>()
            .map(Value::Array)
    })
    .named("juxt")
}

/// Apply every named function to the same arguments, collecting an object
pub fn duxt<K: Into<String>>(functions: impl IntoIterator<Item = (K, Function)>) -> Function {
    let functions: Vec<(String, Function)> = functions
        .into_iter()
        .map(|(name, func)| (name.into(), func))
        .collect();
    Function::new(move |args: Args| {
        functions
            .iter()
            .map(|(name, func)| Ok((name.clone(), func.call(args.clone())?)))
            .collect::<Result<Map>>()
            .map(Value::Object)
    })
    .named("duxt")
}

// Registered forms

fn function_arg(args: Args, name: &str) -> Result<Function> {
    Function::try_from(args.exactly_one(name)?)
}

fn functions_of(values: Vec<Value>) -> Result<Vec<Function>> {
    values.into_iter().map(Function::try_from).collect()
}

/// Split `(required, optional?)` positionals, with the optional one also
/// accepted as keyword `keyword`
fn one_and_optional(mut args: Args, name: &str, keyword: &str) -> Result<(Value, Option<Value>)> {
    let by_keyword = args.take_keyword(keyword);
    args.reject_keywords(name)?;
    let count = args.positional.len();
    let mut positional = args.positional.into_iter();
    match (positional.next(), positional.next(), positional.next(), by_keyword) {
        (Some(first), None, None, optional) => Ok((first, optional)),
        (Some(first), Some(optional), None, None) => Ok((first, Some(optional))),
        _ => Err(arity_error(name, "1 or 2 arguments", count)),
    }
}

/// `collect(func)`
pub fn builtin_collect(args: Args) -> Result<Value> {
    Ok(collect(&function_arg(args, "collect")?).into())
}

/// `expand(func)`
pub fn builtin_expand(args: Args) -> Result<Value> {
    Ok(expand(&function_arg(args, "expand")?).into())
}

/// `caller(*args, **kwargs)`
pub fn builtin_caller(args: Args) -> Result<Value> {
    Ok(caller(args).into())
}

/// `constantly(value)`
pub fn builtin_constantly(args: Args) -> Result<Value> {
    Ok(constantly(args.exactly_one("constantly")?).into())
}

/// `is_(value)`
pub fn builtin_is(args: Args) -> Result<Value> {
    Ok(is_(args.exactly_one("is_")?).into())
}

/// `equals(value)`
pub fn builtin_equals(args: Args) -> Result<Value> {
    Ok(equals(args.exactly_one("equals")?).into())
}

/// `less(value)`
pub fn builtin_less(args: Args) -> Result<Value> {
    Ok(less(args.exactly_one("less")?).into())
}

/// `greater(value)`
pub fn builtin_greater(args: Args) -> Result<Value> {
    Ok(greater(args.exactly_one("greater")?).into())
}

/// `fnot(func)`
pub fn builtin_fnot(args: Args) -> Result<Value> {
    Ok(fnot(&function_arg(args, "fnot")?).into())
}

/// `itemgetter(key, default=<none>)`
pub fn builtin_itemgetter(args: Args) -> Result<Value> {
    let (key, default) = one_and_optional(args, "itemgetter", "default")?;
    Ok(itemgetter(key, default).into())
}

/// `attrgetter(attr, default=<none>)`
pub fn builtin_attrgetter(args: Args) -> Result<Value> {
    let (attr, default) = one_and_optional(args, "attrgetter", "default")?;
    Ok(attrgetter(attr.as_str()?, default).into())
}

/// `methodcaller(name, *args, **kwargs)`
pub fn builtin_methodcaller(args: Args) -> Result<Value> {
    let (mut positional, keywords) = args.into_parts();
    if positional.is_empty() {
        return Err(arity_error("methodcaller", "at least 1 argument", 0));
    }
    let method = positional.remove(0);
    let bound = Args {
        positional,
        keywords,
    };
    Ok(methodcaller(method.as_str()?, bound).into())
}

/// `taker(predicate)`
pub fn builtin_taker(args: Args) -> Result<Value> {
    Ok(taker(&function_arg(args, "taker")?).into())
}

/// `iffy(predicate, action, default=identity)`
pub fn builtin_iffy(mut args: Args) -> Result<Value> {
    let default = args.take_keyword("default");
    args.reject_keywords("iffy")?;
    let count = args.positional.len();
    let mut functions = functions_of(args.positional)?.into_iter();
    let default = default.map(Function::try_from).transpose()?;
    match (functions.next(), functions.next(), functions.next(), default) {
        (Some(predicate), Some(action), None, None) => Ok(iffy(&predicate, &action).into()),
        (Some(predicate), Some(action), None, Some(default))
        | (Some(predicate), Some(action), Some(default), None) => {
            Ok(iffy_or(&predicate, &action, &default).into())
        }
        _ => Err(arity_error("iffy", "2 or 3 arguments", count)),
    }
}

/// `raiser(kind, message="")`, with `kind` an error kind name such as `"value"`
pub fn builtin_raiser(args: Args) -> Result<Value> {
    let (kind, message) = one_and_optional(args, "raiser", "message")?;
    let kind: ErrorKind = kind.as_str()?.parse()?;
    let message = match message {
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => String::new(),
    };
    Ok(raiser(kind, message).into())
}

/// `suppress(*kinds, default=None)`
pub fn builtin_suppress(mut args: Args) -> Result<Value> {
    let default = args.take_keyword("default").unwrap_or(Value::Null);
    args.reject_keywords("suppress")?;
    if args.positional.is_empty() {
        return Err(type_error("suppress() requires at least one error kind"));
    }
    let kinds = args
        .positional
        .iter()
        .map(|kind| kind.as_str()?.parse::<ErrorKind>())
        .collect::<Result<Vec<ErrorKind>>>()?;
    Ok(suppress(kinds, default).into())
}

/// `juxt(*functions)`
pub fn builtin_juxt(args: Args) -> Result<Value> {
    args.reject_keywords("juxt")?;
    Ok(juxt(&functions_of(args.positional)?).into())
}

/// `duxt(**functions)`
pub fn builtin_duxt(args: Args) -> Result<Value> {
    if !args.positional.is_empty() {
        return Err(type_error("duxt() takes keyword arguments only"));
    }
    let functions = args
        .keywords
        .into_iter()
        .map(|(name, func)| Ok((name, Function::try_from(func)?)))
        .collect::<Result<Vec<(String, Function)>>>()?;
    Ok(duxt(functions).into())
}

macro_rules! register_helper {
    ($($name:literal => $func:path),* $(,)?) => {
        $(
            inventory::submit! {
                crate::FunctionRegistration {
                    name: $name,
                    module: None,
                    func: $func,
                }
            }
        )*
    };
}

register_helper! {
    "collect" => builtin_collect,
    "expand" => builtin_expand,
    "caller" => builtin_caller,
    "constantly" => builtin_constantly,
    "is_" => builtin_is,
    "equals" => builtin_equals,
    "less" => builtin_less,
    "greater" => builtin_greater,
    "fnot" => builtin_fnot,
    "itemgetter" => builtin_itemgetter,
    "attrgetter" => builtin_attrgetter,
    "methodcaller" => builtin_methodcaller,
    "taker" => builtin_taker,
    "iffy" => builtin_iffy,
    "raiser" => builtin_raiser,
    "suppress" => builtin_suppress,
    "juxt" => builtin_juxt,
    "duxt" => builtin_duxt,
}
