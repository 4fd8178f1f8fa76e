//! The composable function wrapper
//!
//! [`Function`] holds one callable of shape `Fn(Args) -> Result<Value>` and
//! derives new functions from it: composition, partial application, lazy
//! mapping and filtering, and folding. The most common derivations are also
//! available as operators so that pipelines read left to right:
//!
//! | Operator | Meaning |
//! |---|---|
//! | `f + g` | `f` after `g` (`g` runs first) |
//! | `f \| g` | `f`, then `g` |
//! | `value \| f` | call `f` with `value` |
//! | `args \| f` | call `f` with the spread bundle |
//! | `f << args` | bind leading arguments |
//! | `f >> args` | bind trailing arguments |
//! | `-f` | map `f` lazily over iterables |
//! | `f - g` | `f`, then map `g` over the result |
//! | `!f` | negate the truthiness of the result |
//!
//! Filtering and folding have no operator form: `filter`, `filter_by`,
//! `map_filter`, `reduce`, `reduce_by` and `map_reduce`.

use crate::args::Args;
use crate::error::{arity_error, type_error, Error, Result};
use crate::seq::{LazySeq, ValueIter};
use crate::value::{not_callable, Value};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, BitOr, Neg, Not, Shl, Shr, Sub};
use std::sync::{Arc, LazyLock};

/// Native callable shape shared by every wrapped function
pub type NativeFn = dyn Fn(Args) -> Result<Value> + Send + Sync;

const ANONYMOUS: &str = "<closure>";

static IDENTITY: LazyLock<Function> =
    LazyLock::new(|| Function::unary(Ok).named("identity"));

/// A wrapped callable with composition operations
///
/// Cloning is cheap and keeps the same underlying callable; equality and
/// hashing follow that callable, not the display name.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    func: Arc<NativeFn>,
    signature: Signature,
}

/// Argument shape checked before the callable runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signature {
    /// The callable validates its own bundle
    Bundle,
    /// Positional arguments only, any number
    Variadic,
    /// Exactly this many positional arguments
    Fixed(usize),
}

impl Function {
    /// Wrap a callable taking the full argument bundle
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Args) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(ANONYMOUS),
            func: Arc::new(func),
            signature: Signature::Bundle,
        }
    }

    fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = signature;
        self
    }

    /// Wrap a single-argument callable
    pub fn unary<F>(func: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self::new(move |args: Args| {
            let [value] = fixed(args)?;
            func(value)
        })
        .with_signature(Signature::Fixed(1))
    }

    /// Wrap a two-argument callable
    pub fn binary<F>(func: F) -> Self
    where
        F: Fn(Value, Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self::new(move |args: Args| {
            let [first, second] = fixed(args)?;
            func(first, second)
        })
        .with_signature(Signature::Fixed(2))
    }

    /// Wrap a callable taking any number of positional arguments
    pub fn variadic<F>(func: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value> + Send + Sync + 'static,
    {
        Self::new(move |args: Args| func(args.positional)).with_signature(Signature::Variadic)
    }

    /// Wrap an existing function
    ///
    /// Wrapping is idempotent: the result shares `func`'s callable.
    #[must_use]
    pub fn wrap(func: &Function) -> Function {
        func.clone()
    }

    /// Same callable under a different display name
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Arc::from(name.into());
        self
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if both wrappers hold the same callable
    #[must_use]
    pub fn ptr_eq(&self, other: &Function) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.func), Arc::as_ptr(&other.func))
    }

    fn addr(&self) -> usize {
        Arc::as_ptr(&self.func) as *const () as usize
    }

    /// Call with an argument bundle
    ///
    /// Arity errors of fixed-arity wrappers name the wrapper.
    pub fn call(&self, args: impl Into<Args>) -> Result<Value> {
        let args = args.into();
        self.check_signature(&args)?;
        (self.func)(args)
    }

    /// Call without arguments
    pub fn call0(&self) -> Result<Value> {
        self.call(Args::new())
    }

    /// Call with a single argument
    pub fn call1(&self, value: impl Into<Value>) -> Result<Value> {
        self.call(Args::one(value))
    }

    /// Call with two arguments
    pub fn call2(&self, first: impl Into<Value>, second: impl Into<Value>) -> Result<Value> {
        self.call(Args::from_positional(vec![first.into(), second.into()]))
    }

    fn check_signature(&self, args: &Args) -> Result<()> {
        let label = if &*self.name == ANONYMOUS {
            "function"
        } else {
            &self.name
        };
        match self.signature {
            Signature::Bundle => Ok(()),
            Signature::Variadic => args.reject_keywords(label),
            Signature::Fixed(expected) => {
                args.reject_keywords(label)?;
                let given = args.positional.len();
                if given == expected {
                    Ok(())
                } else {
                    let expected = match expected {
                        1 => "exactly one argument".to_string(),
                        2 => "exactly two arguments".to_string(),
                        n => format!("exactly {n} arguments"),
                    };
                    Err(arity_error(label, &expected, given))
                }
            }
        }
    }

    /// Pipe a value into this function
    ///
    /// A function value composes (`value` runs first); any other value is
    /// passed as the single argument.
    pub fn inject(&self, input: Value) -> Result<Value> {
        match input {
            Value::Function(first) => Ok(Value::Function(first.pipe(self))),
            other => self.call1(other),
        }
    }

    /// Compose: the result calls the last of `others` with the call
    /// arguments, feeds each result backwards through `others`, and finally
    /// into `self`
    #[must_use]
    pub fn compose<'a, I>(&self, others: I) -> Function
    where
        I: IntoIterator<Item = &'a Function>,
    {
        others.into_iter().fold(self.clone(), compose_pair)
    }

    /// Run `self`, then `next` on its result
    #[must_use]
    pub fn pipe(&self, next: &Function) -> Function {
        compose_pair(next.clone(), self)
    }

    /// Bind leading positional arguments and default keywords
    ///
    /// Call-time keywords override bound ones.
    #[must_use]
    pub fn partial(&self, bound: impl Into<Args>) -> Function {
        let bound = bound.into();
        let func = self.clone();
        log::trace!("partial {} with {} bound argument(s)", self.name, bound.len());
        Function::new(move |args: Args| func.call(bound.clone().then(args)))
            .named(format!("partial({})", self.name))
    }

    /// Bind trailing positional arguments and keywords
    ///
    /// A keyword given both here and at call time is a type error.
    #[must_use]
    pub fn rpartial(&self, bound: impl Into<Args>) -> Function {
        let bound = bound.into();
        let func = self.clone();
        log::trace!("rpartial {} with {} bound argument(s)", self.name, bound.len());
        Function::new(move |args: Args| func.call(args.then_strict(bound.clone())?))
            .named(format!("rpartial({})", self.name))
    }

    /// Lazily apply `self` to every element of one or more iterables
    ///
    /// With several iterables the elements are taken in lockstep and the
    /// sequence ends with the shortest one.
    #[must_use]
    pub fn map(&self) -> Function {
        let func = self.clone();
        Function::new(move |args: Args| {
            args.reject_keywords("map")?;
            if args.positional.is_empty() {
                return Err(type_error("map() must have at least one iterable"));
            }
            let sources = args
                .positional
                .iter()
                .map(Value::iter)
                .collect::<Result<Vec<ValueIter>>>()?;
            Ok(Value::Seq(LazySeq::new(MapIter {
                func: func.clone(),
                sources,
            })))
        })
        .named(format!("map({})", self.name))
    }

    /// [`map`](Self::map), realized into an array
    #[must_use]
    pub fn lmap(&self) -> Function {
        self.map().pipe(&realize())
    }

    /// Lazily keep the elements for which `self` is truthy
    #[must_use]
    pub fn filter(&self) -> Function {
        let predicate = self.clone();
        Function::new(move |args: Args| {
            let source = args.exactly_one("filter")?.iter()?;
            let predicate = predicate.clone();
            Ok(Value::Seq(LazySeq::new(source.filter_map(
                move |item| match item {
                    Ok(value) => match predicate.call1(value.clone()) {
                        Ok(keep) => keep.is_truthy().then_some(Ok(value)),
                        Err(e) => Some(Err(e)),
                    },
                    Err(e) => Some(Err(e)),
                },
            ))))
        })
        .named(format!("filter({})", self.name))
    }

    /// Run `self`, then keep the elements of its result matching `predicate`
    #[must_use]
    pub fn filter_by(&self, predicate: &Function) -> Function {
        self.pipe(&predicate.filter())
    }

    /// Map `self`, then keep the mapped elements matching `predicate`
    #[must_use]
    pub fn map_filter(&self, predicate: &Function) -> Function {
        self.map().filter_by(predicate)
    }

    /// Fold an iterable with `self` as the two-argument reducer
    ///
    /// An optional second argument seeds the fold.
    #[must_use]
    pub fn reduce(&self) -> Function {
        let reducer = self.clone();
        Function::new(move |args: Args| {
            args.reject_keywords("reduce")?;
            let count = args.positional.len();
            let mut positional = args.positional.into_iter();
            let (iterable, initial) = match (positional.next(), positional.next(), positional.next())
            {
                (Some(iterable), initial, None) => (iterable, initial),
                _ => return Err(arity_error("reduce", "1 or 2 arguments", count)),
            };
            let mut items = iterable.iter()?;
            let mut acc = match initial {
                Some(seed) => seed,
                None => match items.next() {
                    Some(first) => first?,
                    None => {
                        return Err(type_error(
                            "reduce() of empty iterable with no initial value",
                        ))
                    }
                },
            };
            for item in items {
                acc = reducer.call2(acc, item?)?;
            }
            Ok(acc)
        })
        .named(format!("reduce({})", self.name))
    }

    /// Run `self`, then fold its result with `reducer`
    #[must_use]
    pub fn reduce_by(&self, reducer: &Function) -> Function {
        self.pipe(&reducer.reduce())
    }

    /// Map `self`, then fold the mapped elements with `reducer`
    #[must_use]
    pub fn map_reduce(&self, reducer: &Function) -> Function {
        self.map().reduce_by(reducer)
    }

    /// Boolean negation of the result's truthiness
    #[must_use]
    pub fn negate(&self) -> Function {
        let func = self.clone();
        Function::new(move |args: Args| Ok(Value::Bool(!func.call(args)?.is_truthy())))
            .named(format!("not({})", self.name))
    }

    /// Call `self` as a decorator on `target` and unwrap the returned function
    pub fn decorate(&self, target: &Function) -> Result<Function> {
        Function::try_from(self.call1(target)?)
    }
}

/// Positional arguments of a call whose count was already checked
fn fixed<const N: usize>(args: Args) -> Result<[Value; N]> {
    let given = args.positional.len();
    <[Value; N]>::try_from(args.positional)
        .map_err(|_| arity_error("function", &format!("exactly {N} arguments"), given))
}

struct MapIter {
    func: Function,
    sources: Vec<ValueIter>,
}

impl Iterator for MapIter {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut row = Vec::with_capacity(self.sources.len());
        for source in &mut self.sources {
            match source.next()? {
                Ok(value) => row.push(value),
                Err(e) => return Some(Err(e)),
            }
        }
        Some(self.func.call(row))
    }
}

fn compose_pair(outer: Function, inner: &Function) -> Function {
    let name = format!("{} + {}", outer.name, inner.name);
    let inner = inner.clone();
    log::trace!("compose {name}");
    Function::new(move |args: Args| outer.call1(inner.call(args)?)).named(name)
}

fn realize() -> Function {
    Function::unary(|value| Ok(Value::Array(value.to_vec()?))).named("list")
}

/// The identity function: returns its single argument
#[must_use]
pub fn identity() -> Function {
    IDENTITY.clone()
}

/// Compose any number of functions, right to left
///
/// `compose(&[f, g, h])` calls `h` first; no functions yields [`identity`].
#[must_use]
pub fn compose(functions: &[Function]) -> Function {
    identity().compose(functions)
}

/// Chain functions left to right: `pipeline(&[f, g, h])` calls `f` first
#[must_use]
pub fn pipeline(functions: &[Function]) -> Function {
    identity().compose(functions.iter().rev())
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function(<function {}>)", self.name)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Function {}

impl Hash for Function {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl From<&Function> for Function {
    fn from(func: &Function) -> Self {
        Function::wrap(func)
    }
}

impl TryFrom<Value> for Function {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Function(func) => Ok(func),
            other => Err(not_callable(&other)),
        }
    }
}

impl TryFrom<&Value> for Function {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_function().cloned()
    }
}

impl Add for Function {
    type Output = Function;

    fn add(self, inner: Function) -> Function {
        self.compose([&inner])
    }
}

impl Add<&Function> for Function {
    type Output = Function;

    fn add(self, inner: &Function) -> Function {
        self.compose([inner])
    }
}

impl Add<&Function> for &Function {
    type Output = Function;

    fn add(self, inner: &Function) -> Function {
        self.compose([inner])
    }
}

impl BitOr for Function {
    type Output = Function;

    fn bitor(self, next: Function) -> Function {
        self.pipe(&next)
    }
}

impl BitOr<&Function> for Function {
    type Output = Function;

    fn bitor(self, next: &Function) -> Function {
        self.pipe(next)
    }
}

impl BitOr<&Function> for &Function {
    type Output = Function;

    fn bitor(self, next: &Function) -> Function {
        self.pipe(next)
    }
}

impl BitOr<Function> for Value {
    type Output = Result<Value>;

    fn bitor(self, func: Function) -> Result<Value> {
        func.inject(self)
    }
}

impl BitOr<&Function> for Value {
    type Output = Result<Value>;

    fn bitor(self, func: &Function) -> Result<Value> {
        func.inject(self)
    }
}

impl BitOr<Function> for Args {
    type Output = Result<Value>;

    fn bitor(self, func: Function) -> Result<Value> {
        func.call(self)
    }
}

impl BitOr<&Function> for Args {
    type Output = Result<Value>;

    fn bitor(self, func: &Function) -> Result<Value> {
        func.call(self)
    }
}

impl<A: Into<Args>> Shl<A> for Function {
    type Output = Function;

    fn shl(self, bound: A) -> Function {
        self.partial(bound)
    }
}

impl<A: Into<Args>> Shl<A> for &Function {
    type Output = Function;

    fn shl(self, bound: A) -> Function {
        self.partial(bound)
    }
}

impl<A: Into<Args>> Shr<A> for Function {
    type Output = Function;

    fn shr(self, bound: A) -> Function {
        self.rpartial(bound)
    }
}

impl<A: Into<Args>> Shr<A> for &Function {
    type Output = Function;

    fn shr(self, bound: A) -> Function {
        self.rpartial(bound)
    }
}

impl Neg for Function {
    type Output = Function;

    fn neg(self) -> Function {
        self.map()
    }
}

impl Neg for &Function {
    type Output = Function;

    fn neg(self) -> Function {
        self.map()
    }
}

impl Sub for Function {
    type Output = Function;

    fn sub(self, each: Function) -> Function {
        self.pipe(&each.map())
    }
}

impl Sub<&Function> for Function {
    type Output = Function;

    fn sub(self, each: &Function) -> Function {
        self.pipe(&each.map())
    }
}

impl Sub<&Function> for &Function {
    type Output = Function;

    fn sub(self, each: &Function) -> Function {
        self.pipe(&each.map())
    }
}

impl Not for Function {
    type Output = Function;

    fn not(self) -> Function {
        self.negate()
    }
}

impl Not for &Function {
    type Output = Function;

    fn not(self) -> Function {
        self.negate()
    }
}
