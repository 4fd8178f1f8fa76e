//! Argument bundles
//!
//! [`Args`] is the calling convention of every wrapped function: an ordered
//! list of positional values plus ordered keyword values. Piping an `Args`
//! into a function spreads it, where piping a plain [`Value`] passes that
//! value as the single argument.

use crate::error::{arity_error, type_error, Result};
use crate::value::{Map, Value};

/// Positional and keyword arguments for a call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    /// Positional arguments
    pub positional: Vec<Value>,
    /// Keyword arguments, in the order they were given
    pub keywords: Map,
}

/// Build an [`Args`] bundle
///
/// Positional arguments come first, keyword arguments follow a `;`:
///
/// ```
/// use fungebra_shared::args;
///
/// let call = args![1, "two"; key = 3];
/// assert_eq!(call.positional.len(), 2);
/// assert_eq!(call.keywords.len(), 1);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::args::Args::new()
    };
    ($($pos:expr),* ; $($key:ident = $val:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut bundle = $crate::args::Args::new();
        $( bundle.positional.push($crate::value::Value::from($pos)); )*
        $( bundle.keywords.insert(stringify!($key).to_string(), $crate::value::Value::from($val)); )*
        bundle
    }};
    ($($pos:expr),+ $(,)?) => {
        $crate::args::Args::from_positional(vec![$($crate::value::Value::from($pos)),+])
    };
}

impl Args {
    /// Empty argument list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Positional-only arguments
    #[must_use]
    pub fn from_positional(positional: Vec<Value>) -> Self {
        Self {
            positional,
            keywords: Map::new(),
        }
    }

    /// Keyword-only arguments
    #[must_use]
    pub fn from_keywords(keywords: Map) -> Self {
        Self {
            positional: Vec::new(),
            keywords,
        }
    }

    /// A single positional argument
    pub fn one(value: impl Into<Value>) -> Self {
        Self::from_positional(vec![value.into()])
    }

    /// Spread a dynamic value into arguments
    ///
    /// Objects become keyword arguments, other iterables become positional
    /// arguments. Anything else is a type error.
    pub fn spread(value: Value) -> Result<Self> {
        match value {
            Value::Object(keywords) => Ok(Self::from_keywords(keywords)),
            other => Ok(Self::from_positional(other.to_vec()?)),
        }
    }

    /// Add a positional argument
    #[must_use]
    pub fn with_arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Add a keyword argument
    #[must_use]
    pub fn with_keyword(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.insert(key.into(), value.into());
        self
    }

    /// Total number of arguments
    #[must_use]
    pub fn len(&self) -> usize {
        self.positional.len() + self.keywords.len()
    }

    /// Check if there are no arguments at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }

    /// Look up a keyword argument
    #[must_use]
    pub fn keyword(&self, key: &str) -> Option<&Value> {
        self.keywords.get(key)
    }

    /// Remove and return a keyword argument
    pub fn take_keyword(&mut self, key: &str) -> Option<Value> {
        self.keywords.shift_remove(key)
    }

    /// Append `later` after these arguments
    ///
    /// Positionals are concatenated. Keywords from `later` override ours.
    #[must_use]
    pub fn then(mut self, later: Args) -> Args {
        self.positional.extend(later.positional);
        self.keywords.extend(later.keywords);
        self
    }

    /// Append `later` after these arguments, rejecting repeated keywords
    pub fn then_strict(mut self, later: Args) -> Result<Args> {
        self.positional.extend(later.positional);
        for (key, value) in later.keywords {
            if self.keywords.contains_key(&key) {
                return Err(type_error(format!(
                    "got multiple values for keyword argument '{key}'"
                )));
            }
            self.keywords.insert(key, value);
        }
        Ok(self)
    }

    /// Fail if any keyword argument was given
    pub fn reject_keywords(&self, name: &str) -> Result<()> {
        match self.keywords.keys().next() {
            Some(key) => Err(type_error(format!(
                "{name}() got an unexpected keyword argument '{key}'"
            ))),
            None => Ok(()),
        }
    }

    /// Take exactly one positional argument
    pub fn exactly_one(self, name: &str) -> Result<Value> {
        self.reject_keywords(name)?;
        let count = self.positional.len();
        let mut positional = self.positional.into_iter();
        match (positional.next(), positional.next()) {
            (Some(value), None) => Ok(value),
            _ => Err(arity_error(name, "exactly one argument", count)),
        }
    }

    /// Take exactly two positional arguments
    pub fn exactly_two(self, name: &str) -> Result<(Value, Value)> {
        self.reject_keywords(name)?;
        let count = self.positional.len();
        let mut positional = self.positional.into_iter();
        match (positional.next(), positional.next(), positional.next()) {
            (Some(first), Some(second), None) => Ok((first, second)),
            _ => Err(arity_error(name, "exactly two arguments", count)),
        }
    }

    /// Split into positional and keyword parts
    #[must_use]
    pub fn into_parts(self) -> (Vec<Value>, Map) {
        (self.positional, self.keywords)
    }
}

impl From<Vec<Value>> for Args {
    fn from(positional: Vec<Value>) -> Self {
        Self::from_positional(positional)
    }
}

impl From<Map> for Args {
    fn from(keywords: Map) -> Self {
        Self::from_keywords(keywords)
    }
}

impl From<()> for Args {
    fn from((): ()) -> Self {
        Self::new()
    }
}

impl TryFrom<Value> for Args {
    type Error = crate::error::Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::spread(value)
    }
}
