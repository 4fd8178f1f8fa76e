//! Value types for fungebra
//!
//! This module provides the dynamic [`Value`] enum that flows through every
//! wrapped function: JSON-like data, named records, functions themselves and
//! lazy sequences.

use crate::error::{type_error, Result};
use crate::function::Function;
use crate::seq::{LazySeq, ValueIter};
use indexmap::IndexMap;
use itertools::Itertools;
use serde::ser::{SerializeMap, SerializeSeq};
use serde_json::{Number as JsonNumber, Value as JsonValue};
use std::fmt;

/// Insertion-ordered string-keyed map used by [`Value::Object`]
pub type Map = IndexMap<String, Value>;

/// A dynamically typed value
#[derive(Clone)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (i64)
    Int(i64),
    /// Float value (f64)
    Float(f64),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Object (key-value pairs, insertion ordered)
    Object(Map),
    /// Named attribute holder
    Record(Record),
    /// Wrapped function
    Function(Function),
    /// Lazy single-pass sequence
    Seq(LazySeq),
}

impl Value {
    /// Create a new null value
    #[must_use]
    pub fn null() -> Self {
        Value::Null
    }

    /// Create a new boolean value
    #[must_use]
    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Create a new integer value
    #[must_use]
    pub fn int(i: i64) -> Self {
        Value::Int(i)
    }

    /// Create a new float value
    #[must_use]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    /// Create a new string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Create a new array value
    #[must_use]
    pub fn array(arr: Vec<Value>) -> Self {
        Value::Array(arr)
    }

    /// Create a new object value
    #[must_use]
    pub fn object(obj: Map) -> Self {
        Value::Object(obj)
    }

    /// Create a new function value
    #[must_use]
    pub fn function(func: Function) -> Self {
        Value::Function(func)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(fl) => f.debug_tuple("Float").field(fl).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Array(arr) => f.debug_tuple("Array").field(arr).finish(),
            Value::Object(obj) => f.debug_tuple("Object").field(obj).finish(),
            Value::Record(rec) => f.debug_tuple("Record").field(rec).finish(),
            Value::Function(func) => fmt::Debug::fmt(func, f),
            Value::Seq(seq) => fmt::Debug::fmt(seq, f),
        }
    }
}

impl Value {
    /// Check if value is null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is callable
    #[must_use]
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Get the type name of this value
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Record(_) => "record",
            Value::Function(_) => "function",
            Value::Seq(_) => "seq",
        }
    }

    /// Truthiness of this value, see [`is_truthy`]
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        is_truthy(self)
    }

    /// Borrow the wrapped function, failing for anything that is not callable
    pub fn as_function(&self) -> Result<&Function> {
        match self {
            Value::Function(func) => Ok(func),
            other => Err(not_callable(other)),
        }
    }

    /// Borrow the string contents
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(type_error(format!(
                "expected string, got '{}'",
                other.type_name()
            ))),
        }
    }

    /// Integer contents
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Value::Int(i) => Ok(*i),
            Value::Bool(b) => Ok(i64::from(*b)),
            other => Err(type_error(format!(
                "expected int, got '{}'",
                other.type_name()
            ))),
        }
    }

    /// Number of elements for sized values
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.chars().count()),
            Value::Array(arr) => Some(arr.len()),
            Value::Object(obj) => Some(obj.len()),
            Value::Record(rec) => Some(rec.fields.len()),
            _ => None,
        }
    }

    /// Check if a sized value has no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Iterate over the elements of an iterable value
    ///
    /// Arrays yield their elements, strings their characters, objects their
    /// keys. Lazy sequences yield whatever is left of them.
    pub fn iter(&self) -> Result<ValueIter> {
        match self {
            Value::Array(arr) => Ok(Box::new(arr.clone().into_iter().map(Ok))),
            Value::String(s) => {
                let chars: Vec<Value> = s.chars().map(|c| Value::String(c.to_string())).collect();
                Ok(Box::new(chars.into_iter().map(Ok)))
            }
            Value::Object(obj) => {
                let keys: Vec<Value> = obj.keys().cloned().map(Value::String).collect();
                Ok(Box::new(keys.into_iter().map(Ok)))
            }
            Value::Seq(seq) => Ok(Box::new(seq.clone())),
            other => Err(type_error(format!(
                "'{}' object is not iterable",
                other.type_name()
            ))),
        }
    }

    /// Realize an iterable value into its elements
    pub fn to_vec(&self) -> Result<Vec<Value>> {
        self.iter()?.collect()
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> Result<JsonValue> {
        match self {
            Value::Null => Ok(JsonValue::Null),
            Value::Bool(b) => Ok(JsonValue::Bool(*b)),
            Value::Int(i) => Ok(JsonValue::Number(JsonNumber::from(*i))),
            Value::Float(f) => JsonNumber::from_f64(*f)
                .map(JsonValue::Number)
                .ok_or_else(|| crate::error::value_error(format!("Invalid float: {f}"))),
            Value::String(s) => Ok(JsonValue::String(s.clone())),
            Value::Array(arr) => {
                let json_arr: Result<Vec<JsonValue>> = arr.iter().map(Value::to_json).collect();
                Ok(JsonValue::Array(json_arr?))
            }
            Value::Object(obj) => {
                let json_obj: Result<serde_json::Map<String, JsonValue>> = obj
                    .iter()
                    .map(|(k, v)| v.to_json().map(|json_v| (k.clone(), json_v)))
                    .collect();
                Ok(JsonValue::Object(json_obj?))
            }
            Value::Record(rec) => {
                let json_obj: Result<serde_json::Map<String, JsonValue>> = rec
                    .fields
                    .iter()
                    .map(|(k, v)| v.to_json().map(|json_v| (k.clone(), json_v)))
                    .collect();
                Ok(JsonValue::Object(json_obj?))
            }
            Value::Function(_) | Value::Seq(_) => Err(type_error(format!(
                "'{}' object is not JSON serializable",
                self.type_name()
            ))),
        }
    }

    /// Convert from JSON value
    #[must_use]
    pub fn from_json(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(arr) => Value::Array(arr.into_iter().map(Value::from_json).collect()),
            JsonValue::Object(obj) => Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Developer-facing representation; strings are quoted
    #[must_use]
    pub fn repr(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::String(s) => format!("{s:?}"),
            Value::Array(arr) => format!("[{}]", arr.iter().map(Value::repr).join(", ")),
            Value::Object(obj) => format!(
                "{{{}}}",
                obj.iter()
                    .map(|(k, v)| format!("{k:?}: {}", v.repr()))
                    .join(", ")
            ),
            Value::Record(rec) => rec.to_string(),
            Value::Function(func) => func.to_string(),
            Value::Seq(seq) => format!("{seq:?}"),
        }
    }
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

pub(crate) fn not_callable(value: &Value) -> crate::error::Error {
    type_error(format!("'{}' object is not callable", value.type_name()))
}

impl PartialEq<&Value> for Value {
    fn eq(&self, other: &&Value) -> bool {
        self == *other
    }
}

impl PartialEq<Value> for &Value {
    fn eq(&self, other: &Value) -> bool {
        *self == other
    }
}

impl PartialEq for Value {
    #[allow(clippy::cast_precision_loss)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                (*a as f64) == *b
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            other => f.write_str(&other.repr()),
        }
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for item in arr {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Record(rec) => {
                let mut map = serializer.serialize_map(Some(rec.fields.len()))?;
                for (k, v) in &rec.fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Function(_) | Value::Seq(_) => Err(serde::ser::Error::custom(format!(
                "'{}' object is not serializable",
                self.type_name()
            ))),
        }
    }
}

/// Check if a value is truthy
///
/// Null, false, zero, NaN and empty strings/arrays/objects are falsy.
/// Records, functions and lazy sequences are always truthy.
#[must_use]
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Int(i) => *i != 0,
        Value::Float(f) => *f != 0.0 && !f.is_nan(),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Record(_) | Value::Function(_) | Value::Seq(_) => true,
    }
}

/// A named holder of attributes
///
/// Records play the part of objects with attributes (and of modules):
/// `attrgetter` reads their fields, while `itemgetter` does not see them.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: String,
    fields: Map,
}

impl Record {
    /// Create an empty record
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Map::new(),
        }
    }

    /// Add a field
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Set a field in place
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Record name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a field
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// All fields in insertion order
    #[must_use]
    pub fn fields(&self) -> &Map {
        &self.fields
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({})",
            self.name,
            self.fields
                .iter()
                .map(|(k, v)| format!("{k}={}", v.repr()))
                .join(", ")
        )
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<Map> for Value {
    fn from(obj: Map) -> Self {
        Value::Object(obj)
    }
}

impl From<Record> for Value {
    fn from(rec: Record) -> Self {
        Value::Record(rec)
    }
}

impl From<Function> for Value {
    fn from(func: Function) -> Self {
        Value::Function(func)
    }
}

impl From<&Function> for Value {
    fn from(func: &Function) -> Self {
        Value::Function(func.clone())
    }
}

impl From<LazySeq> for Value {
    fn from(seq: LazySeq) -> Self {
        Value::Seq(seq)
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        Value::from_json(json)
    }
}
