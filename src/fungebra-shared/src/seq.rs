//! Lazy, single-pass sequences
//!
//! A [`LazySeq`] is what `map`, `filter`, `taker` and friends produce. Every
//! clone shares one cursor, so consuming an element through any handle
//! consumes it for all of them and an exhausted sequence stays exhausted.

use crate::error::{Error, Result};
use crate::value::Value;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

/// Boxed iterator of fallible values
pub type ValueIter = Box<dyn Iterator<Item = Result<Value>> + Send>;

struct Cursor {
    iter: Mutex<ValueIter>,
    // Thread currently producing an element
    owner: Mutex<Option<ThreadId>>,
}

/// Clears the producing thread once the element is out
struct Producing<'a>(&'a Cursor);

impl Drop for Producing<'_> {
    fn drop(&mut self) {
        *self.0.owner() = None;
    }
}

impl Cursor {
    fn owner(&self) -> MutexGuard<'_, Option<ThreadId>> {
        self.owner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared handle on a lazily evaluated sequence of values
///
/// Handles may be sent to other threads; concurrent pulls are serialized.
#[derive(Clone)]
pub struct LazySeq {
    cursor: Arc<Cursor>,
}

impl LazySeq {
    /// Wrap an iterator of fallible values
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = Result<Value>> + Send + 'static,
    {
        Self {
            cursor: Arc::new(Cursor {
                iter: Mutex::new(Box::new(iter)),
                owner: Mutex::new(None),
            }),
        }
    }

    /// Lazy sequence over already computed values
    #[must_use]
    pub fn from_values(values: Vec<Value>) -> Self {
        Self::new(values.into_iter().map(Ok))
    }

    /// Pull the next element
    ///
    /// Another thread pulling at the same time makes this wait. A sequence
    /// pulled from while it is producing an element on the same thread (a
    /// sequence feeding itself) yields a runtime error instead of
    /// deadlocking.
    pub fn next_value(&self) -> Option<Result<Value>> {
        let current = thread::current().id();
        if *self.cursor.owner() == Some(current) {
            return Some(Err(Error::Runtime(
                "sequence is already being iterated".to_string(),
            )));
        }
        let mut iter = self
            .cursor
            .iter
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *self.cursor.owner() = Some(current);
        let _producing = Producing(&self.cursor);
        iter.next()
    }

    /// Drain the remaining elements, stopping at the first error
    pub fn collect_values(&self) -> Result<Vec<Value>> {
        self.clone().collect()
    }

    /// Check if both handles share the same cursor
    #[must_use]
    pub fn ptr_eq(&self, other: &LazySeq) -> bool {
        Arc::ptr_eq(&self.cursor, &other.cursor)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.cursor) as *const () as usize
    }
}

impl Iterator for LazySeq {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_value()
    }
}

impl fmt::Debug for LazySeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LazySeq(<{:#x}>)", self.addr())
    }
}
