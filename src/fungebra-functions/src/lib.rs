//! Built-in functions for fungebra
//!
//! This crate provides the builtin callables (`sum`, `sorted`, `range`, ...),
//! the `operator` namespace and the higher-order helper library. Builtins
//! register themselves through `inventory` and are looked up by name from a
//! process-wide [`BuiltinRegistry`].

#![allow(
    clippy::needless_pass_by_value,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args,
    clippy::must_use_candidate
)]

pub mod builtin;
pub mod functions;
pub mod helpers;

// Re-export inventory for use by builtin modules
pub use inventory;

pub use functions::*;
pub use helpers::ModuleWrapper;

use fungebra_shared::error::attribute_error;
use fungebra_shared::{Args, Function, Record, Result, Value};
use indexmap::IndexMap;
use std::sync::LazyLock;

/// Native signature of a registered builtin
pub type BuiltinFunction = fn(Args) -> Result<Value>;

inventory::collect!(FunctionRegistration);

/// A builtin submitted to the registry at link time
pub struct FunctionRegistration {
    /// Name the builtin is looked up by
    pub name: &'static str,
    /// Namespace the builtin lives in; `None` for top-level builtins
    pub module: Option<&'static str>,
    /// Implementation
    pub func: BuiltinFunction,
}

static REGISTRY: LazyLock<BuiltinRegistry> = LazyLock::new(BuiltinRegistry::new);

/// Registry of built-in functions
///
/// Every builtin is wrapped once, so looking the same name up twice yields
/// the same (equal, same-hash) [`Function`].
pub struct BuiltinRegistry {
    functions: IndexMap<String, Function>,
}

impl std::fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BuiltinRegistry {{ functions: {} functions }}",
            self.functions.len()
        )
    }
}

impl BuiltinRegistry {
    /// Create a new builtin registry with every submitted builtin
    pub fn new() -> Self {
        let mut registry = Self {
            functions: IndexMap::new(),
        };

        registry.register_standard_functions();
        registry.functions.sort_keys();
        log::debug!(
            "builtin registry built with {} functions",
            registry.functions.len()
        );
        registry
    }

    fn register_standard_functions(&mut self) {
        for func in inventory::iter::<FunctionRegistration> {
            let qualified = qualified_name(func.module, func.name);
            self.register(qualified.clone(), Function::new(func.func).named(qualified));
        }
    }

    /// Register a function under `name`
    pub fn register(&mut self, name: impl Into<String>, func: Function) {
        self.functions.insert(name.into(), func);
    }

    /// Check if a function exists
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Call a built-in function
    pub fn call_function(&self, name: &str, args: Args) -> Result<Value> {
        self.get_function(name)?.call(args)
    }

    /// Get the number of registered functions
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Get a built-in function by name
    pub fn get_function(&self, name: &str) -> Result<Function> {
        self.functions.get(name).cloned().ok_or_else(|| {
            attribute_error(format!("module 'builtins' has no attribute '{name}'"))
        })
    }

    /// Get all function names, sorted
    pub fn function_names(&self) -> Vec<String> {
        self.functions.keys().cloned().collect()
    }

    /// Collect the builtins of namespace `module` into a record
    pub fn module(&self, module: &str) -> Result<Record> {
        let prefix = format!("{module}.");
        let mut record = Record::new(module);
        for (name, func) in &self.functions {
            if let Some(short) = name.strip_prefix(&prefix) {
                record.insert(short, func);
            }
        }
        if record.fields().is_empty() {
            return Err(attribute_error(format!("no module named '{module}'")));
        }
        Ok(record)
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn qualified_name(module: Option<&str>, name: &str) -> String {
    match module {
        Some(module) => format!("{module}.{name}"),
        None => name.to_string(),
    }
}

/// The process-wide builtin registry
pub fn registry() -> &'static BuiltinRegistry {
    &REGISTRY
}

/// Look up a builtin by name, e.g. `"sum"` or `"operator.add"`
pub fn builtin(name: &str) -> Result<Function> {
    REGISTRY.get_function(name)
}

/// The `operator` namespace as a record of functions
pub fn operator_module() -> Result<Record> {
    REGISTRY.module("operator")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fungebra_shared::args;
    use pretty_assertions::assert_eq;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_registry_contains_builtins() {
        init_logging();
        let registry = BuiltinRegistry::new();
        for name in ["sum", "sorted", "range", "next", "operator.add", "itemgetter"] {
            assert!(registry.has_function(name), "missing builtin {name}");
        }
        assert!(!registry.has_function("add"));
        assert!(registry.function_count() > 30);
    }

    #[test]
    fn test_function_names_are_sorted() {
        let names = registry().function_names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_lookup_is_stable() {
        let first = builtin("sum").unwrap();
        let second = builtin("sum").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.name(), "sum");
    }

    #[test]
    fn test_call_function() {
        let result = registry()
            .call_function("sum", args![vec![1, 2, 3]])
            .unwrap();
        assert_eq!(result, Value::Int(6));

        let err = registry().call_function("nope", args![]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "attribute error: module 'builtins' has no attribute 'nope'"
        );
    }

    #[test]
    fn test_operator_module() {
        let operator = operator_module().unwrap();
        assert_eq!(operator.name(), "operator");
        assert!(operator.get("add").is_some_and(Value::is_callable));
        assert!(operator.get("sum").is_none());
        assert!(registry().module("nothing").is_err());
    }

    #[test]
    fn test_register_custom_function() {
        let mut registry = BuiltinRegistry::default();
        let before = registry.function_count();
        registry.register("answer", Function::new(|_| Ok(Value::Int(42))));
        assert_eq!(registry.function_count(), before + 1);
        assert_eq!(registry.call_function("answer", args![]).unwrap(), Value::Int(42));
    }
}
