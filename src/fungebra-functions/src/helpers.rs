use fungebra_shared::ops::getattr;
use fungebra_shared::{identity, Function, Result, Value};

/// Attribute access on a wrapped module (or any record), passing every
/// attribute through a decorator
///
/// ```
/// use fungebra_functions::{builtin, iffy, operator_module, ModuleWrapper};
///
/// let coerce = iffy(&builtin("callable")?, &builtin("Function")?);
/// let operator = ModuleWrapper::with_decorator(operator_module()?, &coerce);
/// assert!(operator.getattr("add")?.is_callable());
/// # Ok::<(), fungebra_shared::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ModuleWrapper {
    wrapped: Value,
    decorate: Function,
}

impl ModuleWrapper {
    /// Wrap without decorating
    pub fn new(wrapped: impl Into<Value>) -> Self {
        Self::with_decorator(wrapped, &identity())
    }

    /// Wrap, decorating every attribute with `decorate`
    pub fn with_decorator(wrapped: impl Into<Value>, decorate: &Function) -> Self {
        Self {
            wrapped: wrapped.into(),
            decorate: decorate.clone(),
        }
    }

    /// The undecorated value
    pub fn wrapped(&self) -> &Value {
        &self.wrapped
    }

    /// Decorated attribute `attr` of the wrapped value
    pub fn getattr(&self, attr: &str) -> Result<Value> {
        self.decorate.call1(getattr(&self.wrapped, attr)?)
    }

    /// Decorated attribute `attr`, which must be callable
    pub fn function(&self, attr: &str) -> Result<Function> {
        Function::try_from(self.getattr(attr)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fungebra_shared::{ErrorKind, Record};

    fn module() -> Record {
        Record::new("tools")
            .with_field("answer", 42)
            .with_field("echo", Function::unary(Ok))
    }

    #[test]
    fn test_default_wrapper_does_not_decorate() {
        let tools = module();
        let wrapper = ModuleWrapper::new(tools.clone());
        assert_eq!(wrapper.getattr("answer").unwrap(), Value::Int(42));
        assert_eq!(wrapper.wrapped(), &Value::from(tools));
    }

    #[test]
    fn test_decorator_applies_to_every_attribute() {
        let boxed = Function::unary(|v| Ok(Value::from(vec![v])));
        let wrapper = ModuleWrapper::with_decorator(module(), &boxed);
        assert_eq!(wrapper.getattr("answer").unwrap(), Value::from(vec![42]));
        assert!(wrapper.function("answer").is_err());
    }

    #[test]
    fn test_missing_attribute() {
        let err = ModuleWrapper::new(module()).getattr("nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Attribute);
        assert_eq!(
            err.to_string(),
            "attribute error: 'tools' object has no attribute 'nope'"
        );
    }

    #[test]
    fn test_function_attribute() {
        let echo = ModuleWrapper::new(module()).function("echo").unwrap();
        assert_eq!(echo.call1("hi").unwrap(), Value::string("hi"));
    }
}
