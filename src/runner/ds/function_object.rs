use std::fmt;

use crate::runner::ds::error::ObjectResult;
use crate::runner::ds::value::{Kwargs, Value};
use crate::runner::plugin::types::{BuiltInFn, EvalContext, NativeFn};

/// A host-provided callable with a declared name.
///
/// Both compiled-in builtins and closures registered by the host end up here.
/// The declared name is what the template builder registers a positional
/// callable under.
pub struct NativeFunction {
    name: String,
    body: BuiltInFn,
}
impl NativeFunction {
    pub fn new(name: impl Into<String>, func: NativeFn) -> Self {
        NativeFunction {
            name: name.into(),
            body: BuiltInFn::Native(func),
        }
    }

    pub fn from_closure<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&mut EvalContext, Vec<Value>, Kwargs) -> ObjectResult<Value> + 'static,
    {
        NativeFunction {
            name: name.into(),
            body: BuiltInFn::Plugin(Box::new(func)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, ctx: &mut EvalContext, args: Vec<Value>, kwargs: Kwargs) -> ObjectResult<Value> {
        self.body.call(ctx, args, kwargs)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}
