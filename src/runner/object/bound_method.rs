use std::fmt;
use std::rc::Rc;

use crate::runner::ds::error::{ObjectError, ObjectResult};
use crate::runner::ds::value::{Kwargs, Value};
use crate::runner::object::instance::Instance;
use crate::runner::plugin::types::EvalContext;

/// A callable permanently paired with the instance that owns it.
pub struct BoundMethod {
    owner: Rc<Instance>,
    name: String,
    function: Value,
}
impl BoundMethod {
    pub fn new(owner: Rc<Instance>, name: impl Into<String>, function: Value) -> Self {
        BoundMethod {
            owner,
            name: name.into(),
            function,
        }
    }

    pub fn owner(&self) -> &Rc<Instance> {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn function(&self) -> &Value {
        &self.function
    }

    pub fn type_name(&self) -> &'static str {
        "symbol"
    }

    pub fn hash(&self) -> ObjectResult<u64> {
        Err(ObjectError::NotHashableError(format!(
            "unhashable: {}",
            self.type_name()
        )))
    }

    /// Calls the underlying function with the owner prepended to `args`.
    pub fn call(&self, ctx: &mut EvalContext, args: Vec<Value>, kwargs: Kwargs) -> ObjectResult<Value> {
        let mut input_args = args;
        let mut new_args = Vec::with_capacity(input_args.len() + 1);
        new_args.push(Value::Instance(self.owner.clone()));
        new_args.append(&mut input_args);
        self.function.call(ctx, new_args, kwargs)
    }
}

impl fmt::Display for BoundMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
