use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::runner::ds::error::{ObjectError, ObjectResult};
use crate::runner::ds::value::{Kwargs, Value};
use crate::runner::object::instance::Instance;
use crate::runner::plugin::types::EvalContext;

/// The callable handed back by the template builder.
///
/// Calling it never allocates: every call re-runs the initializer protocol
/// against the one instance built alongside it and returns that instance.
pub struct ConstructionProxy {
    instance: Rc<Instance>,
}
impl ConstructionProxy {
    pub fn new(instance: Rc<Instance>) -> Self {
        ConstructionProxy { instance }
    }

    pub fn instance(&self) -> &Rc<Instance> {
        &self.instance
    }

    pub fn name(&self) -> &str {
        self.instance.name()
    }

    pub fn type_name(&self) -> &'static str {
        "object"
    }

    pub fn hash(&self) -> ObjectResult<u64> {
        Err(ObjectError::NotHashableError(format!(
            "unhashable: {}",
            self.type_name()
        )))
    }

    pub fn call(&self, ctx: &mut EvalContext, args: Vec<Value>, kwargs: Kwargs) -> ObjectResult<Value> {
        let initialized = self.instance.initialize(ctx, args, kwargs)?;
        debug!(
            template = self.name(),
            instance = %self.instance.id(),
            initialized,
            "object: constructed"
        );
        Ok(Value::Instance(self.instance.clone()))
    }
}

impl fmt::Display for ConstructionProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}()", self.name())
    }
}
