//! Resolver exposing the template builder as a super-global builtin.

use std::rc::Rc;

use crate::runner::ds::error::ObjectResult;
use crate::runner::ds::function_object::NativeFunction;
use crate::runner::ds::value::Value;
use crate::runner::object::builder::make_object;
use crate::runner::plugin::resolver::PluginResolver;
use crate::runner::plugin::types::EvalContext;

/// Provides the `object` builtin under a configurable name.
pub struct ObjectResolver {
    builtin_name: String,
}

impl ObjectResolver {
    pub fn new(builtin_name: impl Into<String>) -> Self {
        ObjectResolver {
            builtin_name: builtin_name.into(),
        }
    }

    pub fn builtin_name(&self) -> &str {
        &self.builtin_name
    }
}

impl PluginResolver for ObjectResolver {
    fn has_binding(&self, name: &str) -> bool {
        name == self.builtin_name
    }

    fn resolve(&self, name: &str, _ctx: &mut EvalContext) -> ObjectResult<Value> {
        Ok(Value::Function(Rc::new(NativeFunction::new(name, make_object))))
    }

    fn name(&self) -> &str {
        "object_resolver"
    }
}
