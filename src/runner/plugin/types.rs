//! Core types shared by the host and the object extension.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::runner::ds::error::{ObjectError, ObjectResult};
use crate::runner::ds::value::{Kwargs, Value};
use crate::runner::plugin::config::ObjectConfig;
use crate::runner::plugin::object_resolver::ObjectResolver;
use crate::runner::plugin::resolver::PluginResolver;
use crate::runner::plugin::super_global::SuperGlobalEnvironment;

/// Shared handle to the super-global environment.
pub type SharedSuperGlobal = Rc<RefCell<SuperGlobalEnvironment>>;

/// Execution context passed to every native function, hook and initializer.
///
/// Name lookup checks `globals` first and falls back to the super-global
/// environment, where builtins are resolved lazily.
pub struct EvalContext {
    globals: HashMap<String, Value>,
    super_global: SharedSuperGlobal,
    object_config: ObjectConfig,
}

impl EvalContext {
    pub fn new() -> Self {
        EvalContext {
            globals: HashMap::new(),
            super_global: Rc::new(RefCell::new(SuperGlobalEnvironment::new())),
            object_config: ObjectConfig::default(),
        }
    }

    /// A context with the `object` builtin already installed.
    pub fn with_object_extension(config: ObjectConfig) -> Self {
        let mut ctx = EvalContext::new();
        ctx.install_object_extension(config);
        ctx
    }

    /// Makes the template builder available under `config.builtin_name`.
    pub fn install_object_extension(&mut self, config: ObjectConfig) {
        debug!(
            builtin = %config.builtin_name,
            max_delegate_depth = config.max_delegate_depth,
            "plugin: installing object extension"
        );
        self.add_resolver(Box::new(ObjectResolver::new(config.builtin_name.clone())));
        self.object_config = config;
    }

    /// Registers a resolver. Resolvers are queried in registration order.
    pub fn add_resolver(&mut self, resolver: Box<dyn PluginResolver>) {
        self.super_global.borrow_mut().add_resolver(resolver);
    }

    pub fn super_global(&self) -> &SharedSuperGlobal {
        &self.super_global
    }

    pub fn object_config(&self) -> &ObjectConfig {
        &self.object_config
    }

    /// Binds `name` in the global scope, shadowing any super-global builtin.
    pub fn set_binding(&mut self, name: impl Into<String>, value: Value) {
        self.globals.insert(name.into(), value);
    }

    pub fn has_binding(&self, name: &str) -> bool {
        self.globals.contains_key(name) || self.super_global.borrow().has_name(name)
    }

    pub fn get_binding(&mut self, name: &str) -> ObjectResult<Value> {
        if let Some(value) = self.globals.get(name) {
            return Ok(value.clone());
        }
        let super_global = self.super_global.clone();
        let cached = super_global.borrow().cached(name);
        if let Some(value) = cached {
            return Ok(value);
        }
        let owner = super_global.borrow().owner_of(name);
        match owner {
            Some((idx, resolver)) => {
                let value = resolver.resolve(name, self)?;
                super_global.borrow_mut().remember(name, idx, value.clone());
                Ok(value)
            }
            None => Err(ObjectError::NameError(format!("{} is not defined", name))),
        }
    }

    /// Looks up `name` and calls it.
    pub fn call_global(&mut self, name: &str, args: Vec<Value>, kwargs: Kwargs) -> ObjectResult<Value> {
        let callee = self.get_binding(name)?;
        callee.call(self, args, kwargs)
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Function signature for compiled-in builtins.
/// Receives the evaluation context, positional arguments and keyword arguments.
pub type NativeFn = fn(ctx: &mut EvalContext, args: Vec<Value>, kwargs: Kwargs) -> ObjectResult<Value>;

/// Built-in function - either compiled-in or host-provided.
pub enum BuiltInFn {
    /// Direct function pointer.
    Native(NativeFn),

    /// Host-provided closure.
    Plugin(Box<dyn Fn(&mut EvalContext, Vec<Value>, Kwargs) -> ObjectResult<Value>>),
}

impl BuiltInFn {
    pub fn call(&self, ctx: &mut EvalContext, args: Vec<Value>, kwargs: Kwargs) -> ObjectResult<Value> {
        match self {
            BuiltInFn::Native(f) => f(ctx, args, kwargs),
            BuiltInFn::Plugin(f) => f(ctx, args, kwargs),
        }
    }
}
