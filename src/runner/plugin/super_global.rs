//! Super-global environment, the bottom of the name lookup chain.
//!
//! Sits below the host's global scope and resolves builtins on first access.
//! Values are cached after the first resolution, so a builtin such as `object`
//! is materialized at most once per context.
//!
//! ```text
//! object("Point", ...)
//!      ↓
//! 1. Check globals → not found
//! 2. Check super-global cache → not found
//! 3. Query resolvers: ObjectResolver claims "object"
//! 4. Cache the value and the owning resolver
//! ```
//!
//! ## Example
//!
//! ```
//! use just_object::runner::plugin::super_global::SuperGlobalEnvironment;
//! use just_object::runner::plugin::resolver::PluginResolver;
//! use just_object::runner::plugin::types::EvalContext;
//! use just_object::runner::ds::error::ObjectResult;
//! use just_object::runner::ds::value::Value;
//!
//! struct Answer;
//!
//! impl PluginResolver for Answer {
//!     fn has_binding(&self, name: &str) -> bool {
//!         name == "answer"
//!     }
//!
//!     fn resolve(&self, _name: &str, _ctx: &mut EvalContext) -> ObjectResult<Value> {
//!         Ok(Value::from(42))
//!     }
//!
//!     fn name(&self) -> &str { "answer" }
//! }
//!
//! let mut sg = SuperGlobalEnvironment::new();
//! sg.add_resolver(Box::new(Answer));
//! assert!(sg.has_name("answer"));
//!
//! let mut ctx = EvalContext::new();
//! assert_eq!(sg.resolve_binding("answer", &mut ctx).unwrap(), Value::from(42));
//! ```

use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use crate::runner::ds::error::{ObjectError, ObjectResult};
use crate::runner::ds::value::Value;
use crate::runner::plugin::resolver::PluginResolver;
use crate::runner::plugin::types::EvalContext;

/// Lazily resolved, cached builtins.
///
/// Usually held behind [`SharedSuperGlobal`](super::types::SharedSuperGlobal)
/// inside an [`EvalContext`].
pub struct SuperGlobalEnvironment {
    /// Registered resolvers, queried in order.
    resolvers: Vec<Rc<dyn PluginResolver>>,
    /// Already-resolved bindings.
    cache: HashMap<String, Value>,
    /// Which resolver index owns which name.
    resolver_map: HashMap<String, usize>,
}

impl SuperGlobalEnvironment {
    pub fn new() -> Self {
        SuperGlobalEnvironment {
            resolvers: Vec::new(),
            cache: HashMap::new(),
            resolver_map: HashMap::new(),
        }
    }

    /// Register a resolver. Resolvers are queried in registration order.
    pub fn add_resolver(&mut self, resolver: Box<dyn PluginResolver>) {
        self.resolvers.push(Rc::from(resolver));
    }

    fn find_resolver_index(&self, name: &str) -> Option<usize> {
        if let Some(&idx) = self.resolver_map.get(name) {
            return Some(idx);
        }
        self.resolvers.iter().position(|r| r.has_binding(name))
    }

    /// Check if any resolver provides the given name.
    pub fn has_name(&self, name: &str) -> bool {
        self.cache.contains_key(name) || self.find_resolver_index(name).is_some()
    }

    pub fn cached(&self, name: &str) -> Option<Value> {
        self.cache.get(name).cloned()
    }

    /// The resolver owning `name` and its registration index.
    ///
    /// Callers run `resolve` on the returned handle after releasing their
    /// borrow of the environment.
    pub fn owner_of(&self, name: &str) -> Option<(usize, Rc<dyn PluginResolver>)> {
        self.find_resolver_index(name)
            .map(|idx| (idx, self.resolvers[idx].clone()))
    }

    /// Records a value produced by the resolver at `index`.
    pub fn remember(&mut self, name: &str, index: usize, value: Value) {
        trace!(name, resolver = self.resolvers[index].name(), "super_global: resolved");
        self.cache.insert(name.to_string(), value);
        self.resolver_map.insert(name.to_string(), index);
    }

    /// Resolve a name, caching the result.
    pub fn resolve_binding(&mut self, name: &str, ctx: &mut EvalContext) -> ObjectResult<Value> {
        if let Some(val) = self.cached(name) {
            return Ok(val);
        }

        match self.owner_of(name) {
            Some((idx, resolver)) => {
                let value = resolver.resolve(name, ctx)?;
                self.remember(name, idx, value.clone());
                Ok(value)
            }
            None => Err(ObjectError::NameError(format!("{} is not defined", name))),
        }
    }

    pub fn resolvers(&self) -> &[Rc<dyn PluginResolver>] {
        &self.resolvers
    }
}

impl Default for SuperGlobalEnvironment {
    fn default() -> Self {
        Self::new()
    }
}
