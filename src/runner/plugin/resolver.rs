//! Plugin resolver trait for lazy resolution of super-global builtins.
//!
//! Resolvers provide values such as the `object` builtin. A value is only
//! materialized when a name lookup actually reaches it.

use crate::runner::ds::error::ObjectResult;
use crate::runner::ds::value::Value;
use crate::runner::plugin::types::EvalContext;

/// A resolver that can provide named builtins on demand.
///
/// Resolvers are queried in registration order when a name lookup reaches the
/// super-global scope. The first resolver that claims a name wins.
pub trait PluginResolver {
    /// Does this resolver provide a binding with the given name?
    ///
    /// Must not materialize the value.
    fn has_binding(&self, name: &str) -> bool;

    /// Materialize the value for the given name.
    ///
    /// Called only after `has_binding` returns `true`. The result is cached by
    /// the super-global environment. `ctx` may be used to look up other names.
    fn resolve(&self, name: &str, ctx: &mut EvalContext) -> ObjectResult<Value>;

    /// Human-readable name for this resolver.
    fn name(&self) -> &str;
}
