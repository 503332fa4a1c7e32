//! Plugin architecture and super-global scope.
//!
//! The host's name lookup ends in the super-global scope, where builtins are
//! resolved on demand:
//!
//! ```text
//! Name lookup order:
//! 1. Global scope (EvalContext::set_binding)
//! 2. Super-global scope ← the `object` builtin lives here
//! ```
//!
//! - **[`PluginResolver`]**: trait for providing builtins lazily
//! - **[`SuperGlobalEnvironment`]**: resolvers plus a resolution cache
//! - **[`ObjectResolver`]**: provides the template builder
//! - **[`ObjectConfig`]**: builtin name and delegate depth bound, read from TOML
//! - **[`EvalContext`]**: the context threaded through every call
//!
//! ## Example
//!
//! ```
//! use just_object::runner::plugin::{EvalContext, ObjectConfig};
//! use just_object::runner::ds::value::Value;
//!
//! let config = ObjectConfig::parse("[object]\nbuiltin_name = \"klass\"\n").unwrap();
//! let mut ctx = EvalContext::with_object_extension(config);
//!
//! let point = ctx
//!     .call_global("klass", vec![Value::from("Point")], vec![("x".to_string(), Value::from(1))])
//!     .unwrap();
//! assert_eq!(point.get_attr("x").unwrap(), Some(Value::from(1)));
//! ```

pub mod config;
pub mod object_resolver;
pub mod resolver;
pub mod super_global;
pub mod types;

pub use config::{ObjectConfig, PluginError};
pub use object_resolver::ObjectResolver;
pub use resolver::PluginResolver;
pub use super_global::SuperGlobalEnvironment;
pub use types::{BuiltInFn, EvalContext, NativeFn};
