//! # just-object - class/instance semantics for the `just` scripting host
//!
//! The host language has no class syntax. This crate adds a single builtin,
//! `object`, that turns a name plus a bag of callables and values into a
//! template. Calling the template runs the initializer protocol and yields an
//! instance with own members, a delegate ("super") chain, bound methods and
//! customizable text and truth conversion.
//!
//! ## Quick Start
//!
//! ```
//! use just_object::runner::ds::error::ObjectResult;
//! use just_object::runner::ds::value::{Kwargs, Value};
//! use just_object::runner::plugin::{EvalContext, ObjectConfig};
//!
//! fn init(_ctx: &mut EvalContext, args: Vec<Value>, _kwargs: Kwargs) -> ObjectResult<Value> {
//!     args[0].set_attr("greeting", args[1].clone())?;
//!     Ok(Value::None)
//! }
//!
//! let mut ctx = EvalContext::with_object_extension(ObjectConfig::default());
//! let init = Value::from_fn("__init__", init);
//!
//! let base = ctx
//!     .call_global("object", vec![Value::from("Base")], vec![("greeting".to_string(), Value::None)])
//!     .unwrap();
//! let sub = ctx
//!     .call_global("object", vec![Value::from("Sub"), base, init], vec![])
//!     .unwrap();
//!
//! let instance = sub.call(&mut ctx, vec![Value::from("hello")], vec![]).unwrap();
//! assert_eq!(instance.get_attr("greeting").unwrap(), Some(Value::from("hello")));
//! assert_eq!(instance.to_str(&mut ctx).unwrap(), "Sub(__init__, greeting)");
//! ```
//!
//! ## Resolution rules
//!
//! - Reads check `super`, then own members, then the delegate chain,
//!   first-added-first-checked.
//! - Writes overwrite an own member, else forward to the first delegate that
//!   already defines the name, else create an own member.
//! - `__str__` and `__bool__` hooks customize conversion; without them an
//!   instance renders as `Name(attr, ...)` and its truth comes from its
//!   delegates.
//!
//! ## Architecture
//!
//! - **[`runner::ds`]** - values, errors, host functions and structs
//! - **[`runner::object`]** - builder, instances, delegate chains, bound methods
//! - **[`runner::plugin`]** - evaluation context, super-global scope, configuration

pub mod runner;
