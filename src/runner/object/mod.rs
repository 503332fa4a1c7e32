//! Class/instance semantics for a host without class syntax.
//!
//! - [`builder`]: the `object(name, ...)` builtin producing templates
//! - [`proxy`]: the callable template, running the initializer protocol
//! - [`instance`]: own members, attribute resolution, hooks, freezing
//! - [`delegate`]: the ordered "super" chain behind every instance
//! - [`bound_method`]: callables paired with their owning instance
//! - [`reserved`]: `super`, `__init__`, `__str__`, `__bool__`

pub mod bound_method;
pub mod builder;
pub mod delegate;
pub mod instance;
pub mod proxy;
pub mod reserved;

pub use bound_method::BoundMethod;
pub use builder::{build, make_object};
pub use delegate::DelegateChain;
pub use instance::Instance;
pub use proxy::ConstructionProxy;
pub use reserved::ReservedName;
