//! Host value model.
//!
//! The slice of the host's value system the object model talks to: the
//! [`value::Value`] enum, host functions, the plain `struct` aggregate and the
//! shared error type.

pub mod error;
pub mod function_object;
pub mod struct_object;
pub mod value;
