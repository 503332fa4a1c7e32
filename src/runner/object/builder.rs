//! The `object` builtin.
//!
//! ```text
//! object(name, *positional, **keyword) -> template
//! ```
//!
//! - `name` is a required, non-empty string.
//! - Positional callables become own bound methods under their declared name.
//! - Positional templates, instances and structs are mixed in as delegates,
//!   left to right.
//! - Keyword callables become bound methods under the keyword; any other
//!   keyword value, templates included, is stored as is.
//!
//! Building only registers members. No user code runs until the returned
//! template is called.

use std::rc::Rc;

use tracing::debug;

use crate::runner::ds::error::{ObjectError, ObjectResult};
use crate::runner::ds::value::{Kwargs, Value};
use crate::runner::object::bound_method::BoundMethod;
use crate::runner::object::instance::Instance;
use crate::runner::object::proxy::ConstructionProxy;
use crate::runner::plugin::config::ObjectConfig;
use crate::runner::plugin::types::EvalContext;

/// Host entry point, registered as a native builtin.
pub fn make_object(ctx: &mut EvalContext, args: Vec<Value>, kwargs: Kwargs) -> ObjectResult<Value> {
    build(ctx.object_config(), args, kwargs)
}

pub fn build(config: &ObjectConfig, args: Vec<Value>, kwargs: Kwargs) -> ObjectResult<Value> {
    let builtin = config.builtin_name.as_str();
    let mut args = args.into_iter();
    let name = match args.next() {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        Some(Value::String(_)) => {
            return Err(ObjectError::ArgumentError(format!(
                "{}: name must not be empty",
                builtin
            )))
        }
        Some(other) => {
            return Err(ObjectError::ArgumentError(format!(
                "{}: for parameter name: got {}, want string",
                builtin,
                other.type_name()
            )))
        }
        None => {
            return Err(ObjectError::ArgumentError(format!(
                "{}: missing argument for name",
                builtin
            )))
        }
    };

    let instance = Rc::new(Instance::new(name, config.max_delegate_depth));
    for arg in args {
        match arg {
            Value::Template(_) | Value::Instance(_) | Value::Struct(_) => instance.mix_in(arg)?,
            Value::Function(_) | Value::Method(_) => {
                let member = declared_name(&arg).to_string();
                if member.is_empty() {
                    return Err(ObjectError::ArgumentError(format!(
                        "{}: positional callable has no name",
                        builtin
                    )));
                }
                add_member(builtin, &instance, member, arg)?;
            }
            other => {
                return Err(ObjectError::ArgumentError(format!(
                    "{}: got {}, want a callable or a value with attributes",
                    builtin,
                    other.type_name()
                )))
            }
        }
    }
    for (key, value) in kwargs {
        add_member(builtin, &instance, key, value)?;
    }

    debug!(
        template = instance.name(),
        instance = %instance.id(),
        members = instance.own_member_names().len(),
        delegates = instance.delegate_snapshot().len(),
        "object: built template"
    );
    Ok(Value::Template(Rc::new(ConstructionProxy::new(instance))))
}

fn declared_name(callable: &Value) -> &str {
    match callable {
        Value::Function(f) => f.name(),
        Value::Method(m) => m.name(),
        _ => "",
    }
}

fn add_member(builtin: &str, instance: &Rc<Instance>, name: String, value: Value) -> ObjectResult<()> {
    if instance.own_member(&name).is_some() {
        return Err(ObjectError::ArgumentError(format!(
            "{}: duplicate member {}",
            builtin, name
        )));
    }
    let value = match value {
        Value::Function(_) | Value::Method(_) => {
            Value::Method(Rc::new(BoundMethod::new(instance.clone(), name.clone(), value)))
        }
        other => other,
    };
    instance.define_member(name, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(name: &str) -> Value {
        Value::from_fn(name, |_ctx, _args, _kwargs| Ok(Value::None))
    }

    #[test]
    fn test_build_registers_members() {
        let config = ObjectConfig::default();
        let template = build(
            &config,
            vec![Value::from("Point"), noop("norm")],
            vec![("x".to_string(), Value::from(1)), ("scale".to_string(), noop("anything"))],
        )
        .unwrap();

        let instance = template.as_instance().unwrap().clone();
        assert_eq!(instance.name(), "Point");
        assert_eq!(
            instance.own_member_names(),
            vec!["norm".to_string(), "scale".to_string(), "x".to_string()]
        );
        match instance.own_member("scale") {
            Some(Value::Method(m)) => {
                assert_eq!(m.name(), "scale");
                assert!(Rc::ptr_eq(m.owner(), &instance));
            }
            other => panic!("expected a bound method, got {:?}", other),
        }
        assert_eq!(instance.own_member("x"), Some(Value::from(1)));
    }

    #[test]
    fn test_build_requires_a_usable_name() {
        let config = ObjectConfig::default();
        for args in vec![vec![], vec![Value::from(3)], vec![Value::from("  ")]] {
            match build(&config, args, vec![]) {
                Err(ObjectError::ArgumentError(_)) => {}
                other => panic!("expected ArgumentError, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_build_rejects_plain_positional_values() {
        let config = ObjectConfig::default();
        let result = build(&config, vec![Value::from("A"), Value::from(1)], vec![]);
        assert!(matches!(result, Err(ObjectError::ArgumentError(_))));
    }

    #[test]
    fn test_build_rejects_duplicate_members() {
        let config = ObjectConfig::default();
        let result = build(
            &config,
            vec![Value::from("A"), noop("run")],
            vec![("run".to_string(), Value::from(1))],
        );
        assert!(matches!(result, Err(ObjectError::ArgumentError(_))));
    }

    #[test]
    fn test_keyword_template_is_stored_verbatim() {
        let config = ObjectConfig::default();
        let inner = build(&config, vec![Value::from("Inner")], vec![]).unwrap();
        let outer = build(
            &config,
            vec![Value::from("Outer")],
            vec![("inner".to_string(), inner.clone())],
        )
        .unwrap();
        let outer = outer.as_instance().unwrap();
        assert_eq!(outer.own_member("inner"), Some(inner));
        assert!(!outer.has_delegate());
    }
}
