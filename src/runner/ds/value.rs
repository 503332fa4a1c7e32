use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::runner::ds::error::{ObjectError, ObjectResult};
use crate::runner::ds::function_object::NativeFunction;
use crate::runner::ds::struct_object::StructObject;
use crate::runner::object::bound_method::BoundMethod;
use crate::runner::object::instance::Instance;
use crate::runner::object::proxy::ConstructionProxy;
use crate::runner::plugin::types::EvalContext;

/// Keyword arguments in call order.
pub type Kwargs = Vec<(String, Value)>;

pub enum Value {
    None,
    Boolean(bool),
    Number(NumberType),
    String(String),
    Struct(Rc<StructObject>),
    Function(Rc<NativeFunction>),
    Instance(Rc<Instance>),
    Method(Rc<BoundMethod>),
    Template(Rc<ConstructionProxy>),
}
impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::None => Value::None,
            Value::Boolean(b) => Value::Boolean(*b),
            Value::Number(n) => Value::Number(n.clone()),
            Value::String(s) => Value::String(s.to_string()),
            Value::Struct(s) => Value::Struct(s.clone()),
            Value::Function(f) => Value::Function(f.clone()),
            Value::Instance(i) => Value::Instance(i.clone()),
            Value::Method(m) => Value::Method(m.clone()),
            Value::Template(p) => Value::Template(p.clone()),
        }
    }
}

impl Value {
    /// Wraps a closure as a host function value.
    pub fn from_fn<F>(name: &str, func: F) -> Self
    where
        F: Fn(&mut EvalContext, Vec<Value>, Kwargs) -> ObjectResult<Value> + 'static,
    {
        Value::Function(Rc::new(NativeFunction::from_closure(name, func)))
    }

    pub fn type_name(&self) -> String {
        match self {
            Value::None => "NoneType".to_string(),
            Value::Boolean(_) => "bool".to_string(),
            Value::Number(NumberType::Integer(_)) => "int".to_string(),
            Value::Number(NumberType::Float(_)) => "float".to_string(),
            Value::String(_) => "string".to_string(),
            Value::Struct(_) => "struct".to_string(),
            Value::Function(_) => "builtin_function_or_method".to_string(),
            Value::Instance(i) => i.type_name().to_string(),
            Value::Method(m) => m.type_name().to_string(),
            Value::Template(p) => p.type_name().to_string(),
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            Value::Function(_) | Value::Method(_) | Value::Template(_)
        )
    }

    /// Values that can sit in a delegate chain.
    pub fn has_attributes(&self) -> bool {
        matches!(
            self,
            Value::Struct(_) | Value::Instance(_) | Value::Template(_)
        )
    }

    /// The instance behind an instance or template value.
    pub fn as_instance(&self) -> Option<&Rc<Instance>> {
        match self {
            Value::Instance(i) => Some(i),
            Value::Template(p) => Some(p.instance()),
            _ => None,
        }
    }

    /// Attribute read. `Ok(None)` means the value has no such attribute.
    pub fn get_attr(&self, name: &str) -> ObjectResult<Option<Value>> {
        match self {
            Value::Struct(s) => Ok(s.field(name)),
            Value::Instance(_) | Value::Template(_) => match self.as_instance() {
                Some(i) => i.lookup(name),
                None => Ok(None),
            },
            _ => Err(ObjectError::AttributeError(format!(
                "{} has no .{} field or method",
                self.type_name(),
                name
            ))),
        }
    }

    pub fn has_attr(&self, name: &str) -> bool {
        matches!(self.get_attr(name), Ok(Some(_)))
    }

    pub fn set_attr(&self, name: &str, value: Value) -> ObjectResult<()> {
        match self.as_instance() {
            Some(i) => i.set(name, value),
            None => Err(ObjectError::SetFieldError(format!(
                "{} value does not support field assignment",
                self.type_name()
            ))),
        }
    }

    pub fn attr_names(&self) -> ObjectResult<Vec<String>> {
        match self {
            Value::Struct(s) => Ok(s.field_names()),
            Value::Instance(i) => i.attr_names(),
            Value::Template(p) => p.instance().attr_names(),
            _ => Ok(vec![]),
        }
    }

    pub fn call(&self, ctx: &mut EvalContext, args: Vec<Value>, kwargs: Kwargs) -> ObjectResult<Value> {
        match self {
            Value::Function(f) => f.call(ctx, args, kwargs),
            Value::Method(m) => m.call(ctx, args, kwargs),
            Value::Template(p) => p.call(ctx, args, kwargs),
            _ => Err(ObjectError::NotCallableError(format!(
                "invalid call of non-function ({})",
                self.type_name()
            ))),
        }
    }

    /// Text conversion, honouring `__str__` on instances.
    pub fn to_str(&self, ctx: &mut EvalContext) -> ObjectResult<String> {
        match self {
            Value::String(s) => Ok(s.to_string()),
            Value::Instance(i) => i.to_str(ctx),
            _ => Ok(self.to_string()),
        }
    }

    /// Truth value, honouring `__bool__` on instances.
    pub fn truth(&self, ctx: &mut EvalContext) -> ObjectResult<bool> {
        Ok(match self {
            Value::None => false,
            Value::Boolean(b) => *b,
            Value::Number(NumberType::Integer(n)) => *n != 0,
            Value::Number(NumberType::Float(n)) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Instance(i) => return i.truth(ctx),
            Value::Struct(_) | Value::Function(_) | Value::Method(_) | Value::Template(_) => true,
        })
    }

    pub fn hash(&self) -> ObjectResult<u64> {
        let mut hasher = DefaultHasher::new();
        match self {
            Value::None => 0u8.hash(&mut hasher),
            Value::Boolean(b) => b.hash(&mut hasher),
            Value::Number(NumberType::Integer(n)) => n.hash(&mut hasher),
            Value::Number(NumberType::Float(n)) => n.to_bits().hash(&mut hasher),
            Value::String(s) => s.hash(&mut hasher),
            Value::Function(f) => (Rc::as_ptr(f) as usize).hash(&mut hasher),
            Value::Instance(i) => return i.hash(),
            Value::Method(m) => return m.hash(),
            Value::Template(p) => return p.hash(),
            Value::Struct(_) => {
                return Err(ObjectError::NotHashableError(
                    "unhashable: struct".to_string(),
                ))
            }
        }
        Ok(hasher.finish())
    }

    pub fn freeze(&self) {
        match self {
            Value::Struct(s) => s.freeze(),
            Value::Instance(i) => i.freeze(),
            Value::Template(p) => p.instance().freeze(),
            _ => {}
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Boolean(true) => write!(f, "True"),
            Value::Boolean(false) => write!(f, "False"),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Struct(s) => write!(f, "{}", s),
            Value::Function(func) => write!(f, "<built-in function {}>", func.name()),
            Value::Instance(i) => match i.structural_str() {
                Ok(text) => write!(f, "{}", text),
                Err(_) => write!(f, "{}(...)", i.name()),
            },
            Value::Method(m) => write!(f, "{}", m),
            Value::Template(p) => write!(f, "{}", p),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "Value::None"),
            Value::Boolean(b) => write!(f, "Value::Boolean({})", b),
            Value::Number(n) => write!(f, "Value::Number({:?})", n),
            Value::String(s) => write!(f, "Value::String({:?})", s),
            Value::Struct(s) => write!(f, "Value::Struct({})", s),
            Value::Function(func) => write!(f, "Value::Function({})", func.name()),
            Value::Instance(i) => write!(f, "Value::Instance({} {})", i.name(), i.id()),
            Value::Method(m) => write!(f, "Value::Method({})", m.name()),
            Value::Template(p) => write!(f, "Value::Template({})", p.name()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Struct(a), Value::Struct(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            (Value::Method(a), Value::Method(b)) => Rc::ptr_eq(a, b),
            (Value::Template(a), Value::Template(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(NumberType::Integer(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(NumberType::Float(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NumberType {
    Integer(i64),
    Float(f64),
}
impl Display for NumberType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NumberType::Integer(i) => write!(f, "{}", i),
            NumberType::Float(nf) => write!(f, "{}", nf),
        }
    }
}
