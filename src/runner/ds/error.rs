use std::fmt;

pub type ObjectResult<T> = Result<T, ObjectError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectError {
    ArgumentError(String),
    AttributeError(String),
    NotCallableError(String),
    NotHashableError(String),
    SetFieldError(String),
    FrozenError(String),
    DelegateCycleError(String),
    DelegateDepthError(String),
    NameError(String),
    /// Raised by host callables and hook bodies. Passed through untouched.
    EvalError(String),
}
impl ObjectError {
    pub fn kind(&self) -> &'static str {
        match self {
            ObjectError::ArgumentError(_) => "ArgumentError",
            ObjectError::AttributeError(_) => "AttributeError",
            ObjectError::NotCallableError(_) => "NotCallableError",
            ObjectError::NotHashableError(_) => "NotHashableError",
            ObjectError::SetFieldError(_) => "SetFieldError",
            ObjectError::FrozenError(_) => "FrozenError",
            ObjectError::DelegateCycleError(_) => "DelegateCycleError",
            ObjectError::DelegateDepthError(_) => "DelegateDepthError",
            ObjectError::NameError(_) => "NameError",
            ObjectError::EvalError(_) => "EvalError",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ObjectError::ArgumentError(m)
            | ObjectError::AttributeError(m)
            | ObjectError::NotCallableError(m)
            | ObjectError::NotHashableError(m)
            | ObjectError::SetFieldError(m)
            | ObjectError::FrozenError(m)
            | ObjectError::DelegateCycleError(m)
            | ObjectError::DelegateDepthError(m)
            | ObjectError::NameError(m)
            | ObjectError::EvalError(m) => m,
        }
    }
}
impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl std::error::Error for ObjectError {}
