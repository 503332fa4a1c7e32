/// Attribute names the object model gives special meaning to.
///
/// Checked before any member lookup. There is no `__hash__` hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedName {
    Super,
    Init,
    Str,
    Bool,
}
impl ReservedName {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "super" => Some(ReservedName::Super),
            "__init__" => Some(ReservedName::Init),
            "__str__" => Some(ReservedName::Str),
            "__bool__" => Some(ReservedName::Bool),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ReservedName::Super => "super",
            ReservedName::Init => "__init__",
            ReservedName::Str => "__str__",
            ReservedName::Bool => "__bool__",
        }
    }

    /// Whether the name is a user-overridable hook.
    pub const fn is_hook(&self) -> bool {
        !matches!(self, ReservedName::Super)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_round_trip_names() {
        for reserved in &[
            ReservedName::Super,
            ReservedName::Init,
            ReservedName::Str,
            ReservedName::Bool,
        ] {
            assert_eq!(ReservedName::from_name(reserved.as_str()), Some(*reserved));
        }
    }

    #[test]
    fn test_reserved_rejects_other_names() {
        assert_eq!(ReservedName::from_name("__hash__"), None);
        assert_eq!(ReservedName::from_name("Super"), None);
        assert_eq!(ReservedName::from_name("init"), None);
        assert!(!ReservedName::Super.is_hook());
        assert!(ReservedName::Bool.is_hook());
    }
}
