use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;

use crate::runner::ds::value::Value;

/// The host's plain attribute-bearing aggregate.
///
/// Fields are fixed at creation: a struct can be read and enumerated, and can
/// serve as a delegate, but it rejects field assignment.
pub struct StructObject {
    fields: BTreeMap<String, Value>,
    frozen: Cell<bool>,
}
impl StructObject {
    pub fn new<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        StructObject {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            frozen: Cell::new(false),
        }
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.get()
    }

    pub fn freeze(&self) {
        if self.frozen.replace(true) {
            return;
        }
        for value in self.fields.values() {
            value.freeze();
        }
    }
}

impl fmt::Display for StructObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "struct({})",
            self.fields
                .iter()
                .map(|(k, v)| format!("{} = {}", k, v))
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_fields_are_sorted() {
        let s = StructObject::new(vec![("b", Value::from(2)), ("a", Value::from(1))]);
        assert_eq!(s.field_names(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(s.field("a"), Some(Value::from(1)));
        assert_eq!(s.field("c"), None);
        assert_eq!(s.to_string(), "struct(a = 1, b = 2)");
    }

    #[test]
    fn test_struct_freeze() {
        let s = StructObject::new(vec![("a", Value::from("x"))]);
        assert!(!s.is_frozen());
        s.freeze();
        assert!(s.is_frozen());
    }
}
