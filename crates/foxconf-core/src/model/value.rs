use indexmap::IndexMap;
use serde::Serialize;

use crate::vocabulary::Attribute;

/// Typed attribute value
///
/// `Undefined` is a value in its own right: an attribute can be absent from
/// an attribute map, present but undefined, or present and defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Undefined,
    String(String),
    /// Enumerated string, validated against its legal set when applied
    Enum(String),
    Boolean(bool),
    Properties(PropertyList),
}

impl Value {
    pub fn is_defined(&self) -> bool {
        !matches!(self, Value::Undefined)
    }

    /// String content of a `String` or `Enum` value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_properties(&self) -> Option<&PropertyList> {
        match self {
            Value::Properties(p) => Some(p),
            _ => None,
        }
    }

    /// Short name of the value's shape, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::String(_) => "string",
            Value::Enum(_) => "enum",
            Value::Boolean(_) => "boolean",
            Value::Properties(_) => "properties",
        }
    }
}

/// Ordered `name → value` list built from `property` elements
///
/// Document order is kept and is significant for equality. A repeated name
/// overwrites the earlier value in place.
#[derive(Debug, Clone, Default, Eq, Serialize)]
#[serde(transparent)]
pub struct PropertyList {
    entries: IndexMap<String, String>,
}

impl PropertyList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for PropertyList {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = PropertyList::new();
        for (k, v) in iter {
            list.insert(k, v);
        }
        list
    }
}

/// Three-way state of an attribute inside an [`Attributes`] map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Key not present at all
    Absent,
    /// Key present with [`Value::Undefined`]
    Undefined,
    /// Key present with a defined value
    Defined,
}

/// Attribute map of an operation or resource
///
/// Equality ignores key order; values compare with their own rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Attributes {
    values: IndexMap<Attribute, Value>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one
    pub fn insert(&mut self, attribute: Attribute, value: Value) -> Option<Value> {
        self.values.insert(attribute, value)
    }

    pub fn get(&self, attribute: Attribute) -> Option<&Value> {
        self.values.get(&attribute)
    }

    /// String content of a defined `String`/`Enum` attribute
    pub fn get_str(&self, attribute: Attribute) -> Option<&str> {
        self.get(attribute).and_then(Value::as_str)
    }

    /// Key present, defined or not
    pub fn has(&self, attribute: Attribute) -> bool {
        self.values.contains_key(&attribute)
    }

    /// Key present with a defined value
    pub fn has_defined(&self, attribute: Attribute) -> bool {
        self.get(attribute).is_some_and(Value::is_defined)
    }

    pub fn presence(&self, attribute: Attribute) -> Presence {
        match self.get(attribute) {
            None => Presence::Absent,
            Some(Value::Undefined) => Presence::Undefined,
            Some(_) => Presence::Defined,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &Value)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(Attribute, Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (Attribute, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
