#[cfg(test)]
pub mod arbitrary;

/// An interned identifier or operator spelling.
///
/// Tags double as AST leaves and as the head of operator applications,
/// which is why they are their own type rather than a bare `String`.
#[repr(transparent)]
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Tag(pub String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Tag(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<char> for Tag {
    fn from(c: char) -> Self {
        Tag(c.to_string())
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Tag(s.to_string())
    }
}

// The value produced by parsing any of the supported notations.
//
// A `Tuple` whose first element is a `Tag` is an operator application:
// arity 1 is a nullary call, 2 unary, 3 binary, anything larger a generic
// list headed by that tag. A 3-tuple headed by the cons tag is a single
// key-value pair; runs of those fold into a `Map`.
#[derive(Debug, Clone)]
pub enum Value {
    Tag(Tag),
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Tuple(Vec<Value>),
    Map(Vec<(Tag, Value)>),
}

impl Value {
    pub fn tag(name: impl Into<String>) -> Value {
        Value::Tag(Tag::new(name))
    }

    pub fn int(v: i64) -> Value {
        Value::Int(v)
    }

    pub fn float(v: f64) -> Value {
        Value::Float(v)
    }

    pub fn string(v: impl Into<String>) -> Value {
        Value::String(v.into())
    }

    pub fn boolean(v: bool) -> Value {
        Value::Bool(v)
    }

    pub fn tuple(elements: impl Into<Vec<Value>>) -> Value {
        Value::Tuple(elements.into())
    }

    pub fn empty() -> Value {
        Value::Tuple(vec![])
    }

    /// Builds a map with last-write-wins semantics for duplicate keys.
    /// The first insertion fixes the entry's position.
    pub fn map(entries: impl IntoIterator<Item = (Tag, Value)>) -> Value {
        let mut out: Vec<(Tag, Value)> = Vec::new();
        for (key, value) in entries {
            map_insert(&mut out, key, value);
        }
        Value::Map(out)
    }

    /// 0 for scalars and tags, the element count for tuples and maps.
    pub fn arity(&self) -> usize {
        match self {
            Value::Tuple(elements) => elements.len(),
            Value::Map(entries) => entries.len(),
            _ => 0,
        }
    }

    pub fn head(&self) -> Option<&Tag> {
        match self {
            Value::Tuple(elements) => match elements.first() {
                Some(Value::Tag(tag)) => Some(tag),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, Value::Tuple(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }
}

pub fn map_insert(entries: &mut Vec<(Tag, Value)>, key: Tag, value: Value) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => entries.push((key, value)),
    }
}

impl PartialEq for Value {
    fn eq(&self, rhs: &Value) -> bool {
        match (self, rhs) {
            (Value::Tag(l), Value::Tag(r)) => l == r,
            (Value::Int(l), Value::Int(r)) => l == r,
            // NaN compares equal to itself so parsed streams containing the
            // NaN literal still satisfy the round-trip property.
            (Value::Float(l), Value::Float(r)) => l == r || (l.is_nan() && r.is_nan()),
            (Value::String(l), Value::String(r)) => l == r,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::Tuple(l), Value::Tuple(r)) => l == r,
            (Value::Map(l), Value::Map(r)) => l == r,
            _ => false,
        }
    }
}

impl Eq for Value {}
