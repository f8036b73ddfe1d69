//! Value type - nested data of heterogeneous shape
//!
//! `Value` is the input side of canonicalization: it can hold shapes that
//! have no natural hash or order (lists, sets, maps) next to plain scalars.

use std::fmt;

/// A nested value of any supported shape
///
/// `Tuple` is the hashable sequence and `List` the unhashable one. `Set`
/// members and `Map` keys are expected to be unique; use [`Value::set`] and
/// [`Value::map`] to build them with that guarantee.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Tuple(Vec<Value>),
    List(Vec<Value>),
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Build a tuple from anything convertible to values
    pub fn tuple<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Build a list from anything convertible to values
    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a set, dropping repeated members (first occurrence wins)
    pub fn set<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        let mut members: Vec<Value> = Vec::new();
        for item in items {
            let item = item.into();
            if !members.contains(&item) {
                members.push(item);
            }
        }
        Value::Set(members)
    }

    /// Build a map; a repeated key overwrites the earlier value in place
    pub fn map<K: Into<Value>, V: Into<Value>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        let mut out: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            let value = value.into();
            match out.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => out.push((key, value)),
            }
        }
        Value::Map(out)
    }

    /// Whether the value can be used as a set member or map key as-is
    pub fn is_hashable(&self) -> bool {
        match self {
            Value::List(_) | Value::Set(_) | Value::Map(_) => false,
            Value::Tuple(items) => items.iter().all(Value::is_hashable),
            _ => true,
        }
    }

    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::Tuple(_) => "tuple",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
        }
    }

    /// Convert to JSON
    ///
    /// Sequences and sets become arrays, bytes become arrays of numbers and
    /// non-string map keys are rendered with `Display`. Non-finite floats
    /// become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::None => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::Str(s) => Json::String(s.clone()),
            Value::Bytes(b) => Json::Array(b.iter().map(|byte| Json::from(*byte)).collect()),
            Value::Tuple(items) | Value::List(items) | Value::Set(items) => {
                Json::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(entries) => {
                let object = entries
                    .iter()
                    .map(|(k, v)| {
                        let key = match k {
                            Value::Str(s) => s.clone(),
                            other => other.to_string(),
                        };
                        (key, v.to_json())
                    })
                    .collect();
                Json::Object(object)
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::None,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::Str(s),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (Value::Str(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

/// Renders values in literal notation: `{'a': [1, (2,)]}`
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write_float(f, *x),
            Value::Str(s) => write_str(f, s),
            Value::Bytes(b) => write_bytes(f, b),
            Value::Tuple(items) => {
                write!(f, "(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::List(items) => {
                write!(f, "[")?;
                write_items(f, items)?;
                write!(f, "]")
            }
            Value::Set(items) if items.is_empty() => write!(f, "set()"),
            Value::Set(items) => {
                write!(f, "{{")?;
                write_items(f, items)?;
                write!(f, "}}")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        write!(f, "nan")
    } else if x.is_infinite() {
        write!(f, "{}", if x > 0.0 { "inf" } else { "-inf" })
    } else {
        write!(f, "{:?}", x)
    }
}

fn write_str(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "'")?;
    for c in s.chars() {
        match c {
            '\\' => write!(f, "\\\\")?,
            '\'' => write!(f, "\\'")?,
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "'")
}

fn write_bytes(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    write!(f, "b'")?;
    for &b in bytes {
        match b {
            b'\\' => write!(f, "\\\\")?,
            b'\'' => write!(f, "\\'")?,
            b'\n' => write!(f, "\\n")?,
            0x20..=0x7e => write!(f, "{}", b as char)?,
            _ => write!(f, "\\x{:02x}", b)?,
        }
    }
    write!(f, "'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_drops_repeats() {
        let set = Value::set([1, 2, 1, 3]);
        assert_eq!(
            set,
            Value::Set(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    #[test]
    fn test_map_last_write_wins() {
        let map = Value::map([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(
            map,
            Value::Map(vec![
                (Value::from("a"), Value::Int(3)),
                (Value::from("b"), Value::Int(2)),
            ])
        );
    }

    #[test]
    fn test_hashable_shapes() {
        assert!(Value::Int(1).is_hashable());
        assert!(Value::tuple([1, 2]).is_hashable());
        assert!(!Value::list([1, 2]).is_hashable());
        assert!(!Value::Tuple(vec![Value::list([1])]).is_hashable());
        assert!(!Value::map([("a", 1)]).is_hashable());
    }

    #[test]
    fn test_from_json() {
        let value = Value::from(json!({"a": [1, 2.5, null, true, "x"]}));
        assert_eq!(
            value,
            Value::map([(
                "a",
                Value::List(vec![
                    Value::Int(1),
                    Value::Float(2.5),
                    Value::None,
                    Value::Bool(true),
                    Value::from("x"),
                ])
            )])
        );
    }

    #[test]
    fn test_to_json() {
        let value = Value::map([
            (Value::from("a"), Value::tuple([1, 2])),
            (Value::Int(7), Value::Float(f64::NAN)),
        ]);
        assert_eq!(value.to_json(), json!({"a": [1, 2], "7": null}));
    }

    #[test]
    fn test_display_literal_notation() {
        assert_eq!(Value::map([("a", 1)]).to_string(), "{'a': 1}");
        assert_eq!(
            Value::map([("a", Value::map([("b", 1)]))]).to_string(),
            "{'a': {'b': 1}}"
        );
        assert_eq!(Value::tuple([1]).to_string(), "(1,)");
        assert_eq!(Value::Set(vec![]).to_string(), "set()");
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::from("it's").to_string(), "'it\\'s'");
        assert_eq!(Value::Bytes(vec![b'a', 0]).to_string(), "b'a\\x00'");
        assert_eq!(
            Value::list([Value::None, Value::Bool(false)]).to_string(),
            "[None, False]"
        );
    }
}
