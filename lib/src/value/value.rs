use std::sync::Arc;
use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

use crate::url::UrlBuf;

pub type Dict<K = Arc<str>, V = Value> = BTreeMap<K, V>;

/// Represents any JSON-compatible value.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Num(Num),
    String(Arc<str>),
    Array(Arc<Vec<Value>>),
    Dict(Arc<Dict>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(&**s),
            _ => None
        }
    }

    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::Array(v) => Some(v.as_slice()),
            _ => None
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(v) => Some(&**v),
            _ => None
        }
    }

    /// `null` and the empty string are blank. Empty arrays are not.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Num(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Dict(_) => "dict",
        }
    }
}

macro_rules! impl_from_primitive {
    ($($T:ty),+ => $E:ident::$kind:ident) => {
        $(
            impl From<$T> for $E {
                fn from(value: $T) -> Self {
                    $E::$kind(value.into())
                }
            }
        )+
    };
}

impl_from_primitive!(bool => Value::Bool);
impl_from_primitive!(&str => Value::String);
impl_from_primitive!(String => Value::String);
impl_from_primitive!(Arc<str> => Value::String);
impl_from_primitive!(UrlBuf => Value::String);
impl_from_primitive!(Arc<Vec<Value>> => Value::Array);
impl_from_primitive!(Arc<Dict> => Value::Dict);
impl_from_primitive!(u8, u16, u32, u64 => Value::Num);
impl_from_primitive!(i8, i16, i32, i64 => Value::Num);
impl_from_primitive!(f64 => Value::Num);

impl From<()> for Value  {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T> From<Option<T>> for Value where Value: From<T> {
    fn from(value: Option<T>) -> Self {
        value.map(Value::from).unwrap_or(Value::Null)
    }
}

impl<T> From<Vec<T>> for Value where Value: From<T> {
    fn from(value: Vec<T>) -> Self {
        value.into_iter()
            .map(Value::from)
            .collect()
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        let vec = iter.into_iter().collect::<Vec<Value>>();
        Value::Array(Arc::new(vec))
    }
}

/// A JSON number: unsigned, signed, or floating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Num {
    UInt(u64),
    Int(i64),
    Float(f64),
}

macro_rules! impl_from_for_num {
    ($($T:ty: $V:ident),* $(,)?) => ($(
        impl From<$T> for Num {
            fn from(value: $T) -> Num {
                Num::$V(value.into())
            }
        }
    )*)
}

impl_from_for_num! {
    u8: UInt, u16: UInt, u32: UInt, u64: UInt,
    i8: Int, i16: Int, i32: Int, i64: Int,
    f64: Float,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_json_round_trip() {
        let json = r#"{"a":null,"b":true,"c":-3,"d":1.5,"e":"x","f":[1,"y"],"g":{"h":7}}"#;
        let value: Value = serde_json::from_str(json).unwrap();

        let dict = value.as_dict().unwrap();
        assert_eq!(dict["a"], Value::Null);
        assert_eq!(dict["b"], Value::from(true));
        assert_eq!(dict["c"], Value::from(-3i64));
        assert_eq!(dict["d"], Value::from(1.5));
        assert_eq!(dict["e"].as_str(), Some("x"));
        assert_eq!(dict["f"].as_slice().map(|s| s.len()), Some(2));
        assert_eq!(dict["g"].kind(), "dict");

        assert_eq!(serde_json::to_string(&value).unwrap(), json);
    }

    #[test]
    fn blankness() {
        assert!(Value::Null.is_blank());
        assert!(Value::from("").is_blank());
        assert!(!Value::from(" ").is_blank());
        assert!(!Value::from(Vec::<Value>::new()).is_blank());
        assert!(!Value::from(0u8).is_blank());
        assert!(!Value::from(false).is_blank());
    }
}
