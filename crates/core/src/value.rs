use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Mapping node of the settings tree
pub type SettingMap = BTreeMap<String, SettingValue>;

/// A dynamically typed settings value.
///
/// The root of a settings tree is always a `Mapping` whose entries are
/// categories; categories are themselves mappings of leaf settings by
/// convention, and leaves may nest further mappings to any depth.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SettingValue {
    /// Absent / unsupported value
    #[default]
    Null,
    Bool(bool),
    Integer(i32),
    Float(f32),
    String(String),
    Mapping(SettingMap),
}

impl SettingValue {
    pub fn empty_mapping() -> Self {
        SettingValue::Mapping(SettingMap::new())
    }

    /// Build a mapping from `(key, value)` pairs
    pub fn mapping<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<SettingValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        SettingValue::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SettingValue::Null)
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, SettingValue::Mapping(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            SettingValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Floats, with integers widened
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            SettingValue::Float(f) => Some(*f),
            SettingValue::Integer(i) => Some(*i as f32),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&SettingMap> {
        match self {
            SettingValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut SettingMap> {
        match self {
            SettingValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the variant, for log lines
    pub fn type_name(&self) -> &'static str {
        match self {
            SettingValue::Null => "null",
            SettingValue::Bool(_) => "bool",
            SettingValue::Integer(_) => "integer",
            SettingValue::Float(_) => "float",
            SettingValue::String(_) => "string",
            SettingValue::Mapping(_) => "mapping",
        }
    }
}

impl Serialize for SettingValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SettingValue::Null => serializer.serialize_unit(),
            SettingValue::Bool(b) => serializer.serialize_bool(*b),
            SettingValue::Integer(i) => serializer.serialize_i32(*i),
            SettingValue::Float(f) => serializer.serialize_f32(*f),
            SettingValue::String(s) => serializer.serialize_str(s),
            SettingValue::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

/// Parsed JSON into the value model.
///
/// Integral numbers inside the `i32` range become `Integer`, every other
/// number becomes `Float`. Arrays have no counterpart and become `Null`.
impl From<serde_json::Value> for SettingValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => SettingValue::Null,
            serde_json::Value::Bool(b) => SettingValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64().and_then(|i| i32::try_from(i).ok()) {
                Some(i) => SettingValue::Integer(i),
                None => n
                    .as_f64()
                    .map(|f| SettingValue::Float(f as f32))
                    .unwrap_or(SettingValue::Null),
            },
            serde_json::Value::String(s) => SettingValue::String(s),
            serde_json::Value::Array(_) => SettingValue::Null,
            serde_json::Value::Object(map) => SettingValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, SettingValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i32> for SettingValue {
    fn from(value: i32) -> Self {
        SettingValue::Integer(value)
    }
}

impl From<f32> for SettingValue {
    fn from(value: f32) -> Self {
        SettingValue::Float(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::String(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::String(value)
    }
}

impl From<SettingMap> for SettingValue {
    fn from(value: SettingMap) -> Self {
        SettingValue::Mapping(value)
    }
}

impl<T: Into<SettingValue>> From<Option<T>> for SettingValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SettingValue::Null)
    }
}

/// Scalars print bare (as a UI label would show them), mappings as JSON
impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Null => f.write_str("null"),
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Integer(i) => write!(f, "{}", i),
            SettingValue::Float(x) => write!(f, "{}", x),
            SettingValue::String(s) => f.write_str(s),
            SettingValue::Mapping(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}
