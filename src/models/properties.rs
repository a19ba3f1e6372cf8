use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// A custom property value. Only strings and numbers are accepted by the collector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A floating point value. Non-finite values are written as strings, since JSON has no
    /// representation for them.
    #[serde(serialize_with = "serialize_float")]
    Float(f64),
}

fn serialize_float<S>(v: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if v.is_finite() {
        serializer.serialize_f64(*v)
    } else {
        serializer.collect_str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Integer(i64::from(v))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

// Values outside the i64 range become floats.
macro_rules! impl_from_wide_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    match i64::try_from(v) {
                        Ok(v) => Value::Integer(v),
                        Err(_) => Value::Float(v as f64),
                    }
                }
            }
        )*
    };
}

impl_from_wide_integer!(u64, usize, isize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        f64::from(v).into()
    }
}

/// `NaN` and infinities are stored as [`Value::String`] (`"NaN"`, `"inf"`, `"-inf"`).
impl From<f64> for Value {
    fn from(v: f64) -> Self {
        if v.is_finite() {
            Value::Float(v)
        } else {
            Value::String(v.to_string())
        }
    }
}

/// Custom properties attached to an event.
///
/// ```
/// use aptabase::Properties;
///
/// let props = Properties::new()
///     .insert("screen", "settings")
///     .insert("count", 3)
///     .insert("duration", 1.5);
/// assert_eq!(3, props.len());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, Value>);

impl Properties {
    /// Create an empty set of properties.
    pub fn new() -> Self {
        Properties(BTreeMap::new())
    }

    /// Add a property. An existing property with the same key is replaced.
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Get a property by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no properties.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Properties(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
