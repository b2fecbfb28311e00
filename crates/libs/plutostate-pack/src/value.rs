use crate::timestamp::Timestamp;

/// A structured value carried in a state frame.
///
/// Plain MessagePack kinds map one-to-one. `TypedArray`, `Buffer` and `Date`
/// travel as extension types.
///
/// Equality is structural except that `Integer` and `UInteger` holding the
/// same number are equal.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Boolean(bool),
    Integer(i64),
    /// Unsigned integer. Values up to `i64::MAX` decode as `Integer`.
    UInteger(u64),
    Float(f64),
    String(String),
    /// MessagePack `bin` data, as sent by peers that do not use the byte-array extension.
    Binary(Vec<u8>),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
    TypedArray(TypedArray),
    /// Untyped byte buffer. Encodes under the byte-array tag and decodes as
    /// [`TypedArray::Uint8`].
    Buffer(Vec<u8>),
    Date(Timestamp),
}

/// Fixed-width numeric array.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArray {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    /// Shares the wire tag of `Uint8` and decodes as `Uint8`.
    Uint8Clamped(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::UInteger(a), Self::UInteger(b)) => a == b,
            (Self::Integer(signed), Self::UInteger(unsigned))
            | (Self::UInteger(unsigned), Self::Integer(signed)) => {
                u64::try_from(*signed).is_ok_and(|signed| signed == *unsigned)
            }
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Binary(a), Self::Binary(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::TypedArray(a), Self::TypedArray(b)) => a == b,
            (Self::Buffer(a), Self::Buffer(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            _ => false,
        }
    }
}

impl TypedArray {
    pub fn len(&self) -> usize {
        match self {
            Self::Int8(items) => items.len(),
            Self::Uint8(items) | Self::Uint8Clamped(items) => items.len(),
            Self::Int16(items) => items.len(),
            Self::Uint16(items) => items.len(),
            Self::Int32(items) => items.len(),
            Self::Uint32(items) => items.len(),
            Self::Float32(items) => items.len(),
            Self::Float64(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element width in bytes.
    pub fn element_width(&self) -> usize {
        match self {
            Self::Int8(_) | Self::Uint8(_) | Self::Uint8Clamped(_) => 1,
            Self::Int16(_) | Self::Uint16(_) => 2,
            Self::Int32(_) | Self::Uint32(_) | Self::Float32(_) => 4,
            Self::Float64(_) => 8,
        }
    }

    /// Raw element bytes in native byte order.
    pub fn to_ne_bytes(&self) -> Vec<u8> {
        match self {
            Self::Int8(items) => elements_to_bytes(items, i8::to_ne_bytes),
            Self::Uint8(items) | Self::Uint8Clamped(items) => items.clone(),
            Self::Int16(items) => elements_to_bytes(items, i16::to_ne_bytes),
            Self::Uint16(items) => elements_to_bytes(items, u16::to_ne_bytes),
            Self::Int32(items) => elements_to_bytes(items, i32::to_ne_bytes),
            Self::Uint32(items) => elements_to_bytes(items, u32::to_ne_bytes),
            Self::Float32(items) => elements_to_bytes(items, f32::to_ne_bytes),
            Self::Float64(items) => elements_to_bytes(items, f64::to_ne_bytes),
        }
    }
}

fn elements_to_bytes<T: Copy, const N: usize>(items: &[T], to_bytes: fn(T) -> [u8; N]) -> Vec<u8> {
    let mut out = Vec::with_capacity(items.len() * N);
    for item in items {
        out.extend_from_slice(&to_bytes(*item));
    }
    out
}

impl Value {
    /// Looks up a string key in a map value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?.iter().find_map(|(entry_key, value)| {
            (entry_key.as_str() == Some(key)).then_some(value)
        })
    }

    /// Follows a path of string keys through nested maps.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(self, |value, key| value.get(key))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::UInteger(value) => i64::try_from(*value).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Integer(value) => u64::try_from(*value).ok(),
            Self::UInteger(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Integer(value) => Some(*value as f64),
            Self::UInteger(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Self::Map(entries) => Some(entries.as_slice()),
            _ => None,
        }
    }

    pub fn as_typed_array(&self) -> Option<&TypedArray> {
        match self {
            Self::TypedArray(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::Date(timestamp) => Some(*timestamp),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        i64::try_from(value).map(Self::Integer).unwrap_or(Self::UInteger(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Array(value)
    }
}

impl From<TypedArray> for Value {
    fn from(value: TypedArray) -> Self {
        Self::TypedArray(value)
    }
}

impl From<Timestamp> for Value {
    fn from(value: Timestamp) -> Self {
        Self::Date(value)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::Map(iter.into_iter().map(|(key, value)| (Self::String(key.into()), value)).collect())
    }
}
