use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::ext;
use crate::value::Value;

/// Packs and unpacks state frames.
///
/// A `Codec` only carries its immutable [`CodecConfig`], so one instance can
/// be shared freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn pack(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        let wire = self.encode_wire(value)?;
        let mut out = Vec::new();
        rmpv::encode::write_value(&mut out, &wire)
            .map_err(|err| CodecError::Encode(err.to_string()))?;
        Ok(out)
    }

    /// Decodes the first frame in `bytes`. Anything after it is ignored.
    pub fn unpack(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        let mut cursor = bytes;
        let value = self.read_frame(&mut cursor)?;
        if !cursor.is_empty() {
            log::debug!("ignoring {} trailing bytes after frame", cursor.len());
        }
        Ok(value)
    }

    /// Iterates over back-to-back frames in `bytes`.
    pub fn frames<'a>(&self, bytes: &'a [u8]) -> Frames<'a> {
        Frames { codec: *self, remaining: bytes, failed: false }
    }

    fn read_frame(&self, cursor: &mut &[u8]) -> Result<Value, CodecError> {
        let wire = rmpv::decode::read_value_with_max_depth(cursor, self.config.max_depth)
            .map_err(|err| CodecError::malformed(err.to_string()))?;
        self.decode_wire(wire)
    }

    fn encode_wire(&self, value: &Value) -> Result<rmpv::Value, CodecError> {
        if let Some(packed) = ext::pack_extension(value, &self.config) {
            let (tag, payload) = packed?;
            return Ok(rmpv::Value::Ext(tag, payload));
        }
        match value {
            Value::Nil => Ok(rmpv::Value::Nil),
            Value::Boolean(value) => Ok(rmpv::Value::Boolean(*value)),
            Value::Integer(value) => Ok(rmpv::Value::from(*value)),
            Value::UInteger(value) => Ok(rmpv::Value::from(*value)),
            Value::Float(value) => Ok(rmpv::Value::F64(*value)),
            Value::String(value) => Ok(rmpv::Value::String(value.as_str().into())),
            Value::Binary(bytes) => Ok(rmpv::Value::Binary(bytes.clone())),
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.encode_wire(item)?);
                }
                Ok(rmpv::Value::Array(out))
            }
            Value::Map(entries) => {
                let mut out = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    out.push((self.encode_wire(key)?, self.encode_wire(value)?));
                }
                Ok(rmpv::Value::Map(out))
            }
            Value::TypedArray(_) | Value::Buffer(_) | Value::Date(_) => {
                Err(CodecError::Encode("no extension rule for value".into()))
            }
        }
    }

    fn decode_wire(&self, wire: rmpv::Value) -> Result<Value, CodecError> {
        match wire {
            rmpv::Value::Nil => Ok(Value::Nil),
            rmpv::Value::Boolean(value) => Ok(Value::Boolean(value)),
            rmpv::Value::Integer(value) => value
                .as_i64()
                .map(Value::Integer)
                .or_else(|| value.as_u64().map(Value::UInteger))
                .ok_or_else(|| CodecError::malformed("integer out of range")),
            rmpv::Value::F32(value) => Ok(Value::Float(f64::from(value))),
            rmpv::Value::F64(value) => Ok(Value::Float(value)),
            rmpv::Value::String(text) => {
                Ok(Value::String(String::from_utf8_lossy(text.as_bytes()).into_owned()))
            }
            rmpv::Value::Binary(bytes) => Ok(Value::Binary(bytes)),
            rmpv::Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.decode_wire(item)?);
                }
                Ok(Value::Array(out))
            }
            rmpv::Value::Map(entries) => {
                let mut out = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    out.push((self.decode_wire(key)?, self.decode_wire(value)?));
                }
                Ok(Value::Map(out))
            }
            rmpv::Value::Ext(tag, payload) => ext::unpack_extension(tag, &payload, &self.config),
        }
    }
}

/// Iterator over consecutive frames in one buffer.
///
/// Yields each decoded frame in order and stops after the first error.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    codec: Codec,
    remaining: &'a [u8],
    failed: bool,
}

impl<'a> Frames<'a> {
    /// Bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        self.remaining
    }
}

impl Iterator for Frames<'_> {
    type Item = Result<Value, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining.is_empty() {
            return None;
        }
        let frame = self.codec.read_frame(&mut self.remaining);
        self.failed = frame.is_err();
        Some(frame)
    }
}

/// Packs `value` with the default configuration.
pub fn pack(value: &Value) -> Result<Vec<u8>, CodecError> {
    Codec::default().pack(value)
}

/// Unpacks one frame with the default configuration.
pub fn unpack(bytes: &[u8]) -> Result<Value, CodecError> {
    Codec::default().unpack(bytes)
}
