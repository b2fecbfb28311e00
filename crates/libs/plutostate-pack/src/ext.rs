use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::timestamp::{Timestamp, MAX_DATE_MILLIS, MAX_SAFE_INTEGER};
use crate::value::{TypedArray, Value};

pub const EXT_DATE: i8 = 0x0d;
pub const EXT_INT8_ARRAY: i8 = 0x11;
pub const EXT_UINT8_ARRAY: i8 = 0x12;
pub const EXT_INT16_ARRAY: i8 = 0x13;
pub const EXT_UINT16_ARRAY: i8 = 0x14;
pub const EXT_INT32_ARRAY: i8 = 0x15;
pub const EXT_UINT32_ARRAY: i8 = 0x16;
pub const EXT_FLOAT32_ARRAY: i8 = 0x17;
pub const EXT_FLOAT64_ARRAY: i8 = 0x18;

const DATE_PAYLOAD_LEN: usize = 8;

type ExtMatcher = fn(&Value) -> bool;
type ExtPacker = fn(&Value, &CodecConfig) -> Result<Vec<u8>, CodecError>;
type ExtUnpacker = fn(&[u8], &CodecConfig) -> Result<Value, CodecError>;

struct PackRule {
    tag: i8,
    matches: ExtMatcher,
    pack: ExtPacker,
}

// Checked in order; the first matching rule encodes the value.
const PACK_RULES: [PackRule; 11] = [
    PackRule { tag: EXT_INT8_ARRAY, matches: is_int8_array, pack: pack_typed_array },
    PackRule { tag: EXT_UINT8_ARRAY, matches: is_uint8_array, pack: pack_typed_array },
    PackRule { tag: EXT_UINT8_ARRAY, matches: is_uint8_clamped_array, pack: pack_typed_array },
    PackRule { tag: EXT_UINT8_ARRAY, matches: is_buffer, pack: pack_buffer },
    PackRule { tag: EXT_INT16_ARRAY, matches: is_int16_array, pack: pack_typed_array },
    PackRule { tag: EXT_UINT16_ARRAY, matches: is_uint16_array, pack: pack_typed_array },
    PackRule { tag: EXT_INT32_ARRAY, matches: is_int32_array, pack: pack_typed_array },
    PackRule { tag: EXT_UINT32_ARRAY, matches: is_uint32_array, pack: pack_typed_array },
    PackRule { tag: EXT_FLOAT32_ARRAY, matches: is_float32_array, pack: pack_typed_array },
    PackRule { tag: EXT_FLOAT64_ARRAY, matches: is_float64_array, pack: pack_typed_array },
    PackRule { tag: EXT_DATE, matches: is_date, pack: pack_date },
];

const UNPACK_RULES: [(i8, ExtUnpacker); 9] = [
    (EXT_DATE, unpack_date),
    (EXT_INT8_ARRAY, unpack_int8_array),
    (EXT_UINT8_ARRAY, unpack_uint8_array),
    (EXT_INT16_ARRAY, unpack_int16_array),
    (EXT_UINT16_ARRAY, unpack_uint16_array),
    (EXT_INT32_ARRAY, unpack_int32_array),
    (EXT_UINT32_ARRAY, unpack_uint32_array),
    (EXT_FLOAT32_ARRAY, unpack_float32_array),
    (EXT_FLOAT64_ARRAY, unpack_float64_array),
];

/// Returns the extension tag and payload for `value`, or `None` when the value
/// is a plain MessagePack kind.
pub(crate) fn pack_extension(
    value: &Value,
    config: &CodecConfig,
) -> Option<Result<(i8, Vec<u8>), CodecError>> {
    let rule = PACK_RULES.iter().find(|rule| (rule.matches)(value))?;
    log::trace!("packing extension {:#04x}", rule.tag);
    Some((rule.pack)(value, config).map(|payload| (rule.tag, payload)))
}

pub(crate) fn unpack_extension(
    tag: i8,
    payload: &[u8],
    config: &CodecConfig,
) -> Result<Value, CodecError> {
    let (_, unpack) = UNPACK_RULES
        .iter()
        .find(|(rule_tag, _)| *rule_tag == tag)
        .ok_or(CodecError::UnknownExtensionTag(tag))?;
    log::trace!("unpacking extension {:#04x} ({} bytes)", tag, payload.len());
    unpack(payload, config)
}

fn is_int8_array(value: &Value) -> bool {
    matches!(value, Value::TypedArray(TypedArray::Int8(_)))
}

fn is_uint8_array(value: &Value) -> bool {
    matches!(value, Value::TypedArray(TypedArray::Uint8(_)))
}

fn is_int16_array(value: &Value) -> bool {
    matches!(value, Value::TypedArray(TypedArray::Int16(_)))
}

fn is_uint16_array(value: &Value) -> bool {
    matches!(value, Value::TypedArray(TypedArray::Uint16(_)))
}

fn is_int32_array(value: &Value) -> bool {
    matches!(value, Value::TypedArray(TypedArray::Int32(_)))
}

fn is_uint32_array(value: &Value) -> bool {
    matches!(value, Value::TypedArray(TypedArray::Uint32(_)))
}

fn is_float32_array(value: &Value) -> bool {
    matches!(value, Value::TypedArray(TypedArray::Float32(_)))
}

fn is_float64_array(value: &Value) -> bool {
    matches!(value, Value::TypedArray(TypedArray::Float64(_)))
}

fn is_uint8_clamped_array(value: &Value) -> bool {
    matches!(value, Value::TypedArray(TypedArray::Uint8Clamped(_)))
}

fn is_buffer(value: &Value) -> bool {
    matches!(value, Value::Buffer(_))
}

fn is_date(value: &Value) -> bool {
    matches!(value, Value::Date(_))
}

fn pack_typed_array(value: &Value, _config: &CodecConfig) -> Result<Vec<u8>, CodecError> {
    match value {
        Value::TypedArray(array) => Ok(array.to_ne_bytes()),
        _ => Err(CodecError::Encode("typed array rule applied to another kind".into())),
    }
}

fn pack_buffer(value: &Value, _config: &CodecConfig) -> Result<Vec<u8>, CodecError> {
    match value {
        Value::Buffer(bytes) => Ok(bytes.clone()),
        _ => Err(CodecError::Encode("buffer rule applied to another kind".into())),
    }
}

fn pack_date(value: &Value, config: &CodecConfig) -> Result<Vec<u8>, CodecError> {
    let Value::Date(timestamp) = value else {
        return Err(CodecError::Encode("date rule applied to another kind".into()));
    };
    if !config.int64_encode {
        return Err(CodecError::UnsupportedCapability("64-bit integer encoding"));
    }
    // `Timestamp::Millis` can be built directly, so recheck the calendar range.
    let millis = timestamp
        .millis()
        .filter(|millis| millis.unsigned_abs() <= MAX_DATE_MILLIS.unsigned_abs())
        .ok_or(CodecError::InvalidDate)?;
    Ok(millis.to_le_bytes().to_vec())
}

fn unpack_date(payload: &[u8], config: &CodecConfig) -> Result<Value, CodecError> {
    if !config.int64_decode {
        log::debug!("64-bit integer decoding unavailable; yielding invalid date");
        return Ok(Value::Date(Timestamp::Invalid));
    }
    let raw: [u8; DATE_PAYLOAD_LEN] = payload.try_into().map_err(|_| {
        CodecError::malformed(format!(
            "date payload must be {DATE_PAYLOAD_LEN} bytes, got {}",
            payload.len()
        ))
    })?;
    let millis = i64::from_le_bytes(raw);
    if millis > MAX_SAFE_INTEGER {
        return Err(CodecError::DateRange(millis));
    }
    Ok(Value::Date(Timestamp::from_millis(millis)))
}

fn elements_from_bytes<T, const N: usize>(
    tag: i8,
    payload: &[u8],
    from_bytes: fn([u8; N]) -> T,
) -> Result<Vec<T>, CodecError> {
    if payload.len() % N != 0 {
        return Err(CodecError::MisalignedPayload { tag, len: payload.len(), width: N });
    }
    Ok(payload
        .chunks_exact(N)
        .map(|chunk| {
            let mut raw = [0u8; N];
            raw.copy_from_slice(chunk);
            from_bytes(raw)
        })
        .collect())
}

fn unpack_int8_array(payload: &[u8], _config: &CodecConfig) -> Result<Value, CodecError> {
    let items = elements_from_bytes(EXT_INT8_ARRAY, payload, i8::from_ne_bytes)?;
    Ok(Value::TypedArray(TypedArray::Int8(items)))
}

fn unpack_uint8_array(payload: &[u8], _config: &CodecConfig) -> Result<Value, CodecError> {
    Ok(Value::TypedArray(TypedArray::Uint8(payload.to_vec())))
}

fn unpack_int16_array(payload: &[u8], _config: &CodecConfig) -> Result<Value, CodecError> {
    let items = elements_from_bytes(EXT_INT16_ARRAY, payload, i16::from_ne_bytes)?;
    Ok(Value::TypedArray(TypedArray::Int16(items)))
}

fn unpack_uint16_array(payload: &[u8], _config: &CodecConfig) -> Result<Value, CodecError> {
    let items = elements_from_bytes(EXT_UINT16_ARRAY, payload, u16::from_ne_bytes)?;
    Ok(Value::TypedArray(TypedArray::Uint16(items)))
}

fn unpack_int32_array(payload: &[u8], _config: &CodecConfig) -> Result<Value, CodecError> {
    let items = elements_from_bytes(EXT_INT32_ARRAY, payload, i32::from_ne_bytes)?;
    Ok(Value::TypedArray(TypedArray::Int32(items)))
}

fn unpack_uint32_array(payload: &[u8], _config: &CodecConfig) -> Result<Value, CodecError> {
    let items = elements_from_bytes(EXT_UINT32_ARRAY, payload, u32::from_ne_bytes)?;
    Ok(Value::TypedArray(TypedArray::Uint32(items)))
}

fn unpack_float32_array(payload: &[u8], _config: &CodecConfig) -> Result<Value, CodecError> {
    let items = elements_from_bytes(EXT_FLOAT32_ARRAY, payload, f32::from_ne_bytes)?;
    Ok(Value::TypedArray(TypedArray::Float32(items)))
}

fn unpack_float64_array(payload: &[u8], _config: &CodecConfig) -> Result<Value, CodecError> {
    let items = elements_from_bytes(EXT_FLOAT64_ARRAY, payload, f64::from_ne_bytes)?;
    Ok(Value::TypedArray(TypedArray::Float64(items)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_of(value: Value) -> i8 {
        let packed = pack_extension(&value, &CodecConfig::default()).expect("extension kind");
        packed.expect("packs").0
    }

    #[test]
    fn byte_kinds_share_one_tag() {
        assert_eq!(tag_of(Value::TypedArray(TypedArray::Uint8(vec![1]))), EXT_UINT8_ARRAY);
        assert_eq!(tag_of(Value::TypedArray(TypedArray::Uint8Clamped(vec![1]))), EXT_UINT8_ARRAY);
        assert_eq!(tag_of(Value::Buffer(vec![1])), EXT_UINT8_ARRAY);
        assert_eq!(tag_of(Value::TypedArray(TypedArray::Int8(vec![1]))), EXT_INT8_ARRAY);
        assert_eq!(tag_of(Value::Date(Timestamp::Millis(0))), EXT_DATE);
    }

    #[test]
    fn plain_values_have_no_rule() {
        assert!(pack_extension(&Value::Integer(3), &CodecConfig::default()).is_none());
        assert!(pack_extension(&Value::Binary(vec![3]), &CodecConfig::default()).is_none());
    }

    #[test]
    fn every_unpack_tag_has_a_pack_rule() {
        for (tag, _) in UNPACK_RULES {
            assert!(PACK_RULES.iter().any(|rule| rule.tag == tag), "tag {tag:#04x}");
        }
    }

    #[test]
    fn date_payload_is_little_endian_millis() {
        let (_, payload) = pack_extension(
            &Value::Date(Timestamp::Millis(0x0102_0304)),
            &CodecConfig::default(),
        )
        .expect("extension kind")
        .expect("packs");
        assert_eq!(payload, vec![0x04, 0x03, 0x02, 0x01, 0, 0, 0, 0]);
    }

    #[test]
    fn out_of_calendar_date_does_not_pack() {
        let config = CodecConfig::default();
        for millis in [MAX_DATE_MILLIS + 1, -MAX_DATE_MILLIS - 1, i64::MAX, i64::MIN] {
            let value = Value::Date(Timestamp::Millis(millis));
            let err = pack_extension(&value, &config).expect("extension kind").unwrap_err();
            assert_eq!(err, CodecError::InvalidDate, "{millis}");
        }
        let edge = Value::Date(Timestamp::Millis(-MAX_DATE_MILLIS));
        assert!(pack_extension(&edge, &config).expect("extension kind").is_ok());
    }

    #[test]
    fn short_date_payload_is_malformed() {
        let err = unpack_extension(EXT_DATE, &[0; 4], &CodecConfig::default()).unwrap_err();
        assert!(matches!(err, CodecError::MalformedFrame(_)));
    }

    #[test]
    fn misaligned_payload_is_rejected() {
        let err = unpack_extension(EXT_INT32_ARRAY, &[0; 6], &CodecConfig::default()).unwrap_err();
        assert_eq!(err, CodecError::MisalignedPayload { tag: EXT_INT32_ARRAY, len: 6, width: 4 });
    }

    #[test]
    fn empty_payload_decodes_empty_array() {
        let value = unpack_extension(EXT_FLOAT64_ARRAY, &[], &CodecConfig::default()).unwrap();
        assert_eq!(value, Value::TypedArray(TypedArray::Float64(Vec::new())));
    }
}
