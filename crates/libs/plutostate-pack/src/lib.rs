//! MessagePack codec for notebook state frames.
//!
//! Frames are plain MessagePack with extension types layered on top:
//! typed numeric arrays travel as their raw element bytes under tags
//! `0x11..=0x18`, and dates travel as a little-endian `i64` millisecond count
//! under tag `0x0d`.

mod codec;
mod config;
mod error;
mod ext;
mod timestamp;
mod value;

pub use codec::{pack, unpack, Codec, Frames};
pub use config::CodecConfig;
pub use error::CodecError;
pub use ext::{
    EXT_DATE, EXT_FLOAT32_ARRAY, EXT_FLOAT64_ARRAY, EXT_INT16_ARRAY, EXT_INT32_ARRAY,
    EXT_INT8_ARRAY, EXT_UINT16_ARRAY, EXT_UINT32_ARRAY, EXT_UINT8_ARRAY,
};
pub use timestamp::{Timestamp, MAX_DATE_MILLIS, MAX_SAFE_INTEGER};
pub use value::{TypedArray, Value};
