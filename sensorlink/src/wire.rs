//! Fixed-layout codec for sensor records.
//!
//! Every record kind shares one 8-byte wire form: bytes [0, 4) carry the
//! IEEE-754 value and bytes [4, 8) the unsigned 32-bit timestamp, both
//! little-endian. The original format relied on the platform's native byte
//! order with no format tag; fixing little-endian keeps the layout valid
//! between peers regardless of host order.
//!
//! Decoding never fails: buffers shorter than [`SIZE`] yield a zeroed
//! [`Reading`], and bytes past index [`SIZE`] are ignored.

use crate::sensor::Reading;

/// Size of an encoded sensor record, in bytes.
pub const SIZE: usize = 8;

/// Encodes a [`Reading`] into its 8-byte wire form.
///
/// # Examples
///
/// ```rust
/// use sensorlink::{sensor::Reading, wire};
///
/// let reading = Reading::new(85.5, 12345);
/// assert_eq!(wire::decode(&wire::encode(&reading)), reading);
/// ```
#[must_use]
pub fn encode(reading: &Reading) -> [u8; SIZE] {
    let mut buffer = [0u8; SIZE];
    buffer[..4].copy_from_slice(&reading.value.to_le_bytes());
    buffer[4..].copy_from_slice(&reading.timestamp.to_le_bytes());
    buffer
}

/// Decodes a [`Reading`] from a byte buffer.
///
/// Buffers shorter than [`SIZE`] yield a zeroed reading (value 0.0,
/// timestamp 0); this is the defined fallback for insufficient data, not an
/// error signal. Bytes beyond index [`SIZE`] are ignored.
#[must_use]
pub fn decode(buffer: &[u8]) -> Reading {
    let Some((value, rest)) = buffer.split_first_chunk::<4>() else {
        return Reading::default();
    };
    let Some((timestamp, _)) = rest.split_first_chunk::<4>() else {
        return Reading::default();
    };
    Reading {
        value: f32::from_le_bytes(*value),
        timestamp: u32::from_le_bytes(*timestamp),
    }
}
