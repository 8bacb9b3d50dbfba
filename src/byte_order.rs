//! Helpers for explicit wire byte-order conversions.
//!
//! The message format stores every multi-byte integer in little-endian
//! order. These helpers keep Clippy expectations scoped to the conversion
//! points so codec code can remain explicit about wire endianness without
//! repeating lint annotations.

/// Serialise a `u16` in wire byte order (little-endian).
///
/// # Examples
///
/// ```
/// use msgframe::byte_order::write_wire_u16;
///
/// assert_eq!(write_wire_u16(0x1234), [0x34, 0x12]);
/// ```
#[must_use]
pub fn write_wire_u16(value: u16) -> [u8; 2] {
    #[expect(
        clippy::little_endian_bytes,
        reason = "The message format is little-endian."
    )]
    value.to_le_bytes()
}

/// Parse a wire-order `u16`.
///
/// # Examples
///
/// ```
/// use msgframe::byte_order::read_wire_u16;
///
/// assert_eq!(read_wire_u16([0x34, 0x12]), 0x1234);
/// ```
#[must_use]
pub fn read_wire_u16(bytes: [u8; 2]) -> u16 {
    #[expect(
        clippy::little_endian_bytes,
        reason = "The message format is little-endian."
    )]
    u16::from_le_bytes(bytes)
}

/// Serialise an `i32` in wire byte order (little-endian).
///
/// # Examples
///
/// ```
/// use msgframe::byte_order::write_wire_i32;
///
/// assert_eq!(write_wire_i32(0x0102_0304), [0x04, 0x03, 0x02, 0x01]);
/// ```
#[must_use]
pub fn write_wire_i32(value: i32) -> [u8; 4] {
    #[expect(
        clippy::little_endian_bytes,
        reason = "The message format is little-endian."
    )]
    value.to_le_bytes()
}

/// Parse a wire-order `i32`.
///
/// # Examples
///
/// ```
/// use msgframe::byte_order::read_wire_i32;
///
/// assert_eq!(read_wire_i32([0xff, 0xff, 0xff, 0xff]), -1);
/// ```
#[must_use]
pub fn read_wire_i32(bytes: [u8; 4]) -> i32 {
    #[expect(
        clippy::little_endian_bytes,
        reason = "The message format is little-endian."
    )]
    i32::from_le_bytes(bytes)
}
