//! Binary message codec.
//!
//! A message is encoded as a one-byte header count, then each header as a
//! length-prefixed key and a length-prefixed value, then a signed 32-bit
//! payload length followed by the payload bytes. All multi-byte integers
//! are little-endian:
//!
//! ```text
//! [u8 count] ([u16 key_len][key] [u16 value_len][value]) * count [i32 payload_len][payload]
//! ```
//!
//! # Error Handling
//!
//! Decoding applies two layers of defence. Structural checks run while
//! reading: any string length above [`MAX_WIRE_STRING_LEN`] and any payload
//! length that is negative or above the configured ceiling is rejected
//! before the bytes are read, and short input is reported as a truncation.
//! These surface as [`CodecError`]. The assembled message is then checked
//! by [`validate`], whose failures surface as
//! [`ValidationError`](crate::validation::ValidationError). Encoding runs
//! [`validate`] first, so the writer only sees messages whose lengths fit
//! their fields.

use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    byte_order::{write_wire_i32, write_wire_u16},
    error::MessageError,
    limits::{LimitsError, MAX_WIRE_STRING_LEN, MessageLimits},
    message::{Headers, Message},
    validation::validate,
};

pub mod error;
mod reader;

pub use error::{CodecError, FramingError, WireField};
use reader::WireReader;

/// Bytes taken by the header count and payload length fields.
pub const FIXED_OVERHEAD: usize = 1 + 4;

/// Bytes taken by the two length prefixes of one header.
pub const HEADER_OVERHEAD: usize = 2 * 2;

/// Converts messages to and from their binary representation.
///
/// Implementations must be stateless between calls so a single instance
/// can serve concurrent callers.
pub trait BinaryCodec: Send + Sync {
    /// Validate and serialise `message`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Validation`] if the message breaks a
    /// configured limit, or [`MessageError::Codec`] if it cannot be written.
    fn encode(&self, message: &Message) -> Result<Bytes, MessageError>;

    /// Parse and validate a message from `data`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Codec`] for malformed framing, or
    /// [`MessageError::Validation`] if the parsed message breaks a
    /// configured limit.
    fn decode(&self, data: &[u8]) -> Result<Message, MessageError>;
}

/// Codec for the message wire format, bound to a set of [`MessageLimits`].
///
/// # Examples
///
/// ```
/// use msgframe::{
///     codec::{BinaryCodec, MessageCodec},
///     limits::MessageLimits,
///     message::Message,
/// };
///
/// let codec = MessageCodec::new(MessageLimits::default()).expect("default limits are valid");
/// let msg = Message::new("hello").with_header("Type", "json");
/// let bytes = codec.encode(&msg).expect("encode");
/// assert_eq!(codec.decode(&bytes).expect("decode"), msg);
/// ```
#[derive(Clone, Debug)]
pub struct MessageCodec {
    limits: MessageLimits,
}

impl MessageCodec {
    /// Construct a codec enforcing `limits`.
    ///
    /// # Errors
    ///
    /// Returns a [`LimitsError`] if any limit exceeds what the wire format
    /// can represent.
    pub fn new(limits: MessageLimits) -> Result<Self, LimitsError> {
        limits.check()?;
        Ok(Self { limits })
    }

    /// Return the limits enforced by this codec.
    #[must_use]
    pub fn limits(&self) -> &MessageLimits { &self.limits }

    /// Number of bytes `message` occupies on the wire.
    #[must_use]
    pub fn encoded_len(message: &Message) -> usize {
        let headers: usize = message
            .headers()
            .iter()
            .map(|(key, value)| HEADER_OVERHEAD + key.len() + value.len())
            .sum();
        FIXED_OVERHEAD + headers + message.payload().len()
    }

    fn write(message: &Message, dst: &mut BytesMut) -> Result<(), FramingError> {
        let count = message.headers().len();
        let count = u8::try_from(count).map_err(|_| FramingError::LengthOverflow {
            field: WireField::HeaderCount,
            value: count,
        })?;
        dst.put_u8(count);

        for (key, value) in message.headers() {
            write_prefixed(dst, key.as_bytes(), WireField::HeaderKeyLength)?;
            write_prefixed(dst, value.as_bytes(), WireField::HeaderValueLength)?;
        }

        let len = message.payload().len();
        let len = i32::try_from(len).map_err(|_| FramingError::LengthOverflow {
            field: WireField::PayloadLength,
            value: len,
        })?;
        dst.put_slice(&write_wire_i32(len));
        dst.put_slice(message.payload());
        Ok(())
    }

    fn read(&self, data: &[u8]) -> Result<Message, FramingError> {
        let mut reader = WireReader::new(data);
        let count = reader.read_u8(WireField::HeaderCount)?;

        let mut headers = Headers::new();
        for _ in 0..count {
            let key = reader.read_prefixed(
                WireField::HeaderKeyLength,
                WireField::HeaderKey,
                MAX_WIRE_STRING_LEN,
            )?;
            let value = reader.read_prefixed(
                WireField::HeaderValueLength,
                WireField::HeaderValue,
                MAX_WIRE_STRING_LEN,
            )?;
            // Non-ASCII bytes become characters the validator rejects.
            headers.insert(wire_text(key), wire_text(value));
        }

        let declared = reader.read_i32(WireField::PayloadLength)?;
        let len = usize::try_from(declared)
            .ok()
            .filter(|len| *len <= self.limits.max_payload_bytes)
            .ok_or(FramingError::InvalidPayloadLength {
                len: declared,
                max: self.limits.max_payload_bytes,
            })?;
        let payload = Bytes::copy_from_slice(reader.take(len, WireField::Payload)?);

        if reader.remaining() > 0 {
            tracing::debug!(
                trailing = reader.remaining(),
                "ignoring bytes after message payload"
            );
        }
        Ok(Message::from_parts(headers, payload))
    }
}

impl BinaryCodec for MessageCodec {
    fn encode(&self, message: &Message) -> Result<Bytes, MessageError> {
        validate(message, &self.limits)?;

        let mut dst = BytesMut::with_capacity(Self::encoded_len(message));
        Self::write(message, &mut dst).map_err(CodecError::Encode)?;
        tracing::debug!(
            header_count = message.headers().len(),
            payload_len = message.payload().len(),
            encoded_len = dst.len(),
            "message encoded"
        );
        Ok(dst.freeze())
    }

    fn decode(&self, data: &[u8]) -> Result<Message, MessageError> {
        let message = self.read(data).map_err(CodecError::Decode)?;
        validate(&message, &self.limits)?;
        tracing::debug!(
            header_count = message.headers().len(),
            payload_len = message.payload().len(),
            "message decoded"
        );
        Ok(message)
    }
}

fn write_prefixed(dst: &mut BytesMut, bytes: &[u8], field: WireField) -> Result<(), FramingError> {
    let len = u16::try_from(bytes.len()).map_err(|_| FramingError::LengthOverflow {
        field,
        value: bytes.len(),
    })?;
    dst.put_slice(&write_wire_u16(len));
    dst.put_slice(bytes);
    Ok(())
}

fn wire_text(bytes: &[u8]) -> String { String::from_utf8_lossy(bytes).into_owned() }
