//! Semantic limits applied to messages by the validator.
//!
//! [`MessageLimits`] holds the four operator-configurable bounds. The wire
//! format imposes its own ceilings (a one-byte header count and a
//! 1023-byte structural cap on header strings), so [`MessageLimits::check`]
//! rejects configurations the format could never honour.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest header count representable by the one-byte count field.
pub const MAX_WIRE_HEADER_COUNT: usize = u8::MAX as usize;

/// Structural ceiling on any length-prefixed header string, in bytes.
///
/// The decoder rejects declared lengths above this value before reading
/// any string bytes, regardless of configuration.
pub const MAX_WIRE_STRING_LEN: usize = 1023;

/// Largest payload length representable by the signed 32-bit length field.
pub const MAX_WIRE_PAYLOAD_LEN: usize = i32::MAX as usize;

/// Default payload ceiling (256 KiB).
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 256 * 1024;

/// Default header count ceiling.
pub const DEFAULT_MAX_HEADERS: usize = 63;

/// Default header key ceiling in ASCII bytes.
pub const DEFAULT_MAX_HEADER_KEY_BYTES: usize = 1023;

/// Default header value ceiling in ASCII bytes.
pub const DEFAULT_MAX_HEADER_VALUE_BYTES: usize = 1023;

/// Configured bounds on message shape.
///
/// Missing fields fall back to their defaults when deserialised, so a
/// partial configuration section is accepted.
///
/// # Examples
///
/// ```
/// use msgframe::limits::MessageLimits;
///
/// let limits = MessageLimits::default().max_headers(2).max_header_key_bytes(8);
/// assert_eq!(limits.max_headers, 2);
/// assert_eq!(limits.max_payload_bytes, 262_144);
/// assert!(limits.check().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MessageLimits {
    /// Maximum payload length in bytes.
    pub max_payload_bytes: usize,
    /// Maximum number of headers.
    pub max_headers: usize,
    /// Maximum header key length in ASCII bytes.
    pub max_header_key_bytes: usize,
    /// Maximum header value length in ASCII bytes.
    pub max_header_value_bytes: usize,
}

/// A limit that exceeds what the wire format can carry.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LimitsError {
    /// `max_headers` exceeds the one-byte header count field.
    #[error("max_headers {configured} exceeds the wire format ceiling of {ceiling}")]
    TooManyHeaders {
        /// Configured value.
        configured: usize,
        /// Largest value the wire format allows.
        ceiling: usize,
    },
    /// `max_header_key_bytes` exceeds the structural string ceiling.
    #[error("max_header_key_bytes {configured} exceeds the wire format ceiling of {ceiling}")]
    HeaderKeyTooLong {
        /// Configured value.
        configured: usize,
        /// Largest value the wire format allows.
        ceiling: usize,
    },
    /// `max_header_value_bytes` exceeds the structural string ceiling.
    #[error("max_header_value_bytes {configured} exceeds the wire format ceiling of {ceiling}")]
    HeaderValueTooLong {
        /// Configured value.
        configured: usize,
        /// Largest value the wire format allows.
        ceiling: usize,
    },
    /// `max_payload_bytes` exceeds the signed 32-bit payload length field.
    #[error("max_payload_bytes {configured} exceeds the wire format ceiling of {ceiling}")]
    PayloadTooLarge {
        /// Configured value.
        configured: usize,
        /// Largest value the wire format allows.
        ceiling: usize,
    },
}

impl MessageLimits {
    /// Set the payload ceiling.
    #[must_use]
    pub fn max_payload_bytes(mut self, bytes: usize) -> Self {
        self.max_payload_bytes = bytes;
        self
    }

    /// Set the header count ceiling.
    #[must_use]
    pub fn max_headers(mut self, count: usize) -> Self {
        self.max_headers = count;
        self
    }

    /// Set the header key ceiling.
    #[must_use]
    pub fn max_header_key_bytes(mut self, bytes: usize) -> Self {
        self.max_header_key_bytes = bytes;
        self
    }

    /// Set the header value ceiling.
    #[must_use]
    pub fn max_header_value_bytes(mut self, bytes: usize) -> Self {
        self.max_header_value_bytes = bytes;
        self
    }

    /// Confirm every limit fits within the wire format.
    ///
    /// # Errors
    ///
    /// Returns the first [`LimitsError`] found, checking payload, header
    /// count, key and value in that order.
    pub fn check(&self) -> Result<(), LimitsError> {
        if self.max_payload_bytes > MAX_WIRE_PAYLOAD_LEN {
            return Err(LimitsError::PayloadTooLarge {
                configured: self.max_payload_bytes,
                ceiling: MAX_WIRE_PAYLOAD_LEN,
            });
        }
        if self.max_headers > MAX_WIRE_HEADER_COUNT {
            return Err(LimitsError::TooManyHeaders {
                configured: self.max_headers,
                ceiling: MAX_WIRE_HEADER_COUNT,
            });
        }
        if self.max_header_key_bytes > MAX_WIRE_STRING_LEN {
            return Err(LimitsError::HeaderKeyTooLong {
                configured: self.max_header_key_bytes,
                ceiling: MAX_WIRE_STRING_LEN,
            });
        }
        if self.max_header_value_bytes > MAX_WIRE_STRING_LEN {
            return Err(LimitsError::HeaderValueTooLong {
                configured: self.max_header_value_bytes,
                ceiling: MAX_WIRE_STRING_LEN,
            });
        }
        Ok(())
    }
}

impl Default for MessageLimits {
    fn default() -> Self {
        Self {
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            max_headers: DEFAULT_MAX_HEADERS,
            max_header_key_bytes: DEFAULT_MAX_HEADER_KEY_BYTES,
            max_header_value_bytes: DEFAULT_MAX_HEADER_VALUE_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn defaults_fit_the_wire_format() {
        let limits = MessageLimits::default();
        assert_eq!(limits.max_payload_bytes, 262_144);
        assert_eq!(limits.max_headers, 63);
        assert_eq!(limits.max_header_key_bytes, 1023);
        assert_eq!(limits.max_header_value_bytes, 1023);
        assert_eq!(limits.check(), Ok(()));
    }

    #[test]
    fn limits_at_the_wire_ceilings_are_accepted() {
        let limits = MessageLimits::default()
            .max_headers(MAX_WIRE_HEADER_COUNT)
            .max_header_key_bytes(MAX_WIRE_STRING_LEN)
            .max_header_value_bytes(MAX_WIRE_STRING_LEN)
            .max_payload_bytes(MAX_WIRE_PAYLOAD_LEN);
        assert_eq!(limits.check(), Ok(()));
    }

    #[rstest]
    #[case::headers(
        MessageLimits::default().max_headers(256),
        LimitsError::TooManyHeaders { configured: 256, ceiling: 255 }
    )]
    #[case::key(
        MessageLimits::default().max_header_key_bytes(1024),
        LimitsError::HeaderKeyTooLong { configured: 1024, ceiling: 1023 }
    )]
    #[case::value(
        MessageLimits::default().max_header_value_bytes(4096),
        LimitsError::HeaderValueTooLong { configured: 4096, ceiling: 1023 }
    )]
    #[case::payload(
        MessageLimits::default().max_payload_bytes(MAX_WIRE_PAYLOAD_LEN + 1),
        LimitsError::PayloadTooLarge {
            configured: MAX_WIRE_PAYLOAD_LEN + 1,
            ceiling: MAX_WIRE_PAYLOAD_LEN,
        }
    )]
    fn limits_beyond_the_wire_format_are_rejected(
        #[case] limits: MessageLimits,
        #[case] expected: LimitsError,
    ) {
        assert_eq!(limits.check(), Err(expected));
    }

    #[test]
    fn partial_configuration_uses_defaults() {
        let limits: MessageLimits =
            serde_json::from_str(r#"{ "max_headers": 2 }"#).expect("parse limits");
        assert_eq!(limits.max_headers, 2);
        assert_eq!(limits.max_payload_bytes, DEFAULT_MAX_PAYLOAD_BYTES);
        assert_eq!(limits.max_header_value_bytes, DEFAULT_MAX_HEADER_VALUE_BYTES);
    }

    #[test]
    fn unknown_configuration_fields_are_rejected() {
        let result = serde_json::from_str::<MessageLimits>(r#"{ "max_header": 2 }"#);
        assert!(result.is_err());
    }
}
