//! Error types for the message codec.
//!
//! # Error Categories
//!
//! - [`FramingError`]: the structural cause. Raised while reading or writing the binary layout,
//!   before any semantic validation takes place.
//! - [`CodecError`]: the codec-level wrapper. Records which direction failed and always exposes the
//!   [`FramingError`] through [`std::error::Error::source`].
//!
//! Semantic rule violations are reported separately as
//! [`ValidationError`](crate::validation::ValidationError).

use std::fmt;

use thiserror::Error;

/// Fields of the wire layout, used to annotate structural errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireField {
    /// The one-byte header count.
    HeaderCount,
    /// A header key length prefix.
    HeaderKeyLength,
    /// Header key bytes.
    HeaderKey,
    /// A header value length prefix.
    HeaderValueLength,
    /// Header value bytes.
    HeaderValue,
    /// The four-byte payload length.
    PayloadLength,
    /// Payload bytes.
    Payload,
}

impl fmt::Display for WireField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::HeaderCount => "header count",
            Self::HeaderKeyLength => "header key length",
            Self::HeaderKey => "header key",
            Self::HeaderValueLength => "header value length",
            Self::HeaderValue => "header value",
            Self::PayloadLength => "payload length",
            Self::Payload => "payload",
        };
        f.write_str(name)
    }
}

/// Structural errors in the binary layout.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FramingError {
    /// Fewer bytes remain than the field requires.
    #[error("truncated {field}: need {needed} bytes, have {available}")]
    Truncated {
        /// Field being read.
        field: WireField,
        /// Bytes the field requires.
        needed: usize,
        /// Bytes remaining in the input.
        available: usize,
    },

    /// A declared string length exceeds the structural ceiling.
    #[error("{field} {len} exceeds {max} bytes")]
    StringTooLong {
        /// Length prefix that was rejected.
        field: WireField,
        /// Declared length.
        len: usize,
        /// Structural ceiling.
        max: usize,
    },

    /// The declared payload length is negative or above the configured ceiling.
    #[error("invalid payload size: {len} (max {max})")]
    InvalidPayloadLength {
        /// Declared length as read from the wire.
        len: i32,
        /// Configured payload ceiling.
        max: usize,
    },

    /// A value does not fit in its fixed-width wire field.
    #[error("{field} {value} does not fit the wire field")]
    LengthOverflow {
        /// Field being written.
        field: WireField,
        /// Value that overflowed.
        value: usize,
    },
}

impl FramingError {
    /// Returns true if the input ended before a field was complete.
    #[must_use]
    pub fn is_truncation(&self) -> bool { matches!(self, Self::Truncated { .. }) }
}

/// Codec-level failure wrapping a structural cause.
///
/// # Examples
///
/// ```
/// use std::error::Error as _;
///
/// use msgframe::codec::{CodecError, FramingError, WireField};
///
/// let err = CodecError::Decode(FramingError::StringTooLong {
///     field: WireField::HeaderKeyLength,
///     len: 2000,
///     max: 1023,
/// });
/// assert_eq!(err.to_string(), "decoding failed");
/// assert!(err.source().is_some());
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The input could not be parsed as a message.
    #[error("decoding failed")]
    Decode(#[source] FramingError),

    /// The message could not be written to the wire layout.
    #[error("encoding failed")]
    Encode(#[source] FramingError),
}

impl CodecError {
    /// Borrow the structural cause.
    #[must_use]
    pub fn framing(&self) -> &FramingError {
        match self {
            Self::Decode(err) | Self::Encode(err) => err,
        }
    }

    /// Returns the error direction as a string for logging.
    ///
    /// # Returns
    ///
    /// One of: `"decode"` or `"encode"`.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode",
            Self::Encode(_) => "encode",
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
