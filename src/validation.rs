//! Semantic validation of messages against configured limits.
//!
//! The rules run in a fixed order (payload, header count, header keys,
//! header values) and the first violation is returned. Because headers are
//! held in a sorted map, the reported header is also deterministic.

use thiserror::Error;

use crate::{limits::MessageLimits, message::Message};

/// A message violated a semantic rule.
///
/// Validation failures describe bad caller input and are recoverable by
/// correcting that input.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// The payload exceeds the configured ceiling.
    #[error("payload size {size} exceeds {max} bytes")]
    PayloadTooLarge {
        /// Payload length in bytes.
        size: usize,
        /// Configured payload ceiling.
        max: usize,
    },
    /// A transport representation omitted the header mapping.
    #[error("headers are required")]
    MissingHeaders,
    /// The header count exceeds the configured ceiling.
    #[error("header count {count} exceeds {max}")]
    TooManyHeaders {
        /// Number of headers present.
        count: usize,
        /// Configured header count ceiling.
        max: usize,
    },
    /// A header key is empty.
    #[error("header key must not be empty")]
    EmptyHeaderKey,
    /// A header key contains a character outside 7-bit ASCII.
    #[error("header key {key:?} must contain only ASCII characters")]
    NonAsciiHeaderKey {
        /// The offending key.
        key: String,
    },
    /// A header key is longer than the configured ceiling.
    #[error("header key too long: {len} > {max} bytes ASCII")]
    HeaderKeyTooLong {
        /// Key length in bytes.
        len: usize,
        /// Configured key ceiling.
        max: usize,
    },
    /// A header value contains a character outside 7-bit ASCII.
    #[error("value of header {key:?} must contain only ASCII characters")]
    NonAsciiHeaderValue {
        /// Key of the offending header.
        key: String,
    },
    /// A header value is longer than the configured ceiling.
    #[error("value of header {key:?} too long: {len} > {max} bytes ASCII")]
    HeaderValueTooLong {
        /// Key of the offending header.
        key: String,
        /// Value length in bytes.
        len: usize,
        /// Configured value ceiling.
        max: usize,
    },
    /// A decode request supplied neither raw bytes nor base64 text.
    #[error("either 'base64' or 'bytes' must be provided")]
    MissingInput,
}

type Rule = fn(&Message, &MessageLimits) -> Result<(), ValidationError>;

const RULES: [Rule; 4] = [
    check_payload,
    check_header_count,
    check_header_keys,
    check_header_values,
];

/// Check `message` against `limits`.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
///
/// # Examples
///
/// ```
/// use msgframe::{
///     limits::MessageLimits,
///     message::Message,
///     validation::{ValidationError, validate},
/// };
///
/// let limits = MessageLimits::default().max_headers(1);
/// let msg = Message::new("ok").with_header("A", "1").with_header("B", "2");
/// assert_eq!(
///     validate(&msg, &limits),
///     Err(ValidationError::TooManyHeaders { count: 2, max: 1 })
/// );
/// ```
pub fn validate(message: &Message, limits: &MessageLimits) -> Result<(), ValidationError> {
    RULES.iter().try_for_each(|rule| rule(message, limits))
}

fn check_payload(message: &Message, limits: &MessageLimits) -> Result<(), ValidationError> {
    let size = message.payload().len();
    if size > limits.max_payload_bytes {
        return Err(ValidationError::PayloadTooLarge {
            size,
            max: limits.max_payload_bytes,
        });
    }
    Ok(())
}

fn check_header_count(message: &Message, limits: &MessageLimits) -> Result<(), ValidationError> {
    let count = message.headers().len();
    if count > limits.max_headers {
        return Err(ValidationError::TooManyHeaders {
            count,
            max: limits.max_headers,
        });
    }
    Ok(())
}

fn check_header_keys(message: &Message, limits: &MessageLimits) -> Result<(), ValidationError> {
    for key in message.headers().keys() {
        if key.is_empty() {
            return Err(ValidationError::EmptyHeaderKey);
        }
        if !key.is_ascii() {
            return Err(ValidationError::NonAsciiHeaderKey { key: key.clone() });
        }
        // ASCII text encodes one byte per character.
        if key.len() > limits.max_header_key_bytes {
            return Err(ValidationError::HeaderKeyTooLong {
                len: key.len(),
                max: limits.max_header_key_bytes,
            });
        }
    }
    Ok(())
}

fn check_header_values(message: &Message, limits: &MessageLimits) -> Result<(), ValidationError> {
    for (key, value) in message.headers() {
        if !value.is_ascii() {
            return Err(ValidationError::NonAsciiHeaderValue { key: key.clone() });
        }
        if value.len() > limits.max_header_value_bytes {
            return Err(ValidationError::HeaderValueTooLong {
                key: key.clone(),
                len: value.len(),
                max: limits.max_header_value_bytes,
            });
        }
    }
    Ok(())
}
