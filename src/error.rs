//! Canonical error type for message operations.
//!
//! [`MessageError`] keeps validation failures (bad caller input) distinct
//! from codec failures (unparseable framing), and [`ErrorCategory`] maps
//! each onto the client/server split a transport reports.

use thiserror::Error;

use crate::{
    codec::CodecError,
    validation::ValidationError,
};

/// Top-level error returned by encode and decode.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MessageError {
    /// The message broke a semantic rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The binary framing could not be read or written.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Whether an error is the caller's fault or the server's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The input was invalid; retrying with corrected input may succeed.
    BadRequest,
    /// An unexpected fault occurred while handling valid input.
    Internal,
}

impl ErrorCategory {
    /// HTTP-style status code for the category.
    #[must_use]
    pub const fn status(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Internal => 500,
        }
    }
}

impl MessageError {
    /// Classify the error for reporting.
    ///
    /// Validation failures and malformed input are client errors. Encode
    /// faults on already-validated messages are internal.
    ///
    /// # Examples
    ///
    /// ```
    /// use msgframe::{
    ///     error::{ErrorCategory, MessageError},
    ///     validation::ValidationError,
    /// };
    ///
    /// let err = MessageError::from(ValidationError::EmptyHeaderKey);
    /// assert_eq!(err.category(), ErrorCategory::BadRequest);
    /// ```
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) | Self::Codec(CodecError::Decode(_)) => ErrorCategory::BadRequest,
            Self::Codec(CodecError::Encode(_)) => ErrorCategory::Internal,
        }
    }

    /// Returns true for semantic rule violations.
    #[must_use]
    pub fn is_validation(&self) -> bool { matches!(self, Self::Validation(_)) }

    /// Returns true for structural codec failures.
    #[must_use]
    pub fn is_codec(&self) -> bool { matches!(self, Self::Codec(_)) }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use rstest::rstest;

    use super::*;
    use crate::codec::{FramingError, WireField};

    fn truncated() -> FramingError {
        FramingError::Truncated {
            field: WireField::Payload,
            needed: 4,
            available: 1,
        }
    }

    #[rstest]
    #[case::validation(ValidationError::MissingInput.into(), ErrorCategory::BadRequest)]
    #[case::decode(CodecError::Decode(truncated()).into(), ErrorCategory::BadRequest)]
    #[case::encode(CodecError::Encode(truncated()).into(), ErrorCategory::Internal)]
    fn errors_map_to_categories(#[case] err: MessageError, #[case] expected: ErrorCategory) {
        assert_eq!(err.category(), expected);
    }

    #[test]
    fn codec_errors_keep_their_structural_cause() {
        let err = MessageError::from(CodecError::Decode(truncated()));
        assert!(err.is_codec());
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "decoding failed");
        let cause = err.source().expect("structural cause");
        assert_eq!(cause.to_string(), truncated().to_string());
    }

    #[test]
    fn status_codes_follow_category() {
        assert_eq!(ErrorCategory::BadRequest.status(), 400);
        assert_eq!(ErrorCategory::Internal.status(), 500);
    }
}
