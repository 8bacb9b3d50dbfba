//! Transport-facing representations of messages.
//!
//! Transports exchange messages as JSON documents whose payload is base64
//! text, and submit encoded messages either as raw bytes or as base64.
//! This module converts those representations to and from [`Message`] and
//! raw bytes, and turns failures into [`ProblemDetails`] for the response.
//! The codec itself never sees base64.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    codec::BinaryCodec,
    error::{ErrorCategory, MessageError},
    message::{Headers, Message},
    validation::ValidationError,
};

/// JSON representation of a [`Message`].
///
/// # Examples
///
/// ```
/// use msgframe::transport::MessageDocument;
///
/// let doc: MessageDocument =
///     serde_json::from_str(r#"{ "headers": { "Type": "json" }, "payloadBase64": "aGVsbG8=" }"#)
///         .expect("valid document");
/// let msg = doc.into_message().expect("valid message");
/// assert_eq!(msg.payload().as_ref(), b"hello");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDocument {
    /// Header mapping; required when converting to a [`Message`].
    pub headers: Option<Headers>,
    /// Base64 payload; absent or empty means an empty payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_base64: Option<String>,
}

impl MessageDocument {
    /// Convert the document into a [`Message`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingHeaders`] if `headers` is absent
    /// and [`TransportError::InvalidBase64`] if the payload is not valid
    /// base64.
    pub fn into_message(self) -> Result<Message, TransportError> {
        let headers = self.headers.ok_or(ValidationError::MissingHeaders)?;
        let payload = match self.payload_base64.as_deref() {
            None | Some("") => Vec::new(),
            Some(text) => STANDARD.decode(text)?,
        };
        Ok(Message::from_parts(headers, payload))
    }
}

impl From<&Message> for MessageDocument {
    fn from(message: &Message) -> Self {
        Self {
            headers: Some(message.headers().clone()),
            payload_base64: Some(STANDARD.encode(message.payload())),
        }
    }
}

/// Input to a decode operation: raw bytes or base64 text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeRequest {
    /// Base64 encoding of the message bytes.
    #[serde(default)]
    pub base64: Option<String>,
    /// Raw message bytes.
    #[serde(default)]
    pub bytes: Option<Vec<u8>>,
}

impl DecodeRequest {
    /// Wrap raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            base64: None,
            bytes: Some(bytes.into()),
        }
    }

    /// Wrap base64 text.
    #[must_use]
    pub fn from_base64(text: impl Into<String>) -> Self {
        Self {
            base64: Some(text.into()),
            bytes: None,
        }
    }

    /// Resolve the request to the bytes to decode.
    ///
    /// Non-empty raw bytes take precedence over base64 text. Blank base64
    /// text counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingInput`] if neither form is
    /// supplied and [`TransportError::InvalidBase64`] if the text cannot be
    /// decoded.
    pub fn into_bytes(self) -> Result<Vec<u8>, TransportError> {
        if let Some(bytes) = self.bytes.filter(|bytes| !bytes.is_empty()) {
            return Ok(bytes);
        }
        match self.base64 {
            Some(text) if !text.trim().is_empty() => Ok(STANDARD.decode(text.trim())?),
            _ => Err(ValidationError::MissingInput.into()),
        }
    }
}

/// Failures at the transport boundary.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Encoding or decoding the message failed.
    #[error(transparent)]
    Message(#[from] MessageError),
    /// Base64 text could not be decoded.
    #[error("invalid base64")]
    InvalidBase64(#[from] base64::DecodeError),
}

impl From<ValidationError> for TransportError {
    fn from(err: ValidationError) -> Self { Self::Message(err.into()) }
}

impl TransportError {
    /// Classify the error for reporting.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Message(err) => err.category(),
            Self::InvalidBase64(_) => ErrorCategory::BadRequest,
        }
    }
}

/// Error body in the `application/problem+json` shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// HTTP-style status code.
    pub status: u16,
    /// Short summary, `HTTP <status>`.
    pub title: String,
    /// Human-readable explanation.
    pub detail: String,
}

impl From<&TransportError> for ProblemDetails {
    fn from(err: &TransportError) -> Self {
        let category = err.category();
        let status = category.status();
        // Internal faults are not described to the caller.
        let detail = match category {
            ErrorCategory::BadRequest => error_chain(err),
            ErrorCategory::Internal => "Unexpected error.".to_owned(),
        };
        Self {
            status,
            title: format!("HTTP {status}"),
            detail,
        }
    }
}

/// Render `err` followed by each of its sources, separated by `": "`.
#[must_use]
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/// Encode and decode operations over transport representations.
///
/// Wraps a [`BinaryCodec`] and logs the outcome of every call.
#[derive(Clone, Debug)]
pub struct MessageService<C> {
    codec: C,
}

impl<C: BinaryCodec> MessageService<C> {
    /// Create a service around `codec`.
    pub fn new(codec: C) -> Self { Self { codec } }

    /// Encode a message document, returning the encoded bytes as base64.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the document is incomplete or the
    /// message fails to encode.
    pub fn encode(&self, document: MessageDocument) -> Result<String, TransportError> {
        let result = document.into_message().and_then(|message| {
            let bytes = self.codec.encode(&message)?;
            tracing::info!(
                header_count = message.headers().len(),
                payload_size = message.payload().len(),
                "message encoded successfully"
            );
            Ok(STANDARD.encode(bytes))
        });
        result.inspect_err(|err| log_failure("encode", err))
    }

    /// Decode a request into a message document.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the request carries no input, the
    /// base64 is invalid, or the bytes fail to decode.
    pub fn decode(&self, request: DecodeRequest) -> Result<MessageDocument, TransportError> {
        let result = request.into_bytes().and_then(|data| {
            let message = self.codec.decode(&data)?;
            tracing::info!(
                header_count = message.headers().len(),
                payload_size = message.payload().len(),
                "message decoded successfully"
            );
            Ok(MessageDocument::from(&message))
        });
        result.inspect_err(|err| log_failure("decode", err))
    }
}

fn log_failure(operation: &'static str, err: &TransportError) {
    match err.category() {
        ErrorCategory::BadRequest => {
            tracing::warn!(operation, error = %error_chain(err), "rejected invalid input");
        }
        ErrorCategory::Internal => {
            tracing::error!(operation, error = %error_chain(err), "unhandled error");
        }
    }
}
