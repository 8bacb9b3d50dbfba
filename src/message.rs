//! In-memory message representation.
//!
//! A [`Message`] is a set of text headers plus an opaque payload. Headers
//! live in a [`BTreeMap`], so iteration order (and therefore the encoded
//! byte layout) is deterministic for a given set of keys.

use std::collections::BTreeMap;

use bytes::Bytes;

/// Header mapping carried by a [`Message`].
pub type Headers = BTreeMap<String, String>;

/// A header mapping plus a byte payload.
///
/// `Message` performs no validation on construction; limits are enforced by
/// [`validate`](crate::validation::validate) when the message passes
/// through a [`MessageCodec`](crate::codec::MessageCodec).
///
/// # Examples
///
/// ```
/// use msgframe::message::Message;
///
/// let msg = Message::new("hello").with_header("Type", "json");
/// assert_eq!(msg.header("Type"), Some("json"));
/// assert_eq!(msg.payload().as_ref(), b"hello");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    headers: Headers,
    payload: Bytes,
}

impl Message {
    /// Create a message with no headers and the given payload.
    #[must_use]
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            headers: Headers::new(),
            payload: payload.into(),
        }
    }

    /// Create a message from an existing header mapping and payload.
    #[must_use]
    pub fn from_parts(headers: Headers, payload: impl Into<Bytes>) -> Self {
        Self {
            headers,
            payload: payload.into(),
        }
    }

    /// Add or replace a header, returning the updated message.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Look up a header value by name.
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&str> { self.headers.get(key).map(String::as_str) }

    /// Borrow the header mapping.
    #[must_use]
    pub fn headers(&self) -> &Headers { &self.headers }

    /// Borrow the payload bytes.
    #[must_use]
    pub fn payload(&self) -> &Bytes { &self.payload }

    /// Split the message into its header mapping and payload.
    #[must_use]
    pub fn into_parts(self) -> (Headers, Bytes) { (self.headers, self.payload) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_message_is_empty() {
        let msg = Message::default();
        assert!(msg.headers().is_empty());
        assert!(msg.payload().is_empty());
    }

    #[test]
    fn with_header_replaces_existing_value() {
        let msg = Message::new(Bytes::new())
            .with_header("Type", "json")
            .with_header("Type", "xml");
        assert_eq!(msg.headers().len(), 1);
        assert_eq!(msg.header("Type"), Some("xml"));
    }

    #[test]
    fn parts_round_trip() {
        let mut headers = Headers::new();
        headers.insert("A".into(), "B".into());
        let msg = Message::from_parts(headers.clone(), vec![1_u8, 2, 3]);
        let (out_headers, payload) = msg.into_parts();
        assert_eq!(out_headers, headers);
        assert_eq!(payload.as_ref(), &[1, 2, 3]);
    }
}
