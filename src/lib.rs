#![doc(html_root_url = "https://docs.rs/msgframe/latest")]
//! Public API for the `msgframe` library.
//!
//! This crate defines a compact binary format for messages made of ASCII
//! text headers and an opaque payload, a codec that converts between that
//! format and [`Message`], and the validation rules that bound message
//! shape on both sides of the conversion.

pub mod byte_order;
pub mod codec;
pub mod config;
pub mod error;
pub mod limits;
pub mod message;
pub mod transport;
pub mod validation;

pub use codec::{BinaryCodec, CodecError, FramingError, MessageCodec};
pub use error::{ErrorCategory, MessageError};
pub use limits::{LimitsError, MessageLimits};
pub use message::{Headers, Message};
pub use validation::{ValidationError, validate};
