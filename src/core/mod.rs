//! # Core Protocol Components
//!
//! Low-level packet construction and reply decoding.
//!
//! This module provides the wire-format layer of the query protocol:
//! building outbound request datagrams and turning raw reply bytes into
//! typed records.
//!
//! ## Components
//! - **Packet**: request builders and the challenge-reply marker
//! - **Reader**: bounds-checked little-endian cursor over a reply buffer
//! - **Response**: typed reply records and their decoders
//!
//! ## Wire Format
//! ```text
//! [Prefix FF FF FF FF] [Type(1)] [Body(N)]
//! ```
//!
//! All multi-byte integers are little-endian; strings are NUL-terminated
//! with no length prefix.

pub mod packet;
pub mod reader;
pub mod response;
