//! # Error Types
//!
//! Error handling for server queries.
//!
//! This module defines all error variants that can occur while querying a
//! game server, from transport failures to malformed replies.
//!
//! ## Error Categories
//! - **Transport Errors**: socket I/O failures and exhausted reply timeouts
//! - **Decode Errors**: replies shorter than their declared layout, or
//!   strings with no terminator
//! - **Protocol Errors**: a server that never stops challenging
//!
//! All errors implement `std::error::Error` for interoperability.

use std::io;
use thiserror::Error;

/// QueryError is the primary error type for all query operations
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("no reply after {attempts} attempt(s)")]
    Timeout { attempts: u32 },

    #[error("reply truncated: needed {expected} more byte(s), {remaining} left")]
    Truncated { expected: usize, remaining: usize },

    #[error("unterminated string in reply")]
    MissingTerminator,

    #[error("server kept sending challenge responses ({rounds} rounds)")]
    ChallengeExhausted { rounds: u32 },

    #[error("invalid server address: {0}")]
    InvalidAddress(String),
}

impl QueryError {
    /// Whether the failure came from the transport rather than the reply
    /// contents. Transport failures are the ones a caller can reasonably
    /// retry with a larger attempt budget.
    pub fn is_transport(&self) -> bool {
        matches!(self, QueryError::Io(_) | QueryError::Timeout { .. })
    }
}

/// Type alias for Results using QueryError
pub type Result<T> = std::result::Result<T, QueryError>;
