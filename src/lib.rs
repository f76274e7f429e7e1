//! # source-query
//!
//! Async client for the Source Engine server query protocol (A2S) over UDP.
//!
//! Retrieves liveness and metadata from a running game server: general
//! server info, the connected player list, and the server's configuration
//! rules. Handles the challenge-response handshake the protocol requires
//! and retries lost datagrams up to a configured attempt budget.
//!
//! ## Components
//! - **core**: request builders, the bounds-checked reply reader, and the
//!   typed response decoders
//! - **transport**: a per-query UDP channel with timeout and retry
//! - **protocol**: the challenge handshake and the three query operations
//!
//! ## Example
//! ```no_run
//! use source_query::{query_info, QueryConfig};
//!
//! #[tokio::main]
//! async fn main() -> source_query::Result<()> {
//!     let config = QueryConfig::default().with_attempts(3);
//!     let info = query_info("203.0.113.7:27015", config).await?;
//!     println!("{}: {}/{} on {}", info.name, info.players, info.max_players, info.map);
//!     Ok(())
//! }
//! ```
//!
//! Multi-packet (split) responses are not handled; servers answering a
//! query with more than one datagram will fail to decode.

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod transport;

pub use crate::config::QueryConfig;
pub use crate::core::response::{Player, PlayerList, Rule, RuleList, ServerInfo};
pub use crate::error::{QueryError, Result};
pub use crate::protocol::query::{query_info, query_players, query_rules, GameServerQuery};
