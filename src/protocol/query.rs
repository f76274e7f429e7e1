//! Per-query orchestration of the challenge handshake.
//!
//! Servers reject bare players/rules requests (and, since late 2020, info
//! requests too) until the client echoes back a short-lived challenge
//! token. Each operation here opens its own [`UdpChannel`], runs the
//! handshake it needs, decodes the accepted reply, and releases the
//! socket when the channel drops.

use std::net::SocketAddr;
use tokio::net::lookup_host;
use tracing::{debug, instrument};

use crate::config::QueryConfig;
use crate::core::packet;
use crate::core::response::{self, PlayerList, RuleList, ServerInfo};
use crate::error::{QueryError, Result};
use crate::transport::UdpChannel;

/// Handshake rounds a players query tolerates before giving up
const MAX_CHALLENGE_ROUNDS: u32 = 5;

/// One query session against a single game server.
///
/// Holds the resolved peer address and retry settings; each operation is
/// self-contained and opens its own socket, so instances are cheap and
/// never share transport state.
#[derive(Debug, Clone)]
pub struct GameServerQuery {
    peer: SocketAddr,
    config: QueryConfig,
}

impl GameServerQuery {
    /// Target a server whose socket address is already resolved
    pub fn new(peer: SocketAddr, config: QueryConfig) -> Self {
        Self { peer, config }
    }

    /// Resolve a `"host:port"` target and build a query session for it
    pub async fn connect(target: &str, config: QueryConfig) -> Result<Self> {
        let peer = lookup_host(target)
            .await
            .map_err(|_| QueryError::InvalidAddress(target.to_string()))?
            .next()
            .ok_or_else(|| QueryError::InvalidAddress(target.to_string()))?;
        Ok(Self::new(peer, config))
    }

    /// Address the session resolves to
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Fetch server metadata (`A2S_INFO`).
    ///
    /// Older servers answer the bare request directly; newer ones demand
    /// one challenge round first.
    #[instrument(skip(self), fields(peer = %self.peer))]
    pub async fn info(&self) -> Result<ServerInfo> {
        let channel = UdpChannel::open(self.peer, self.config).await?;

        let mut reply = channel.exchange(&packet::build_info_request(None)).await?;
        if packet::is_challenge_reply(&reply) {
            let token = packet::challenge_token(&reply)?;
            debug!("info request challenged, resending with token");
            reply = channel
                .exchange(&packet::build_info_request(Some(token)))
                .await?;
        }

        response::decode_info(&reply)
    }

    /// Fetch the connected player list (`A2S_PLAYER`).
    ///
    /// Always starts with a placeholder request to obtain a token. A
    /// server may re-challenge the tokened request; after
    /// `MAX_CHALLENGE_ROUNDS` such rounds the query fails with
    /// [`QueryError::ChallengeExhausted`].
    #[instrument(skip(self), fields(peer = %self.peer))]
    pub async fn players(&self) -> Result<PlayerList> {
        let channel = UdpChannel::open(self.peer, self.config).await?;

        for round in 1..=MAX_CHALLENGE_ROUNDS {
            let challenge = channel
                .exchange(&packet::build_players_request(None))
                .await?;
            let token = packet::challenge_token(&challenge)?;

            let reply = channel
                .exchange(&packet::build_players_request(Some(token)))
                .await?;
            if !packet::is_challenge_reply(&reply) {
                return response::decode_players(&reply);
            }
            debug!(round, "server re-challenged players request");
        }

        Err(QueryError::ChallengeExhausted {
            rounds: MAX_CHALLENGE_ROUNDS,
        })
    }

    /// Fetch the server's configuration rules (`A2S_RULES`).
    ///
    /// Rules queries always take exactly one two-round handshake.
    #[instrument(skip(self), fields(peer = %self.peer))]
    pub async fn rules(&self) -> Result<RuleList> {
        let channel = UdpChannel::open(self.peer, self.config).await?;

        let challenge = channel.exchange(&packet::build_rules_request(None)).await?;
        let token = packet::challenge_token(&challenge)?;

        let reply = channel
            .exchange(&packet::build_rules_request(Some(token)))
            .await?;
        response::decode_rules(&reply)
    }
}

/// One-shot info query against a `"host:port"` target
pub async fn query_info(target: &str, config: QueryConfig) -> Result<ServerInfo> {
    GameServerQuery::connect(target, config).await?.info().await
}

/// One-shot players query against a `"host:port"` target
pub async fn query_players(target: &str, config: QueryConfig) -> Result<PlayerList> {
    GameServerQuery::connect(target, config)
        .await?
        .players()
        .await
}

/// One-shot rules query against a `"host:port"` target
pub async fn query_rules(target: &str, config: QueryConfig) -> Result<RuleList> {
    GameServerQuery::connect(target, config)
        .await?
        .rules()
        .await
}
