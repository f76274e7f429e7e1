//! UDP request/response channel.
//!
//! Queries are strictly sequential: one datagram out, one datagram back.
//! Each attempt races the reply against a timer; the losing side of the
//! race is dropped, so no listener outlives its attempt. A timeout burns
//! one attempt and retransmits the identical payload, never the query as
//! a whole.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::QueryConfig;
use crate::error::{QueryError, Result};

/// Largest datagram a server may answer with
const MAX_DATAGRAM_SIZE: usize = 65_535;

/// A UDP socket scoped to a single query.
///
/// The socket is bound to an ephemeral local port and connected to the
/// peer at construction, which filters out datagrams from other sources.
#[derive(Debug)]
pub struct UdpChannel {
    socket: UdpSocket,
    config: QueryConfig,
}

impl UdpChannel {
    /// Bind an ephemeral local socket and direct it at `peer`
    pub async fn open(peer: SocketAddr, config: QueryConfig) -> Result<Self> {
        let bind_addr: SocketAddr = if peer.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(bind_addr).await?;
        socket.connect(peer).await?;
        Ok(Self { socket, config })
    }

    /// Send `payload` and wait for exactly one reply datagram.
    ///
    /// Runs up to `attempts` transmit-and-wait cycles of `timeout` each,
    /// retransmitting the identical payload after a timeout or socket
    /// error. The last error is surfaced once attempts are exhausted.
    pub async fn exchange(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let attempts = self.config.attempts;
        let mut last_err = QueryError::Timeout { attempts };

        for attempt in 1..=attempts {
            if let Err(e) = self.socket.send(payload).await {
                warn!(attempt, error = %e, "send failed");
                last_err = e.into();
                continue;
            }

            let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
            match timeout(self.config.timeout, self.socket.recv(&mut buf)).await {
                Ok(Ok(len)) => {
                    buf.truncate(len);
                    debug!(attempt, bytes = len, "reply received");
                    return Ok(buf);
                }
                Ok(Err(e)) => {
                    warn!(attempt, error = %e, "receive failed");
                    last_err = e.into();
                }
                Err(_) => {
                    debug!(
                        attempt,
                        timeout_ms = self.config.timeout.as_millis() as u64,
                        "attempt timed out"
                    );
                    last_err = QueryError::Timeout { attempts };
                }
            }
        }

        Err(last_err)
    }
}
