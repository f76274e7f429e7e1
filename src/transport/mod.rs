//! # Transport Layer
//!
//! Datagram delivery with bounded retries.
//!
//! One [`udp::UdpChannel`] is opened per query and owns its socket for the
//! query's whole lifetime; dropping the channel releases the socket on
//! every exit path, success or failure.

pub mod udp;

pub use udp::UdpChannel;
