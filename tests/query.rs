#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! End-to-end tests of the public query surface against a local UDP
//! server, including the transport retry contract.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;

use source_query::transport::UdpChannel;
use source_query::{query_info, query_rules, QueryConfig, QueryError};

fn info_reply() -> Vec<u8> {
    let mut reply = vec![0xFF, 0xFF, 0xFF, 0xFF, 0x49];
    reply.push(17);
    reply.extend_from_slice(b"integration\0");
    reply.extend_from_slice(b"ctf_2fort\0");
    reply.extend_from_slice(b"tf\0");
    reply.extend_from_slice(b"Team Fortress 2\0");
    reply.extend_from_slice(&440i16.to_le_bytes());
    reply.push(20);
    reply.push(32);
    reply.push(0);
    reply.push(b'd');
    reply.push(b'l');
    reply.push(0);
    reply.push(1);
    reply.extend_from_slice(b"8937073\0");
    reply
}

#[tokio::test]
async fn query_info_over_host_port_string() {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    tokio::spawn(async move {
        let mut buf = [0u8; 1500];
        let (_, peer) = socket.recv_from(&mut buf).await.unwrap();
        socket.send_to(&info_reply(), peer).await.unwrap();
    });

    let info = query_info(&addr.to_string(), QueryConfig::default())
        .await
        .unwrap();
    assert_eq!(info.name, "integration");
    assert_eq!(info.app_id, 440);
    assert_eq!(info.max_players, 32);
}

#[tokio::test]
async fn exchange_retries_then_succeeds_without_extra_attempt() {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    let received = Arc::new(AtomicUsize::new(0));
    let counter = received.clone();

    // ignore the first two datagrams, answer the third, then keep
    // counting anything that still arrives
    tokio::spawn(async move {
        let mut buf = [0u8; 1500];
        loop {
            let (_, peer) = socket.recv_from(&mut buf).await.unwrap();
            let seen = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if seen == 3 {
                socket.send_to(b"third attempt answer", peer).await.unwrap();
            }
        }
    });

    let config = QueryConfig::new(3, Duration::from_millis(50));
    let channel = UdpChannel::open(addr, config).await.unwrap();
    let reply = channel.exchange(&[0x2A]).await.unwrap();
    assert_eq!(reply, b"third attempt answer");

    // no fourth transmission after success
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(received.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn silent_server_surfaces_timeout() {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    // keep the socket alive but never answer
    let _guard = socket;

    let config = QueryConfig::new(2, Duration::from_millis(30));
    let err = query_rules(&addr.to_string(), config).await.unwrap_err();
    assert!(matches!(err, QueryError::Timeout { attempts: 2 }));
    assert!(err.is_transport());
}

#[tokio::test]
async fn unresolvable_target_is_invalid_address() {
    let err = query_info("not a host port pair", QueryConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidAddress(_)));
    assert!(!err.is_transport());
}
