//! Request construction and challenge-reply detection.
//!
//! Every outbound datagram starts with the four-byte `FF FF FF FF` prefix
//! marking a simple (non-split) packet, followed by a single request type
//! byte. The info request carries a fixed ASCII payload; the players and
//! rules requests carry a challenge token, or the `FF FF FF FF`
//! placeholder when no token is known yet.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{QueryError, Result};

/// Four-byte prefix carried by every simple request and reply
pub const PACKET_PREFIX: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

/// A2S_INFO request type byte
pub const REQUEST_INFO: u8 = 0x54;

/// A2S_PLAYER request type byte
pub const REQUEST_PLAYERS: u8 = 0x55;

/// A2S_RULES request type byte
pub const REQUEST_RULES: u8 = 0x56;

/// Reply type byte a server uses to demand a challenge round
pub const REPLY_CHALLENGE: u8 = 0x41;

/// Token bytes sent before the server has issued a challenge
pub const CHALLENGE_PLACEHOLDER: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

/// Prefix plus type byte, stripped before decoding any reply body
pub const REPLY_HEADER_LEN: usize = 5;

/// Fixed payload of the info request
const INFO_PAYLOAD: &[u8] = b"Source Engine Query\0";

/// Short-lived token echoed back to unlock a challenged request
pub type ChallengeToken = [u8; 4];

/// Build an `A2S_INFO` request, appending the challenge token verbatim
/// when one is supplied
pub fn build_info_request(challenge: Option<ChallengeToken>) -> Bytes {
    let mut packet =
        BytesMut::with_capacity(PACKET_PREFIX.len() + 1 + INFO_PAYLOAD.len() + 4);
    packet.put_slice(&PACKET_PREFIX);
    packet.put_u8(REQUEST_INFO);
    packet.put_slice(INFO_PAYLOAD);
    if let Some(token) = challenge {
        packet.put_slice(&token);
    }
    packet.freeze()
}

/// Build an `A2S_PLAYER` request
pub fn build_players_request(challenge: Option<ChallengeToken>) -> Bytes {
    build_challenged_request(REQUEST_PLAYERS, challenge)
}

/// Build an `A2S_RULES` request
pub fn build_rules_request(challenge: Option<ChallengeToken>) -> Bytes {
    build_challenged_request(REQUEST_RULES, challenge)
}

fn build_challenged_request(kind: u8, challenge: Option<ChallengeToken>) -> Bytes {
    let mut packet = BytesMut::with_capacity(PACKET_PREFIX.len() + 1 + 4);
    packet.put_slice(&PACKET_PREFIX);
    packet.put_u8(kind);
    packet.put_slice(&challenge.unwrap_or(CHALLENGE_PLACEHOLDER));
    packet.freeze()
}

/// Whether a reply is a challenge demand rather than a data reply.
///
/// True iff the first five bytes equal `FF FF FF FF 41`; any shorter
/// buffer is not a challenge.
pub fn is_challenge_reply(buf: &[u8]) -> bool {
    buf.len() >= REPLY_HEADER_LEN && buf[..4] == PACKET_PREFIX && buf[4] == REPLY_CHALLENGE
}

/// Extract the challenge token from reply bytes `[5..9]`
pub fn challenge_token(buf: &[u8]) -> Result<ChallengeToken> {
    match buf.get(REPLY_HEADER_LEN..REPLY_HEADER_LEN + 4) {
        Some(b) => Ok([b[0], b[1], b[2], b[3]]),
        None => Err(QueryError::Truncated {
            expected: 4,
            remaining: buf.len().saturating_sub(REPLY_HEADER_LEN),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_request_layout() {
        let packet = build_info_request(None);
        assert_eq!(&packet[..4], &[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(packet[4], REQUEST_INFO);
        assert_eq!(&packet[5..], b"Source Engine Query\0");
    }

    #[test]
    fn test_info_request_appends_token() {
        let packet = build_info_request(Some([0x01, 0x02, 0x03, 0x04]));
        assert_eq!(&packet[packet.len() - 4..], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(packet.len(), build_info_request(None).len() + 4);
    }

    #[test]
    fn test_players_request_placeholder() {
        let packet = build_players_request(None);
        assert_eq!(packet.len(), 9);
        assert_eq!(packet[4], REQUEST_PLAYERS);
        assert_eq!(&packet[5..], &[0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_players_request_with_token() {
        let packet = build_players_request(Some([0xDE, 0xAD, 0xBE, 0xEF]));
        assert_eq!(packet.len(), 9);
        assert_eq!(&packet[5..], &[0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_rules_request_type_byte() {
        let packet = build_rules_request(None);
        assert_eq!(packet[4], REQUEST_RULES);
        assert_eq!(packet.len(), 9);
    }

    #[test]
    fn test_is_challenge_reply() {
        assert!(is_challenge_reply(&[0xFF, 0xFF, 0xFF, 0xFF, 0x41]));
        assert!(is_challenge_reply(&[
            0xFF, 0xFF, 0xFF, 0xFF, 0x41, 0x01, 0x02, 0x03, 0x04
        ]));

        // wrong type byte, wrong prefix, too short, empty
        assert!(!is_challenge_reply(&[0xFF, 0xFF, 0xFF, 0xFF, 0x49]));
        assert!(!is_challenge_reply(&[0xFE, 0xFF, 0xFF, 0xFF, 0x41]));
        assert!(!is_challenge_reply(&[0xFF, 0xFF, 0xFF, 0xFF]));
        assert!(!is_challenge_reply(&[]));
    }

    #[test]
    fn test_challenge_token_extraction() {
        let reply = [0xFF, 0xFF, 0xFF, 0xFF, 0x41, 0x0A, 0x0B, 0x0C, 0x0D];
        assert_eq!(challenge_token(&reply).unwrap(), [0x0A, 0x0B, 0x0C, 0x0D]);
    }

    #[test]
    fn test_challenge_token_short_reply() {
        let reply = [0xFF, 0xFF, 0xFF, 0xFF, 0x41, 0x0A];
        assert!(matches!(
            challenge_token(&reply).unwrap_err(),
            QueryError::Truncated {
                expected: 4,
                remaining: 1
            }
        ));
    }
}
