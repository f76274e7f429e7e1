//! Typed reply records and their decoders.
//!
//! Each decoder strips the five-byte reply header and walks the body with
//! a [`PacketReader`], so a reply that is shorter than its declared counts
//! fails with a typed error instead of yielding a partial record.

use serde::{Deserialize, Serialize};

use crate::core::packet::REPLY_HEADER_LEN;
use crate::core::reader::PacketReader;
use crate::error::Result;

/// Extra Data Flag bits gating the optional tail of an info reply
const EDF_PORT: u8 = 0x80;
const EDF_STEAM_ID: u8 = 0x10;
const EDF_SPECTATOR: u8 = 0x40;
const EDF_KEYWORDS: u8 = 0x20;
const EDF_GAME_ID: u8 = 0x01;

/// Decoded `A2S_INFO` reply.
///
/// The optional fields are present only when the corresponding Extra Data
/// Flag bit is set in the reply. The 8-byte server SteamID (bit `0x10`)
/// is consumed but not surfaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub protocol: u8,
    pub name: String,
    pub map: String,
    pub folder: String,
    pub game: String,
    pub app_id: i16,
    pub players: u8,
    pub max_players: u8,
    pub bots: u8,
    /// `d` dedicated, `l` listen, `p` SourceTV relay
    pub server_type: char,
    /// `l` Linux, `w` Windows, `m`/`o` macOS
    pub environment: char,
    pub visibility: u8,
    pub vac: u8,
    pub version: String,
    pub port: Option<i16>,
    pub spectator_port: Option<u8>,
    pub spectator_name: Option<String>,
    pub keywords: Option<String>,
    pub game_id: Option<u64>,
}

/// One entry of an `A2S_PLAYER` reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub index: u8,
    pub name: String,
    pub score: i32,
    /// Seconds the player has been connected
    pub duration: f32,
}

/// Decoded `A2S_PLAYER` reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerList {
    pub count: u8,
    pub players: Vec<Player>,
}

/// One name/value pair of an `A2S_RULES` reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub value: String,
}

/// Decoded `A2S_RULES` reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleList {
    pub count: i16,
    pub rules: Vec<Rule>,
}

/// Decode an info reply body, including the optional EDF tail.
pub fn decode_info(buf: &[u8]) -> Result<ServerInfo> {
    let mut reader = PacketReader::new(buf);
    reader.skip(REPLY_HEADER_LEN)?;

    let mut info = ServerInfo {
        protocol: reader.read_u8()?,
        name: reader.read_cstring()?,
        map: reader.read_cstring()?,
        folder: reader.read_cstring()?,
        game: reader.read_cstring()?,
        app_id: reader.read_i16()?,
        players: reader.read_u8()?,
        max_players: reader.read_u8()?,
        bots: reader.read_u8()?,
        server_type: reader.read_char()?,
        environment: reader.read_char()?,
        visibility: reader.read_u8()?,
        vac: reader.read_u8()?,
        version: reader.read_cstring()?,
        port: None,
        spectator_port: None,
        spectator_name: None,
        keywords: None,
        game_id: None,
    };

    if reader.remaining() > 1 {
        let edf = reader.read_u8()?;
        if edf & EDF_PORT != 0 {
            info.port = Some(reader.read_i16()?);
        }
        if edf & EDF_STEAM_ID != 0 {
            reader.skip(8)?;
        }
        if edf & EDF_SPECTATOR != 0 {
            info.spectator_port = Some(reader.read_u8()?);
            info.spectator_name = Some(reader.read_cstring()?);
        }
        if edf & EDF_KEYWORDS != 0 {
            info.keywords = Some(reader.read_cstring()?);
        }
        if edf & EDF_GAME_ID != 0 {
            info.game_id = Some(reader.read_u64()?);
        }
    }

    Ok(info)
}

/// Decode a players reply body
pub fn decode_players(buf: &[u8]) -> Result<PlayerList> {
    let mut reader = PacketReader::new(buf);
    reader.skip(REPLY_HEADER_LEN)?;

    let count = reader.read_u8()?;
    let mut players = Vec::with_capacity(count as usize);
    for _ in 0..count {
        players.push(Player {
            index: reader.read_u8()?,
            name: reader.read_cstring()?,
            score: reader.read_i32()?,
            duration: reader.read_f32()?,
        });
    }

    Ok(PlayerList { count, players })
}

/// Decode a rules reply body
pub fn decode_rules(buf: &[u8]) -> Result<RuleList> {
    let mut reader = PacketReader::new(buf);
    reader.skip(REPLY_HEADER_LEN)?;

    let count = reader.read_i16()?;
    let mut rules = Vec::with_capacity(count.max(0) as usize);
    for _ in 0..count {
        rules.push(Rule {
            name: reader.read_cstring()?,
            value: reader.read_cstring()?,
        });
    }

    Ok(RuleList { count, rules })
}
