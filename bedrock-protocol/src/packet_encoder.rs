use thiserror::Error;

use crate::ser::WritingError;
use crate::serializer::ProtocolWriter;
use crate::{GamePacket, PacketHeader};

/// Encode-side failures. Apart from the wrapped I/O kind these are
/// caller logic errors: the in-memory value is inconsistent or not
/// representable on the target protocol. Whatever landed in the output
/// before the failure is garbage; discard it.
#[derive(Debug, Error)]
pub enum PacketEncodeError {
    #[error("enum {0:?} was not picked up by the catalog intern walk")]
    UninternedEnum(String),
    #[error("enum value {0:?} is missing from the interned value pool")]
    UninternedEnumValue(String),
    #[error("postfix {0:?} is missing from the interned postfix pool")]
    UninternedPostfix(String),
    #[error("enum constraint index {index} is out of range for enum {enum_name:?}")]
    ConstraintIndexOutOfRange { enum_name: String, index: u32 },
    #[error("action type {0:#04x} is not representable below protocol 1.18.10")]
    ActionNotRepresentable(u8),
    #[error(transparent)]
    Writing(#[from] WritingError),
}

/// Encodes one framed packet payload: the varuint header followed by the
/// payload bytes `decode_game_packet` would consume.
pub fn encode_game_packet(
    packet: &GamePacket,
    protocol: u32,
    sender_sub_id: u8,
    receiver_sub_id: u8,
) -> Result<Vec<u8>, PacketEncodeError> {
    let mut buf = Vec::new();
    let mut write = ProtocolWriter::new(&mut buf, protocol);

    let header = PacketHeader {
        pid: packet.network_id(),
        sender_sub_id,
        receiver_sub_id,
    };
    header.encode(&mut write)?;

    match packet {
        GamePacket::SetSpawnPosition(p) => p.encode_payload(&mut write)?,
        GamePacket::RemoveActor(p) => p.encode_payload(&mut write)?,
        GamePacket::PlayerList(p) => p.encode_payload(&mut write)?,
        GamePacket::AvailableCommands(p) => p.encode_payload(&mut write)?,
        GamePacket::ItemStackRequest(p) => p.encode_payload(&mut write)?,
    }

    Ok(buf)
}
