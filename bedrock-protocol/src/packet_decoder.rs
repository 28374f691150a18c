use std::io::Cursor;

use bedrock_data::packet;
use thiserror::Error;

use crate::client::available_commands::AvailableCommandsPacket;
use crate::client::player_list::PlayerListPacket;
use crate::client::remove_actor::RemoveActorPacket;
use crate::client::set_spawn_position::SetSpawnPositionPacket;
use crate::server::item_stack_request::ItemStackRequestPacket;
use crate::ser::ReadingError;
use crate::serializer::ProtocolReader;
use crate::{GamePacket, PacketHeader};

/// Semantic decode failures: the bytes were readable but violate the
/// protocol. Truncation and over-length failures surface as the wrapped
/// [`ReadingError`] instead.
#[derive(Debug, Error)]
pub enum PacketDecodeError {
    #[error("unknown packet network ID {0:#04x}")]
    UnknownPacket(u32),
    #[error("unknown item stack request action type {0:#04x}")]
    UnknownActionType(u8),
    #[error("Invalid enum value index {index} (pool holds {pool_size})")]
    InvalidEnumValueIndex { index: usize, pool_size: usize },
    #[error("invalid enum index {index} (pool holds {pool_size})")]
    InvalidEnumIndex { index: usize, pool_size: usize },
    #[error("invalid postfix index {index} (pool holds {pool_size})")]
    InvalidPostfixIndex { index: usize, pool_size: usize },
    #[error("parameter type {0:#010x} carries no recognized type flag")]
    InvalidParameterType(u32),
    #[error("enum constraint refers to {value:?}, which is not a value of enum {enum_name:?}")]
    ConstraintValueMissing { enum_name: String, value: String },
    #[error("malformed packet: {0}")]
    Malformed(String),
    #[error(transparent)]
    Reading(#[from] ReadingError),
}

/// Decodes one framed packet payload: the varuint header, then the
/// payload of the variant the header names. The input must be consumed
/// exactly; trailing bytes mean the peer and we disagree about the
/// grammar, which is as fatal as running short.
pub fn decode_game_packet(
    payload: &[u8],
    protocol: u32,
) -> Result<(PacketHeader, GamePacket), PacketDecodeError> {
    let mut read = ProtocolReader::new(Cursor::new(payload), protocol);
    let header = PacketHeader::decode(&mut read)?;

    let packet = match header.pid {
        packet::SET_SPAWN_POSITION => {
            GamePacket::SetSpawnPosition(SetSpawnPositionPacket::decode_payload(&mut read)?)
        }
        packet::REMOVE_ACTOR => {
            GamePacket::RemoveActor(RemoveActorPacket::decode_payload(&mut read)?)
        }
        packet::PLAYER_LIST => GamePacket::PlayerList(PlayerListPacket::decode_payload(&mut read)?),
        packet::AVAILABLE_COMMANDS => {
            GamePacket::AvailableCommands(AvailableCommandsPacket::decode_payload(&mut read)?)
        }
        packet::ITEM_STACK_REQUEST => {
            GamePacket::ItemStackRequest(ItemStackRequestPacket::decode_payload(&mut read)?)
        }
        other => {
            log::debug!("rejecting packet with unknown network ID {other:#04x}");
            return Err(PacketDecodeError::UnknownPacket(other));
        }
    };

    let consumed = read.into_inner().position() as usize;
    if consumed != payload.len() {
        return Err(PacketDecodeError::Malformed(format!(
            "{} trailing bytes after the payload",
            payload.len() - consumed
        )));
    }

    Ok((header, packet))
}

#[cfg(test)]
mod tests {
    use bedrock_data::version::CURRENT_PROTOCOL;

    use crate::packet_encoder::encode_game_packet;
    use crate::serializer::BlockPos;

    use super::*;

    #[test]
    fn test_full_roundtrip_through_framing() {
        let packet = GamePacket::SetSpawnPosition(SetSpawnPositionPacket::world_spawn(
            BlockPos::new(4, 70, -4),
            0,
        ));

        let bytes = encode_game_packet(&packet, CURRENT_PROTOCOL, 0, 0).unwrap();
        let (header, back) = decode_game_packet(&bytes, CURRENT_PROTOCOL).unwrap();

        assert_eq!(header.pid, packet::SET_SPAWN_POSITION);
        assert_eq!(back, packet);
    }

    #[test]
    fn test_sub_ids_survive_the_header() {
        let packet = GamePacket::RemoveActor(RemoveActorPacket::new(12));

        let bytes = encode_game_packet(&packet, CURRENT_PROTOCOL, 2, 1).unwrap();
        let (header, _) = decode_game_packet(&bytes, CURRENT_PROTOCOL).unwrap();

        assert_eq!(header.pid, packet::REMOVE_ACTOR);
        assert_eq!(header.sender_sub_id, 2);
        assert_eq!(header.receiver_sub_id, 1);
    }

    /// The variant set is closed: an unrecognized ID is an error, never a
    /// silent drop.
    #[test]
    fn test_unknown_packet_id_rejected() {
        // Header varuint for pid 0x1ff, then nothing.
        let bytes = [0xff, 0x03];
        assert!(matches!(
            decode_game_packet(&bytes, CURRENT_PROTOCOL),
            Err(PacketDecodeError::UnknownPacket(0x1ff))
        ));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let packet = GamePacket::RemoveActor(RemoveActorPacket::new(3));
        let mut bytes = encode_game_packet(&packet, CURRENT_PROTOCOL, 0, 0).unwrap();
        bytes.push(0x00);

        assert!(matches!(
            decode_game_packet(&bytes, CURRENT_PROTOCOL),
            Err(PacketDecodeError::Malformed(_))
        ));
    }

    /// Every strict prefix of a valid encoding fails with a bounds error
    /// rather than panicking or succeeding.
    #[test]
    fn test_prefixes_fail_with_bounds_errors() {
        let packet = GamePacket::SetSpawnPosition(SetSpawnPositionPacket::world_spawn(
            BlockPos::new(100, 64, -100),
            2,
        ));
        let bytes = encode_game_packet(&packet, CURRENT_PROTOCOL, 0, 0).unwrap();

        for len in 0..bytes.len() {
            match decode_game_packet(&bytes[..len], CURRENT_PROTOCOL) {
                Err(PacketDecodeError::Reading(ReadingError::Incomplete(_))) => {}
                other => panic!("prefix of {len} bytes produced {other:?}"),
            }
        }
    }
}
