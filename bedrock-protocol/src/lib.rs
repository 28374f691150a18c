//! A bidirectional, protocol-versioned codec for Bedrock Edition game
//! packets. The library is stateless: it turns framed payload bytes into
//! typed packet values and back, and leaves transport, batching,
//! compression and encryption to the layers around it.

pub mod client;
pub mod codec;
pub mod command;
pub mod handler;
pub mod packet_decoder;
pub mod packet_encoder;
pub mod ser;
pub mod serializer;
pub mod server;

use client::available_commands::AvailableCommandsPacket;
use client::player_list::PlayerListPacket;
use client::remove_actor::RemoveActorPacket;
use client::set_spawn_position::SetSpawnPositionPacket;
use server::item_stack_request::ItemStackRequestPacket;

pub use codec::var_int::VarInt;
pub use codec::var_long::VarLong;
pub use codec::var_uint::VarUInt;
pub use codec::var_ulong::VarULong;
pub use handler::PacketHandler;
pub use ser::packet::{Bound, Packet};
pub use serializer::{BlockPos, ProtocolReader, ProtocolWriter};

use ser::{NetworkRead, NetworkWrite, ReadingError, WritingError};

const HEADER_PID_MASK: u32 = 0x3ff;
const HEADER_SENDER_SHIFT: u32 = 10;
const HEADER_RECEIVER_SHIFT: u32 = 12;
const HEADER_SUB_ID_MASK: u32 = 0x03;

/// The varuint every framed payload starts with: the packet's network ID
/// in the low 10 bits and the two split-screen sub-client IDs above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    pub pid: u32,
    pub sender_sub_id: u8,
    pub receiver_sub_id: u8,
}

impl PacketHeader {
    pub fn decode(read: &mut impl NetworkRead) -> Result<Self, ReadingError> {
        let raw = read.get_var_uint()?.0;
        Ok(Self {
            pid: raw & HEADER_PID_MASK,
            sender_sub_id: ((raw >> HEADER_SENDER_SHIFT) & HEADER_SUB_ID_MASK) as u8,
            receiver_sub_id: ((raw >> HEADER_RECEIVER_SHIFT) & HEADER_SUB_ID_MASK) as u8,
        })
    }

    pub fn encode(&self, write: &mut impl NetworkWrite) -> Result<(), WritingError> {
        let raw = (self.pid & HEADER_PID_MASK)
            | (u32::from(self.sender_sub_id) & HEADER_SUB_ID_MASK) << HEADER_SENDER_SHIFT
            | (u32::from(self.receiver_sub_id) & HEADER_SUB_ID_MASK) << HEADER_RECEIVER_SHIFT;
        write.write_var_uint(&VarUInt(raw))
    }
}

/// The closed set of packet variants this library understands. Decoding
/// an ID outside this set is an error, never a silent drop.
#[derive(Debug, Clone, PartialEq)]
pub enum GamePacket {
    SetSpawnPosition(SetSpawnPositionPacket),
    RemoveActor(RemoveActorPacket),
    PlayerList(PlayerListPacket),
    AvailableCommands(AvailableCommandsPacket),
    ItemStackRequest(ItemStackRequestPacket),
}

impl GamePacket {
    pub fn network_id(&self) -> u32 {
        match self {
            Self::SetSpawnPosition(_) => SetSpawnPositionPacket::NETWORK_ID,
            Self::RemoveActor(_) => RemoveActorPacket::NETWORK_ID,
            Self::PlayerList(_) => PlayerListPacket::NETWORK_ID,
            Self::AvailableCommands(_) => AvailableCommandsPacket::NETWORK_ID,
            Self::ItemStackRequest(_) => ItemStackRequestPacket::NETWORK_ID,
        }
    }

    pub fn bound(&self) -> Bound {
        match self {
            Self::SetSpawnPosition(_) => SetSpawnPositionPacket::BOUND,
            Self::RemoveActor(_) => RemoveActorPacket::BOUND,
            Self::PlayerList(_) => PlayerListPacket::BOUND,
            Self::AvailableCommands(_) => AvailableCommandsPacket::BOUND,
            Self::ItemStackRequest(_) => ItemStackRequestPacket::BOUND,
        }
    }
}

/// A framed payload as handed over by the transport layer: the already
/// version-tagged bytes of exactly one packet.
pub struct RawPacket {
    pub protocol: u32,
    pub payload: bytes::Bytes,
}

impl RawPacket {
    pub fn decode(&self) -> Result<(PacketHeader, GamePacket), packet_decoder::PacketDecodeError> {
        packet_decoder::decode_game_packet(&self.payload, self.protocol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_bit_packing() {
        let header = PacketHeader {
            pid: 0x93,
            sender_sub_id: 1,
            receiver_sub_id: 2,
        };

        let mut buf = Vec::new();
        header.encode(&mut buf).unwrap();
        // 0x93 | 1 << 10 | 2 << 12 = 0x2493
        assert_eq!(buf, [0x93, 0x49]);

        let mut cursor = std::io::Cursor::new(buf);
        assert_eq!(PacketHeader::decode(&mut cursor).unwrap(), header);
    }

    #[test]
    fn test_header_without_sub_ids_is_just_the_pid() {
        let header = PacketHeader {
            pid: 0x3f,
            sender_sub_id: 0,
            receiver_sub_id: 0,
        };

        let mut buf = Vec::new();
        header.encode(&mut buf).unwrap();
        assert_eq!(buf, [0x3f]);
    }

    #[test]
    fn test_raw_packet_decodes_with_its_own_protocol() {
        use bedrock_data::version::CURRENT_PROTOCOL;

        let packet = GamePacket::RemoveActor(RemoveActorPacket::new(9));
        assert_eq!(packet.bound(), Bound::Clientbound);

        let bytes = packet_encoder::encode_game_packet(&packet, CURRENT_PROTOCOL, 0, 0).unwrap();
        let raw = RawPacket {
            protocol: CURRENT_PROTOCOL,
            payload: bytes::Bytes::from(bytes),
        };

        let (header, back) = raw.decode().unwrap();
        assert_eq!(header.pid, RemoveActorPacket::NETWORK_ID);
        assert_eq!(back, packet);
    }
}
