use std::io::{Read, Write};

use bedrock_data::packet::SET_SPAWN_POSITION;
use bedrock_data::version::PROTOCOL_1_16_0;

use crate::packet_decoder::PacketDecodeError;
use crate::packet_encoder::PacketEncodeError;
use crate::ser::packet::{Bound, Packet};
use crate::ser::{NetworkRead, NetworkWrite};
use crate::serializer::{BlockPos, ProtocolReader, ProtocolWriter};

pub const TYPE_PLAYER_SPAWN: i32 = 0;
pub const TYPE_WORLD_SPAWN: i32 = 1;

pub const DIMENSION_OVERWORLD: i32 = 0;

/// Tells the client where its compass points and where it respawns.
///
/// From 1.16.0 the packet carries a dimension and the position of the
/// block that caused the spawn change (a bed or respawn anchor); before
/// that it carried a single "spawn forced" flag instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetSpawnPositionPacket {
    pub spawn_type: i32,
    pub spawn_position: BlockPos,
    pub dimension: i32,
    pub causing_block_position: BlockPos,
    pub spawn_forced: bool,
}

impl Packet for SetSpawnPositionPacket {
    const NETWORK_ID: u32 = SET_SPAWN_POSITION;
    const BOUND: Bound = Bound::Clientbound;
}

impl SetSpawnPositionPacket {
    /// A player-specific spawn, caused by an explicit block.
    pub fn player_spawn(
        spawn_position: BlockPos,
        dimension: i32,
        causing_block_position: BlockPos,
    ) -> Self {
        Self {
            spawn_type: TYPE_PLAYER_SPAWN,
            spawn_position,
            dimension,
            causing_block_position,
            spawn_forced: false,
        }
    }

    /// The world spawn; the causing block is filled with sentinels.
    pub fn world_spawn(spawn_position: BlockPos, dimension: i32) -> Self {
        Self {
            spawn_type: TYPE_WORLD_SPAWN,
            spawn_position,
            dimension,
            causing_block_position: BlockPos::sentinel(),
            spawn_forced: false,
        }
    }

    pub fn decode_payload(read: &mut ProtocolReader<impl Read>) -> Result<Self, PacketDecodeError> {
        let spawn_type = read.get_var_int()?.0;
        let spawn_position = read.get_block_position()?;

        if read.protocol_id() >= PROTOCOL_1_16_0 {
            Ok(Self {
                spawn_type,
                spawn_position,
                dimension: read.get_var_int()?.0,
                causing_block_position: read.get_block_position()?,
                spawn_forced: false,
            })
        } else {
            Ok(Self {
                spawn_type,
                spawn_position,
                // Not on the wire here; filled with explicit defaults
                // instead of being left indeterminate.
                dimension: DIMENSION_OVERWORLD,
                causing_block_position: BlockPos::sentinel(),
                spawn_forced: read.get_bool()?,
            })
        }
    }

    pub fn encode_payload(
        &self,
        write: &mut ProtocolWriter<impl Write>,
    ) -> Result<(), PacketEncodeError> {
        write.write_var_int(&self.spawn_type.into())?;
        write.put_block_position(&self.spawn_position)?;

        if write.protocol_id() >= PROTOCOL_1_16_0 {
            write.write_var_int(&self.dimension.into())?;
            write.put_block_position(&self.causing_block_position)?;
        } else {
            write.write_bool(self.spawn_forced)?;
        }
        Ok(())
    }
}
