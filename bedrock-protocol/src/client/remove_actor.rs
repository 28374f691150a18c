use std::io::{Read, Write};

use bedrock_data::packet::REMOVE_ACTOR;

use crate::packet_decoder::PacketDecodeError;
use crate::packet_encoder::PacketEncodeError;
use crate::ser::packet::{Bound, Packet};
use crate::serializer::{ProtocolReader, ProtocolWriter};

/// Despawns an actor on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveActorPacket {
    pub actor_unique_id: i64,
}

impl Packet for RemoveActorPacket {
    const NETWORK_ID: u32 = REMOVE_ACTOR;
    const BOUND: Bound = Bound::Clientbound;
}

impl RemoveActorPacket {
    pub fn new(actor_unique_id: i64) -> Self {
        Self { actor_unique_id }
    }

    pub fn decode_payload(read: &mut ProtocolReader<impl Read>) -> Result<Self, PacketDecodeError> {
        Ok(Self {
            actor_unique_id: read.get_actor_unique_id()?,
        })
    }

    pub fn encode_payload(
        &self,
        write: &mut ProtocolWriter<impl Write>,
    ) -> Result<(), PacketEncodeError> {
        write.put_actor_unique_id(self.actor_unique_id)?;
        Ok(())
    }
}
