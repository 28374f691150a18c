use std::io::{Read, Write};

use bedrock_data::packet::ITEM_STACK_REQUEST;
use bedrock_data::version::{PROTOCOL_1_16_200, PROTOCOL_1_18_10, PROTOCOL_1_19_50};

use crate::packet_decoder::PacketDecodeError;
use crate::packet_encoder::PacketEncodeError;
use crate::ser::packet::{Bound, Packet};
use crate::ser::{NetworkRead, NetworkWrite};
use crate::serializer::{ProtocolReader, ProtocolWriter};

pub mod action;

use action::{
    ACTION_PLACE_INTO_BUNDLE, ACTION_TAKE_FROM_BUNDLE, ItemStackRequestAction,
    canonical_action_type, wire_action_type,
};

/// One client-authoritative inventory transaction: an ordered batch of
/// actions, plus the strings typed into anvil or cartography filters.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStackRequest {
    pub request_id: i32,
    pub actions: Vec<ItemStackRequestAction>,
    /// Absent on the wire below 1.16.200.
    pub filter_strings: Vec<String>,
    /// Absent on the wire below 1.19.50; 0 when absent.
    pub filter_string_cause: i32,
}

impl ItemStackRequest {
    pub fn new(request_id: i32, actions: Vec<ItemStackRequestAction>) -> Self {
        Self {
            request_id,
            actions,
            filter_strings: Vec::new(),
            filter_string_cause: 0,
        }
    }

    fn decode(read: &mut ProtocolReader<impl Read>) -> Result<Self, PacketDecodeError> {
        let protocol = read.protocol_id();
        let request_id = read.get_generic_type_network_id()?;

        let action_count = read.get_var_uint()?.0 as usize;
        let mut actions = Vec::with_capacity(action_count.min(256));
        for _ in 0..action_count {
            let wire_type = read.get_u8()?;
            let canonical_type = canonical_action_type(wire_type, protocol);
            actions.push(ItemStackRequestAction::read(canonical_type, read)?);
        }

        let filter_strings = if protocol >= PROTOCOL_1_16_200 {
            read.get_list(|r| r.get_string())?
        } else {
            Vec::new()
        };
        let filter_string_cause = if protocol >= PROTOCOL_1_19_50 {
            read.get_i32_le()?
        } else {
            0
        };

        Ok(Self {
            request_id,
            actions,
            filter_strings,
            filter_string_cause,
        })
    }

    fn encode(&self, write: &mut ProtocolWriter<impl Write>) -> Result<(), PacketEncodeError> {
        let protocol = write.protocol_id();
        write.put_generic_type_network_id(self.request_id)?;

        write.write_var_uint(&(self.actions.len() as u32).into())?;
        for action in &self.actions {
            let canonical_type = action.type_id();
            // The bundle actions have no tag at all on older wires.
            if protocol < PROTOCOL_1_18_10
                && matches!(
                    canonical_type,
                    ACTION_PLACE_INTO_BUNDLE | ACTION_TAKE_FROM_BUNDLE
                )
            {
                return Err(PacketEncodeError::ActionNotRepresentable(canonical_type));
            }
            write.write_u8(wire_action_type(canonical_type, protocol))?;
            action.write_payload(write)?;
        }

        if protocol >= PROTOCOL_1_16_200 {
            write.write_list(&self.filter_strings, |w, v| w.write_string(v))?;
        }
        if protocol >= PROTOCOL_1_19_50 {
            write.write_i32_le(self.filter_string_cause)?;
        }

        Ok(())
    }
}

/// Carries one or more item stack requests from the client.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemStackRequestPacket {
    pub requests: Vec<ItemStackRequest>,
}

impl Packet for ItemStackRequestPacket {
    const NETWORK_ID: u32 = ITEM_STACK_REQUEST;
    const BOUND: Bound = Bound::Serverbound;
}

impl ItemStackRequestPacket {
    pub fn new(requests: Vec<ItemStackRequest>) -> Self {
        Self { requests }
    }

    pub fn decode_payload(read: &mut ProtocolReader<impl Read>) -> Result<Self, PacketDecodeError> {
        let request_count = read.get_var_uint()?.0 as usize;
        let mut requests = Vec::with_capacity(request_count.min(256));
        for _ in 0..request_count {
            requests.push(ItemStackRequest::decode(read)?);
        }
        Ok(Self { requests })
    }

    pub fn encode_payload(
        &self,
        write: &mut ProtocolWriter<impl Write>,
    ) -> Result<(), PacketEncodeError> {
        write.write_var_uint(&(self.requests.len() as u32).into())?;
        for request in &self.requests {
            request.encode(write)?;
        }
        Ok(())
    }
}
