use std::io::{Read, Write};

use bedrock_data::packet::PLAYER_LIST;
use bedrock_data::version::{PROTOCOL_1_13_0, PROTOCOL_1_14_60};
use uuid::Uuid;

use crate::packet_decoder::PacketDecodeError;
use crate::packet_encoder::PacketEncodeError;
use crate::ser::packet::{Bound, Packet};
use crate::ser::{NetworkRead, NetworkWrite};
use crate::serializer::skin::{SkinData, SkinImage};
use crate::serializer::{ProtocolReader, ProtocolWriter};

pub const TYPE_ADD: u8 = 0;
pub const TYPE_REMOVE: u8 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerListEntry {
    pub uuid: Uuid,
    pub actor_unique_id: i64,
    pub username: String,
    pub xbox_user_id: String,
    pub platform_chat_id: String,
    pub build_platform: i32,
    pub skin: SkinData,
    pub is_teacher: bool,
    pub is_host: bool,
}

impl PlayerListEntry {
    /// Removal entries carry the UUID only; everything else stays at its
    /// default and is ignored by the codec.
    pub fn removal(uuid: Uuid) -> Self {
        Self {
            uuid,
            ..Self::default()
        }
    }
}

impl Default for PlayerListEntry {
    fn default() -> Self {
        Self {
            uuid: Uuid::nil(),
            actor_unique_id: 0,
            username: String::new(),
            xbox_user_id: String::new(),
            platform_chat_id: String::new(),
            build_platform: 0,
            skin: SkinData::default(),
            is_teacher: false,
            is_host: false,
        }
    }
}

/// Adds players to or removes players from the client's pause-menu list.
///
/// For additions on 1.14.60 and newer, the per-entry payloads are
/// followed by a positional band of one "skin verified" boolean per
/// entry, in the exact order the entries were written.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerListPacket {
    pub list_type: u8,
    pub entries: Vec<PlayerListEntry>,
}

impl Packet for PlayerListPacket {
    const NETWORK_ID: u32 = PLAYER_LIST;
    const BOUND: Bound = Bound::Clientbound;
}

impl PlayerListPacket {
    pub fn add(entries: Vec<PlayerListEntry>) -> Self {
        Self {
            list_type: TYPE_ADD,
            entries,
        }
    }

    pub fn remove(entries: Vec<PlayerListEntry>) -> Self {
        Self {
            list_type: TYPE_REMOVE,
            entries,
        }
    }

    pub fn decode_payload(read: &mut ProtocolReader<impl Read>) -> Result<Self, PacketDecodeError> {
        let protocol = read.protocol_id();
        let list_type = read.get_u8()?;
        let count = read.get_var_uint()?.0 as usize;

        let mut entries = Vec::with_capacity(count.min(256));
        for _ in 0..count {
            let entry = match list_type {
                TYPE_ADD => Self::decode_addition(read, protocol)?,
                TYPE_REMOVE => PlayerListEntry::removal(read.get_uuid()?),
                other => {
                    return Err(PacketDecodeError::Malformed(format!(
                        "unknown player list action type {other}"
                    )));
                }
            };
            entries.push(entry);
        }

        // Second, positional pass: the trailer re-walks the entries in
        // decode order.
        if list_type == TYPE_ADD && protocol >= PROTOCOL_1_14_60 {
            for entry in &mut entries {
                entry.skin.verified = read.get_bool()?;
            }
        }

        Ok(Self { list_type, entries })
    }

    fn decode_addition(
        read: &mut ProtocolReader<impl Read>,
        protocol: u32,
    ) -> Result<PlayerListEntry, PacketDecodeError> {
        let uuid = read.get_uuid()?;
        let actor_unique_id = read.get_actor_unique_id()?;
        let username = read.get_string()?;

        let mut entry = PlayerListEntry {
            uuid,
            actor_unique_id,
            username,
            ..PlayerListEntry::default()
        };

        if protocol >= PROTOCOL_1_13_0 {
            entry.xbox_user_id = read.get_string()?;
            entry.platform_chat_id = read.get_string()?;
            entry.build_platform = read.get_i32_le()?;
            entry.skin = read.get_skin()?;
            entry.is_teacher = read.get_bool()?;
            entry.is_host = read.get_bool()?;
        } else {
            // Legacy five-string skin, rebuilt into the canonical shape.
            let skin_id = read.get_string()?;
            let skin_pixels = read.get_byte_array()?;
            let cape_pixels = read.get_byte_array()?;
            let _geometry_name = read.get_string()?;
            let geometry_data = read.get_string()?;

            entry.skin = SkinData {
                skin_id,
                skin_image: SkinImage::from_legacy(skin_pixels)
                    .map_err(PacketDecodeError::Malformed)?,
                cape_image: SkinImage::from_legacy(cape_pixels)
                    .map_err(PacketDecodeError::Malformed)?,
                geometry_data,
                ..SkinData::default()
            };
            entry.xbox_user_id = read.get_string()?;
            entry.platform_chat_id = read.get_string()?;
        }

        Ok(entry)
    }

    pub fn encode_payload(
        &self,
        write: &mut ProtocolWriter<impl Write>,
    ) -> Result<(), PacketEncodeError> {
        let protocol = write.protocol_id();
        write.write_u8(self.list_type)?;
        write.write_var_uint(&(self.entries.len() as u32).into())?;

        for entry in &self.entries {
            match self.list_type {
                TYPE_ADD => Self::encode_addition(write, entry, protocol)?,
                _ => write.write_uuid(&entry.uuid)?,
            }
        }

        if self.list_type == TYPE_ADD && protocol >= PROTOCOL_1_14_60 {
            for entry in &self.entries {
                write.write_bool(entry.skin.verified)?;
            }
        }

        Ok(())
    }

    fn encode_addition(
        write: &mut ProtocolWriter<impl Write>,
        entry: &PlayerListEntry,
        protocol: u32,
    ) -> Result<(), PacketEncodeError> {
        write.write_uuid(&entry.uuid)?;
        write.put_actor_unique_id(entry.actor_unique_id)?;
        write.write_string(&entry.username)?;

        if protocol >= PROTOCOL_1_13_0 {
            write.write_string(&entry.xbox_user_id)?;
            write.write_string(&entry.platform_chat_id)?;
            write.write_i32_le(entry.build_platform)?;
            write.put_skin(&entry.skin)?;
            write.write_bool(entry.is_teacher)?;
            write.write_bool(entry.is_host)?;
        } else {
            write.write_string(&entry.skin.skin_id)?;
            write.write_byte_array(&entry.skin.skin_image.data)?;
            write.write_byte_array(&entry.skin.cape_image.data)?;
            // The geometry name is not representable in the canonical
            // skin shape; legacy peers receive an empty one.
            write.write_string("")?;
            write.write_string(&entry.skin.geometry_data)?;
            write.write_string(&entry.xbox_user_id)?;
            write.write_string(&entry.platform_chat_id)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bedrock_data::version::{PROTOCOL_1_12_0, PROTOCOL_1_14_60, PROTOCOL_1_19_50};
    use bytes::Bytes;

    use super::*;

    fn encode(packet: &PlayerListPacket, protocol: u32) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut writer = ProtocolWriter::new(&mut buf, protocol);
        packet.encode_payload(&mut writer).unwrap();
        buf
    }

    fn decode(bytes: &[u8], protocol: u32) -> PlayerListPacket {
        let mut reader = ProtocolReader::new(Cursor::new(bytes), protocol);
        PlayerListPacket::decode_payload(&mut reader).unwrap()
    }

    fn addition_entry(name: &str, actor_unique_id: i64) -> PlayerListEntry {
        PlayerListEntry {
            uuid: Uuid::new_v4(),
            actor_unique_id,
            username: name.to_string(),
            xbox_user_id: format!("xuid-{name}"),
            platform_chat_id: String::new(),
            build_platform: 7,
            skin: SkinData {
                skin_id: format!("skin-{name}"),
                ..SkinData::default()
            },
            is_teacher: false,
            is_host: false,
        }
    }

    #[test]
    fn test_remove_wire_format() {
        let uuid = Uuid::parse_str("00112233-4455-6677-8899-aabbccddeeff").unwrap();
        let packet = PlayerListPacket::remove(vec![PlayerListEntry::removal(uuid)]);

        let bytes = encode(&packet, PROTOCOL_1_19_50);
        assert_eq!(
            bytes,
            [
                0x01, 0x01, // remove, one entry
                0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11, 0x00, // msb half
                0xff, 0xee, 0xdd, 0xcc, 0xbb, 0xaa, 0x99, 0x88, // lsb half
            ]
        );

        assert_eq!(decode(&bytes, PROTOCOL_1_19_50), packet);
    }

    /// The verified flags trail the entry payloads positionally; flipping
    /// one trailer byte must flip exactly that entry's flag.
    #[test]
    fn test_verified_trailer_is_positional() {
        let packet =
            PlayerListPacket::add(vec![addition_entry("alice", 1), addition_entry("bob", 2)]);
        let mut bytes = encode(&packet, PROTOCOL_1_19_50);

        let len = bytes.len();
        assert_eq!(&bytes[len - 2..], [0x01, 0x01]);

        bytes[len - 2] = 0x00;
        let back = decode(&bytes, PROTOCOL_1_19_50);
        assert!(!back.entries[0].skin.verified);
        assert!(back.entries[1].skin.verified);

        bytes[len - 2] = 0x01;
        bytes[len - 1] = 0x00;
        let back = decode(&bytes, PROTOCOL_1_19_50);
        assert!(back.entries[0].skin.verified);
        assert!(!back.entries[1].skin.verified);
    }

    /// Below 1.14.60 there is no trailer at all.
    #[test]
    fn test_no_trailer_below_1_14_60() {
        let packet = PlayerListPacket::add(vec![addition_entry("alice", 1)]);
        let with = encode(&packet, PROTOCOL_1_14_60);
        let without = encode(&packet, PROTOCOL_1_13_0);
        assert_eq!(with.len(), without.len() + 1);
    }

    /// Pre-1.13.0 entries carry the legacy five-string skin, which is
    /// rebuilt into the canonical shape with an empty resource patch.
    #[test]
    fn test_legacy_addition_roundtrip() {
        let mut entry = addition_entry("steve", 3);
        entry.skin.skin_image = SkinImage::from_legacy(Bytes::from(vec![0x7f; 8192])).unwrap();
        // Not representable on the legacy wire; zero it so the round trip
        // compares equal.
        entry.build_platform = 0;

        let packet = PlayerListPacket::add(vec![entry]);
        let bytes = encode(&packet, PROTOCOL_1_12_0);
        let back = decode(&bytes, PROTOCOL_1_12_0);

        assert_eq!(back, packet);
        let skin = &back.entries[0].skin;
        assert!(skin.resource_patch.is_empty());
        assert_eq!((skin.skin_image.width, skin.skin_image.height), (64, 32));
        assert!(skin.verified);
    }

    #[test]
    fn test_unknown_action_type_rejected() {
        let bytes = [0x02, 0x00];
        let mut reader = ProtocolReader::new(Cursor::new(bytes.as_slice()), PROTOCOL_1_19_50);
        assert!(matches!(
            PlayerListPacket::decode_payload(&mut reader),
            Err(PacketDecodeError::Malformed(_))
        ));
    }
}
