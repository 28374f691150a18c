use std::collections::HashMap;
use std::io::{Read, Write};

use bedrock_data::packet::AVAILABLE_COMMANDS;
use bedrock_data::version::{PROTOCOL_1_13_0, PROTOCOL_1_17_10};

use crate::command::{
    ARG_FLAG_ENUM, ARG_FLAG_POSTFIX, ARG_FLAG_VALID, CommandData, CommandEnum,
    CommandEnumConstraint, CommandOverload, CommandParameter, HARDCODED_ENUM_NAMES, ParamKind,
    wire_arg_type,
};
use crate::packet_decoder::PacketDecodeError;
use crate::packet_encoder::PacketEncodeError;
use crate::ser::packet::{Bound, Packet};
use crate::ser::{NetworkRead, NetworkWrite, ReadingError, WritingError};
use crate::serializer::{ProtocolReader, ProtocolWriter};

/// Sends the full command catalog to the client.
///
/// On the wire the catalog is interned into four flat tables: the enum
/// value pool, the postfix pool, the enum pool and the command list, with
/// soft enums and enum constraints riding behind them. Both peers must
/// walk the catalog in the same order for the pool indices to line up;
/// the walk here is hardcoded enums, then command aliases, then overload
/// parameters, each in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AvailableCommandsPacket {
    pub hardcoded_enums: Vec<CommandEnum>,
    pub commands: Vec<CommandData>,
    pub soft_enums: Vec<CommandEnum>,
    pub enum_constraints: Vec<CommandEnumConstraint>,
}

impl Packet for AvailableCommandsPacket {
    const NETWORK_ID: u32 = AVAILABLE_COMMANDS;
    const BOUND: Bound = Bound::Clientbound;
}

/// Enum value indices adapt their width to the final pool size.
fn get_enum_value_index(
    read: &mut impl NetworkRead,
    pool_size: usize,
) -> Result<usize, ReadingError> {
    if pool_size < 256 {
        Ok(read.get_u8()? as usize)
    } else if pool_size < 65536 {
        Ok(read.get_u16_le()? as usize)
    } else {
        Ok(read.get_u32_le()? as usize)
    }
}

fn put_enum_value_index(
    write: &mut impl NetworkWrite,
    index: usize,
    pool_size: usize,
) -> Result<(), WritingError> {
    if pool_size < 256 {
        write.write_u8(index as u8)
    } else if pool_size < 65536 {
        write.write_u16_le(index as u16)
    } else {
        write.write_u32_le(index as u32)
    }
}

/// Encode-side intern state: insertion-ordered vectors with a hash index
/// on the side, so the output is deterministic for a fixed catalog.
#[derive(Default)]
struct InternTables {
    enum_values: Vec<String>,
    enum_value_index: HashMap<String, usize>,
    postfixes: Vec<String>,
    postfix_index: HashMap<String, usize>,
    enums: Vec<CommandEnum>,
    enum_index: HashMap<String, usize>,
}

impl InternTables {
    /// First occurrence wins: a later enum with an already-seen name does
    /// not intern again, and duplicate values share a pool slot.
    fn add_enum(&mut self, command_enum: &CommandEnum) {
        if self.enum_index.contains_key(&command_enum.name) {
            return;
        }
        self.enum_index
            .insert(command_enum.name.clone(), self.enums.len());
        self.enums.push(command_enum.clone());

        for value in &command_enum.values {
            if !self.enum_value_index.contains_key(value) {
                self.enum_value_index
                    .insert(value.clone(), self.enum_values.len());
                self.enum_values.push(value.clone());
            }
        }
    }

    fn add_postfix(&mut self, postfix: &str) {
        if !self.postfix_index.contains_key(postfix) {
            self.postfix_index
                .insert(postfix.to_string(), self.postfixes.len());
            self.postfixes.push(postfix.to_string());
        }
    }

    fn enum_index_of(&self, command_enum: &CommandEnum) -> Result<usize, PacketEncodeError> {
        self.enum_index
            .get(&command_enum.name)
            .copied()
            .ok_or_else(|| PacketEncodeError::UninternedEnum(command_enum.name.clone()))
    }

    fn value_index_of(&self, value: &str) -> Result<usize, PacketEncodeError> {
        self.enum_value_index
            .get(value)
            .copied()
            .ok_or_else(|| PacketEncodeError::UninternedEnumValue(value.to_string()))
    }
}

impl AvailableCommandsPacket {
    pub fn decode_payload(read: &mut ProtocolReader<impl Read>) -> Result<Self, PacketDecodeError> {
        let protocol = read.protocol_id();

        let enum_values = read.get_list(|r| r.get_string())?;
        let postfixes = read.get_list(|r| r.get_string())?;

        let enum_count = read.get_var_uint()?.0 as usize;
        let mut enums = Vec::with_capacity(enum_count.min(4096));
        for _ in 0..enum_count {
            let name = read.get_string()?;
            let value_count = read.get_var_uint()?.0 as usize;
            let mut values = Vec::with_capacity(value_count.min(4096));
            for _ in 0..value_count {
                let index = get_enum_value_index(read, enum_values.len())?;
                let value =
                    enum_values
                        .get(index)
                        .ok_or(PacketDecodeError::InvalidEnumValueIndex {
                            index,
                            pool_size: enum_values.len(),
                        })?;
                values.push(value.clone());
            }
            enums.push(CommandEnum { name, values });
        }

        let hardcoded_enums = enums
            .iter()
            .filter(|e| HARDCODED_ENUM_NAMES.contains(&e.name.as_str()))
            .cloned()
            .collect();

        let command_count = read.get_var_uint()?.0 as usize;
        let mut commands = Vec::with_capacity(command_count.min(4096));
        for _ in 0..command_count {
            commands.push(Self::decode_command(read, protocol, &enums, &postfixes)?);
        }

        let soft_enum_count = read.get_var_uint()?.0 as usize;
        let mut soft_enums = Vec::with_capacity(soft_enum_count.min(4096));
        for _ in 0..soft_enum_count {
            let name = read.get_string()?;
            let values = read.get_list(|r| r.get_string())?;
            soft_enums.push(CommandEnum { name, values });
        }

        let mut enum_constraints = Vec::new();
        if protocol >= PROTOCOL_1_13_0 {
            let constraint_count = read.get_var_uint()?.0 as usize;
            for _ in 0..constraint_count {
                enum_constraints.push(Self::decode_constraint(read, &enum_values, &enums)?);
            }
        }

        Ok(Self {
            hardcoded_enums,
            commands,
            soft_enums,
            enum_constraints,
        })
    }

    fn decode_command(
        read: &mut ProtocolReader<impl Read>,
        protocol: u32,
        enums: &[CommandEnum],
        postfixes: &[String],
    ) -> Result<CommandData, PacketDecodeError> {
        let name = read.get_string()?;
        let description = read.get_string()?;
        let flags = if protocol >= PROTOCOL_1_17_10 {
            read.get_u16_le()?
        } else {
            u16::from(read.get_u8()?)
        };
        let permission = read.get_u8()?;

        let alias_index = read.get_i32_le()?;
        let aliases = if alias_index < 0 {
            None
        } else {
            let index = alias_index as usize;
            Some(
                enums
                    .get(index)
                    .ok_or(PacketDecodeError::InvalidEnumIndex {
                        index,
                        pool_size: enums.len(),
                    })?
                    .clone(),
            )
        };

        let overload_count = read.get_var_uint()?.0 as usize;
        let mut overloads = Vec::with_capacity(overload_count.min(4096));
        for _ in 0..overload_count {
            let parameter_count = read.get_var_uint()?.0 as usize;
            let mut parameters = Vec::with_capacity(parameter_count.min(4096));
            for _ in 0..parameter_count {
                parameters.push(Self::decode_parameter(read, enums, postfixes)?);
            }
            overloads.push(CommandOverload { parameters });
        }

        Ok(CommandData {
            name,
            description,
            flags,
            permission,
            aliases,
            overloads,
        })
    }

    fn decode_parameter(
        read: &mut ProtocolReader<impl Read>,
        enums: &[CommandEnum],
        postfixes: &[String],
    ) -> Result<CommandParameter, PacketDecodeError> {
        let name = read.get_string()?;
        let param_type = read.get_u32_le()?;
        let optional = read.get_bool()?;
        let flags = read.get_u8()?;

        let is_enum = param_type & ARG_FLAG_ENUM != 0;
        let is_postfix = param_type & ARG_FLAG_POSTFIX != 0;
        let is_basic = param_type & ARG_FLAG_VALID != 0;

        let kind = match (is_enum, is_postfix, is_basic) {
            (true, false, false) => {
                let index = (param_type & 0xffff) as usize;
                ParamKind::Enum(
                    enums
                        .get(index)
                        .ok_or(PacketDecodeError::InvalidEnumIndex {
                            index,
                            pool_size: enums.len(),
                        })?
                        .clone(),
                )
            }
            (false, true, false) => {
                let index = (param_type & 0xffff) as usize;
                ParamKind::Postfix(
                    postfixes
                        .get(index)
                        .ok_or(PacketDecodeError::InvalidPostfixIndex {
                            index,
                            pool_size: postfixes.len(),
                        })?
                        .clone(),
                )
            }
            // Wire codes are kept as decoded; there is no reverse type
            // mapping for older protocols.
            (false, false, true) => ParamKind::Basic(param_type & 0xff),
            _ => return Err(PacketDecodeError::InvalidParameterType(param_type)),
        };

        Ok(CommandParameter {
            name,
            kind,
            optional,
            flags,
        })
    }

    fn decode_constraint(
        read: &mut ProtocolReader<impl Read>,
        enum_values: &[String],
        enums: &[CommandEnum],
    ) -> Result<CommandEnumConstraint, PacketDecodeError> {
        let value_index = read.get_u32_le()? as usize;
        let value =
            enum_values
                .get(value_index)
                .ok_or(PacketDecodeError::InvalidEnumValueIndex {
                    index: value_index,
                    pool_size: enum_values.len(),
                })?;

        let enum_index = read.get_u32_le()? as usize;
        let affected_enum = enums
            .get(enum_index)
            .ok_or(PacketDecodeError::InvalidEnumIndex {
                index: enum_index,
                pool_size: enums.len(),
            })?
            .clone();

        let affected_value_index = affected_enum
            .values
            .iter()
            .position(|v| v == value)
            .ok_or_else(|| PacketDecodeError::ConstraintValueMissing {
                enum_name: affected_enum.name.clone(),
                value: value.clone(),
            })? as u32;

        let constraint_ids = read.get_list(|r| r.get_u8())?;

        Ok(CommandEnumConstraint {
            affected_enum,
            affected_value_index,
            constraint_ids,
        })
    }

    /// Walks the catalog in the fixed intern order. The decoder on the
    /// peer assigns identical indices only because this order never
    /// changes: hardcoded enums, then aliases, then parameters.
    fn build_intern_tables(&self) -> InternTables {
        let mut tables = InternTables::default();

        for command_enum in &self.hardcoded_enums {
            tables.add_enum(command_enum);
        }
        for command in &self.commands {
            if let Some(aliases) = &command.aliases {
                tables.add_enum(aliases);
            }
        }
        for command in &self.commands {
            for overload in &command.overloads {
                for parameter in &overload.parameters {
                    match &parameter.kind {
                        ParamKind::Enum(command_enum) => tables.add_enum(command_enum),
                        ParamKind::Postfix(postfix) => tables.add_postfix(postfix),
                        ParamKind::Basic(_) => {}
                    }
                }
            }
        }

        tables
    }

    pub fn encode_payload(
        &self,
        write: &mut ProtocolWriter<impl Write>,
    ) -> Result<(), PacketEncodeError> {
        let protocol = write.protocol_id();
        let tables = self.build_intern_tables();
        let pool_size = tables.enum_values.len();

        write.write_list(&tables.enum_values, |w, v| w.write_string(v))?;
        write.write_list(&tables.postfixes, |w, v| w.write_string(v))?;

        write.write_var_uint(&(tables.enums.len() as u32).into())?;
        for command_enum in &tables.enums {
            write.write_string(&command_enum.name)?;
            write.write_var_uint(&(command_enum.values.len() as u32).into())?;
            for value in &command_enum.values {
                let index = tables.value_index_of(value)?;
                put_enum_value_index(write, index, pool_size)?;
            }
        }

        write.write_var_uint(&(self.commands.len() as u32).into())?;
        for command in &self.commands {
            Self::encode_command(write, command, protocol, &tables)?;
        }

        write.write_var_uint(&(self.soft_enums.len() as u32).into())?;
        for soft_enum in &self.soft_enums {
            write.write_string(&soft_enum.name)?;
            write.write_list(&soft_enum.values, |w, v| w.write_string(v))?;
        }

        if protocol >= PROTOCOL_1_13_0 {
            write.write_var_uint(&(self.enum_constraints.len() as u32).into())?;
            for constraint in &self.enum_constraints {
                let value = constraint
                    .affected_enum
                    .values
                    .get(constraint.affected_value_index as usize)
                    .ok_or_else(|| PacketEncodeError::ConstraintIndexOutOfRange {
                        enum_name: constraint.affected_enum.name.clone(),
                        index: constraint.affected_value_index,
                    })?;
                write.write_u32_le(tables.value_index_of(value)? as u32)?;
                write.write_u32_le(tables.enum_index_of(&constraint.affected_enum)? as u32)?;
                write.write_list(&constraint.constraint_ids, |w, v| w.write_u8(*v))?;
            }
        }

        Ok(())
    }

    fn encode_command(
        write: &mut ProtocolWriter<impl Write>,
        command: &CommandData,
        protocol: u32,
        tables: &InternTables,
    ) -> Result<(), PacketEncodeError> {
        write.write_string(&command.name)?;
        write.write_string(&command.description)?;
        if protocol >= PROTOCOL_1_17_10 {
            write.write_u16_le(command.flags)?;
        } else {
            write.write_u8(command.flags as u8)?;
        }
        write.write_u8(command.permission)?;

        match &command.aliases {
            Some(aliases) => write.write_i32_le(tables.enum_index_of(aliases)? as i32)?,
            None => write.write_i32_le(-1)?,
        }

        write.write_var_uint(&(command.overloads.len() as u32).into())?;
        for overload in &command.overloads {
            write.write_var_uint(&(overload.parameters.len() as u32).into())?;
            for parameter in &overload.parameters {
                write.write_string(&parameter.name)?;

                let param_type = match &parameter.kind {
                    ParamKind::Basic(type_code) => {
                        ARG_FLAG_VALID | wire_arg_type(*type_code, protocol)
                    }
                    ParamKind::Enum(command_enum) => {
                        ARG_FLAG_ENUM | tables.enum_index_of(command_enum)? as u32
                    }
                    ParamKind::Postfix(postfix) => {
                        let index = tables
                            .postfix_index
                            .get(postfix)
                            .copied()
                            .ok_or_else(|| PacketEncodeError::UninternedPostfix(postfix.clone()))?;
                        ARG_FLAG_POSTFIX | index as u32
                    }
                };
                write.write_u32_le(param_type)?;
                write.write_bool(parameter.optional)?;
                write.write_u8(parameter.flags)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bedrock_data::version::{PROTOCOL_1_16_0, PROTOCOL_1_18_10, PROTOCOL_1_19_0};

    use crate::command::{ARG_TYPE_FLOAT, ARG_TYPE_INT};

    use super::*;

    fn encode(packet: &AvailableCommandsPacket, protocol: u32) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut writer = ProtocolWriter::new(&mut buf, protocol);
        packet.encode_payload(&mut writer).unwrap();
        buf
    }

    fn decode(bytes: &[u8], protocol: u32) -> Result<AvailableCommandsPacket, PacketDecodeError> {
        let mut reader = ProtocolReader::new(Cursor::new(bytes), protocol);
        AvailableCommandsPacket::decode_payload(&mut reader)
    }

    fn single_command(name: &str, overloads: Vec<CommandOverload>) -> CommandData {
        CommandData {
            name: name.to_string(),
            description: "pong".to_string(),
            flags: 0,
            permission: 0,
            aliases: None,
            overloads,
        }
    }

    /// Minimal catalog: all pools empty, one command with one basic
    /// parameter.
    #[test]
    fn test_minimal_catalog_wire_format() {
        let packet = AvailableCommandsPacket {
            commands: vec![single_command(
                "ping",
                vec![CommandOverload {
                    parameters: vec![CommandParameter::basic("n", ARG_TYPE_INT, false)],
                }],
            )],
            ..AvailableCommandsPacket::default()
        };

        let bytes = encode(&packet, PROTOCOL_1_19_0);
        assert_eq!(
            bytes,
            [
                0x00, // enum value pool: empty
                0x00, // postfix pool: empty
                0x00, // enum pool: empty
                0x01, // one command
                0x04, b'p', b'i', b'n', b'g', // name
                0x04, b'p', b'o', b'n', b'g', // description
                0x00, 0x00, // flags (16-bit from 1.17.10)
                0x00, // permission
                0xff, 0xff, 0xff, 0xff, // no alias enum
                0x01, // one overload
                0x01, // one parameter
                0x01, b'n', // parameter name
                0x01, 0x00, 0x10, 0x00, // VALID | INT
                0x00, // not optional
                0x00, // parameter flags
                0x00, // soft enums: empty
                0x00, // constraints: empty
            ]
        );

        assert_eq!(decode(&bytes, PROTOCOL_1_19_0).unwrap(), packet);
    }

    /// Below 1.17.10 the command flags shrink to one byte.
    #[test]
    fn test_flags_width_gate() {
        let packet = AvailableCommandsPacket {
            commands: vec![single_command("ping", vec![])],
            ..AvailableCommandsPacket::default()
        };

        let new = encode(&packet, PROTOCOL_1_17_10);
        let old = encode(&packet, PROTOCOL_1_16_0);
        assert_eq!(new.len(), old.len() + 1);
        assert_eq!(decode(&old, PROTOCOL_1_16_0).unwrap(), packet);
    }

    fn wide_enum(value_count: usize) -> CommandEnum {
        CommandEnum::new(
            "huge",
            (0..value_count).map(|i| format!("v{i:03}")).collect(),
        )
    }

    fn catalog_with_enum(command_enum: CommandEnum) -> AvailableCommandsPacket {
        AvailableCommandsPacket {
            commands: vec![single_command(
                "pick",
                vec![CommandOverload {
                    parameters: vec![CommandParameter::with_enum("which", command_enum, false)],
                }],
            )],
            ..AvailableCommandsPacket::default()
        }
    }

    /// Index width flips from u8 to u16 exactly when the value pool
    /// reaches 256 entries.
    #[test]
    fn test_enum_value_index_width_boundary() {
        // 255 distinct values: one byte per index. Pool prefix is the
        // varuint count (0xff 0x01) plus 255 five-byte strings, then the
        // empty postfix pool, the enum count, the name "huge" and the
        // value count varuint.
        let bytes = encode(&catalog_with_enum(wide_enum(255)), PROTOCOL_1_19_0);
        let narrow_offset = 2 + 255 * 5 + 1 + 1 + 5 + 2;
        assert_eq!(&bytes[narrow_offset..narrow_offset + 2], [0x00, 0x01]);

        // 256 distinct values: two little-endian bytes per index.
        let bytes = encode(&catalog_with_enum(wide_enum(256)), PROTOCOL_1_19_0);
        let wide_offset = 2 + 256 * 5 + 1 + 1 + 5 + 2;
        assert_eq!(
            &bytes[wide_offset..wide_offset + 4],
            [0x00, 0x00, 0x01, 0x00]
        );

        for count in [255, 256] {
            let packet = catalog_with_enum(wide_enum(count));
            assert_eq!(
                decode(&encode(&packet, PROTOCOL_1_19_0), PROTOCOL_1_19_0).unwrap(),
                packet
            );
        }
    }

    /// An enum value index one past the pool end is a structured decode
    /// error, not a panic or a silent drop.
    #[test]
    fn test_bad_enum_value_index_rejected() {
        let packet = catalog_with_enum(CommandEnum::new("dir", vec!["up".to_string()]));
        let mut bytes = encode(&packet, PROTOCOL_1_19_0);

        // Pool: [0x01, 0x02, 'u', 'p'], postfix pool 0x00, enum count
        // 0x01, name [0x03, 'd', 'i', 'r'], value count 0x01, index at 11.
        assert_eq!(bytes[11], 0x00);
        bytes[11] = 0x01;

        let err = decode(&bytes, PROTOCOL_1_19_0).unwrap_err();
        assert!(err.to_string().contains("Invalid enum value index"));
    }

    /// Two encoders over the same catalog must agree byte for byte, and
    /// values shared between enums intern into a single pool slot.
    #[test]
    fn test_intern_tables_are_deterministic() {
        let shared = "shared".to_string();
        let packet = AvailableCommandsPacket {
            commands: vec![
                single_command(
                    "first",
                    vec![CommandOverload {
                        parameters: vec![CommandParameter::with_enum(
                            "a",
                            CommandEnum::new("e1", vec!["a".to_string(), shared.clone()]),
                            false,
                        )],
                    }],
                ),
                single_command(
                    "second",
                    vec![CommandOverload {
                        parameters: vec![CommandParameter::with_enum(
                            "b",
                            CommandEnum::new("e2", vec![shared.clone(), "b".to_string()]),
                            false,
                        )],
                    }],
                ),
            ],
            ..AvailableCommandsPacket::default()
        };

        let first = encode(&packet, PROTOCOL_1_19_0);
        let second = encode(&packet, PROTOCOL_1_19_0);
        assert_eq!(first, second);

        // Value pool: three distinct strings in first-occurrence order.
        assert_eq!(
            &first[..12],
            [
                0x03, 0x01, b'a', 0x06, b's', b'h', b'a', b'r', b'e', b'd', 0x01, b'b'
            ]
        );

        let decoded = decode(&first, PROTOCOL_1_19_0).unwrap();
        assert_eq!(decoded, packet);
        assert_eq!(encode(&decoded, PROTOCOL_1_19_0), first);
    }

    /// Intern order is hardcoded enums, then aliases, then parameters.
    #[test]
    fn test_intern_walk_order() {
        let packet = AvailableCommandsPacket {
            hardcoded_enums: vec![CommandEnum::new("CommandName", vec!["tp".to_string()])],
            commands: vec![CommandData {
                aliases: Some(CommandEnum::new("xAlias", vec!["x2".to_string()])),
                ..single_command(
                    "x",
                    vec![CommandOverload {
                        parameters: vec![CommandParameter::with_enum(
                            "p",
                            CommandEnum::new("p", vec!["pv".to_string()]),
                            false,
                        )],
                    }],
                )
            }],
            ..AvailableCommandsPacket::default()
        };

        let bytes = encode(&packet, PROTOCOL_1_19_0);
        assert_eq!(
            &bytes[..10],
            [0x03, 0x02, b't', b'p', 0x02, b'x', b'2', 0x02, b'p', b'v']
        );

        let decoded = decode(&bytes, PROTOCOL_1_19_0).unwrap();
        assert_eq!(decoded.hardcoded_enums, packet.hardcoded_enums);
        assert_eq!(encode(&decoded, PROTOCOL_1_19_0), bytes);
    }

    #[test]
    fn test_constraint_roundtrip() {
        let constrained = CommandEnum::new("gamemode", vec!["survival".into(), "creative".into()]);
        let packet = AvailableCommandsPacket {
            commands: vec![single_command(
                "gamemode",
                vec![CommandOverload {
                    parameters: vec![CommandParameter::with_enum(
                        "mode",
                        constrained.clone(),
                        false,
                    )],
                }],
            )],
            enum_constraints: vec![CommandEnumConstraint {
                affected_enum: constrained,
                affected_value_index: 1,
                constraint_ids: vec![1],
            }],
            ..AvailableCommandsPacket::default()
        };

        let bytes = encode(&packet, PROTOCOL_1_19_0);
        assert_eq!(decode(&bytes, PROTOCOL_1_19_0).unwrap(), packet);
    }

    /// A constraint over an enum the walk never saw is a caller bug, not
    /// something to serialize garbage for.
    #[test]
    fn test_constraint_on_unknown_enum_is_encode_error() {
        let packet = AvailableCommandsPacket {
            enum_constraints: vec![CommandEnumConstraint {
                affected_enum: CommandEnum::new("orphan", vec!["v".to_string()]),
                affected_value_index: 0,
                constraint_ids: vec![0],
            }],
            ..AvailableCommandsPacket::default()
        };

        let mut buf = Vec::new();
        let mut writer = ProtocolWriter::new(&mut buf, PROTOCOL_1_19_0);
        assert!(matches!(
            packet.encode_payload(&mut writer),
            Err(PacketEncodeError::UninternedEnumValue(_))
        ));
    }

    /// Basic type codes are translated for older generations on encode
    /// only; the decoded catalog keeps the wire's own numbering.
    #[test]
    fn test_basic_type_remap_is_one_way() {
        let packet = AvailableCommandsPacket {
            commands: vec![single_command(
                "fill",
                vec![CommandOverload {
                    parameters: vec![CommandParameter::basic("amount", ARG_TYPE_FLOAT, false)],
                }],
            )],
            ..AvailableCommandsPacket::default()
        };

        let bytes = encode(&packet, PROTOCOL_1_18_10);
        let decoded = decode(&bytes, PROTOCOL_1_18_10).unwrap();
        assert_eq!(
            decoded.commands[0].overloads[0].parameters[0].kind,
            ParamKind::Basic(2)
        );

        // On the newest generation the canonical code survives untouched.
        let bytes = encode(&packet, PROTOCOL_1_19_0);
        assert_eq!(decode(&bytes, PROTOCOL_1_19_0).unwrap(), packet);
    }

    /// A parameter type with none of the three flags set must be
    /// rejected.
    #[test]
    fn test_flagless_parameter_type_rejected() {
        let packet = AvailableCommandsPacket {
            commands: vec![single_command(
                "ping",
                vec![CommandOverload {
                    parameters: vec![CommandParameter::basic("n", ARG_TYPE_INT, false)],
                }],
            )],
            ..AvailableCommandsPacket::default()
        };
        let mut bytes = encode(&packet, PROTOCOL_1_19_0);

        // The parameter type's third byte carries the VALID flag bit.
        let type_offset = bytes.len() - 8;
        assert_eq!(bytes[type_offset + 2], 0x10);
        bytes[type_offset + 2] = 0x00;

        assert!(matches!(
            decode(&bytes, PROTOCOL_1_19_0),
            Err(PacketDecodeError::InvalidParameterType(_))
        ));
    }
}
