//! In-memory model of the command catalog carried by the available
//! commands packet. Basic argument type codes follow the newest supported
//! protocol generation; [`wire_arg_type`] derives the on-wire code for
//! older peers at encode time. Decoded catalogs keep whatever codes the
//! wire carried, so type codes are only meaningful within one protocol
//! context.

use bedrock_data::version::PROTOCOL_1_19_0;

// Parameter type bitfield. Exactly one of these three flags is present on
// every well-formed parameter.
pub const ARG_FLAG_VALID: u32 = 0x0010_0000;
pub const ARG_FLAG_ENUM: u32 = 0x0020_0000;
pub const ARG_FLAG_POSTFIX: u32 = 0x0100_0000;

// Canonical basic argument type codes (newest generation).
pub const ARG_TYPE_INT: u32 = 1;
pub const ARG_TYPE_FLOAT: u32 = 3;
pub const ARG_TYPE_VALUE: u32 = 4;
pub const ARG_TYPE_WILDCARD_INT: u32 = 5;
pub const ARG_TYPE_OPERATOR: u32 = 6;
pub const ARG_TYPE_COMPARE_OPERATOR: u32 = 7;
pub const ARG_TYPE_TARGET: u32 = 8;
pub const ARG_TYPE_WILDCARD_TARGET: u32 = 10;
pub const ARG_TYPE_FILEPATH: u32 = 17;
pub const ARG_TYPE_FULL_INTEGER_RANGE: u32 = 23;
pub const ARG_TYPE_EQUIPMENT_SLOT: u32 = 38;
pub const ARG_TYPE_STRING: u32 = 39;
pub const ARG_TYPE_INT_POSITION: u32 = 47;
pub const ARG_TYPE_POSITION: u32 = 48;
pub const ARG_TYPE_MESSAGE: u32 = 51;
pub const ARG_TYPE_RAWTEXT: u32 = 53;
pub const ARG_TYPE_JSON: u32 = 57;
pub const ARG_TYPE_BLOCK_STATES: u32 = 67;
pub const ARG_TYPE_COMMAND: u32 = 70;

/// Enum names that designate server-populated enums. Decoded enums whose
/// name matches land in the packet's hardcoded bucket as well.
pub const HARDCODED_ENUM_NAMES: &[&str] = &["CommandName"];

/// Maps a canonical basic type code to the code the target protocol puts
/// on the wire. Codes outside the translated set pass through unchanged.
/// There is deliberately no inverse: decoded packets keep the wire codes
/// of their own protocol.
pub fn wire_arg_type(canonical: u32, protocol: u32) -> u32 {
    if protocol >= PROTOCOL_1_19_0 {
        return canonical;
    }
    match canonical {
        ARG_TYPE_INT => 1,
        ARG_TYPE_FLOAT => 2,
        ARG_TYPE_VALUE => 3,
        ARG_TYPE_WILDCARD_INT => 4,
        ARG_TYPE_OPERATOR => 5,
        ARG_TYPE_COMPARE_OPERATOR => 6,
        ARG_TYPE_TARGET => 7,
        ARG_TYPE_WILDCARD_TARGET => 9,
        ARG_TYPE_FILEPATH => 16,
        ARG_TYPE_FULL_INTEGER_RANGE => 22,
        ARG_TYPE_EQUIPMENT_SLOT => 37,
        ARG_TYPE_STRING => 38,
        ARG_TYPE_INT_POSITION => 46,
        ARG_TYPE_POSITION => 47,
        ARG_TYPE_MESSAGE => 50,
        ARG_TYPE_RAWTEXT => 52,
        ARG_TYPE_JSON => 56,
        ARG_TYPE_BLOCK_STATES => 66,
        ARG_TYPE_COMMAND => 69,
        other => other,
    }
}

/// A named, ordered set of string values. Non-soft enums are interned
/// into the catalog's shared value pool on encode; soft enums travel
/// uninterned so they can be mutated later without resending the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEnum {
    pub name: String,
    pub values: Vec<String>,
}

impl CommandEnum {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// What a parameter accepts. The wire bitfield is derived from this at
/// encode time, so an in-memory parameter can never be simultaneously an
/// enum and a postfix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    /// A basic type, by canonical code (`ARG_TYPE_*`).
    Basic(u32),
    Enum(CommandEnum),
    Postfix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandParameter {
    pub name: String,
    pub kind: ParamKind,
    pub optional: bool,
    pub flags: u8,
}

impl CommandParameter {
    pub fn basic(name: impl Into<String>, type_code: u32, optional: bool) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Basic(type_code),
            optional,
            flags: 0,
        }
    }

    pub fn with_enum(name: impl Into<String>, command_enum: CommandEnum, optional: bool) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Enum(command_enum),
            optional,
            flags: 0,
        }
    }

    pub fn with_postfix(name: impl Into<String>, postfix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Postfix(postfix.into()),
            optional: false,
            flags: 0,
        }
    }
}

/// One alternative signature of a command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOverload {
    pub parameters: Vec<CommandParameter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandData {
    pub name: String,
    pub description: String,
    pub flags: u16,
    pub permission: u8,
    pub aliases: Option<CommandEnum>,
    pub overloads: Vec<CommandOverload>,
}

/// Restricts one value of an interned enum (e.g. "requires cheats").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEnumConstraint {
    pub affected_enum: CommandEnum,
    /// Index into `affected_enum.values`.
    pub affected_value_index: u32,
    pub constraint_ids: Vec<u8>,
}
