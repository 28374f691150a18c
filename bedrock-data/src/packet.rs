//! Network IDs of the game packets this library models. IDs are stable
//! across the protocol versions we support; the header codec masks them
//! to 10 bits.

pub const REMOVE_ACTOR: u32 = 0x0e;
pub const SET_SPAWN_POSITION: u32 = 0x2b;
pub const PLAYER_LIST: u32 = 0x3f;
pub const AVAILABLE_COMMANDS: u32 = 0x4c;
pub const ITEM_STACK_REQUEST: u32 = 0x93;
