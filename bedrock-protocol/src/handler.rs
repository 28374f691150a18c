use crate::GamePacket;
use crate::client::available_commands::AvailableCommandsPacket;
use crate::client::player_list::PlayerListPacket;
use crate::client::remove_actor::RemoveActorPacket;
use crate::client::set_spawn_position::SetSpawnPositionPacket;
use crate::server::item_stack_request::ItemStackRequestPacket;

/// One method per packet variant. A handler returns `true` when it
/// claimed the packet; `false` lets the caller offer it to the next
/// handler in a chain. The defaults claim nothing.
pub trait PacketHandler {
    fn handle_set_spawn_position(&mut self, _packet: &SetSpawnPositionPacket) -> bool {
        false
    }

    fn handle_remove_actor(&mut self, _packet: &RemoveActorPacket) -> bool {
        false
    }

    fn handle_player_list(&mut self, _packet: &PlayerListPacket) -> bool {
        false
    }

    fn handle_available_commands(&mut self, _packet: &AvailableCommandsPacket) -> bool {
        false
    }

    fn handle_item_stack_request(&mut self, _packet: &ItemStackRequestPacket) -> bool {
        false
    }
}

impl GamePacket {
    /// Dispatches to exactly the one handler method matching this
    /// variant.
    pub fn handle(&self, handler: &mut impl PacketHandler) -> bool {
        match self {
            Self::SetSpawnPosition(packet) => handler.handle_set_spawn_position(packet),
            Self::RemoveActor(packet) => handler.handle_remove_actor(packet),
            Self::PlayerList(packet) => handler.handle_player_list(packet),
            Self::AvailableCommands(packet) => handler.handle_available_commands(packet),
            Self::ItemStackRequest(packet) => handler.handle_item_stack_request(packet),
        }
    }
}
