pub mod available_commands;
pub mod player_list;
pub mod remove_actor;
pub mod set_spawn_position;
