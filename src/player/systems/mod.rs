//! Player domain: system modules for control, intake and zones.

pub(crate) mod abilities;
pub(crate) mod control;
pub(crate) mod damage;
pub(crate) mod input;
pub(crate) mod sensing;
pub(crate) mod zones;

pub(crate) use abilities::{fire_ghost_bomb, show_shield, tick_abilities};
pub use control::PlayerIntent;
pub(crate) use control::{move_player, think_player, update_weapon_visual};
pub(crate) use damage::player_take_hits;
pub(crate) use input::read_input;
pub use sensing::sense_surroundings;
pub(crate) use sensing::sense_player;
pub(crate) use zones::{handle_player_zones, player_pair};
