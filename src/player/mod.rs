//! Player domain: input, the control state machine, damage intake and the
//! zones the player reacts to.

mod components;
mod events;
mod resources;
mod spawn;
pub(crate) mod systems;


pub use components::{
    CheckpointZone, ControlOutput, GhostBomb, KillZone, KillZoneKind, Pickup, PickupKind, Player,
    PlayerController, PlayerSenses, PlayerState, Shield, ShieldBlock, WeaponVisual, swing_offset,
};
pub use events::KillPlayer;
pub use resources::{PlayerInput, PlayerTuning};
pub use spawn::{spawn_pickup, spawn_player};
pub use systems::{PlayerIntent, sense_surroundings};

use bevy::prelude::*;

use crate::core::SimSet;
use crate::player::systems::{
    fire_ghost_bomb, handle_player_zones, move_player, player_take_hits, read_input, sense_player,
    show_shield, think_player, tick_abilities, update_weapon_visual,
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerTuning>()
            .init_resource::<PlayerInput>()
            .add_message::<KillPlayer>()
            .add_systems(Update, read_input.in_set(SimSet::Input))
            .add_systems(Update, sense_player.in_set(SimSet::Sense))
            .add_systems(
                Update,
                (tick_abilities, think_player).in_set(SimSet::Decide),
            )
            .add_systems(
                Update,
                (move_player, fire_ghost_bomb).in_set(SimSet::Act),
            )
            .add_systems(Update, handle_player_zones.in_set(SimSet::Resolve))
            .add_systems(Update, player_take_hits.in_set(SimSet::Apply))
            .add_systems(
                Update,
                (update_weapon_visual, show_shield).in_set(SimSet::Present),
            );
    }
}
