//! NPC domain: the escort the player walks to safety.

mod components;
mod resources;
mod spawn;
mod systems;


pub use components::{ClimbArea, Escort, EscortGoal, EscortOutput, EscortState};
pub use resources::EscortTuning;
pub use spawn::spawn_escort;

use bevy::prelude::*;

use crate::core::SimSet;
use crate::npc::systems::{escort_interact, escort_take_hits, escort_zones, move_escorts};

pub struct NpcPlugin;

impl Plugin for NpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EscortTuning>()
            .add_systems(Update, escort_interact.in_set(SimSet::Decide))
            .add_systems(Update, move_escorts.in_set(SimSet::Act))
            .add_systems(Update, escort_zones.in_set(SimSet::Resolve))
            .add_systems(Update, escort_take_hits.in_set(SimSet::Apply));
    }
}
