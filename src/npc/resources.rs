//! NPC domain: escort tuning.

use bevy::prelude::*;
use serde::Deserialize;

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EscortTuning {
    pub max_health: u32,
    pub walk_speed: f32,
    /// Minimum seconds between halt/walk toggles.
    pub toggle_debounce: f32,
    pub respawn_delay: f32,
    /// The player must be this close to start the escort.
    pub interact_radius: f32,
    /// Lift applied when walking into a climb area.
    pub climb_height: f32,
}

impl Default for EscortTuning {
    fn default() -> Self {
        Self {
            max_health: 10,
            walk_speed: 2.0,
            toggle_debounce: 1.0,
            respawn_delay: 1.5,
            interact_radius: 3.0,
            climb_height: 0.5,
        }
    }
}
