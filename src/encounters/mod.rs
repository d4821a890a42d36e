//! Encounters domain: one-shot boss arenas and what a defeated boss leaves
//! behind.

mod components;
mod systems;

pub use components::{BossArenaTrigger, BossReward};

use bevy::prelude::*;

use crate::core::SimSet;
use crate::encounters::systems::{reward_boss_defeats, trigger_boss_arenas};

pub struct EncountersPlugin;

impl Plugin for EncountersPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, trigger_boss_arenas.in_set(SimSet::Resolve))
            .add_systems(Update, reward_boss_defeats.in_set(SimSet::Present));
    }
}
