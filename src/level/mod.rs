//! Level domain: the bootstrap arena that exercises every actor kind.

mod spawn;


use bevy::prelude::*;

use crate::core::GameState;
use crate::level::spawn::spawn_demo_arena;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), spawn_demo_arena);
    }
}
