//! Core domain: boot flow, camera, and pause handling.

use bevy::camera::ScalingMode;
use bevy::prelude::*;

use crate::core::resources::{GameplayPaused, RunConfig, SimRng};
use crate::core::state::GameState;

/// World units visible vertically.
const VIEW_HEIGHT: f32 = 18.0;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: VIEW_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        }),
    ));
}

/// Reseed the simulation generator once configuration has been loaded.
pub(crate) fn seed_simulation(config: Res<RunConfig>, mut rng: ResMut<SimRng>) {
    *rng = SimRng::from_seed(config.seed);
    info!("Simulation seeded with {}", config.seed);
}

pub(crate) fn finish_boot(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::Playing);
}

pub(crate) fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut paused: ResMut<GameplayPaused>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        paused.toggle("menu");
        info!("Paused: {}", paused.is_paused());
    }
}
