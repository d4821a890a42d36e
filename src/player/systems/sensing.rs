//! Player domain: ground, wall and step probes.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::player::{Player, PlayerController, PlayerSenses, PlayerTuning};
use crate::spatial::{GameLayer, WorldProbe, sense_ground, sense_step, sense_wall};

/// Fill `senses` from the probe. Wall and step probes look along `facing`.
pub fn sense_surroundings(
    probe: &impl WorldProbe,
    origin: Vec2,
    facing: f32,
    tuning: &PlayerTuning,
) -> PlayerSenses {
    let terrain = LayerMask::from(GameLayer::Ground);
    PlayerSenses {
        grounded: sense_ground(probe, origin, tuning.feet(), tuning.ground_ray, terrain),
        touching_wall: sense_wall(
            probe,
            origin,
            facing,
            tuning.wall_offset,
            tuning.wall_reach,
            terrain,
        ),
        step: sense_step(probe, origin, facing, &tuning.step_geometry(), terrain),
    }
}

pub(crate) fn sense_player(
    spatial_query: SpatialQuery,
    tuning: Res<PlayerTuning>,
    mut query: Query<(&Transform, &PlayerController, &mut PlayerSenses), With<Player>>,
) {
    for (transform, controller, mut senses) in &mut query {
        let was_grounded = senses.grounded;
        *senses = sense_surroundings(
            &spatial_query,
            transform.translation.truncate(),
            controller.facing,
            &tuning,
        );
        if senses.grounded != was_grounded {
            trace!("Player grounded={}", senses.grounded);
        }
    }
}
