//! Debug domain: hitbox and sensing probe gizmos.

use bevy::prelude::*;

use crate::combat::{Hitbox, Team};
use crate::player::{Player, PlayerController, PlayerSenses, PlayerTuning};
use crate::spatial::ProbeShape;

const PLAYER_HITBOX: Color = Color::srgb(0.3, 0.9, 0.4);
const ENEMY_HITBOX: Color = Color::srgb(0.95, 0.3, 0.3);
const PROBE_HIT: Color = Color::srgb(0.2, 0.8, 1.0);
const PROBE_MISS: Color = Color::srgb(0.5, 0.5, 0.5);

fn probe_color(hit: bool) -> Color {
    if hit { PROBE_HIT } else { PROBE_MISS }
}

pub(crate) fn draw_hitboxes(
    mut gizmos: Gizmos,
    hitboxes: Query<(&Transform, &Hitbox, Option<&Team>)>,
) {
    for (transform, hitbox, team) in &hitboxes {
        if !hitbox.enabled {
            continue;
        }
        let color = match team {
            Some(Team::Player) => PLAYER_HITBOX,
            _ => ENEMY_HITBOX,
        };
        let center = transform.translation.truncate() + hitbox.offset;
        match hitbox.shape {
            ProbeShape::Circle { radius } => {
                gizmos.circle_2d(center, radius, color);
            }
            ProbeShape::Rect { half_extents } => {
                gizmos.rect_2d(center, half_extents * 2.0, color);
            }
        }
    }
}

/// The same rays the player senses with, lit when they hit.
pub(crate) fn draw_probes(
    mut gizmos: Gizmos,
    tuning: Res<PlayerTuning>,
    players: Query<(&Transform, &PlayerController, &PlayerSenses), With<Player>>,
) {
    for (transform, controller, senses) in &players {
        let origin = transform.translation.truncate();
        let facing = controller.facing.signum();

        for foot in tuning.feet() {
            let start = origin + foot;
            gizmos.line_2d(
                start,
                start - Vec2::Y * tuning.ground_ray,
                probe_color(senses.grounded),
            );
        }

        let wall_start = origin + Vec2::new(facing * tuning.wall_offset, 0.0);
        gizmos.line_2d(
            wall_start,
            wall_start + Vec2::new(facing * tuning.wall_reach, 0.0),
            probe_color(senses.touching_wall),
        );

        let step = tuning.step_geometry();
        let lead = origin + Vec2::new(facing * step.lead, 0.0);
        let reach = Vec2::new(facing * step.check_distance, 0.0);
        let lower = lead - Vec2::Y * step.drop;
        let upper = lead + Vec2::Y * step.step_height;
        gizmos.line_2d(lower, lower + reach, probe_color(senses.step.lower));
        gizmos.line_2d(upper, upper + reach, probe_color(senses.step.upper));
    }
}
