//! NPC domain: escort spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{Damageable, EnemyTarget, Health, Hurtbox};
use crate::npc::{Escort, EscortTuning};
use crate::spatial::GameLayer;

const ESCORT_SIZE: Vec2 = Vec2::new(0.8, 1.5);

/// The escort's hurtbox stays closed until the escort starts.
pub fn spawn_escort(commands: &mut Commands, tuning: &EscortTuning, position: Vec2) -> Entity {
    let entity = commands
        .spawn((
            (
                Escort::new(tuning, position),
                EnemyTarget { escort: true },
                Health::new(tuning.max_health),
                Damageable::BY_ENEMY,
                Hurtbox { enabled: false },
            ),
            Sprite {
                color: Color::srgb(0.95, 0.75, 0.4),
                custom_size: Some(ESCORT_SIZE),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 1.2),
            (
                RigidBody::Dynamic,
                Collider::rectangle(ESCORT_SIZE.x, ESCORT_SIZE.y),
                CollisionLayers::new(
                    GameLayer::Npc,
                    [GameLayer::Ground, GameLayer::EnemyHitbox, GameLayer::Sensor],
                ),
                LinearVelocity::default(),
                LockedAxes::ROTATION_LOCKED,
                Friction::ZERO,
            ),
        ))
        .id();
    info!("Spawned escort {:?} at {:?}", entity, position);
    entity
}
