//! Player domain: spawning the player and the weapon it carries.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{DamageFeedback, Damageable, EnemyTarget, Health, Hitbox, Hurtbox, Team};
use crate::player::systems::PlayerIntent;
use crate::player::{
    GhostBomb, Pickup, PickupKind, Player, PlayerController, PlayerSenses, PlayerTuning, Shield,
    WeaponVisual, swing_offset,
};
use crate::spatial::{GameLayer, ProbeShape, trigger_zone};

const PLAYER_COLOR: Color = Color::srgb(0.9, 0.9, 0.95);

pub fn spawn_player(commands: &mut Commands, tuning: &PlayerTuning, position: Vec2) -> Entity {
    let size = tuning.size();
    let entity = commands
        .spawn((
            (
                Player,
                PlayerController::new(tuning),
                PlayerSenses::default(),
                PlayerIntent::default(),
                Shield::new(tuning.shield_charges, tuning.shield_cooldown, tuning.shield_visible),
                GhostBomb::new(tuning.ghost_cooldown),
                EnemyTarget { escort: false },
                Health::new(tuning.max_health),
                Team::Player,
                Damageable::BY_ENEMY,
                Hurtbox::default(),
                DamageFeedback::new(PLAYER_COLOR, 0.15, 0.0),
            ),
            Sprite {
                color: PLAYER_COLOR,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 1.5),
            (
                RigidBody::Dynamic,
                Collider::rectangle(size.x, size.y),
                CollisionLayers::new(
                    GameLayer::Player,
                    [GameLayer::Ground, GameLayer::EnemyHitbox, GameLayer::Sensor],
                ),
                LinearVelocity::default(),
                LockedAxes::ROTATION_LOCKED,
                GravityScale(1.0),
                Friction::ZERO,
            ),
        ))
        .id();

    commands.entity(entity).insert(
        Hitbox::new(
            entity,
            tuning.swing_damage,
            ProbeShape::Rect {
                half_extents: Vec2::new(tuning.swing_half_width, tuning.swing_half_height),
            },
        )
        .with_offset(swing_offset(1.0, tuning.swing_reach))
        .dormant(),
    );

    commands.spawn((
        WeaponVisual { owner: entity },
        Sprite {
            color: Color::srgb(0.75, 0.7, 0.5),
            custom_size: Some(Vec2::new(0.15, 1.4)),
            ..default()
        },
        Transform::from_xyz(position.x, position.y, 1.6),
        Visibility::Hidden,
    ));

    info!("Spawned player {:?} at {:?}", entity, position);
    entity
}

/// A collectible the player unlocks by touching it.
pub fn spawn_pickup(commands: &mut Commands, kind: PickupKind, position: Vec2) -> Entity {
    let color = match kind {
        PickupKind::Spear => Color::srgb(0.75, 0.7, 0.5),
        PickupKind::GhostBomb => Color::srgb(0.7, 0.75, 1.0),
        PickupKind::ShieldBlessing => Color::srgb(1.0, 0.85, 0.3),
    };
    let size = Vec2::splat(0.6);
    commands
        .spawn((
            Pickup(kind),
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            trigger_zone(position, size, GameLayer::Player),
        ))
        .id()
}
