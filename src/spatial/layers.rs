//! Spatial domain: physics layers for collision filtering.

use avian2d::prelude::*;
use bevy::prelude::*;

#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Floors, walls and ledges. Everything the sensing rays stop on.
    Ground,
    Player,
    Enemy,
    /// Friendly non-player actors (escorts)
    Npc,
    /// Trigger zones - should not block movement
    Sensor,
    /// Player-owned hitboxes and projectiles
    PlayerHitbox,
    /// Enemy-owned hitboxes and projectiles
    EnemyHitbox,
    /// Terrain that explosions can destroy
    Breakable,
}

/// Marker for static level geometry. Projectiles stop on it.
#[derive(Component, Debug)]
pub struct Terrain;

/// Static trigger volume. Reports `CollisionStart` against `detects` without
/// blocking movement.
pub fn trigger_zone(position: Vec2, size: Vec2, detects: impl Into<LayerMask>) -> impl Bundle {
    (
        Transform::from_xyz(position.x, position.y, 0.5),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Sensor, detects),
    )
}
