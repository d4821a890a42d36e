//! Player domain: shield upkeep and the ghost bomb.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::Team;
use crate::core::{PlaySound, ProjectileKind, SpawnProjectile};
use crate::player::{GhostBomb, Player, PlayerController, PlayerInput, PlayerTuning, Shield};

pub(crate) fn tick_abilities(
    time: Res<Time>,
    mut query: Query<(&mut Shield, &mut GhostBomb), With<Player>>,
) {
    let dt = time.delta_secs();
    for (mut shield, mut ghost) in &mut query {
        let was_cooling = !shield.cooldown.is_ready();
        shield.tick(dt);
        if was_cooling && shield.cooldown.is_ready() {
            debug!("Shield can be raised again");
        }
        ghost.tick(dt);
    }
}

pub(crate) fn fire_ghost_bomb(
    input: Res<PlayerInput>,
    tuning: Res<PlayerTuning>,
    mut projectiles: MessageWriter<SpawnProjectile>,
    mut sounds: MessageWriter<PlaySound>,
    mut query: Query<(Entity, &Transform, &PlayerController, &mut GhostBomb), With<Player>>,
) {
    if !input.ability {
        return;
    }
    for (entity, transform, controller, mut ghost) in &mut query {
        if controller.is_dead() || !ghost.try_fire() {
            continue;
        }
        let origin = transform.translation.truncate()
            + Vec2::new(controller.facing * tuning.half_width, 0.0);
        projectiles.write(SpawnProjectile {
            kind: ProjectileKind::Ghost,
            origin,
            aim: Vec2::new(controller.facing, 0.0),
            team: Team::Player,
            source: entity,
        });
        sounds.write(PlaySound { clip: "ghost_fire" });
        debug!("Ghost bomb fired, ready again in {}s", tuning.ghost_cooldown);
    }
}

/// The shield is drawn only for a moment after it blocks.
pub(crate) fn show_shield(mut query: Query<(&Shield, &mut Sprite), With<Player>>) {
    for (shield, mut sprite) in &mut query {
        let alpha = if shield.is_visible() { 0.6 } else { 1.0 };
        sprite.color.set_alpha(alpha);
    }
}
