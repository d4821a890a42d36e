//! Combat domain: hit resolution, hitbox upkeep, and damage feedback.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{
    CrackedBlock, DamageFeedback, Damageable, HitKind, Hitbox, HitboxLifetime, HitboxRearm,
    Hurtbox, TargetTags, Team, screen_hit,
};
use crate::combat::ai::{ArenaBoss, TeleportBoss};
use crate::combat::events::{BossActivated, DamageEvent, DeathEvent};
use crate::combat::projectiles::Projectile;
use crate::core::{NotifyUi, UiEvent};
use crate::spatial::{GameLayer, Terrain, WorldProbe};

/// What a hit region found at one overlapping entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Actor(TargetTags),
    Cracked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Struck {
    Target(Entity),
    Shattered(Entity),
}

/// Query the world for everything the hitbox overlaps and screen each
/// candidate. Only newly struck targets are returned, so repeated sweeps of
/// one activation never report a target twice.
pub fn sweep_hitbox(
    probe: &impl WorldProbe,
    hitbox: &mut Hitbox,
    team: Team,
    origin: Vec2,
    lookup: impl Fn(Entity) -> Option<Contact>,
) -> Vec<Struck> {
    if !hitbox.enabled {
        return Vec::new();
    }
    let mut layers = team.target_layers();
    if hitbox.kind == HitKind::Explosion {
        layers = layers | LayerMask::from(GameLayer::Breakable);
    }

    let mut struck = Vec::new();
    for entity in probe.overlap(hitbox.shape, origin + hitbox.offset, layers) {
        match lookup(entity) {
            Some(Contact::Cracked) => {
                if hitbox.kind == HitKind::Explosion && hitbox.try_strike(entity) {
                    struck.push(Struck::Shattered(entity));
                }
            }
            Some(Contact::Actor(tags)) => {
                if screen_hit(hitbox, team, entity, tags) {
                    struck.push(Struck::Target(entity));
                }
            }
            None => {}
        }
    }
    struck
}

fn target_tags(damageable: &Damageable, hurtbox: Option<&Hurtbox>) -> TargetTags {
    TargetTags {
        damageable: *damageable,
        hurtbox_enabled: hurtbox.is_none_or(|h| h.enabled),
    }
}

/// Pull-based resolution: every enabled hit region queries for overlaps.
pub(crate) fn resolve_hitbox_overlaps(
    mut commands: Commands,
    spatial_query: SpatialQuery,
    mut damage_events: MessageWriter<DamageEvent>,
    mut hitboxes: Query<(&mut Hitbox, &Team, &Transform), Without<Projectile>>,
    targets: Query<(&Damageable, Option<&Hurtbox>)>,
    cracked: Query<(), With<CrackedBlock>>,
) {
    for (mut hitbox, team, transform) in &mut hitboxes {
        let origin = transform.translation.truncate();
        let struck = sweep_hitbox(&spatial_query, &mut hitbox, *team, origin, |entity| {
            if cracked.contains(entity) {
                return Some(Contact::Cracked);
            }
            targets
                .get(entity)
                .ok()
                .map(|(damageable, hurtbox)| Contact::Actor(target_tags(damageable, hurtbox)))
        });

        for hit in struck {
            match hit {
                Struck::Target(target) => {
                    damage_events.write(DamageEvent {
                        source: hitbox.owner,
                        target,
                        amount: hitbox.damage,
                        kind: hitbox.kind,
                        origin,
                    });
                }
                Struck::Shattered(block) => {
                    info!("Cracked block {:?} shattered", block);
                    commands.entity(block).despawn();
                }
            }
        }
    }
}

/// Trigger-based resolution: projectile bodies report their own contacts.
pub(crate) fn resolve_projectile_contacts(
    mut collision_events: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut projectiles: Query<(&mut Projectile, &mut Hitbox, &Team, &Transform)>,
    targets: Query<(&Damageable, Option<&Hurtbox>)>,
    terrain: Query<(), With<Terrain>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (projectile_entity, other) in pairs {
            let Ok((mut projectile, mut hitbox, team, transform)) =
                projectiles.get_mut(projectile_entity)
            else {
                continue;
            };
            if projectile.spent {
                continue;
            }

            if let Ok((damageable, hurtbox)) = targets.get(other) {
                let tags = target_tags(damageable, hurtbox);
                if screen_hit(&mut hitbox, *team, other, tags) {
                    projectile.spent = true;
                    if hitbox.damage > 0 {
                        damage_events.write(DamageEvent {
                            source: hitbox.owner,
                            target: other,
                            amount: hitbox.damage,
                            kind: hitbox.kind,
                            origin: transform.translation.truncate(),
                        });
                    }
                }
            } else if projectile.stops_on_terrain && terrain.contains(other) {
                projectile.spent = true;
            }
        }
    }
}

pub(crate) fn rearm_hitboxes(time: Res<Time>, mut query: Query<(&mut Hitbox, &mut HitboxRearm)>) {
    let dt = time.delta_secs();
    for (mut hitbox, mut rearm) in &mut query {
        if !hitbox.enabled {
            continue;
        }
        rearm.interval.tick(dt);
        if rearm.interval.try_fire() {
            hitbox.activate();
        }
    }
}

pub(crate) fn cleanup_expired_hitboxes(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut HitboxLifetime)>,
) {
    let dt = time.delta_secs();
    for (entity, mut lifetime) in &mut query {
        lifetime.0 -= dt;
        if lifetime.0 <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn fade_damage_feedback(
    time: Res<Time>,
    mut query: Query<(&mut DamageFeedback, &mut Sprite)>,
) {
    let dt = time.delta_secs();
    for (mut feedback, mut sprite) in &mut query {
        if feedback.is_recoiling() {
            feedback.recoil_remaining -= dt;
        }
        if !feedback.is_flashing() {
            continue;
        }
        feedback.flash_remaining -= dt;
        sprite.color = if feedback.is_flashing() {
            feedback.tint
        } else {
            feedback.base
        };
    }
}

pub(crate) fn report_deaths(
    mut death_events: MessageReader<DeathEvent>,
    mut ui: MessageWriter<NotifyUi>,
) {
    for event in death_events.read() {
        info!("{:?} died", event.entity);
        ui.write(NotifyUi(UiEvent::EnemyKilled {
            actor: event.entity,
        }));
    }
}

pub(crate) fn start_boss_fights(
    mut activations: MessageReader<BossActivated>,
    mut ui: MessageWriter<NotifyUi>,
    mut teleport_bosses: Query<&mut TeleportBoss>,
    mut arena_bosses: Query<&mut ArenaBoss>,
) {
    for event in activations.read() {
        let started = if let Ok(mut boss) = teleport_bosses.get_mut(event.boss) {
            boss.activate()
        } else if let Ok(mut boss) = arena_bosses.get_mut(event.boss) {
            boss.activate()
        } else {
            warn!("Boss activation for {:?}, which is not a boss", event.boss);
            false
        };
        if started {
            info!("Boss {:?} engaged", event.boss);
            ui.write(NotifyUi(UiEvent::BossHealthShown { boss: event.boss }));
        }
    }
}
