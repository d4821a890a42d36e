//! Combat domain: health, hit resolution, projectiles, and the enemy and boss
//! brains that open hitboxes.

pub(crate) mod ai;
mod components;
mod events;
mod projectiles;
mod resources;
mod spawn;
mod systems;

#[cfg(test)]
mod tests;

pub use ai::{
    ArenaAttack, ArenaBoss, ArenaBossState, ArenaBounds, AttackMode, BossHitOutcome, BossShot,
    Candidate, Enemy, EnemyBrain, EnemyState, EnemyTarget, Sighting, TeleportBoss,
    TeleportBossState, TeleportPoints, pick_strike_target, pick_teleport_point, select_target,
};
pub use components::{
    CrackedBlock, DamageFeedback, DamageOutcome, Damageable, Health, HitKind, Hitbox,
    HitboxLifetime, HitboxRearm, Hurtbox, TargetTags, Team, screen_hit,
};
pub use events::{BossActivated, BossDefeatedEvent, DamageEvent, DeathEvent};
pub use projectiles::{Projectile, ProjectileMotion, spawn_explosion};
pub use resources::{
    ArenaBossTuning, CombatTuning, ContactProfile, EnemyProfile, EnemyRoster, ExplosionSpec,
    MeleeProfile, MeleeReach, ProjectileSpec, RangedPattern, RangedProfile, StrikeArea,
    TargetPolicy, TeleportBossTuning,
};
pub use spawn::{EnemyBundle, spawn_arena_boss, spawn_enemy, spawn_teleport_boss};
pub use systems::{Contact, Struck, sweep_hitbox};

use bevy::prelude::*;

use crate::combat::projectiles::{
    retire_projectiles, spawn_requested_projectiles, steer_projectiles,
};
use crate::combat::systems::{
    cleanup_expired_hitboxes, fade_damage_feedback, rearm_hitboxes, report_deaths,
    resolve_hitbox_overlaps, resolve_projectile_contacts, start_boss_fights,
};
use crate::core::SimSet;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatTuning>()
            .init_resource::<EnemyRoster>()
            .init_resource::<TeleportBossTuning>()
            .init_resource::<ArenaBossTuning>()
            .add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_message::<BossDefeatedEvent>()
            .add_message::<BossActivated>()
            .add_systems(Update, ai::sense_enemy_targets.in_set(SimSet::Sense))
            .add_systems(
                Update,
                (
                    start_boss_fights,
                    (
                        ai::think_enemies,
                        ai::think_teleport_bosses,
                        ai::think_arena_bosses,
                    ),
                )
                    .chain()
                    .in_set(SimSet::Decide),
            )
            .add_systems(
                Update,
                (ai::act_enemies, steer_projectiles).in_set(SimSet::Act),
            )
            .add_systems(
                Update,
                (
                    rearm_hitboxes,
                    (resolve_hitbox_overlaps, resolve_projectile_contacts),
                )
                    .chain()
                    .in_set(SimSet::Resolve),
            )
            .add_systems(
                Update,
                (
                    (
                        ai::enemy_take_hits,
                        ai::teleport_boss_take_hits,
                        ai::arena_boss_take_hits,
                    ),
                    report_deaths,
                )
                    .chain()
                    .in_set(SimSet::Apply),
            )
            .add_systems(
                Update,
                (
                    ai::teleport_boss_heal_on_player_death,
                    ai::arena_boss_heal_on_player_death,
                    fade_damage_feedback,
                    spawn_requested_projectiles,
                    retire_projectiles,
                    cleanup_expired_hitboxes,
                )
                    .in_set(SimSet::Present),
            );
    }
}
