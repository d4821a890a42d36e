//! Combat domain: minor enemy brains.
//!
//! `EnemyBrain::tick` is the whole state machine. The systems around it only
//! gather senses, copy the output into physics and messages, and feed hits back
//! through `take_hit`.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{
    DamageFeedback, DamageOutcome, Damageable, Health, HitKind, Hitbox, Hurtbox, Team,
};
use crate::combat::events::{DamageEvent, DeathEvent};
use crate::combat::resources::{EnemyProfile, MeleeReach, RangedPattern, TargetPolicy};
use crate::core::{Cooldown, PlayAnimation, PlaySound, SpawnProjectile, TaskSlot};
use crate::spatial::{GameLayer, WorldProbe, sense_ground};

#[derive(Component, Debug)]
pub struct Enemy;

/// Something minor enemies hunt. Escorts can be preferred over the player.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyTarget {
    pub escort: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackMode {
    Melee,
    Ranged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyState {
    #[default]
    Idle,
    Chase,
    Attack(AttackMode),
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnemyStep {
    Strike,
    Fire,
    Recover,
    Remove,
}

/// A target the enemy can currently see.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sighting {
    pub entity: Entity,
    /// Target position relative to the enemy.
    pub offset: Vec2,
    pub in_melee: bool,
}

/// What the brain wants done this tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnemyOutput {
    /// Horizontal direction to walk in, when chasing.
    pub movement: Option<f32>,
    pub strike: bool,
    pub fire: bool,
    pub began: Option<AttackMode>,
    pub remove: bool,
}

#[derive(Component, Debug, Clone)]
pub struct EnemyBrain {
    pub profile: EnemyProfile,
    pub state: EnemyState,
    /// 1.0 facing right, -1.0 facing left.
    pub facing: f32,
    pub cooldown: Cooldown,
    task: TaskSlot<EnemyStep>,
}

impl EnemyBrain {
    pub fn new(profile: EnemyProfile) -> Self {
        let cooldown = Cooldown::ready(profile.attack_cooldown);
        Self {
            profile,
            state: EnemyState::Idle,
            facing: 1.0,
            cooldown,
            task: TaskSlot::default(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.state == EnemyState::Dead
    }

    pub fn tick(&mut self, dt: f32, sighting: Option<Sighting>) -> EnemyOutput {
        let mut out = EnemyOutput::default();

        if self.is_dead() {
            out.remove = self.task.poll(dt) == Some(EnemyStep::Remove);
            return out;
        }

        self.cooldown.tick(dt);
        match self.task.poll(dt) {
            Some(EnemyStep::Strike) => {
                out.strike = true;
                if let Some(melee) = self.profile.melee {
                    self.task
                        .schedule((melee.duration - melee.windup).max(0.0), EnemyStep::Recover);
                }
            }
            Some(EnemyStep::Fire) => {
                out.fire = true;
                if let Some(ranged) = self.profile.ranged {
                    self.task
                        .schedule((ranged.duration - ranged.windup).max(0.0), EnemyStep::Recover);
                }
            }
            Some(EnemyStep::Recover) => self.state = EnemyState::Idle,
            Some(EnemyStep::Remove) | None => {}
        }

        if matches!(self.state, EnemyState::Attack(_)) {
            return out;
        }

        let Some(sighting) = sighting else {
            self.state = EnemyState::Idle;
            return out;
        };
        let distance = sighting.offset.length();
        if distance > self.profile.detection_range {
            self.state = EnemyState::Idle;
            return out;
        }
        if sighting.offset.x != 0.0 {
            self.facing = sighting.offset.x.signum();
        }

        if let Some(melee) = self.profile.melee {
            if sighting.in_melee {
                if self.cooldown.try_fire() {
                    self.state = EnemyState::Attack(AttackMode::Melee);
                    self.task.schedule(melee.windup, EnemyStep::Strike);
                    out.began = Some(AttackMode::Melee);
                } else {
                    self.state = EnemyState::Idle;
                }
                return out;
            }
        }

        if let Some(ranged) = self.profile.ranged {
            let in_band = distance > ranged.min_range && distance <= ranged.max_range;
            if in_band && self.cooldown.try_fire() {
                self.state = EnemyState::Attack(AttackMode::Ranged);
                self.task.schedule(ranged.windup, EnemyStep::Fire);
                out.began = Some(AttackMode::Ranged);
                return out;
            }
            if in_band && ranged.hold_position {
                self.state = EnemyState::Idle;
                return out;
            }
        }

        self.state = EnemyState::Chase;
        out.movement = Some(self.facing);
        out
    }

    /// Take one hit. Each call costs exactly one hit point.
    pub fn take_hit(&mut self, health: &mut Health) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::Ignored;
        }
        let outcome = health.apply_damage(1);
        if outcome == DamageOutcome::Killed {
            self.die();
        }
        outcome
    }

    fn die(&mut self) {
        self.state = EnemyState::Dead;
        self.task.schedule(self.profile.death_delay, EnemyStep::Remove);
    }
}

/// A living candidate seen by target selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub entity: Entity,
    pub position: Vec2,
    pub escort: bool,
}

/// Nearest candidate within `range`. Under `PreferEscort`, any escort in range
/// wins regardless of distance.
pub fn select_target(
    origin: Vec2,
    candidates: &[Candidate],
    range: f32,
    policy: TargetPolicy,
) -> Option<Candidate> {
    let in_range = candidates
        .iter()
        .filter(|c| c.position.distance(origin) <= range);

    if policy == TargetPolicy::PreferEscort {
        if let Some(escort) = nearest(origin, in_range.clone().filter(|c| c.escort)) {
            return Some(escort);
        }
    }
    nearest(origin, in_range)
}

fn nearest<'a>(origin: Vec2, candidates: impl Iterator<Item = &'a Candidate>) -> Option<Candidate> {
    candidates
        .min_by(|a, b| {
            a.position
                .distance_squared(origin)
                .total_cmp(&b.position.distance_squared(origin))
        })
        .copied()
}

/// First valid entity in an overlap set, escorts before anyone else.
pub fn pick_strike_target(hits: &[(Entity, bool)]) -> Option<Entity> {
    hits.iter()
        .find(|(_, escort)| *escort)
        .or_else(|| hits.first())
        .map(|(entity, _)| *entity)
}

/// Per-tick perception written by `sense_enemy_targets`.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct EnemySenses {
    pub sighting: Option<Sighting>,
    pub grounded: bool,
}

/// Output of the last brain tick, consumed by `act_enemies`.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct EnemyIntent(pub EnemyOutput);

const FOOT_OFFSET: f32 = 0.5;
const GROUND_CHECK: f32 = 0.15;

fn strike_center(position: Vec2, facing: f32, offset: f32) -> Vec2 {
    position + Vec2::new(facing * offset, 0.0)
}

fn valid_targets(
    probe: &impl WorldProbe,
    center: Vec2,
    brain: &EnemyBrain,
    targets: &Query<(&EnemyTarget, &Damageable, Option<&Hurtbox>, &Health)>,
) -> Vec<(Entity, bool)> {
    let Some(melee) = brain.profile.melee else {
        return Vec::new();
    };
    probe
        .overlap(melee.area.shape(), center, Team::Enemy.target_layers())
        .into_iter()
        .filter_map(|entity| {
            let (target, damageable, hurtbox, health) = targets.get(entity).ok()?;
            let open = damageable.accepts(Team::Enemy)
                && hurtbox.is_none_or(|h| h.enabled)
                && !health.is_dead();
            open.then_some((entity, target.escort))
        })
        .collect()
}

pub(crate) fn sense_enemy_targets(
    spatial_query: SpatialQuery,
    candidates: Query<(Entity, &Transform, &EnemyTarget, &Health, Option<&Hurtbox>)>,
    targets: Query<(&EnemyTarget, &Damageable, Option<&Hurtbox>, &Health)>,
    mut enemies: Query<(&Transform, &EnemyBrain, &mut EnemySenses), With<Enemy>>,
) {
    let seen: Vec<Candidate> = candidates
        .iter()
        .filter(|(_, _, _, health, hurtbox)| !health.is_dead() && hurtbox.is_none_or(|h| h.enabled))
        .map(|(entity, transform, target, _, _)| Candidate {
            entity,
            position: transform.translation.truncate(),
            escort: target.escort,
        })
        .collect();

    for (transform, brain, mut senses) in &mut enemies {
        let position = transform.translation.truncate();
        senses.grounded = sense_ground(
            &spatial_query,
            position,
            [Vec2::new(0.0, -FOOT_OFFSET), Vec2::new(0.0, -FOOT_OFFSET)],
            GROUND_CHECK,
            GameLayer::Ground.into(),
        );

        if brain.is_dead() {
            senses.sighting = None;
            continue;
        }

        senses.sighting = select_target(
            position,
            &seen,
            brain.profile.detection_range,
            brain.profile.policy,
        )
        .map(|target| {
            let offset = target.position - position;
            let in_melee = match brain.profile.melee.map(|m| (m.reach, m.offset)) {
                Some((MeleeReach::Distance(reach), _)) => offset.length() <= reach,
                Some((MeleeReach::Contact, strike_offset)) => {
                    let side = if offset.x < 0.0 { -1.0 } else { 1.0 };
                    let center = strike_center(position, side, strike_offset);
                    !valid_targets(&spatial_query, center, brain, &targets).is_empty()
                }
                None => false,
            };
            Sighting {
                entity: target.entity,
                offset,
                in_melee,
            }
        });
    }
}

pub(crate) fn think_enemies(
    time: Res<Time>,
    mut enemies: Query<(&mut EnemyBrain, &EnemySenses, &mut EnemyIntent), With<Enemy>>,
) {
    let dt = time.delta_secs();
    for (mut brain, senses, mut intent) in &mut enemies {
        let before = brain.state;
        intent.0 = brain.tick(dt, senses.sighting);
        if brain.state != before {
            trace!("{} {:?} -> {:?}", brain.profile.name, before, brain.state);
        }
    }
}

pub(crate) fn act_enemies(
    mut commands: Commands,
    spatial_query: SpatialQuery,
    mut damage_events: MessageWriter<DamageEvent>,
    mut projectiles: MessageWriter<SpawnProjectile>,
    mut animations: MessageWriter<PlayAnimation>,
    targets: Query<(&EnemyTarget, &Damageable, Option<&Hurtbox>, &Health)>,
    mut enemies: Query<
        (
            Entity,
            &Transform,
            &EnemyBrain,
            &EnemySenses,
            &EnemyIntent,
            &mut LinearVelocity,
            &mut Sprite,
            Option<&DamageFeedback>,
        ),
        With<Enemy>,
    >,
) {
    for (entity, transform, brain, senses, intent, mut velocity, mut sprite, feedback) in
        &mut enemies
    {
        let out = intent.0;
        let position = transform.translation.truncate();

        if out.remove {
            debug!("{} {:?} removed", brain.profile.name, entity);
            commands.entity(entity).despawn();
            continue;
        }

        sprite.flip_x = brain.facing < 0.0;

        let recoiling = feedback.is_some_and(|f| f.is_recoiling());
        if !recoiling {
            match out.movement {
                Some(dir) => {
                    velocity.x = dir * brain.profile.move_speed;
                    if senses.grounded && brain.profile.hop_force > 0.0 {
                        velocity.y = brain.profile.hop_force;
                    }
                }
                None => velocity.x = 0.0,
            }
        }

        match out.began {
            Some(AttackMode::Melee) => {
                animations.write(PlayAnimation {
                    actor: entity,
                    clip: "attack",
                });
            }
            Some(AttackMode::Ranged) => {
                animations.write(PlayAnimation {
                    actor: entity,
                    clip: "shoot",
                });
            }
            None => {}
        }

        if out.strike {
            if let Some(melee) = brain.profile.melee {
                let center = strike_center(position, brain.facing, melee.offset);
                let hits = valid_targets(&spatial_query, center, brain, &targets);
                if let Some(target) = pick_strike_target(&hits) {
                    damage_events.write(DamageEvent {
                        source: entity,
                        target,
                        amount: melee.damage,
                        kind: HitKind::Strike,
                        origin: position,
                    });
                }
            }
        }

        if out.fire {
            if let Some(ranged) = brain.profile.ranged {
                let (kind, aims) = match ranged.pattern {
                    RangedPattern::Aimed(kind) => (kind, vec![Vec2::new(brain.facing, 0.0)]),
                    RangedPattern::Volley(kind) => (kind, vec![Vec2::NEG_X, Vec2::X, Vec2::Y]),
                };
                for aim in aims {
                    projectiles.write(SpawnProjectile {
                        kind,
                        origin: position,
                        aim,
                        team: Team::Enemy,
                        source: entity,
                    });
                }
            }
        }
    }
}

pub(crate) fn enemy_take_hits(
    mut damage_events: MessageReader<DamageEvent>,
    mut deaths: MessageWriter<DeathEvent>,
    mut animations: MessageWriter<PlayAnimation>,
    mut sounds: MessageWriter<PlaySound>,
    mut enemies: Query<
        (
            &Transform,
            &mut EnemyBrain,
            &mut Health,
            &mut Hurtbox,
            &mut LinearVelocity,
            Option<&mut DamageFeedback>,
            Option<&mut Hitbox>,
        ),
        With<Enemy>,
    >,
) {
    for event in damage_events.read() {
        let Ok((transform, mut brain, mut health, mut hurtbox, mut velocity, feedback, hitbox)) =
            enemies.get_mut(event.target)
        else {
            continue;
        };
        if brain.is_dead() {
            continue;
        }

        let position = transform.translation.truncate();
        if let Some(mut feedback) = feedback {
            let knock = feedback.trigger(position, event.origin);
            if knock != 0.0 {
                velocity.x = knock;
            }
        }

        let mut outcome = DamageOutcome::Ignored;
        for _ in 0..event.amount {
            outcome = brain.take_hit(&mut health);
            if outcome == DamageOutcome::Killed {
                break;
            }
        }

        match outcome {
            DamageOutcome::Killed => {
                info!("{} {:?} killed", brain.profile.name, event.target);
                hurtbox.enabled = false;
                if let Some(mut hitbox) = hitbox {
                    hitbox.deactivate();
                }
                velocity.x = 0.0;
                deaths.write(DeathEvent {
                    entity: event.target,
                });
                animations.write(PlayAnimation {
                    actor: event.target,
                    clip: "death",
                });
                sounds.write(PlaySound { clip: "enemy_death" });
            }
            DamageOutcome::Wounded => {
                debug!(
                    "{} {:?} hit, {}/{}",
                    brain.profile.name, event.target, health.current, health.max
                );
                sounds.write(PlaySound { clip: "enemy_hit" });
            }
            DamageOutcome::Ignored => {}
        }
    }
}
