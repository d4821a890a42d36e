//! Combat domain: the multi-attack arena boss.
//!
//! Three cooldowns gate laser, missile and spin attacks (spin first, then
//! missile, then laser). Any damage sends the boss fleeing to the far side of
//! the arena. Death runs a fixed two-step sequence and then switches the
//! controller off for good.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{DamageOutcome, Health, Hitbox, Hurtbox, Team};
use crate::combat::events::{BossDefeatedEvent, DamageEvent, DeathEvent};
use crate::combat::resources::ArenaBossTuning;
use crate::core::{
    Cooldown, NotifyUi, PlayAnimation, PlaySound, PlayerDiedEvent, ProjectileKind,
    SpawnProjectile, TaskSlot, UiEvent,
};
use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArenaBossState {
    #[default]
    Dormant,
    Idle,
    Moving,
    Fleeing,
    LaserCharge,
    MissileCharge,
    SpinCharge,
    Spinning,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaAttack {
    Laser,
    Missile,
    Spin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttackStep {
    FireLaser,
    EndLaser,
    FireMissile,
    EndMissile,
    StartSpin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeathStep {
    Defeated,
    Disable,
}

/// Horizontal landmarks of the arena, in world x.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    pub left: f32,
    pub right: f32,
    pub spin_a: f32,
    pub spin_b: f32,
}

impl ArenaBounds {
    /// The bound farther from `x`. Ties go left.
    pub fn farther_bound(&self, x: f32) -> f32 {
        if (x - self.right).abs() > (x - self.left).abs() {
            self.right
        } else {
            self.left
        }
    }

    pub fn nearer_spin_point(&self, x: f32) -> f32 {
        if (x - self.spin_a).abs() < (x - self.spin_b).abs() {
            self.spin_a
        } else {
            self.spin_b
        }
    }

    fn other_spin_point(&self, current: f32) -> f32 {
        if current == self.spin_a {
            self.spin_b
        } else {
            self.spin_a
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ArenaBossOutput {
    pub velocity_x: f32,
    pub began: Option<ArenaAttack>,
    pub fire_laser: bool,
    pub fire_missile: bool,
    pub spin_started: bool,
    pub spin_ended: bool,
    pub defeated: bool,
    pub disabled: bool,
}

#[derive(Component, Debug, Clone)]
pub struct ArenaBoss {
    pub tuning: ArenaBossTuning,
    pub state: ArenaBossState,
    /// 1.0 facing right, -1.0 facing left.
    pub facing: f32,
    pub laser: Cooldown,
    pub missile: Cooldown,
    pub spin: Cooldown,
    /// False once the death sequence has finished.
    pub enabled: bool,
    flee_target: f32,
    spin_target: f32,
    spin_remaining: f32,
    attack: TaskSlot<AttackStep>,
    death: TaskSlot<DeathStep>,
}

impl ArenaBoss {
    pub fn new(tuning: ArenaBossTuning) -> Self {
        Self {
            laser: Cooldown::charging(tuning.laser_cooldown),
            missile: Cooldown::charging(tuning.missile_cooldown),
            spin: Cooldown::charging(tuning.spin_cooldown),
            tuning,
            state: ArenaBossState::Dormant,
            facing: -1.0,
            enabled: true,
            flee_target: 0.0,
            spin_target: 0.0,
            spin_remaining: 0.0,
            attack: TaskSlot::default(),
            death: TaskSlot::default(),
        }
    }

    /// Start the fight with every attack still charging.
    pub fn activate(&mut self) -> bool {
        if self.state != ArenaBossState::Dormant {
            return false;
        }
        self.state = ArenaBossState::Idle;
        self.laser.trigger();
        self.missile.trigger();
        self.spin.trigger();
        true
    }

    pub fn is_dead(&self) -> bool {
        self.state == ArenaBossState::Dead
    }

    pub fn flee_target(&self) -> Option<f32> {
        (self.state == ArenaBossState::Fleeing).then_some(self.flee_target)
    }

    pub fn tick(
        &mut self,
        dt: f32,
        x: f32,
        target_x: f32,
        bounds: &ArenaBounds,
    ) -> ArenaBossOutput {
        let mut out = ArenaBossOutput::default();
        if !self.enabled {
            return out;
        }

        match self.state {
            ArenaBossState::Dormant => return out,
            ArenaBossState::Dead => {
                match self.death.poll(dt) {
                    Some(DeathStep::Defeated) => {
                        out.defeated = true;
                        self.death
                            .schedule(self.tuning.disable_delay, DeathStep::Disable);
                    }
                    Some(DeathStep::Disable) => {
                        out.disabled = true;
                        self.enabled = false;
                    }
                    None => {}
                }
                return out;
            }
            _ => {}
        }

        self.laser.tick(dt);
        self.missile.tick(dt);
        self.spin.tick(dt);

        match self.attack.poll(dt) {
            Some(AttackStep::FireLaser) => {
                out.fire_laser = true;
                let rest = (self.tuning.laser_charge - self.tuning.laser_fire_at).max(0.0);
                self.attack.schedule(rest, AttackStep::EndLaser);
            }
            Some(AttackStep::FireMissile) => {
                out.fire_missile = true;
                self.attack
                    .schedule(self.tuning.missile_recover, AttackStep::EndMissile);
            }
            Some(AttackStep::EndLaser) | Some(AttackStep::EndMissile) => {
                self.state = ArenaBossState::Idle;
            }
            Some(AttackStep::StartSpin) => {
                self.state = ArenaBossState::Spinning;
                self.spin_remaining = self.tuning.spin_duration;
                self.spin_target = bounds.nearer_spin_point(x);
                out.spin_started = true;
            }
            None => {}
        }

        match self.state {
            ArenaBossState::Idle | ArenaBossState::Moving => {
                self.state = ArenaBossState::Moving;
                self.face(target_x - x);
                out.began = self.choose_attack((target_x - x).abs());
            }
            ArenaBossState::Fleeing => {
                let to_target = self.flee_target - x;
                if to_target.abs() < self.tuning.arrive_distance {
                    self.state = ArenaBossState::Idle;
                } else {
                    self.face(to_target);
                    out.velocity_x = approach(to_target, self.tuning.flee_speed, dt);
                }
            }
            ArenaBossState::Spinning => {
                if self.spin_remaining > 0.0 {
                    self.spin_remaining -= dt;
                    if (x - self.spin_target).abs() < self.tuning.arrive_distance {
                        self.spin_target = bounds.other_spin_point(self.spin_target);
                    }
                    let to_target = self.spin_target - x;
                    self.face(to_target);
                    out.velocity_x = approach(to_target, self.tuning.spin_speed, dt);
                } else {
                    self.state = ArenaBossState::Idle;
                    out.spin_ended = true;
                }
            }
            _ => {}
        }
        out
    }

    fn face(&mut self, dx: f32) {
        if dx != 0.0 {
            self.facing = dx.signum();
        }
    }

    fn choose_attack(&mut self, distance: f32) -> Option<ArenaAttack> {
        let far = distance > self.tuning.ranged_min_distance;
        if self.spin.try_fire() {
            self.state = ArenaBossState::SpinCharge;
            self.attack
                .schedule(self.tuning.spin_charge, AttackStep::StartSpin);
            Some(ArenaAttack::Spin)
        } else if far && self.missile.try_fire() {
            self.state = ArenaBossState::MissileCharge;
            self.attack
                .schedule(self.tuning.missile_fire_at, AttackStep::FireMissile);
            Some(ArenaAttack::Missile)
        } else if far && self.laser.try_fire() {
            self.state = ArenaBossState::LaserCharge;
            self.attack
                .schedule(self.tuning.laser_fire_at, AttackStep::FireLaser);
            Some(ArenaAttack::Laser)
        } else {
            None
        }
    }

    /// Apply damage and flee toward the bound farther from `x`. Any attack in
    /// progress, spin included, is abandoned.
    pub fn take_damage(
        &mut self,
        health: &mut Health,
        amount: u32,
        x: f32,
        bounds: &ArenaBounds,
    ) -> DamageOutcome {
        if !self.enabled || matches!(self.state, ArenaBossState::Dormant | ArenaBossState::Dead) {
            return DamageOutcome::Ignored;
        }
        let outcome = health.apply_damage(amount);
        if outcome == DamageOutcome::Ignored {
            return outcome;
        }

        self.attack.cancel();
        self.spin_remaining = 0.0;
        if outcome == DamageOutcome::Killed {
            self.die();
        } else {
            self.flee_target = bounds.farther_bound(x);
            self.state = ArenaBossState::Fleeing;
        }
        outcome
    }

    fn die(&mut self) {
        self.state = ArenaBossState::Dead;
        self.death
            .schedule(self.tuning.defeat_delay, DeathStep::Defeated);
    }

    /// Heal after the player dies, capped at max. Returns the amount restored.
    pub fn on_player_died(&self, health: &mut Health) -> u32 {
        if self.is_dead() || !self.enabled {
            return 0;
        }
        health.heal_capped(self.tuning.death_heal, health.max)
    }
}

/// Velocity toward a point `offset` away, slowed so one step of `dt` lands
/// on the point instead of past it.
fn approach(offset: f32, speed: f32, dt: f32) -> f32 {
    let speed = if dt > 0.0 {
        speed.min(offset.abs() / dt)
    } else {
        speed
    };
    offset.signum() * speed
}

fn attack_clip(attack: ArenaAttack) -> &'static str {
    match attack {
        ArenaAttack::Laser => "laser_charge",
        ArenaAttack::Missile => "missile",
        ArenaAttack::Spin => "spin_charge",
    }
}

const FIRE_POINT: Vec2 = Vec2::new(1.2, 0.4);

pub(crate) fn think_arena_bosses(
    time: Res<Time>,
    mut projectiles: MessageWriter<SpawnProjectile>,
    mut animations: MessageWriter<PlayAnimation>,
    mut sounds: MessageWriter<PlaySound>,
    mut ui: MessageWriter<NotifyUi>,
    mut defeated: MessageWriter<BossDefeatedEvent>,
    players: Query<&Transform, (With<Player>, Without<ArenaBoss>)>,
    mut bosses: Query<(
        Entity,
        &mut ArenaBoss,
        &Transform,
        &ArenaBounds,
        &mut LinearVelocity,
        &mut Hitbox,
        &mut Sprite,
    )>,
) {
    let dt = time.delta_secs();
    let Some(player_pos) = players.iter().next().map(|t| t.translation.truncate()) else {
        return;
    };

    for (entity, mut boss, transform, bounds, mut velocity, mut spin_hitbox, mut sprite) in
        &mut bosses
    {
        if !boss.enabled {
            continue;
        }
        let position = transform.translation.truncate();
        let before = boss.state;
        let out = boss.tick(dt, position.x, player_pos.x, bounds);
        if boss.state != before {
            debug!("{} {:?} -> {:?}", boss.tuning.name, before, boss.state);
        }

        velocity.x = out.velocity_x;
        velocity.y = 0.0;
        sprite.flip_x = boss.facing < 0.0;

        if let Some(attack) = out.began {
            animations.write(PlayAnimation {
                actor: entity,
                clip: attack_clip(attack),
            });
            if attack == ArenaAttack::Laser {
                sounds.write(PlaySound {
                    clip: "laser_charge",
                });
            }
        }

        let fire_point = position + Vec2::new(FIRE_POINT.x * boss.facing, FIRE_POINT.y);
        if out.fire_laser {
            projectiles.write(SpawnProjectile {
                kind: ProjectileKind::Laser,
                origin: fire_point,
                aim: Vec2::new(boss.facing, 0.0),
                team: Team::Enemy,
                source: entity,
            });
            sounds.write(PlaySound { clip: "laser_fire" });
        }
        if out.fire_missile {
            projectiles.write(SpawnProjectile {
                kind: ProjectileKind::Missile,
                origin: fire_point,
                aim: player_pos,
                team: Team::Enemy,
                source: entity,
            });
            sounds.write(PlaySound {
                clip: "missile_fire",
            });
        }

        if out.spin_started {
            spin_hitbox.activate();
            sounds.write(PlaySound { clip: "spin" });
            animations.write(PlayAnimation {
                actor: entity,
                clip: "spin",
            });
        }
        if boss.state != ArenaBossState::Spinning && spin_hitbox.enabled {
            spin_hitbox.deactivate();
        }

        if out.defeated {
            ui.write(NotifyUi(UiEvent::BossHealthHidden { boss: entity }));
            sprite.color = Color::srgb(0.35, 0.35, 0.4);
            animations.write(PlayAnimation {
                actor: entity,
                clip: "defeated",
            });
        }
        if out.disabled {
            info!("{} defeated", boss.tuning.name);
            defeated.write(BossDefeatedEvent {
                boss: entity,
                name: boss.tuning.name.clone(),
            });
        }
    }
}

pub(crate) fn arena_boss_take_hits(
    mut damage_events: MessageReader<DamageEvent>,
    mut deaths: MessageWriter<DeathEvent>,
    mut animations: MessageWriter<PlayAnimation>,
    mut sounds: MessageWriter<PlaySound>,
    mut ui: MessageWriter<NotifyUi>,
    mut bosses: Query<(
        &Transform,
        &mut ArenaBoss,
        &mut Health,
        &ArenaBounds,
        &mut Hitbox,
        &mut Hurtbox,
    )>,
) {
    for event in damage_events.read() {
        let Ok((transform, mut boss, mut health, bounds, mut spin_hitbox, mut hurtbox)) =
            bosses.get_mut(event.target)
        else {
            continue;
        };

        let x = transform.translation.x;
        let outcome = boss.take_damage(&mut health, event.amount, x, bounds);
        if outcome == DamageOutcome::Ignored {
            continue;
        }

        spin_hitbox.deactivate();
        ui.write(NotifyUi(UiEvent::HealthChanged {
            actor: event.target,
            current: health.current,
            max: health.max,
        }));

        if outcome == DamageOutcome::Killed {
            info!("{} killed", boss.tuning.name);
            hurtbox.enabled = false;
            deaths.write(DeathEvent {
                entity: event.target,
            });
            sounds.write(PlaySound { clip: "boss_death" });
            animations.write(PlayAnimation {
                actor: event.target,
                clip: "scientist_death",
            });
        } else {
            debug!(
                "{} hit, {}/{}, fleeing to {:?}",
                boss.tuning.name,
                health.current,
                health.max,
                boss.flee_target()
            );
            sounds.write(PlaySound { clip: "boss_hit" });
        }
    }
}

pub(crate) fn arena_boss_heal_on_player_death(
    mut player_deaths: MessageReader<PlayerDiedEvent>,
    mut ui: MessageWriter<NotifyUi>,
    mut bosses: Query<(Entity, &ArenaBoss, &mut Health)>,
) {
    for _ in player_deaths.read() {
        for (entity, boss, mut health) in &mut bosses {
            let restored = boss.on_player_died(&mut health);
            if restored > 0 {
                info!(
                    "{} recovers {} after player death ({}/{})",
                    boss.tuning.name, restored, health.current, health.max
                );
                ui.write(NotifyUi(UiEvent::HealthChanged {
                    actor: entity,
                    current: health.current,
                    max: health.max,
                }));
            }
        }
    }
}
