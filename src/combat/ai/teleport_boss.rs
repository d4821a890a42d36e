//! Combat domain: the teleporting barrage boss.
//!
//! Two independent sequences run on the boss: the shot windup and the
//! teleport (or death) sequence. A hit cancels the windup and starts a
//! teleport, during which the boss cannot be hit and does not shoot.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use rand::Rng;

use crate::combat::components::{DamageFeedback, Health, Hurtbox, Team};
use crate::combat::events::{BossDefeatedEvent, DamageEvent, DeathEvent};
use crate::combat::resources::TeleportBossTuning;
use crate::core::{
    ClipLibrary, Cooldown, NotifyUi, PlayAnimation, PlaySound, PlayerDiedEvent, ProjectileKind,
    SimRng, SpawnProjectile, TaskSlot, UiEvent,
};
use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeleportBossState {
    /// Waiting for its arena trigger.
    #[default]
    Dormant,
    Attacking,
    /// Hidden and unhittable until it reappears.
    Teleporting,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossShot {
    Bullet,
    Bomb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShotStep {
    Fire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SequenceStep {
    Reappear,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossHitOutcome {
    Ignored,
    Teleported,
    Killed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeleportBossOutput {
    pub windup_started: bool,
    pub shot: Option<BossShot>,
    pub reappear: bool,
    pub remove: bool,
}

#[derive(Component, Debug, Clone)]
pub struct TeleportBoss {
    pub tuning: TeleportBossTuning,
    pub state: TeleportBossState,
    pub shots_fired: u32,
    /// Index of the teleport point the boss last appeared at.
    pub current_point: Option<usize>,
    attack_loop: Cooldown,
    shot: TaskSlot<ShotStep>,
    sequence: TaskSlot<SequenceStep>,
}

impl TeleportBoss {
    pub fn new(tuning: TeleportBossTuning) -> Self {
        let attack_loop = Cooldown::ready(tuning.shot_interval);
        Self {
            tuning,
            state: TeleportBossState::Dormant,
            shots_fired: 0,
            current_point: None,
            attack_loop,
            shot: TaskSlot::default(),
            sequence: TaskSlot::default(),
        }
    }

    /// Start the fight. Ignored unless dormant.
    pub fn activate(&mut self) -> bool {
        if self.state != TeleportBossState::Dormant {
            return false;
        }
        self.state = TeleportBossState::Attacking;
        self.attack_loop.reset();
        true
    }

    pub fn is_dead(&self) -> bool {
        self.state == TeleportBossState::Dead
    }

    pub fn is_shot_pending(&self) -> bool {
        self.shot.is_pending()
    }

    pub fn tick(&mut self, dt: f32) -> TeleportBossOutput {
        let mut out = TeleportBossOutput::default();
        match self.state {
            TeleportBossState::Dormant => {}
            TeleportBossState::Dead => {
                out.remove = self.sequence.poll(dt) == Some(SequenceStep::Remove);
            }
            TeleportBossState::Teleporting => {
                self.attack_loop.tick(dt);
                if self.attack_loop.is_ready() {
                    // The loop keeps its rhythm; a beat that lands mid-teleport is lost.
                    self.attack_loop.trigger();
                }
                if self.sequence.poll(dt) == Some(SequenceStep::Reappear) {
                    self.state = TeleportBossState::Attacking;
                    out.reappear = true;
                }
            }
            TeleportBossState::Attacking => {
                if self.shot.poll(dt) == Some(ShotStep::Fire) {
                    out.shot = Some(self.next_shot());
                }
                self.attack_loop.tick(dt);
                if self.attack_loop.try_fire() {
                    self.shot.schedule(self.tuning.shot_windup, ShotStep::Fire);
                    out.windup_started = true;
                }
            }
        }
        out
    }

    fn next_shot(&mut self) -> BossShot {
        self.shots_fired += 1;
        if self.shots_fired >= self.tuning.shots_before_bomb {
            self.shots_fired = 0;
            BossShot::Bomb
        } else {
            BossShot::Bullet
        }
    }

    /// One hit from the player. A hit that would kill skips the teleport and
    /// the boss dies where it stands.
    pub fn take_hit(
        &mut self,
        health: &mut Health,
        from_player: bool,
        death_clip: f32,
    ) -> BossHitOutcome {
        if self.state != TeleportBossState::Attacking || !from_player {
            return BossHitOutcome::Ignored;
        }
        if health.would_kill(1) {
            health.apply_damage(1);
            self.die(death_clip);
            return BossHitOutcome::Killed;
        }
        health.apply_damage(1);
        self.shot.cancel();
        self.state = TeleportBossState::Teleporting;
        self.sequence
            .schedule(self.tuning.teleport_delay, SequenceStep::Reappear);
        BossHitOutcome::Teleported
    }

    fn die(&mut self, death_clip: f32) {
        self.state = TeleportBossState::Dead;
        self.shot.cancel();
        self.sequence.schedule(death_clip, SequenceStep::Remove);
    }

    /// Heal after the player dies, capped below max. Returns the amount restored.
    pub fn on_player_died(&self, health: &mut Health) -> u32 {
        if self.is_dead() {
            return 0;
        }
        health.heal_capped(self.tuning.death_heal, self.tuning.heal_ceiling)
    }
}

/// Pick a teleport point different from `current` when there is a choice.
pub fn pick_teleport_point(
    current: Option<usize>,
    count: usize,
    rng: &mut impl Rng,
) -> Option<usize> {
    match count {
        0 => None,
        1 => Some(0),
        _ => loop {
            let index = rng.random_range(0..count);
            if Some(index) != current {
                break Some(index);
            }
        },
    }
}

/// Where the boss may reappear after a teleport.
#[derive(Component, Debug, Clone, Default)]
pub struct TeleportPoints(pub Vec<Vec2>);

fn shot_request(shot: BossShot, origin: Vec2, target: Vec2, source: Entity) -> SpawnProjectile {
    let dir = (target - origin).normalize_or_zero();
    let (kind, aim) = match shot {
        BossShot::Bullet => (ProjectileKind::Bullet, dir),
        BossShot::Bomb => (ProjectileKind::Bomb, Vec2::new(dir.x, 1.0).normalize()),
    };
    SpawnProjectile {
        kind,
        origin,
        aim,
        team: Team::Enemy,
        source,
    }
}

pub(crate) fn think_teleport_bosses(
    mut commands: Commands,
    time: Res<Time>,
    mut rng: ResMut<SimRng>,
    mut projectiles: MessageWriter<SpawnProjectile>,
    mut animations: MessageWriter<PlayAnimation>,
    mut sounds: MessageWriter<PlaySound>,
    mut defeated: MessageWriter<BossDefeatedEvent>,
    players: Query<&Transform, (With<Player>, Without<TeleportBoss>)>,
    mut bosses: Query<(
        Entity,
        &mut TeleportBoss,
        &mut Transform,
        &TeleportPoints,
        &mut Hurtbox,
        &mut Visibility,
        &mut LinearVelocity,
    )>,
) {
    let dt = time.delta_secs();
    let player_pos = players.iter().next().map(|t| t.translation.truncate());

    for (entity, mut boss, mut transform, points, mut hurtbox, mut visibility, mut velocity) in
        &mut bosses
    {
        let out = boss.tick(dt);
        let position = transform.translation.truncate();

        if out.windup_started {
            animations.write(PlayAnimation {
                actor: entity,
                clip: "attack",
            });
        }

        if let (Some(shot), Some(target)) = (out.shot, player_pos) {
            projectiles.write(shot_request(shot, position, target, entity));
            sounds.write(PlaySound {
                clip: match shot {
                    BossShot::Bullet => "boss_bullet",
                    BossShot::Bomb => "boss_bomb",
                },
            });
        }

        if out.reappear {
            let current = boss.current_point;
            if let Some(index) = pick_teleport_point(current, points.0.len(), &mut rng.0) {
                let point = points.0[index];
                transform.translation.x = point.x;
                transform.translation.y = point.y;
                boss.current_point = Some(index);
                sounds.write(PlaySound {
                    clip: "teleport_close",
                });
                debug!("{} reappeared at point {}", boss.tuning.name, index);
            }
            velocity.0 = Vec2::ZERO;
            *visibility = Visibility::Visible;
            hurtbox.enabled = true;
            animations.write(PlayAnimation {
                actor: entity,
                clip: "idle",
            });
        }

        if out.remove {
            info!("{} defeated", boss.tuning.name);
            defeated.write(BossDefeatedEvent {
                boss: entity,
                name: boss.tuning.name.clone(),
            });
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn teleport_boss_take_hits(
    clips: Res<ClipLibrary>,
    mut damage_events: MessageReader<DamageEvent>,
    mut deaths: MessageWriter<DeathEvent>,
    mut animations: MessageWriter<PlayAnimation>,
    mut sounds: MessageWriter<PlaySound>,
    mut ui: MessageWriter<NotifyUi>,
    players: Query<(), With<Player>>,
    mut bosses: Query<(
        &Transform,
        &mut TeleportBoss,
        &mut Health,
        &mut Hurtbox,
        &mut Visibility,
        Option<&mut DamageFeedback>,
    )>,
) {
    for event in damage_events.read() {
        let Ok((transform, mut boss, mut health, mut hurtbox, mut visibility, feedback)) =
            bosses.get_mut(event.target)
        else {
            continue;
        };

        let from_player = players.contains(event.source);
        let death_clip = clips.duration_or("red_riot_death", boss.tuning.death_fallback);
        let outcome = boss.take_hit(&mut health, from_player, death_clip);
        if outcome == BossHitOutcome::Ignored {
            continue;
        }

        if let Some(mut feedback) = feedback {
            feedback.trigger(transform.translation.truncate(), event.origin);
        }
        sounds.write(PlaySound { clip: "boss_hit" });
        ui.write(NotifyUi(UiEvent::HealthChanged {
            actor: event.target,
            current: health.current,
            max: health.max,
        }));
        hurtbox.enabled = false;

        match outcome {
            BossHitOutcome::Teleported => {
                debug!(
                    "{} hit, {}/{}, teleporting",
                    boss.tuning.name, health.current, health.max
                );
                *visibility = Visibility::Hidden;
                sounds.write(PlaySound {
                    clip: "teleport_open",
                });
            }
            BossHitOutcome::Killed => {
                info!("{} killed", boss.tuning.name);
                deaths.write(DeathEvent {
                    entity: event.target,
                });
                animations.write(PlayAnimation {
                    actor: event.target,
                    clip: "red_riot_death",
                });
                sounds.write(PlaySound { clip: "boss_death" });
                ui.write(NotifyUi(UiEvent::BossHealthHidden { boss: event.target }));
            }
            BossHitOutcome::Ignored => {}
        }
    }
}

pub(crate) fn teleport_boss_heal_on_player_death(
    mut player_deaths: MessageReader<PlayerDiedEvent>,
    mut ui: MessageWriter<NotifyUi>,
    mut bosses: Query<(Entity, &TeleportBoss, &mut Health)>,
) {
    for _ in player_deaths.read() {
        for (entity, boss, mut health) in &mut bosses {
            if boss.state == TeleportBossState::Dormant {
                continue;
            }
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
