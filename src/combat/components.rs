//! Combat domain: health, capability tags, and hit regions.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::Cooldown;
use crate::spatial::{GameLayer, ProbeShape};

/// Result of applying damage to a [`Health`] pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Dead already, or nothing to apply.
    Ignored,
    Wounded,
    /// This application took the pool to zero. Reported exactly once.
    Killed,
}

/// Hit-point pool shared by every damageable actor.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.is_dead() || amount == 0 {
            return DamageOutcome::Ignored;
        }
        self.current = self.current.saturating_sub(amount);
        if self.current == 0 {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Wounded
        }
    }

    /// Whether `amount` would take a living pool to zero.
    pub fn would_kill(&self, amount: u32) -> bool {
        !self.is_dead() && amount >= self.current
    }

    /// Restore up to `amount`, never past max. Returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.heal_capped(amount, self.max)
    }

    /// Restore up to `amount` without passing `ceiling` (or max). Never lowers
    /// health that already sits above the ceiling.
    pub fn heal_capped(&mut self, amount: u32, ceiling: u32) -> u32 {
        if self.is_dead() {
            return 0;
        }
        let target = self
            .current
            .saturating_add(amount)
            .min(ceiling.min(self.max));
        if target <= self.current {
            return 0;
        }
        let restored = target - self.current;
        self.current = target;
        restored
    }

    pub fn reset_to_max(&mut self) {
        self.current = self.max;
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }

    pub fn fraction(&self) -> f32 {
        self.current as f32 / self.max as f32
    }
}

/// Team affiliation of an attacker or hit region.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    /// Layers this team's hit regions look for.
    pub fn target_layers(&self) -> LayerMask {
        match self {
            Team::Player => GameLayer::Enemy.into(),
            Team::Enemy => LayerMask::from(GameLayer::Player) | LayerMask::from(GameLayer::Npc),
        }
    }

    pub fn hitbox_layer(&self) -> GameLayer {
        match self {
            Team::Player => GameLayer::PlayerHitbox,
            Team::Enemy => GameLayer::EnemyHitbox,
        }
    }
}

/// Which teams may damage this actor.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Damageable {
    pub by_player: bool,
    pub by_enemy: bool,
}

impl Damageable {
    pub const BY_PLAYER: Self = Self {
        by_player: true,
        by_enemy: false,
    };
    pub const BY_ENEMY: Self = Self {
        by_player: false,
        by_enemy: true,
    };

    pub fn accepts(&self, team: Team) -> bool {
        match team {
            Team::Player => self.by_player,
            Team::Enemy => self.by_enemy,
        }
    }
}

/// Receiving side of combat. A disabled hurtbox ignores every hit.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hurtbox {
    pub enabled: bool,
}

impl Default for Hurtbox {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitKind {
    #[default]
    Strike,
    /// Also shatters cracked blocks.
    Explosion,
}

/// Damage-dealing region. Lives on its owner (swings, contact damage) or on
/// its own entity (explosions, projectiles), offset from that entity's
/// transform.
#[derive(Component, Debug, Clone)]
pub struct Hitbox {
    pub owner: Entity,
    pub damage: u32,
    pub kind: HitKind,
    pub shape: ProbeShape,
    pub offset: Vec2,
    pub enabled: bool,
    /// Bumped on every activation.
    pub activation: u32,
    /// Targets already struck during the current activation.
    pub hit_entities: Vec<Entity>,
}

impl Hitbox {
    pub fn new(owner: Entity, damage: u32, shape: ProbeShape) -> Self {
        Self {
            owner,
            damage,
            kind: HitKind::Strike,
            shape,
            offset: Vec2::ZERO,
            enabled: true,
            activation: 1,
            hit_entities: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: HitKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Start disabled; the owner activates it later.
    pub fn dormant(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Open a fresh activation. Targets hit in earlier activations can be hit again.
    pub fn activate(&mut self) {
        self.enabled = true;
        self.activation = self.activation.wrapping_add(1);
        self.hit_entities.clear();
    }

    pub fn deactivate(&mut self) {
        self.enabled = false;
    }

    /// Record a strike on `target`. False if disabled or already struck this activation.
    pub fn try_strike(&mut self, target: Entity) -> bool {
        if !self.enabled || self.hit_entities.contains(&target) {
            return false;
        }
        self.hit_entities.push(target);
        true
    }
}

/// Re-opens an always-on hitbox on a fixed interval so sustained overlap
/// deals damage once per interval.
#[derive(Component, Debug, Clone, Copy)]
pub struct HitboxRearm {
    pub interval: Cooldown,
}

impl HitboxRearm {
    pub fn every(seconds: f32) -> Self {
        Self {
            interval: Cooldown::charging(seconds),
        }
    }
}

/// Despawns a standalone hit region after the given seconds.
#[derive(Component, Debug)]
pub struct HitboxLifetime(pub f32);

/// Terrain that shatters when an explosion overlaps it. Has no health.
#[derive(Component, Debug)]
pub struct CrackedBlock;

const RECOIL_TIME: f32 = 0.2;

/// Colour flash and knockback shown when an actor accepts a hit.
#[derive(Component, Debug, Clone)]
pub struct DamageFeedback {
    pub flash_duration: f32,
    pub flash_remaining: f32,
    pub knockback: f32,
    /// While positive the owner's own movement leaves horizontal velocity alone.
    pub recoil_remaining: f32,
    pub tint: Color,
    pub base: Color,
}

impl DamageFeedback {
    pub fn new(base: Color, flash_duration: f32, knockback: f32) -> Self {
        Self {
            flash_duration,
            flash_remaining: 0.0,
            knockback,
            recoil_remaining: 0.0,
            tint: Color::srgb(1.0, 0.2, 0.2),
            base,
        }
    }

    /// Start the flash and return the horizontal knockback velocity, pushing
    /// away from `from`.
    pub fn trigger(&mut self, position: Vec2, from: Vec2) -> f32 {
        self.flash_remaining = self.flash_duration;
        if self.knockback > 0.0 {
            self.recoil_remaining = RECOIL_TIME;
        }
        let dir = if position.x < from.x { -1.0 } else { 1.0 };
        dir * self.knockback
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_remaining > 0.0
    }

    pub fn is_recoiling(&self) -> bool {
        self.recoil_remaining > 0.0
    }
}

/// Capability tags attached to a target, as seen by hit screening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetTags {
    pub damageable: Damageable,
    pub hurtbox_enabled: bool,
}

/// Decide whether `hitbox` may score a hit on `target` and record it if so.
pub fn screen_hit(hitbox: &mut Hitbox, team: Team, target: Entity, tags: TargetTags) -> bool {
    if target == hitbox.owner || !tags.damageable.accepts(team) || !tags.hurtbox_enabled {
        return false;
    }
    hitbox.try_strike(target)
}
