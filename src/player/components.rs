//! Player domain: the control state machine and the player's abilities.

use bevy::prelude::*;

use crate::combat::{DamageOutcome, Health};
use crate::core::{ComboCounter, ComboOutcome, Cooldown, TaskSlot};
use crate::player::resources::{PlayerInput, PlayerTuning};
use crate::spatial::StepProbe;

#[derive(Component, Debug)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Idle,
    Run,
    Jump,
    Fall,
    WallSlide,
    Attack,
    Dead,
}

impl PlayerState {
    pub fn clip(&self) -> &'static str {
        match self {
            PlayerState::Idle => "idle",
            PlayerState::Run => "run",
            PlayerState::Jump => "jump",
            PlayerState::Fall => "fall",
            PlayerState::WallSlide => "wall_slide",
            PlayerState::Attack => "attack",
            PlayerState::Dead => "player_death",
        }
    }
}

/// World facts gathered in the sense phase.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayerSenses {
    pub grounded: bool,
    pub touching_wall: bool,
    pub step: StepProbe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttackStep {
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeathStep {
    Respawn,
}

/// What the controller wants applied to the body this tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlOutput {
    pub velocity_x: Option<f32>,
    pub velocity_y: Option<f32>,
    /// Lift the body by the step height.
    pub step_up: bool,
    /// Open a new swing activation.
    pub swing: bool,
    pub swing_ended: bool,
    /// The death wait is over: move to the checkpoint and restore health.
    pub respawn: bool,
}

#[derive(Component, Debug, Clone)]
pub struct PlayerController {
    pub state: PlayerState,
    /// 1.0 facing right, -1.0 facing left.
    pub facing: f32,
    pub jumping: bool,
    pub wall_sliding: bool,
    pub was_grounded: bool,
    /// Swings are only possible once the weapon has been picked up.
    pub has_weapon: bool,
    pub attack_cooldown: Cooldown,
    pub combo: ComboCounter,
    /// Horizontal input is ignored while this counts down after a wall jump.
    pub wall_jump_lock: Cooldown,
    attack: TaskSlot<AttackStep>,
    death: TaskSlot<DeathStep>,
}

impl PlayerController {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            state: PlayerState::Idle,
            facing: 1.0,
            jumping: false,
            wall_sliding: false,
            was_grounded: false,
            has_weapon: false,
            attack_cooldown: Cooldown::ready(tuning.attack_cooldown),
            combo: ComboCounter::new(tuning.combo_window, tuning.combo_threshold),
            wall_jump_lock: Cooldown::ready(tuning.wall_jump_lock),
            attack: TaskSlot::default(),
            death: TaskSlot::default(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.state == PlayerState::Dead
    }

    pub fn is_attacking(&self) -> bool {
        self.attack.is_pending()
    }

    /// Advance one frame. `velocity_y` is the body's current vertical speed.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &PlayerInput,
        senses: &PlayerSenses,
        velocity_y: f32,
        tuning: &PlayerTuning,
    ) -> ControlOutput {
        let mut out = ControlOutput::default();

        if self.is_dead() {
            if self.death.poll(dt) == Some(DeathStep::Respawn) {
                out.respawn = true;
            }
            return out;
        }

        if senses.grounded && !self.was_grounded {
            self.jumping = false;
        }
        self.was_grounded = senses.grounded;

        self.wall_jump_lock.tick(dt);
        let mut vy = velocity_y;

        // Run
        if self.wall_jump_lock.is_ready() {
            if input.axis > 0.0 {
                self.facing = 1.0;
            } else if input.axis < 0.0 {
                self.facing = -1.0;
            }
            out.velocity_x = Some(input.axis * tuning.run_speed);
        }

        // Jump and wall jump
        let mut wall_jumped = false;
        if input.jump {
            if senses.grounded {
                self.jumping = true;
                vy = tuning.jump_impulse;
                out.velocity_y = Some(vy);
                debug!("Jump");
            } else if self.wall_sliding {
                self.jumping = true;
                self.wall_sliding = false;
                wall_jumped = true;
                vy = tuning.jump_impulse;
                out.velocity_x = Some(-self.facing * tuning.wall_jump_horizontal);
                out.velocity_y = Some(vy);
                self.facing = -self.facing;
                self.wall_jump_lock.trigger();
                debug!("Wall jump, now facing {}", self.facing);
            }
        }

        // Wall slide
        self.wall_sliding = false;
        let toward_wall = input.axis != 0.0 && input.axis.signum() == self.facing;
        if !wall_jumped && !senses.grounded && senses.touching_wall && toward_wall {
            self.wall_sliding = true;
            if vy < -tuning.wall_slide_speed {
                vy = -tuning.wall_slide_speed;
                out.velocity_y = Some(vy);
            }
        }

        out.swing_ended = self.tick_attack(dt, input, tuning, &mut out.swing);

        if input.axis != 0.0 && senses.step.can_climb() {
            out.step_up = true;
        }

        if self.jumping && vy <= 0.0 {
            self.jumping = false;
        }

        self.state = self.derive_state(senses.grounded, vy, input.axis, tuning);
        out
    }

    /// Cooldown, combo window and attack lock. Returns true when the lock released.
    fn tick_attack(
        &mut self,
        dt: f32,
        input: &PlayerInput,
        tuning: &PlayerTuning,
        swing: &mut bool,
    ) -> bool {
        self.combo.tick(dt);
        let released = self.attack.poll(dt) == Some(AttackStep::Release);

        if !self.has_weapon {
            return released;
        }
        self.attack_cooldown.tick(dt);
        if input.attack && self.attack_cooldown.is_ready() {
            self.attack.schedule(tuning.attack_lock, AttackStep::Release);
            match self.combo.register() {
                ComboOutcome::Overload => {
                    self.attack_cooldown.trigger_for(tuning.overload_cooldown);
                    debug!("Combo overload, cooling down {}s", tuning.overload_cooldown);
                }
                ComboOutcome::Standard => {
                    self.attack_cooldown.trigger_for(tuning.attack_cooldown);
                }
            }
            *swing = true;
            return false;
        }
        released
    }

    fn derive_state(
        &self,
        grounded: bool,
        vy: f32,
        axis: f32,
        tuning: &PlayerTuning,
    ) -> PlayerState {
        let falling = !grounded && vy < -tuning.fall_threshold && !self.jumping;
        if self.is_attacking() {
            PlayerState::Attack
        } else if self.jumping {
            PlayerState::Jump
        } else if self.wall_sliding {
            PlayerState::WallSlide
        } else if falling {
            PlayerState::Fall
        } else if grounded && axis.abs() > 0.01 {
            PlayerState::Run
        } else if grounded {
            PlayerState::Idle
        } else {
            self.state_in_air()
        }
    }

    /// Airborne but neither rising from a jump nor falling: hold the last pose.
    fn state_in_air(&self) -> PlayerState {
        match self.state {
            PlayerState::Attack | PlayerState::Dead => PlayerState::Idle,
            other => other,
        }
    }

    /// Damage from combat. Ignored while dead.
    pub fn take_damage(
        &mut self,
        health: &mut Health,
        amount: u32,
        death_clip: f32,
    ) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::Ignored;
        }
        let outcome = health.apply_damage(amount);
        if outcome == DamageOutcome::Killed {
            self.die(death_clip);
        }
        outcome
    }

    /// Kill outright, whatever the health. False if already dead.
    pub fn force_kill(&mut self, health: &mut Health, death_clip: f32) -> bool {
        if self.is_dead() {
            return false;
        }
        health.apply_damage(health.current);
        self.die(death_clip);
        true
    }

    fn die(&mut self, death_clip: f32) {
        self.state = PlayerState::Dead;
        self.attack.cancel();
        self.jumping = false;
        self.wall_sliding = false;
        self.death.schedule(death_clip, DeathStep::Respawn);
    }

    /// Back to baseline after the death wait.
    pub fn respawn(&mut self, health: &mut Health) {
        health.reset_to_max();
        self.state = PlayerState::Idle;
        self.attack.cancel();
        self.death.cancel();
        self.attack_cooldown.reset();
        self.wall_jump_lock.reset();
        self.combo.reset();
        self.jumping = false;
        self.wall_sliding = false;
        self.was_grounded = false;
    }
}

/// Offset of the swing hitbox for the given facing.
pub fn swing_offset(facing: f32, reach: f32) -> Vec2 {
    Vec2::new(facing.signum() * reach, 0.0)
}

/// Weapon carried visibly when not swinging.
#[derive(Component, Debug)]
pub struct WeaponVisual {
    pub owner: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShieldBlock {
    /// No shield up; the damage goes through.
    Passed,
    Absorbed,
    /// The last charge absorbed the hit and the shield broke.
    Broke,
}

/// Absorbs whole hits while charged. Breaking starts a long cooldown.
#[derive(Component, Debug, Clone)]
pub struct Shield {
    pub charges: u32,
    pub max_charges: u32,
    pub active: bool,
    pub cooldown: Cooldown,
    /// How long the shield stays visible after blocking.
    pub visible_remaining: f32,
    pub visible_duration: f32,
}

impl Shield {
    pub fn new(max_charges: u32, cooldown: f32, visible_duration: f32) -> Self {
        Self {
            charges: 0,
            max_charges,
            active: false,
            cooldown: Cooldown::ready(cooldown),
            visible_remaining: 0.0,
            visible_duration,
        }
    }

    /// Raise a fresh shield. Refused while the broken shield cools down.
    pub fn activate(&mut self) -> bool {
        if !self.cooldown.is_ready() {
            return false;
        }
        self.charges = self.max_charges;
        self.active = true;
        true
    }

    pub fn try_block(&mut self) -> ShieldBlock {
        if !self.active {
            return ShieldBlock::Passed;
        }
        self.charges = self.charges.saturating_sub(1);
        self.visible_remaining = self.visible_duration;
        if self.charges == 0 {
            self.active = false;
            self.visible_remaining = 0.0;
            self.cooldown.trigger();
            ShieldBlock::Broke
        } else {
            ShieldBlock::Absorbed
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.cooldown.tick(dt);
        self.visible_remaining = (self.visible_remaining - dt).max(0.0);
    }

    pub fn is_visible(&self) -> bool {
        self.visible_remaining > 0.0
    }
}

/// Ghost projectile ability. Locked until picked up.
#[derive(Component, Debug, Clone)]
pub struct GhostBomb {
    pub unlocked: bool,
    pub cooldown: Cooldown,
}

impl GhostBomb {
    pub fn new(cooldown: f32) -> Self {
        Self {
            unlocked: false,
            cooldown: Cooldown::ready(cooldown),
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.cooldown.tick(dt);
    }

    /// Fire if unlocked and off cooldown.
    pub fn try_fire(&mut self) -> bool {
        self.unlocked && self.cooldown.try_fire()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillZoneKind {
    /// Kill the player outright.
    Kill,
    /// Put the player back at the last checkpoint without damage.
    Teleport,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct KillZone(pub KillZoneKind);

/// Entering saves the zone's position as the respawn point.
#[derive(Component, Debug, Clone, Copy)]
pub struct CheckpointZone {
    pub respawn: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Spear,
    GhostBomb,
    /// Raises the shield, as the village elder's blessing does.
    ShieldBlessing,
}

/// Collected once on touch, then removed.
#[derive(Component, Debug, Clone, Copy)]
pub struct Pickup(pub PickupKind);
