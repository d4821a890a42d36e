//! NPC domain: the escorted companion.

use bevy::prelude::*;

use crate::combat::{DamageOutcome, Health};
use crate::core::{Cooldown, TaskSlot};
use crate::npc::resources::EscortTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscortState {
    /// Not yet spoken to.
    #[default]
    Waiting,
    Halted,
    Walking,
    /// Respawns at its start after a delay.
    Dead,
    /// Reached the goal. Cannot be harmed or targeted any more.
    Arrived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscortStep {
    Respawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EscortOutput {
    pub velocity_x: f32,
    pub respawned: bool,
}

#[derive(Component, Debug, Clone)]
pub struct Escort {
    pub state: EscortState,
    pub start: Vec2,
    pub walk_speed: f32,
    pub respawn_delay: f32,
    toggle: Cooldown,
    respawn: TaskSlot<EscortStep>,
}

impl Escort {
    pub fn new(tuning: &EscortTuning, start: Vec2) -> Self {
        Self {
            state: EscortState::Waiting,
            start,
            walk_speed: tuning.walk_speed,
            respawn_delay: tuning.respawn_delay,
            toggle: Cooldown::ready(tuning.toggle_debounce),
            respawn: TaskSlot::default(),
        }
    }

    /// Halted or walking. Only then can the escort be hurt.
    pub fn is_escorting(&self) -> bool {
        matches!(self.state, EscortState::Halted | EscortState::Walking)
    }

    /// Begin escorting, halted. Ignored unless waiting.
    pub fn start(&mut self) -> bool {
        if self.state != EscortState::Waiting {
            return false;
        }
        self.state = EscortState::Halted;
        true
    }

    /// Switch between halted and walking. Returns the new halted flag, or
    /// `None` when not escorting or still debounced.
    pub fn toggle_halt(&mut self) -> Option<bool> {
        if !self.is_escorting() || !self.toggle.try_fire() {
            return None;
        }
        self.state = match self.state {
            EscortState::Walking => EscortState::Halted,
            _ => EscortState::Walking,
        };
        Some(self.state == EscortState::Halted)
    }

    pub fn tick(&mut self, dt: f32) -> EscortOutput {
        self.toggle.tick(dt);
        let mut out = EscortOutput::default();
        match self.state {
            EscortState::Walking => out.velocity_x = self.walk_speed,
            EscortState::Dead => {
                if self.respawn.poll(dt) == Some(EscortStep::Respawn) {
                    self.state = EscortState::Halted;
                    out.respawned = true;
                }
            }
            _ => {}
        }
        out
    }

    pub fn take_damage(&mut self, health: &mut Health, amount: u32) -> DamageOutcome {
        if !self.is_escorting() {
            return DamageOutcome::Ignored;
        }
        let outcome = health.apply_damage(amount);
        if outcome == DamageOutcome::Killed {
            self.state = EscortState::Dead;
            self.respawn.schedule(self.respawn_delay, EscortStep::Respawn);
        }
        outcome
    }

    /// The escort is over for good. False if already arrived.
    pub fn reach_goal(&mut self) -> bool {
        if self.state == EscortState::Arrived {
            return false;
        }
        self.state = EscortState::Arrived;
        self.respawn.cancel();
        true
    }
}

/// Reaching this zone ends the escort.
#[derive(Component, Debug)]
pub struct EscortGoal {
    pub objective: String,
}

/// Walking into this zone lifts the escort onto a ledge.
#[derive(Component, Debug)]
pub struct ClimbArea;
