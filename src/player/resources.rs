//! Player domain: tuning and input resources.

use bevy::prelude::*;
use serde::Deserialize;

use crate::spatial::StepGeometry;

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: u32,
    pub run_speed: f32,
    pub jump_impulse: f32,
    pub wall_slide_speed: f32,
    pub wall_jump_horizontal: f32,
    pub wall_jump_lock: f32,
    /// Below this vertical speed an airborne player counts as falling.
    pub fall_threshold: f32,
    /// Half the collider size.
    pub half_width: f32,
    pub half_height: f32,
    /// Foot points sit this far either side of the centre, at the collider bottom.
    pub foot_spread: f32,
    pub ground_ray: f32,
    pub wall_offset: f32,
    pub wall_reach: f32,
    pub step_height: f32,
    pub step_check: f32,
    pub step_drop: f32,
    pub attack_lock: f32,
    pub attack_cooldown: f32,
    pub overload_cooldown: f32,
    pub combo_window: f32,
    pub combo_threshold: u32,
    pub swing_damage: u32,
    /// Distance from the body centre to the swing centre.
    pub swing_reach: f32,
    pub swing_half_width: f32,
    pub swing_half_height: f32,
    /// Used when the death clip length is unknown.
    pub death_fallback: f32,
    pub shield_charges: u32,
    pub shield_cooldown: f32,
    pub shield_visible: f32,
    pub ghost_cooldown: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 5,
            run_speed: 8.0,
            jump_impulse: 14.0,
            wall_slide_speed: 1.5,
            wall_jump_horizontal: 10.0,
            wall_jump_lock: 0.15,
            fall_threshold: 0.1,
            half_width: 0.4,
            half_height: 0.8,
            foot_spread: 0.35,
            ground_ray: 0.2,
            wall_offset: 0.4,
            wall_reach: 0.1,
            step_height: 1.0,
            step_check: 0.2,
            step_drop: 0.1,
            attack_lock: 0.25,
            attack_cooldown: 0.5,
            overload_cooldown: 1.5,
            combo_window: 4.0,
            combo_threshold: 4,
            swing_damage: 1,
            swing_reach: 0.9,
            swing_half_width: 0.6,
            swing_half_height: 0.5,
            death_fallback: 1.0,
            shield_charges: 3,
            shield_cooldown: 60.0,
            shield_visible: 3.0,
            ghost_cooldown: 20.0,
        }
    }
}

impl PlayerTuning {
    pub fn feet(&self) -> [Vec2; 2] {
        [
            Vec2::new(-self.foot_spread, -self.half_height),
            Vec2::new(self.foot_spread, -self.half_height),
        ]
    }

    pub fn step_geometry(&self) -> StepGeometry {
        StepGeometry {
            lead: self.half_width,
            drop: self.step_drop,
            step_height: self.step_height,
            check_distance: self.step_check,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.half_width * 2.0, self.half_height * 2.0)
    }
}

/// Raw signals sampled once per frame. Buttons are press edges.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    pub axis: f32,
    pub jump: bool,
    pub attack: bool,
    pub interact: bool,
    pub ability: bool,
}
