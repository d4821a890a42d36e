//! Validation for loaded tuning values that would break a state machine.

use super::data::TuningFile;
use crate::combat::EnemyProfile;
use crate::core::ClipLibrary;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub section: String,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}: {}", self.section, self.field, self.message)
    }
}

/// Helper macro for recording a failed check
macro_rules! check {
    ($errors:expr, $cond:expr, $section:expr, $field:expr, $message:expr) => {
        if !$cond {
            $errors.push(ValidationError {
                section: $section.to_string(),
                field: $field,
                message: $message.to_string(),
            });
        }
    };
}

fn validate_enemy(errors: &mut Vec<ValidationError>, section: &str, profile: &EnemyProfile) {
    check!(errors, profile.max_health > 0, section, "max_health", "must be positive");
    check!(
        errors,
        profile.attack_cooldown >= 0.0,
        section,
        "attack_cooldown",
        "must not be negative"
    );
    if let Some(melee) = &profile.melee {
        check!(
            errors,
            melee.windup <= melee.duration,
            section,
            "melee.windup",
            "must fit inside the attack duration"
        );
    }
    if let Some(ranged) = &profile.ranged {
        check!(
            errors,
            ranged.min_range < ranged.max_range,
            section,
            "ranged.min_range",
            "must be below max_range"
        );
        check!(
            errors,
            ranged.windup <= ranged.duration || ranged.duration == 0.0,
            section,
            "ranged.windup",
            "must fit inside the attack duration"
        );
    }
    if let Some(contact) = &profile.contact {
        check!(
            errors,
            contact.interval > 0.0,
            section,
            "contact.interval",
            "must be positive"
        );
    }
}

/// Validate every section present in the tuning file.
/// Returns a list of validation errors, empty if all values are usable.
pub fn validate_tuning(file: &TuningFile) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(player) = &file.player {
        check!(errors, player.max_health > 0, "player", "max_health", "must be positive");
        check!(
            errors,
            player.combo_threshold > 0,
            "player",
            "combo_threshold",
            "must be at least 1"
        );
        check!(
            errors,
            player.attack_lock <= player.attack_cooldown,
            "player",
            "attack_lock",
            "must not outlast the attack cooldown"
        );
        check!(
            errors,
            player.overload_cooldown >= player.attack_cooldown,
            "player",
            "overload_cooldown",
            "must not be shorter than attack_cooldown"
        );
        check!(
            errors,
            player.step_height > 0.0 && player.step_check > 0.0,
            "player",
            "step_height",
            "step probes need a positive height and distance"
        );
    }

    if let Some(escort) = &file.escort {
        check!(errors, escort.max_health > 0, "escort", "max_health", "must be positive");
        check!(
            errors,
            escort.respawn_delay >= 0.0,
            "escort",
            "respawn_delay",
            "must not be negative"
        );
    }

    if let Some(roster) = &file.enemies {
        validate_enemy(&mut errors, "enemies.blue", &roster.blue);
        validate_enemy(&mut errors, "enemies.red", &roster.red);
        validate_enemy(&mut errors, "enemies.cactus", &roster.cactus);
    }

    if let Some(boss) = &file.teleport_boss {
        check!(
            errors,
            boss.heal_ceiling <= boss.max_health,
            "teleport_boss",
            "heal_ceiling",
            "must not exceed max_health"
        );
        check!(
            errors,
            boss.shots_before_bomb > 0,
            "teleport_boss",
            "shots_before_bomb",
            "must be at least 1"
        );
        check!(
            errors,
            boss.shot_windup <= boss.shot_interval,
            "teleport_boss",
            "shot_windup",
            "must fit inside shot_interval"
        );
    }

    if let Some(boss) = &file.arena_boss {
        check!(
            errors,
            boss.laser_fire_at <= boss.laser_charge,
            "arena_boss",
            "laser_fire_at",
            "must fire before the charge ends"
        );
        check!(
            errors,
            boss.arrive_distance > 0.0,
            "arena_boss",
            "arrive_distance",
            "must be positive"
        );
    }

    errors
}

/// Clip lengths are used as delays, so they must be usable durations.
pub fn validate_clips(clips: &ClipLibrary) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (name, duration) in &clips.clips {
        check!(
            errors,
            duration.is_finite() && *duration >= 0.0,
            format!("clips.{}", name),
            "duration",
            format!("{} is not a usable length", duration)
        );
    }
    errors
}
