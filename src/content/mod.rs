//! Content domain: tuning and animation clip data read at boot.
//!
//! Nothing here is fatal. A missing or malformed file is logged and the
//! built-in defaults stay in place.

mod data;
mod loader;
mod validation;

#[cfg(test)]
mod tests;

pub use data::TuningFile;
pub use loader::{ContentLoadError, load_clips, load_tuning, parse_clips, parse_tuning};
pub use validation::{ValidationError, validate_clips, validate_tuning};

use std::path::PathBuf;

use bevy::prelude::*;

use crate::core::RunConfig;

/// Where the content files live.
#[derive(Resource, Debug, Clone)]
pub struct ContentPaths {
    pub tuning: PathBuf,
    pub clips: PathBuf,
}

impl Default for ContentPaths {
    fn default() -> Self {
        Self {
            tuning: PathBuf::from("assets/data/tuning.ron"),
            clips: PathBuf::from("assets/anim/clips.json"),
        }
    }
}

/// Overwrite the default tuning resources with every section present.
fn apply_tuning(commands: &mut Commands, config: &mut RunConfig, file: TuningFile) {
    if let Some(seed) = file.seed {
        config.seed = seed;
    }
    if let Some(player) = file.player {
        commands.insert_resource(player);
    }
    if let Some(escort) = file.escort {
        commands.insert_resource(escort);
    }
    if let Some(enemies) = file.enemies {
        commands.insert_resource(enemies);
    }
    if let Some(boss) = file.teleport_boss {
        commands.insert_resource(boss);
    }
    if let Some(boss) = file.arena_boss {
        commands.insert_resource(boss);
    }
    if let Some(combat) = file.combat {
        commands.insert_resource(combat);
    }
}

pub(crate) fn load_content(
    mut commands: Commands,
    paths: Res<ContentPaths>,
    mut config: ResMut<RunConfig>,
) {
    match load_tuning(&paths.tuning) {
        Ok(file) => {
            let errors = validate_tuning(&file);
            if errors.is_empty() {
                info!("Tuning loaded: {:?}", file.sections());
                apply_tuning(&mut commands, &mut config, file);
            } else {
                for error in &errors {
                    warn!("Invalid tuning: {}", error);
                }
                warn!("Keeping default tuning");
            }
        }
        Err(e) => warn!("{}; using default tuning", e),
    }

    match load_clips(&paths.clips) {
        Ok(clips) => {
            let errors = validate_clips(&clips);
            if errors.is_empty() {
                info!("Loaded {} animation clip lengths", clips.clips.len());
                commands.insert_resource(clips);
            } else {
                for error in &errors {
                    warn!("Invalid clip: {}", error);
                }
            }
        }
        Err(e) => warn!("{}; clip lengths fall back per sequence", e),
    }
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContentPaths>()
            .add_systems(Startup, load_content);
    }
}
