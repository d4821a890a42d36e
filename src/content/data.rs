//! Data shapes read from `assets/`.

use serde::Deserialize;

use crate::combat::{ArenaBossTuning, CombatTuning, EnemyRoster, TeleportBossTuning};
use crate::npc::EscortTuning;
use crate::player::PlayerTuning;

/// `assets/data/tuning.ron`. Every section is optional and a missing section
/// keeps the built-in defaults for that resource.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TuningFile {
    pub seed: Option<u64>,
    pub player: Option<PlayerTuning>,
    pub escort: Option<EscortTuning>,
    pub enemies: Option<EnemyRoster>,
    pub teleport_boss: Option<TeleportBossTuning>,
    pub arena_boss: Option<ArenaBossTuning>,
    pub combat: Option<CombatTuning>,
}

impl TuningFile {
    /// Names of the sections present, for the load summary.
    pub fn sections(&self) -> Vec<&'static str> {
        let mut present = Vec::new();
        if self.seed.is_some() {
            present.push("seed");
        }
        if self.player.is_some() {
            present.push("player");
        }
        if self.escort.is_some() {
            present.push("escort");
        }
        if self.enemies.is_some() {
            present.push("enemies");
        }
        if self.teleport_boss.is_some() {
            present.push("teleport_boss");
        }
        if self.arena_boss.is_some() {
            present.push("arena_boss");
        }
        if self.combat.is_some() {
            present.push("combat");
        }
        present
    }
}
