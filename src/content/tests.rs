//! Content domain: parsing, validation and boot loading tests.

use std::path::PathBuf;

use bevy::prelude::*;

use super::{
    ContentPaths, TuningFile, load_content, parse_clips, parse_tuning, validate_clips,
    validate_tuning,
};
use crate::combat::{
    ArenaBossTuning, CombatTuning, EnemyRoster, RangedPattern, TeleportBossTuning,
};
use crate::npc::EscortTuning;
use crate::core::{ClipLibrary, ProjectileKind, RunConfig};
use crate::player::PlayerTuning;

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[test]
fn test_partial_section_keeps_other_defaults() {
    let file = parse_tuning(
        "tuning.ron",
        "(seed: 7, player: (run_speed: 9.5, max_health: 6))",
    )
    .unwrap();

    assert_eq!(file.seed, Some(7));
    let player = file.player.unwrap();
    assert_eq!(player.run_speed, 9.5);
    assert_eq!(player.max_health, 6);
    assert_eq!(player.jump_impulse, PlayerTuning::default().jump_impulse);
    assert!(file.teleport_boss.is_none());
    assert!(file.combat.is_none());
}

#[test]
fn test_enemy_profiles_parse_nested_enums() {
    let file = parse_tuning(
        "tuning.ron",
        r#"(enemies: (cactus: (
            name: "Cactus Slime",
            max_health: 4,
            ranged: (
                min_range: 5.0,
                max_range: 25.0,
                windup: 0.0,
                duration: 0.0,
                pattern: Volley(Spike),
                hold_position: true,
            ),
        )))"#,
    )
    .unwrap();

    let cactus = file.enemies.unwrap().cactus;
    assert_eq!(cactus.max_health, 4);
    assert_eq!(
        cactus.ranged.unwrap().pattern,
        RangedPattern::Volley(ProjectileKind::Spike)
    );
}

#[test]
fn test_malformed_tuning_names_the_file() {
    let err = parse_tuning("assets/data/tuning.ron", "(player: (run_speed: fast))").unwrap_err();
    assert_eq!(err.file, "assets/data/tuning.ron");
    assert!(err.to_string().starts_with("Failed to load assets/data/tuning.ron"));
}

#[test]
fn test_clip_manifest_parses() {
    let clips = parse_clips(
        "clips.json",
        r#"{ "clips": { "player_death": 1.25, "teleport_out": 0.5 } }"#,
    )
    .unwrap();
    assert_eq!(clips.duration("player_death"), Some(1.25));
    assert_eq!(clips.duration_or("missing", 0.75), 0.75);
}

#[test]
fn test_bad_json_is_an_error() {
    assert!(parse_clips("clips.json", "{ clips: ").is_err());
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_defaults_validate() {
    let file = TuningFile {
        seed: None,
        player: Some(PlayerTuning::default()),
        escort: Some(EscortTuning::default()),
        enemies: Some(EnemyRoster::default()),
        teleport_boss: Some(TeleportBossTuning::default()),
        arena_boss: Some(ArenaBossTuning::default()),
        combat: Some(CombatTuning::default()),
    };
    let errors = validate_tuning(&file);
    assert!(errors.is_empty(), "{:?}", errors);
}

#[test]
fn test_heal_ceiling_above_max_is_rejected() {
    let file = parse_tuning(
        "tuning.ron",
        "(teleport_boss: (max_health: 20, heal_ceiling: 25))",
    )
    .unwrap();
    let errors = validate_tuning(&file);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].section, "teleport_boss");
    assert_eq!(errors[0].field, "heal_ceiling");
}

#[test]
fn test_zero_combo_threshold_is_rejected() {
    let file = parse_tuning("tuning.ron", "(player: (combo_threshold: 0))").unwrap();
    let errors = validate_tuning(&file);
    assert!(errors.iter().any(|e| e.field == "combo_threshold"));
}

#[test]
fn test_negative_clip_is_rejected() {
    let mut clips = ClipLibrary::default();
    clips.clips.insert("boss_death".to_string(), -1.0);
    let errors = validate_clips(&clips);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].section, "clips.boss_death");
}

// ---------------------------------------------------------------------------
// Boot loading
// ---------------------------------------------------------------------------

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("slimefall_{}_{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

fn content_app(paths: ContentPaths) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(paths)
        .insert_resource(RunConfig { seed: 1 })
        .init_resource::<PlayerTuning>()
        .init_resource::<TeleportBossTuning>()
        .init_resource::<ClipLibrary>()
        .add_systems(Startup, load_content);
    app
}

#[test]
fn test_missing_files_keep_defaults() {
    let mut app = content_app(ContentPaths {
        tuning: PathBuf::from("does/not/exist.ron"),
        clips: PathBuf::from("does/not/exist.json"),
    });
    app.update();

    assert_eq!(app.world().resource::<RunConfig>().seed, 1);
    assert_eq!(app.world().resource::<PlayerTuning>().run_speed, 8.0);
    assert!(app.world().resource::<ClipLibrary>().clips.is_empty());
}

#[test]
fn test_files_override_resources() {
    let tuning = scratch_file(
        "override.ron",
        "(seed: 99, player: (run_speed: 10.0), teleport_boss: (name: \"Crimson\"))",
    );
    let clips = scratch_file("override.json", r#"{ "clips": { "player_death": 2.0 } }"#);
    let mut app = content_app(ContentPaths {
        tuning: tuning.clone(),
        clips: clips.clone(),
    });
    app.update();

    assert_eq!(app.world().resource::<RunConfig>().seed, 99);
    assert_eq!(app.world().resource::<PlayerTuning>().run_speed, 10.0);
    assert_eq!(app.world().resource::<TeleportBossTuning>().name, "Crimson");
    assert_eq!(
        app.world().resource::<ClipLibrary>().duration("player_death"),
        Some(2.0)
    );

    let _ = std::fs::remove_file(tuning);
    let _ = std::fs::remove_file(clips);
}

#[test]
fn test_invalid_tuning_is_not_applied() {
    let tuning = scratch_file(
        "invalid.ron",
        "(seed: 5, player: (run_speed: 3.0, combo_threshold: 0))",
    );
    let mut app = content_app(ContentPaths {
        tuning: tuning.clone(),
        clips: PathBuf::from("does/not/exist.json"),
    });
    app.update();

    assert_eq!(app.world().resource::<RunConfig>().seed, 1);
    assert_eq!(app.world().resource::<PlayerTuning>().run_speed, 8.0);

    let _ = std::fs::remove_file(tuning);
}
