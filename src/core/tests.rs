//! Core domain: unit tests for timers, combo windows, and task slots.

use super::{
    Checkpoint, ClipLibrary, ComboCounter, ComboOutcome, Cooldown, GameplayPaused, TaskSlot,
};
use bevy::prelude::Vec2;

// -----------------------------------------------------------------------------
// Cooldown tests
// -----------------------------------------------------------------------------

#[test]
fn test_cooldown_ready_fires_once() {
    let mut cooldown = Cooldown::ready(0.5);
    assert!(cooldown.try_fire());
    assert!(!cooldown.try_fire());
    assert_eq!(cooldown.remaining, 0.5);
}

#[test]
fn test_cooldown_never_goes_negative() {
    let mut cooldown = Cooldown::charging(1.0);
    cooldown.tick(0.4);
    assert!(!cooldown.is_ready());
    cooldown.tick(5.0);
    assert_eq!(cooldown.remaining, 0.0);
    assert!(cooldown.is_ready());
}

#[test]
fn test_cooldown_trigger_for_overrides_duration() {
    let mut cooldown = Cooldown::ready(0.5);
    cooldown.trigger_for(1.5);
    cooldown.tick(1.0);
    assert!(!cooldown.is_ready());
    cooldown.tick(0.5);
    assert!(cooldown.is_ready());
    cooldown.trigger();
    assert_eq!(cooldown.remaining, 0.5);
}

// -----------------------------------------------------------------------------
// ComboCounter tests
// -----------------------------------------------------------------------------

#[test]
fn test_combo_overloads_on_fourth_attack_in_window() {
    let mut combo = ComboCounter::new(4.0, 4);
    let outcomes: Vec<_> = (0..4)
        .map(|_| {
            combo.tick(0.5);
            combo.register()
        })
        .collect();

    assert_eq!(
        outcomes,
        vec![
            ComboOutcome::Standard,
            ComboOutcome::Standard,
            ComboOutcome::Standard,
            ComboOutcome::Overload
        ]
    );
    assert_eq!(combo.count, 0);
}

#[test]
fn test_combo_does_not_accumulate_across_gaps() {
    let mut combo = ComboCounter::new(4.0, 4);
    for _ in 0..10 {
        assert_eq!(combo.register(), ComboOutcome::Standard);
        combo.tick(4.5);
        assert_eq!(combo.count, 0);
    }
}

#[test]
fn test_combo_window_restarts_on_each_attack() {
    let mut combo = ComboCounter::new(1.0, 4);
    combo.register();
    combo.tick(0.9);
    combo.register();
    combo.tick(0.9);
    assert_eq!(combo.count, 2);
    combo.tick(0.2);
    assert_eq!(combo.count, 0);
}

// -----------------------------------------------------------------------------
// TaskSlot tests
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Strike,
    Recover,
}

#[test]
fn test_task_slot_resumes_after_delay() {
    let mut slot = TaskSlot::default();
    slot.schedule(0.25, Step::Strike);

    assert_eq!(slot.poll(0.1), None);
    assert_eq!(slot.poll(0.1), None);
    assert_eq!(slot.poll(0.1), Some(Step::Strike));
    assert!(!slot.is_pending());
    assert_eq!(slot.poll(1.0), None);
}

#[test]
fn test_task_slot_cancel_prevents_resume() {
    let mut slot = TaskSlot::default();
    slot.schedule(0.25, Step::Strike);
    slot.poll(0.2);
    slot.cancel();
    assert_eq!(slot.poll(1.0), None);
}

#[test]
fn test_task_slot_reschedule_replaces_step() {
    let mut slot = TaskSlot::default();
    slot.schedule(0.25, Step::Strike);
    slot.schedule(0.5, Step::Recover);
    assert_eq!(slot.pending_step(), Some(Step::Recover));
    assert_eq!(slot.poll(0.3), None);
    assert_eq!(slot.poll(0.3), Some(Step::Recover));
}

// -----------------------------------------------------------------------------
// Resource tests
// -----------------------------------------------------------------------------

#[test]
fn test_pause_sources_toggle() {
    let mut paused = GameplayPaused::default();
    paused.toggle("menu");
    assert!(paused.is_paused());
    paused.toggle("debug");
    paused.toggle("menu");
    assert!(paused.is_paused());
    paused.toggle("debug");
    assert!(!paused.is_paused());
}

#[test]
fn test_checkpoint_and_clip_lookup() {
    let mut checkpoint = Checkpoint::new(Vec2::ZERO);
    checkpoint.save(Vec2::new(3.0, 1.0));
    assert_eq!(checkpoint.last_position(), Vec2::new(3.0, 1.0));

    let mut clips = ClipLibrary::default();
    clips.clips.insert("player_death".to_string(), 1.2);
    assert_eq!(clips.duration_or("player_death", 0.5), 1.2);
    assert_eq!(clips.duration_or("missing", 0.5), 0.5);
}
