//! Core domain: top-level application state and the per-frame system sets.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Tuning and clip data are being read.
    #[default]
    Boot,
    Playing,
}

/// Frame phases. Sensing happens before any decision that depends on it, and
/// hits are resolved only after every actor has acted for the frame.
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone, Copy)]
pub enum SimSet {
    Input,
    Sense,
    Decide,
    Act,
    Resolve,
    Apply,
    Present,
}
