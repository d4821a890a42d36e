//! Core domain: countdown timers, combo windows, and suspended task slots.
//!
//! Everything here is advanced explicitly with the frame delta; nothing reads
//! the clock on its own.

use serde::{Deserialize, Serialize};

/// A countdown that gates an action until it reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    pub remaining: f32,
    pub duration: f32,
}

impl Cooldown {
    /// A cooldown that can fire immediately.
    pub fn ready(duration: f32) -> Self {
        Self {
            remaining: 0.0,
            duration,
        }
    }

    /// A cooldown that must count down a full duration before firing.
    pub fn charging(duration: f32) -> Self {
        Self {
            remaining: duration,
            duration,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn trigger(&mut self) {
        self.remaining = self.duration;
    }

    /// Start the countdown with a one-off duration.
    pub fn trigger_for(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    /// Fire if ready, restarting the countdown.
    pub fn try_fire(&mut self) -> bool {
        if self.is_ready() {
            self.trigger();
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.remaining = 0.0;
    }
}

/// Outcome of registering an attack against a [`ComboCounter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboOutcome {
    Standard,
    Overload,
}

/// Counts consecutive attacks inside a rolling window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComboCounter {
    pub count: u32,
    pub window_remaining: f32,
    pub window: f32,
    pub threshold: u32,
}

impl ComboCounter {
    pub fn new(window: f32, threshold: u32) -> Self {
        Self {
            count: 0,
            window_remaining: 0.0,
            window,
            threshold: threshold.max(1),
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if self.count == 0 {
            return;
        }
        self.window_remaining -= dt;
        if self.window_remaining <= 0.0 {
            self.window_remaining = 0.0;
            self.count = 0;
        }
    }

    /// Record one attack. Reaching the threshold empties the counter.
    pub fn register(&mut self) -> ComboOutcome {
        self.count += 1;
        self.window_remaining = self.window;
        if self.count >= self.threshold {
            self.count = 0;
            self.window_remaining = 0.0;
            ComboOutcome::Overload
        } else {
            ComboOutcome::Standard
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.window_remaining = 0.0;
    }
}

/// A suspended step that resumes once its delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Task<S> {
    pub step: S,
    pub remaining: f32,
}

impl<S: Copy> Task<S> {
    pub fn after(delay: f32, step: S) -> Self {
        Self {
            step,
            remaining: delay.max(0.0),
        }
    }

    /// Advance the delay, yielding the step once it is due.
    pub fn tick(&mut self, dt: f32) -> Option<S> {
        self.remaining -= dt;
        (self.remaining <= 0.0).then_some(self.step)
    }
}

/// Holds at most one pending [`Task`]. Each independent sequence an actor runs
/// gets its own slot so one can be cancelled without touching the others.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskSlot<S> {
    task: Option<Task<S>>,
}

impl<S> Default for TaskSlot<S> {
    fn default() -> Self {
        Self { task: None }
    }
}

impl<S: Copy> TaskSlot<S> {
    /// Replace whatever is pending with a new step.
    pub fn schedule(&mut self, delay: f32, step: S) {
        self.task = Some(Task::after(delay, step));
    }

    pub fn cancel(&mut self) {
        self.task = None;
    }

    pub fn is_pending(&self) -> bool {
        self.task.is_some()
    }

    pub fn pending_step(&self) -> Option<S> {
        self.task.map(|t| t.step)
    }

    /// Advance the pending task. A due step is removed from the slot and
    /// returned, so the caller may schedule the next one.
    pub fn poll(&mut self, dt: f32) -> Option<S> {
        let due = self.task.as_mut()?.tick(dt);
        if due.is_some() {
            self.task = None;
        }
        due
    }
}
