#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation and precision loss converting between ms and f32
    // seconds; intervals are bounded well inside both representations
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

//! Timing and difficulty control. Running is the only state in which the
//! drop timer and the match clock advance; Paused and GameOver freeze both.

use bevy_ecs::prelude::*;
use log::debug;
use std::time::Duration;

use crate::components::MatchState;
use crate::engine;
use crate::game::{DROP_BASE_MS, DROP_FLOOR_MS, DROP_HARD_FLOOR_MS, DROP_STEP_MS, SPEED_SCHEDULE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
}

#[must_use]
pub fn phase(state: &MatchState) -> Phase {
    if state.game_over {
        Phase::GameOver
    } else if state.paused {
        Phase::Paused
    } else {
        Phase::Running
    }
}

/// Cadence of the autonomous descent: the base interval tightens with the
/// level, then the room speed multiplier divides it, each leg clamped to
/// its floor.
#[must_use]
pub fn drop_interval(level: u32, speed_multiplier: f32) -> Duration {
    let base = DROP_BASE_MS
        .saturating_sub(DROP_STEP_MS.saturating_mul(u64::from(level.saturating_sub(1))))
        .max(DROP_FLOOR_MS);
    let scaled = ((base as f32) / speed_multiplier).floor() as u64;
    Duration::from_millis(scaled.max(DROP_HARD_FLOOR_MS))
}

/// One second of match time. Escalations are one-shot, keyed on the exact
/// elapsed value, which is why callers must step the clock second by second.
pub fn advance_clock(state: &mut MatchState) {
    state.elapsed_seconds += 1;
    for &(at, multiplier) in SPEED_SCHEDULE {
        if state.elapsed_seconds == at {
            state.speed_multiplier = multiplier;
            debug!("Speed multiplier stepped to {multiplier} at {at}s");
        }
    }
}

/// Drives the drop timer and the 1-second match clock against wall-clock
/// deltas from the event loop. The drop timer is torn down and restarted
/// whenever the level, the multiplier, or the active piece changes, so a
/// level-up takes effect on the very next tick.
#[derive(Debug)]
pub struct TimingController {
    drop_timer: f32,
    clock_timer: f32,
    interval: Duration,
    tuned_level: u32,
    tuned_multiplier: f32,
    tuned_serial: u64,
}

impl TimingController {
    #[must_use]
    pub fn new(state: &MatchState) -> Self {
        Self {
            drop_timer: 0.0,
            clock_timer: 0.0,
            interval: drop_interval(state.level, state.speed_multiplier),
            tuned_level: state.level,
            tuned_multiplier: state.speed_multiplier,
            tuned_serial: state.piece_serial,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn update(&mut self, world: &mut World, delta_seconds: f32) {
        if phase(world.resource::<MatchState>()) != Phase::Running {
            // Frozen states suspend both timers; partial progress is
            // discarded so resuming starts a full interval.
            self.drop_timer = 0.0;
            self.clock_timer = 0.0;
            return;
        }

        self.retune(world.resource::<MatchState>());

        // Match clock: drain whole seconds one at a time so an escalation
        // threshold can never be skipped.
        self.clock_timer += delta_seconds;
        {
            let mut state = world.resource_mut::<MatchState>();
            while self.clock_timer >= 1.0 {
                self.clock_timer -= 1.0;
                advance_clock(&mut state);
            }
        }

        // An escalation this update re-tunes before the drop check.
        self.retune(world.resource::<MatchState>());

        self.drop_timer += delta_seconds;
        if self.drop_timer >= self.interval.as_secs_f32() {
            self.drop_timer = 0.0;
            engine::drop_tick(world);
        }
    }

    fn retune(&mut self, state: &MatchState) {
        let changed = state.level != self.tuned_level
            || (state.speed_multiplier - self.tuned_multiplier).abs() > f32::EPSILON
            || state.piece_serial != self.tuned_serial;
        if changed {
            self.interval = drop_interval(state.level, state.speed_multiplier);
            self.drop_timer = 0.0;
            self.tuned_level = state.level;
            self.tuned_multiplier = state.speed_multiplier;
            self.tuned_serial = state.piece_serial;
            debug!(
                "Drop timer restarted: level {}, x{}, {:?}",
                state.level, state.speed_multiplier, self.interval
            );
        }
    }
}
