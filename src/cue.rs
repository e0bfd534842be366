//! Cue decisions for the countdown audio.
//!
//! This module is the pure half of the cue pipeline: it looks at the
//! scheduler state after each tick and decides whether a cue should sound,
//! without touching any audio API. Emission lives in the binary next to the
//! WebAudio glue.

use crate::{Phase, TimerState, WorkoutConfig};

/// Countdown beeps begin this many seconds before a phase ends.
pub const COUNTDOWN_WINDOW: u32 = 5;
/// The final round's rest phase gets a longer lead-in before the last push.
pub const FINAL_REST_WINDOW: u32 = 10;

pub const COUNTDOWN_FREQUENCY_HZ: f32 = 600.0;
pub const COUNTDOWN_BEEP_MS: u32 = 150;
pub const COMPLETION_FREQUENCY_HZ: f32 = 1000.0;
pub const COMPLETION_BEEP_MS: u32 = 150;
pub const COMPLETION_BEEP_GAP_MS: u32 = 200;
pub const COMPLETION_BEEP_COUNT: u32 = 3;

/// What the audio engine should play this instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// One short beep in the final stretch of a phase.
    Countdown,
    /// The fixed three-beep sequence at workout completion.
    Completion,
}

/// Tracks which seconds have already been cued so a driver that fires more
/// than once per logical second never produces duplicate beeps.
///
/// Suppression is scoped to the current (round, phase): entering a new
/// phase clears it, so a rest phase whose countdown starts at the same
/// second value the work phase ended on still cues. The completion cue is
/// latched once per run and re-armed only by [`CueTracker::reset`].
#[derive(Debug, Default)]
pub struct CueTracker {
    current_span: Option<(u32, Phase)>,
    last_cued_second: Option<u32>,
    completion_cued: bool,
}

impl CueTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all cue history; call on every scheduler reset.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Evaluate the state produced by the latest tick. Returns at most one
    /// cue; the scheduler is never mutated from here.
    pub fn evaluate(&mut self, state: &TimerState, config: &WorkoutConfig) -> Option<Cue> {
        if state.is_complete {
            if !self.completion_cued {
                self.completion_cued = true;
                return Some(Cue::Completion);
            }
            return None;
        }

        if !state.is_running {
            return None;
        }

        let span = (state.current_round, state.phase);
        if self.current_span != Some(span) {
            self.current_span = Some(span);
            self.last_cued_second = None;
        }

        let window = if state.is_final_rest(config) {
            FINAL_REST_WINDOW
        } else {
            COUNTDOWN_WINDOW
        };

        if (1..=window).contains(&state.time_left)
            && self.last_cued_second != Some(state.time_left)
        {
            self.last_cued_second = Some(state.time_left);
            return Some(Cue::Countdown);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(work: u32, rest: u32, rounds: u32) -> WorkoutConfig {
        WorkoutConfig {
            work_seconds: work,
            rest_seconds: rest,
            total_rounds: rounds,
        }
    }

    /// Drive a full run, collecting the `time_left` values that cued.
    fn cued_seconds(cfg: &WorkoutConfig) -> Vec<(Phase, u32, u32)> {
        let mut state = TimerState::new(cfg);
        let mut tracker = CueTracker::new();
        let mut cued = Vec::new();
        state.start();
        while !state.is_complete {
            state.tick(cfg);
            if tracker.evaluate(&state, cfg) == Some(Cue::Countdown) {
                cued.push((state.phase, state.current_round, state.time_left));
            }
        }
        cued
    }

    #[test]
    fn work_phase_cues_last_five_seconds_only() {
        let cfg = config(20, 40, 1);
        let work_cues: Vec<u32> = cued_seconds(&cfg)
            .into_iter()
            .filter(|(phase, _, _)| *phase == Phase::Work)
            .map(|(_, _, t)| t)
            .collect();
        assert_eq!(work_cues, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn duplicate_tick_for_same_second_cues_once() {
        let cfg = config(20, 40, 1);
        let mut state = TimerState::new(&cfg);
        let mut tracker = CueTracker::new();
        state.start();
        for _ in 0..15 {
            state.tick(&cfg);
        }
        assert_eq!(state.time_left, 5);
        assert_eq!(tracker.evaluate(&state, &cfg), Some(Cue::Countdown));
        // Driver misfires and evaluates the same second again.
        assert_eq!(tracker.evaluate(&state, &cfg), None);
    }

    #[test]
    fn final_rest_window_is_ten_seconds() {
        let cfg = config(20, 40, 2);
        let cued = cued_seconds(&cfg);

        let first_rest: Vec<u32> = cued
            .iter()
            .filter(|(phase, round, _)| *phase == Phase::Rest && *round == 1)
            .map(|(_, _, t)| *t)
            .collect();
        let final_rest: Vec<u32> = cued
            .iter()
            .filter(|(phase, round, _)| *phase == Phase::Rest && *round == 2)
            .map(|(_, _, t)| *t)
            .collect();

        assert_eq!(first_rest, vec![5, 4, 3, 2, 1]);
        assert_eq!(final_rest, vec![10, 9, 8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn phase_change_resets_suppression() {
        // Rest lasts a single second: its only countdown value (1) matches
        // the last cued work second and must still fire.
        let cfg = config(5, 1, 2);
        let mut state = TimerState::new(&cfg);
        let mut tracker = CueTracker::new();
        state.start();

        let mut rest_cues = 0;
        for _ in 0..cfg.work_seconds + cfg.rest_seconds {
            state.tick(&cfg);
            let cue = tracker.evaluate(&state, &cfg);
            if state.phase == Phase::Rest && cue == Some(Cue::Countdown) {
                rest_cues += 1;
            }
        }
        assert_eq!(rest_cues, 1);
    }

    #[test]
    fn no_cues_while_paused() {
        let cfg = config(20, 40, 1);
        let mut state = TimerState::new(&cfg);
        let mut tracker = CueTracker::new();
        state.start();
        for _ in 0..15 {
            state.tick(&cfg);
        }
        state.pause();
        assert_eq!(tracker.evaluate(&state, &cfg), None);
    }

    #[test]
    fn completion_cue_fires_exactly_once() {
        let cfg = config(2, 2, 1);
        let mut state = TimerState::new(&cfg);
        let mut tracker = CueTracker::new();
        state.start();
        for _ in 0..4 {
            state.tick(&cfg);
        }
        assert!(state.is_complete);
        assert_eq!(tracker.evaluate(&state, &cfg), Some(Cue::Completion));
        assert_eq!(tracker.evaluate(&state, &cfg), None);

        // A new run after reset re-arms the sequence.
        tracker.reset();
        state.reset(&cfg);
        state.start();
        for _ in 0..4 {
            state.tick(&cfg);
        }
        assert_eq!(tracker.evaluate(&state, &cfg), Some(Cue::Completion));
    }

    #[test]
    fn total_cue_count_for_a_run() {
        // Two rounds of 20/40: 5 work cues per round, 5 rest cues in round
        // one, 10 in the final rest.
        let cfg = config(20, 40, 2);
        assert_eq!(cued_seconds(&cfg).len(), 5 + 5 + 5 + 10);
    }
}
