use serde::{Deserialize, Serialize};

pub mod cue;

/// Default workout parameters used before any preset or manual edit.
pub mod defaults {
    pub const WORK_SECONDS: u32 = 20;
    pub const REST_SECONDS: u32 = 40;
    pub const TOTAL_ROUNDS: u32 = 20;
}

/// The two timed states a round passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Work,
    Rest,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "WORK",
            Phase::Rest => "REST",
        }
    }
}

/// Immutable parameters for one workout run.
///
/// Values are validated and clamped by the settings layer before they reach
/// the scheduler; the scheduler itself accepts any values and produces
/// defined (if degenerate) behavior for out-of-range input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutConfig {
    pub work_seconds: u32,
    pub rest_seconds: u32,
    pub total_rounds: u32,
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        Self {
            work_seconds: defaults::WORK_SECONDS,
            rest_seconds: defaults::REST_SECONDS,
            total_rounds: defaults::TOTAL_ROUNDS,
        }
    }
}

impl WorkoutConfig {
    pub fn phase_duration(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work_seconds,
            Phase::Rest => self.rest_seconds,
        }
    }

    /// Total scheduled length of the workout in seconds.
    pub fn total_seconds(&self) -> u32 {
        self.total_rounds * (self.work_seconds + self.rest_seconds)
    }
}

/// Runtime state of the interval scheduler.
///
/// Owned exclusively by the scheduler: every mutation goes through
/// [`TimerState::tick`], [`TimerState::reset`], [`TimerState::start`] or
/// [`TimerState::pause`]. Everything else reads snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub phase: Phase,
    pub time_left: u32,
    pub current_round: u32,
    pub is_running: bool,
    pub is_complete: bool,
}

impl TimerState {
    /// Fresh state for the given config: first round, full work phase, idle.
    pub fn new(config: &WorkoutConfig) -> Self {
        Self {
            phase: Phase::Work,
            time_left: config.work_seconds,
            current_round: 1,
            is_running: false,
            is_complete: false,
        }
    }

    /// Begin or resume ticking. No-op once the workout is complete; a
    /// completed run must be explicitly reset before it can start again.
    pub fn start(&mut self) {
        if !self.is_complete {
            self.is_running = true;
        }
    }

    pub fn pause(&mut self) {
        self.is_running = false;
    }

    /// Discard all progress and return to the initial state for `config`.
    /// Invoked on explicit reset and whenever the configuration changes.
    pub fn reset(&mut self, config: &WorkoutConfig) {
        *self = Self::new(config);
    }

    /// Advance the workout by one elapsed second.
    ///
    /// No-op while paused or after completion. When the current second is
    /// the last of its phase the state rolls over: Work hands off to Rest,
    /// Rest either advances the round or, at the end of the final round,
    /// marks the workout complete. Every round runs a full work+rest cycle;
    /// completion is only ever detected at the end of the final rest.
    pub fn tick(&mut self, config: &WorkoutConfig) {
        if !self.is_running || self.is_complete {
            return;
        }

        if self.time_left <= 1 {
            match self.phase {
                Phase::Work => {
                    self.phase = Phase::Rest;
                    self.time_left = config.rest_seconds;
                }
                Phase::Rest => {
                    if self.current_round >= config.total_rounds {
                        self.is_complete = true;
                        self.is_running = false;
                        self.time_left = 0;
                    } else {
                        self.current_round += 1;
                        self.phase = Phase::Work;
                        self.time_left = config.work_seconds;
                    }
                }
            }
        } else {
            self.time_left -= 1;
        }
    }

    /// Fraction of the current phase already elapsed, in percent.
    pub fn progress_percentage(&self, config: &WorkoutConfig) -> f64 {
        let duration = config.phase_duration(self.phase);
        if duration == 0 {
            return 100.0;
        }
        ((duration - self.time_left.min(duration)) as f64 / duration as f64) * 100.0
    }

    /// True during the rest phase of the last round, which gets a longer
    /// countdown-cue lead-in.
    pub fn is_final_rest(&self, config: &WorkoutConfig) -> bool {
        self.phase == Phase::Rest && self.current_round == config.total_rounds
    }
}

/// A single exercise within a preset. The optional duration override is
/// persisted but does not alter the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl Exercise {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration: None,
        }
    }
}

/// A named workout configuration with an ordered exercise list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPreset {
    pub id: String,
    pub name: String,
    pub exercises: Vec<Exercise>,
    pub work_seconds: u32,
    pub rest_seconds: u32,
    pub total_rounds: u32,
}

impl WorkoutPreset {
    pub fn config(&self) -> WorkoutConfig {
        WorkoutConfig {
            work_seconds: self.work_seconds,
            rest_seconds: self.rest_seconds,
            total_rounds: self.total_rounds,
        }
    }

    /// Exercise performed during `round` (1-based), cycling through the
    /// list when there are more rounds than exercises.
    pub fn exercise_for_round(&self, round: u32) -> Option<&Exercise> {
        if self.exercises.is_empty() {
            return None;
        }
        let idx = (round.saturating_sub(1) as usize) % self.exercises.len();
        self.exercises.get(idx)
    }

    /// Exercise coming up after `round`, shown during the rest phase.
    pub fn exercise_after_round(&self, round: u32) -> Option<&Exercise> {
        if self.exercises.is_empty() {
            return None;
        }
        let idx = (round as usize) % self.exercises.len();
        self.exercises.get(idx)
    }
}

/// Persisted preset collection plus the current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetStore {
    pub presets: Vec<WorkoutPreset>,
    pub selected_id: Option<String>,
}

impl PresetStore {
    pub fn add(&mut self, preset: WorkoutPreset) {
        self.presets.push(preset);
    }

    /// Remove a preset; the selection is cleared if it pointed at it.
    pub fn remove(&mut self, id: &str) {
        self.presets.retain(|p| p.id != id);
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
    }

    pub fn select(&mut self, id: Option<String>) {
        self.selected_id = id;
    }

    pub fn selected(&self) -> Option<&WorkoutPreset> {
        let id = self.selected_id.as_deref()?;
        self.presets.iter().find(|p| p.id == id)
    }
}

/// Format a second count as `MM:SS` for the countdown display.
pub fn format_seconds(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
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

    fn run_ticks(state: &mut TimerState, config: &WorkoutConfig, n: u32) {
        for _ in 0..n {
            state.tick(config);
        }
    }

    #[test]
    fn reset_produces_initial_state() {
        let cfg = config(20, 40, 3);
        let state = TimerState::new(&cfg);
        assert_eq!(state.phase, Phase::Work);
        assert_eq!(state.time_left, 20);
        assert_eq!(state.current_round, 1);
        assert!(!state.is_running);
        assert!(!state.is_complete);
    }

    #[test]
    fn work_phase_hands_off_to_rest() {
        let cfg = config(20, 40, 3);
        let mut state = TimerState::new(&cfg);
        state.start();

        run_ticks(&mut state, &cfg, 20);
        assert_eq!(state.phase, Phase::Rest);
        assert_eq!(state.time_left, 40);
        assert_eq!(state.current_round, 1);

        run_ticks(&mut state, &cfg, 40);
        assert_eq!(state.phase, Phase::Work);
        assert_eq!(state.time_left, 20);
        assert_eq!(state.current_round, 2);
    }

    #[test]
    fn completes_in_exactly_rounds_times_cycle_ticks() {
        let cfg = config(20, 40, 3);
        let mut state = TimerState::new(&cfg);
        state.start();

        let total = cfg.total_rounds * (cfg.work_seconds + cfg.rest_seconds);
        run_ticks(&mut state, &cfg, total - 1);
        assert!(!state.is_complete);

        state.tick(&cfg);
        assert!(state.is_complete);
        assert!(!state.is_running);
        assert_eq!(state.time_left, 0);
    }

    #[test]
    fn final_rest_last_second_terminates() {
        let cfg = config(20, 40, 3);
        let mut state = TimerState {
            phase: Phase::Rest,
            time_left: 1,
            current_round: 3,
            is_running: true,
            is_complete: false,
        };
        state.tick(&cfg);
        assert!(state.is_complete);
        assert!(!state.is_running);
        assert_eq!(state.time_left, 0);
    }

    #[test]
    fn terminal_state_ignores_further_ticks() {
        let cfg = config(2, 2, 1);
        let mut state = TimerState::new(&cfg);
        state.start();
        run_ticks(&mut state, &cfg, 4);
        assert!(state.is_complete);

        let frozen = state.clone();
        state.start();
        run_ticks(&mut state, &cfg, 10);
        assert_eq!(state, frozen);
    }

    #[test]
    fn pause_freezes_all_fields() {
        let cfg = config(20, 40, 3);
        let mut state = TimerState::new(&cfg);
        state.start();
        run_ticks(&mut state, &cfg, 5);
        state.pause();

        let frozen = state.clone();
        state.tick(&cfg);
        assert_eq!(state, frozen);

        state.start();
        state.tick(&cfg);
        assert_eq!(state.time_left, frozen.time_left - 1);
    }

    #[test]
    fn bounds_hold_over_a_full_run() {
        let cfg = config(7, 3, 4);
        let mut state = TimerState::new(&cfg);
        state.start();
        let mut last_round = state.current_round;
        for _ in 0..cfg.total_seconds() {
            state.tick(&cfg);
            assert!(state.time_left <= cfg.work_seconds.max(cfg.rest_seconds));
            assert!(state.current_round >= last_round);
            assert!(state.current_round <= cfg.total_rounds);
            last_round = state.current_round;
        }
        assert!(state.is_complete);
    }

    #[test]
    fn degenerate_zero_work_transitions_immediately() {
        let cfg = config(0, 5, 2);
        let mut state = TimerState::new(&cfg);
        assert_eq!(state.time_left, 0);
        state.start();
        state.tick(&cfg);
        assert_eq!(state.phase, Phase::Rest);
        assert_eq!(state.time_left, 5);
    }

    #[test]
    fn reset_mid_run_discards_progress() {
        let cfg = config(20, 40, 3);
        let mut state = TimerState::new(&cfg);
        state.start();
        run_ticks(&mut state, &cfg, 25);

        let edited = config(30, 30, 2);
        state.reset(&edited);
        assert_eq!(state, TimerState::new(&edited));
    }

    #[test]
    fn progress_percentage_tracks_phase() {
        let cfg = config(20, 40, 3);
        let mut state = TimerState::new(&cfg);
        assert_eq!(state.progress_percentage(&cfg), 0.0);
        state.start();
        run_ticks(&mut state, &cfg, 5);
        assert_eq!(state.progress_percentage(&cfg), 25.0);
        run_ticks(&mut state, &cfg, 15);
        // Rest just started: the bar restarts for the new phase.
        assert_eq!(state.progress_percentage(&cfg), 0.0);
    }

    #[test]
    fn final_rest_query() {
        let cfg = config(20, 40, 2);
        let mut state = TimerState::new(&cfg);
        state.start();
        assert!(!state.is_final_rest(&cfg));
        run_ticks(&mut state, &cfg, 20);
        assert!(!state.is_final_rest(&cfg)); // rest, but not last round
        run_ticks(&mut state, &cfg, 40 + 20);
        assert!(state.is_final_rest(&cfg));
    }

    #[test]
    fn exercise_cycling_wraps_over_rounds() {
        let preset = WorkoutPreset {
            id: "p".into(),
            name: "Legs".into(),
            exercises: vec![Exercise::named("Squats"), Exercise::named("Lunges")],
            work_seconds: 20,
            rest_seconds: 40,
            total_rounds: 5,
        };
        assert_eq!(preset.exercise_for_round(1).unwrap().name, "Squats");
        assert_eq!(preset.exercise_for_round(2).unwrap().name, "Lunges");
        assert_eq!(preset.exercise_for_round(3).unwrap().name, "Squats");
        assert_eq!(preset.exercise_after_round(1).unwrap().name, "Lunges");
        assert_eq!(preset.exercise_after_round(2).unwrap().name, "Squats");
    }

    #[test]
    fn empty_exercise_list_yields_none() {
        let preset = WorkoutPreset {
            id: "p".into(),
            name: "Manual".into(),
            exercises: Vec::new(),
            work_seconds: 20,
            rest_seconds: 40,
            total_rounds: 3,
        };
        assert!(preset.exercise_for_round(1).is_none());
        assert!(preset.exercise_after_round(1).is_none());
    }

    #[test]
    fn preset_store_select_and_remove() {
        let mut store = PresetStore::default();
        store.add(WorkoutPreset {
            id: "a".into(),
            name: "A".into(),
            exercises: Vec::new(),
            work_seconds: 20,
            rest_seconds: 40,
            total_rounds: 3,
        });
        store.select(Some("a".into()));
        assert_eq!(store.selected().unwrap().name, "A");

        store.remove("a");
        assert!(store.presets.is_empty());
        assert!(store.selected_id.is_none());
    }

    #[test]
    fn preset_store_json_round_trip() {
        let mut store = PresetStore::default();
        store.add(WorkoutPreset {
            id: "a".into(),
            name: "Core".into(),
            exercises: vec![Exercise {
                name: "Plank".into(),
                duration: Some(45),
            }],
            work_seconds: 30,
            rest_seconds: 15,
            total_rounds: 8,
        });
        store.select(Some("a".into()));

        let json = serde_json::to_string(&store).unwrap();
        let back: PresetStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, store);
    }

    #[test]
    fn format_seconds_display() {
        assert_eq!(format_seconds(0), "00:00");
        assert_eq!(format_seconds(5), "00:05");
        assert_eq!(format_seconds(65), "01:05");
        assert_eq!(format_seconds(600), "10:00");
    }
}
