//! Main module for the Workout Pulse interval timer using Yew.
//! Wires UI components, state hooks, and side-effect logic.

use gloo_timers::callback::Interval;
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use workout_pulse::cue::CueTracker;
use workout_pulse::{
    defaults, format_seconds, Exercise, Phase, PresetStore, TimerState, WorkoutConfig,
    WorkoutPreset,
};
use yew::prelude::*;

mod audio;
mod components;
mod config;
mod hooks;
mod storage;
mod utils;

use audio::AudioEngine;
use components::{render_exercise_panel, render_summary, CircularProgress, PresetList};
use config::*;
use hooks::use_validated_input;

/// Actions routed through the timer reducer. Tick and Reset carry the
/// config snapshot they were issued against, so a stale closure can never
/// apply an outdated transition.
enum TimerAction {
    Toggle,
    Reset(WorkoutConfig),
    Tick(WorkoutConfig),
}

/// Reducer wrapper plugging the pure scheduler into Yew state management.
#[derive(PartialEq)]
struct Timer {
    state: TimerState,
}

impl Reducible for Timer {
    type Action = TimerAction;

    fn reduce(self: Rc<Self>, action: TimerAction) -> Rc<Self> {
        let mut state = self.state.clone();
        match action {
            TimerAction::Toggle => {
                if state.is_running {
                    state.pause();
                } else {
                    state.start();
                }
            }
            TimerAction::Reset(config) => state.reset(&config),
            TimerAction::Tick(config) => state.tick(&config),
        }
        Rc::new(Timer { state })
    }
}

/// Wall-clock anchor for the drift-corrected tick driver.
struct RunClock {
    anchor_ms: f64,
    ticks_sent: u32,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum SettingsTab {
    Timer,
    Presets,
}

/// Primary application component wiring state, effects, and UI elements.
#[function_component(Main)]
fn main_component() -> Html {
    // Validated settings fields; committed values are the single source of
    // the workout config.
    let work_parser: Rc<dyn Fn(&str) -> Result<u32, String>> =
        Rc::new(utils::validate_work_seconds);
    let rest_parser: Rc<dyn Fn(&str) -> Result<u32, String>> =
        Rc::new(utils::validate_rest_seconds);
    let rounds_parser: Rc<dyn Fn(&str) -> Result<u32, String>> = Rc::new(utils::validate_rounds);
    let work_input = use_validated_input(defaults::WORK_SECONDS, work_parser);
    let rest_input = use_validated_input(defaults::REST_SECONDS, rest_parser);
    let rounds_input = use_validated_input(defaults::TOTAL_ROUNDS, rounds_parser);

    let config = WorkoutConfig {
        work_seconds: work_input.value,
        rest_seconds: rest_input.value,
        total_rounds: rounds_input.value,
    };

    let timer = use_reducer(|| Timer {
        state: TimerState::new(&WorkoutConfig::default()),
    });

    let store = use_state(PresetStore::default);
    let show_settings = use_state(|| false);
    let settings_tab = use_state(|| SettingsTab::Timer);

    // New-preset form state
    let preset_name = use_state(String::new);
    let preset_exercises = use_state(String::new);
    let preset_error = use_state(|| None::<String>);

    // Run-scoped collaborators. The cue tracker and audio engine are owned
    // here and only ever read scheduler snapshots.
    let run_clock = use_mut_ref(|| RunClock {
        anchor_ms: 0.0,
        ticks_sent: 0,
    });
    let cue_tracker = use_mut_ref(CueTracker::new);
    let audio = use_mut_ref(AudioEngine::new);

    // Load persisted presets on mount; release the audio engine on unmount.
    {
        let store = store.clone();
        let audio = audio.clone();
        use_effect_with((), move |_| {
            store.set(storage::load_store());
            move || audio.borrow_mut().close()
        });
    }

    // Selecting a preset loads its values into the settings fields.
    let selected_preset = store.selected().cloned();
    {
        let work_set = work_input.set_value.clone();
        let rest_set = rest_input.set_value.clone();
        let rounds_set = rounds_input.set_value.clone();
        use_effect_with(selected_preset.clone(), move |preset| {
            if let Some(preset) = preset {
                work_set.emit(preset.work_seconds);
                rest_set.emit(preset.rest_seconds);
                rounds_set.emit(preset.total_rounds);
            }
            || ()
        });
    }

    // Any config change discards in-flight progress and re-arms the cues.
    {
        let dispatcher = timer.dispatcher();
        let cue_tracker = cue_tracker.clone();
        use_effect_with(config, move |&config| {
            cue_tracker.borrow_mut().reset();
            dispatcher.dispatch(TimerAction::Reset(config));
            || ()
        });
    }

    // Tick driver: poll faster than once per second and derive the number
    // of due ticks from elapsed wall time, so a throttled tab catches up
    // with sequential ticks instead of drifting.
    {
        let dispatcher = timer.dispatcher();
        let run_clock = run_clock.clone();
        let is_running = timer.state.is_running;
        use_effect_with((is_running, config), move |&(running, config)| {
            let interval = if running {
                *run_clock.borrow_mut() = RunClock {
                    anchor_ms: js_sys::Date::now(),
                    ticks_sent: 0,
                };
                Some(Interval::new(TICK_DRIVER_MS, move || {
                    let mut clock = run_clock.borrow_mut();
                    let due = ((js_sys::Date::now() - clock.anchor_ms) / 1000.0) as u32;
                    while clock.ticks_sent < due {
                        clock.ticks_sent += 1;
                        dispatcher.dispatch(TimerAction::Tick(config));
                    }
                }))
            } else {
                None
            };
            move || drop(interval)
        });
    }

    // After every scheduler transition, let the cue tracker look at the new
    // snapshot and play whatever it decides.
    {
        let cue_tracker = cue_tracker.clone();
        let audio = audio.clone();
        use_effect_with((timer.state.clone(), config), move |(state, config)| {
            if let Some(cue) = cue_tracker.borrow_mut().evaluate(state, config) {
                audio.borrow().play(cue);
            }
            || ()
        });
    }

    let on_toggle = {
        let dispatcher = timer.dispatcher();
        let audio = audio.clone();
        Callback::from(move |_: MouseEvent| {
            // A user gesture: the only moment browsers let a suspended
            // audio context resume.
            audio.borrow_mut().arm();
            dispatcher.dispatch(TimerAction::Toggle);
        })
    };

    let on_reset = {
        let dispatcher = timer.dispatcher();
        let cue_tracker = cue_tracker.clone();
        Callback::from(move |_: MouseEvent| {
            cue_tracker.borrow_mut().reset();
            dispatcher.dispatch(TimerAction::Reset(config));
        })
    };

    // Write-through store mutations: persist first, then swap the state.
    let commit_store = {
        let store = store.clone();
        Callback::from(move |next: PresetStore| {
            storage::save_store(&next);
            store.set(next);
        })
    };

    let on_select_preset = {
        let store = store.clone();
        let commit_store = commit_store.clone();
        Callback::from(move |id: Option<String>| {
            let mut next = (*store).clone();
            next.select(id);
            commit_store.emit(next);
        })
    };

    let on_delete_preset = {
        let store = store.clone();
        let commit_store = commit_store.clone();
        Callback::from(move |id: String| {
            let mut next = (*store).clone();
            next.remove(&id);
            commit_store.emit(next);
        })
    };

    let on_create_preset = {
        let store = store.clone();
        let commit_store = commit_store.clone();
        let preset_name = preset_name.clone();
        let preset_exercises = preset_exercises.clone();
        let preset_error = preset_error.clone();
        Callback::from(move |_: MouseEvent| {
            let name = preset_name.trim().to_string();
            if name.is_empty() {
                preset_error.set(Some("Preset needs a name".to_string()));
                return;
            }
            let exercises: Vec<Exercise> = preset_exercises
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(Exercise::named)
                .collect();
            if exercises.is_empty() {
                preset_error.set(Some("Add at least one exercise".to_string()));
                return;
            }

            let preset = WorkoutPreset {
                id: format!("preset-{}", js_sys::Date::now() as u64),
                name,
                exercises,
                work_seconds: config.work_seconds,
                rest_seconds: config.rest_seconds,
                total_rounds: config.total_rounds,
            };
            let mut next = (*store).clone();
            let id = preset.id.clone();
            next.add(preset);
            next.select(Some(id));
            commit_store.emit(next);

            preset_name.set(String::new());
            preset_exercises.set(String::new());
            preset_error.set(None);
        })
    };

    // --- Input handlers for the preset form ---
    let preset_name_oninput = {
        let preset_name = preset_name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            preset_name.set(input.value());
        })
    };
    let preset_exercises_oninput = {
        let preset_exercises = preset_exercises.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            preset_exercises.set(input.value());
        })
    };

    // --- Enter commits a settings field, like blurring it ---
    let work_onkeydown = {
        let commit = work_input.on_commit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                commit.emit(());
            }
        })
    };
    let rest_onkeydown = {
        let commit = rest_input.on_commit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                commit.emit(());
            }
        })
    };
    let rounds_onkeydown = {
        let commit = rounds_input.on_commit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                commit.emit(());
            }
        })
    };

    let open_settings = {
        let show_settings = show_settings.clone();
        let settings_tab = settings_tab.clone();
        Callback::from(move |_: MouseEvent| {
            settings_tab.set(SettingsTab::Timer);
            show_settings.set(true);
        })
    };
    let close_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_: MouseEvent| show_settings.set(false))
    };
    let select_timer_tab = {
        let settings_tab = settings_tab.clone();
        Callback::from(move |_: MouseEvent| settings_tab.set(SettingsTab::Timer))
    };
    let select_presets_tab = {
        let settings_tab = settings_tab.clone();
        Callback::from(move |_: MouseEvent| settings_tab.set(SettingsTab::Presets))
    };

    let state = &timer.state;
    let phase_class = match state.phase {
        Phase::Work => "work",
        Phase::Rest => "rest",
    };
    let status_label = if state.is_complete {
        "Complete!"
    } else {
        state.phase.label()
    };

    let timer_tab = html! {
        <div class="settings-form">
            <div class="form-group">
                <label for="work_seconds_input">{ "Work Time Per Round (seconds)" }</label>
                <input
                    type="text"
                    id="work_seconds_input"
                    value={work_input.text.clone()}
                    class={if work_input.error.is_some() { "invalid" } else { "" }}
                    oninput={work_input.on_text_input.clone()}
                    onchange={work_input.on_commit.reform(|_| ())}
                    onkeydown={work_onkeydown}
                />
                if let Some(ref err) = work_input.error {
                    <div class="input-error">{ err }</div>
                }
            </div>
            <div class="form-group">
                <label for="rest_seconds_input">{ "Rest Time Per Round (seconds)" }</label>
                <input
                    type="text"
                    id="rest_seconds_input"
                    value={rest_input.text.clone()}
                    class={if rest_input.error.is_some() { "invalid" } else { "" }}
                    oninput={rest_input.on_text_input.clone()}
                    onchange={rest_input.on_commit.reform(|_| ())}
                    onkeydown={rest_onkeydown}
                />
                if let Some(ref err) = rest_input.error {
                    <div class="input-error">{ err }</div>
                }
            </div>
            <div class="form-group">
                <label for="total_rounds_input">{ "Rounds" }</label>
                <input
                    type="text"
                    id="total_rounds_input"
                    value={rounds_input.text.clone()}
                    class={if rounds_input.error.is_some() { "invalid" } else { "" }}
                    oninput={rounds_input.on_text_input.clone()}
                    onchange={rounds_input.on_commit.reform(|_| ())}
                    onkeydown={rounds_onkeydown}
                />
                if let Some(ref err) = rounds_input.error {
                    <div class="input-error">{ err }</div>
                }
            </div>
            <div class="form-hint">
                { "Durations accept 90, 1:30, or 90s. Committing a change restarts the workout." }
            </div>
        </div>
    };

    let presets_tab = html! {
        <div class="settings-form">
            <PresetList
                presets={Rc::new((*store).presets.clone())}
                selected_id={(*store).selected_id.clone()}
                on_select={on_select_preset}
                on_delete={on_delete_preset}
            />
            <div class="preset-create">
                <h3>{ "New Preset" }</h3>
                <div class="form-group">
                    <label for="preset_name_input">{ "Name" }</label>
                    <input
                        type="text"
                        id="preset_name_input"
                        value={(*preset_name).clone()}
                        oninput={preset_name_oninput}
                    />
                </div>
                <div class="form-group">
                    <label for="preset_exercises_input">{ "Exercises (one per line)" }</label>
                    <textarea
                        id="preset_exercises_input"
                        value={(*preset_exercises).clone()}
                        oninput={preset_exercises_oninput}
                    />
                </div>
                <div class="form-hint">{ "Uses the current work/rest/round settings." }</div>
                if let Some(ref err) = *preset_error {
                    <div class="input-error">{ err }</div>
                }
                <button class="control-button" onclick={on_create_preset}>
                    { "Create Preset" }
                </button>
            </div>
        </div>
    };

    html! {
        <div class="container">
            <div class="header">
                <h1>{ "Workout Pulse" }</h1>
                <button class="icon-button" aria-label="Settings" onclick={open_settings}>
                    { "⚙" }
                </button>
            </div>

            // Main timer display
            <div class="timer-card">
                <CircularProgress
                    percentage={state.progress_percentage(&config)}
                    size={RING_SIZE}
                    stroke_width={RING_STROKE_WIDTH}
                    phase={state.phase}
                >
                    <div class="countdown">{ format_seconds(state.time_left) }</div>
                    <div class={format!("phase-label {}", phase_class)}>{ status_label }</div>
                </CircularProgress>

                <div class="round-counter">
                    <div class="summary-label">{ "Round" }</div>
                    <div class="round-value">
                        { format!("{} / {}", state.current_round, config.total_rounds) }
                    </div>
                </div>

                <div class="controls">
                    <button
                        class={format!("control-button {}", phase_class)}
                        disabled={state.is_complete}
                        onclick={on_toggle}
                    >
                        { if state.is_running { "Pause" } else { "Start" } }
                    </button>
                    <button class="control-button secondary" onclick={on_reset}>
                        { "Reset" }
                    </button>
                </div>
            </div>

            // Workout summary / active exercise
            <div class="info-card">
                { match &selected_preset {
                    Some(preset) if !preset.exercises.is_empty() => {
                        render_exercise_panel(preset, state)
                    }
                    _ => render_summary(&config),
                } }
            </div>

            // Settings modal
            if *show_settings {
                <div class="modal-backdrop">
                    <div class="modal">
                        <div class="modal-header">
                            <h2>{ "Settings" }</h2>
                            <button class="icon-button" aria-label="Close" onclick={close_settings.clone()}>
                                { "✕" }
                            </button>
                        </div>
                        <div class="tab-bar">
                            <button
                                class={if *settings_tab == SettingsTab::Timer { "tab selected" } else { "tab" }}
                                onclick={select_timer_tab}
                            >
                                { "Timer" }
                            </button>
                            <button
                                class={if *settings_tab == SettingsTab::Presets { "tab selected" } else { "tab" }}
                                onclick={select_presets_tab}
                            >
                                { "Presets" }
                            </button>
                        </div>
                        { match *settings_tab {
                            SettingsTab::Timer => timer_tab,
                            SettingsTab::Presets => presets_tab,
                        } }
                        <button class="control-button primary" onclick={close_settings}>
                            { "Done" }
                        </button>
                    </div>
                </div>
            }
        </div>
    }
}

/// App wrapper around the main component.
#[function_component]
pub fn App() -> Html {
    html! {
        <Main />
    }
}

/// Entry point: installs the panic hook and mounts the Yew renderer.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
