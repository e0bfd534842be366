//! Pure Yew view components for the timer UI.
//!
//! This module contains stateless components that render based on props,
//! making them easy to test and reuse.

use std::f64::consts::PI;
use std::rc::Rc;
use workout_pulse::{format_seconds, Phase, TimerState, WorkoutConfig, WorkoutPreset};
use yew::prelude::*;

fn phase_class(phase: Phase) -> &'static str {
    match phase {
        Phase::Work => "work",
        Phase::Rest => "rest",
    }
}

/// Circular progress ring framing the countdown display.
#[derive(Properties, PartialEq)]
pub struct CircularProgressProps {
    pub percentage: f64,
    pub size: u32,
    pub stroke_width: u32,
    pub phase: Phase,
    pub children: Children,
}

#[function_component(CircularProgress)]
pub fn circular_progress(props: &CircularProgressProps) -> Html {
    let radius = f64::from(props.size - props.stroke_width) / 2.0;
    let circumference = radius * 2.0 * PI;
    let offset = circumference - (props.percentage / 100.0) * circumference;
    let center = (f64::from(props.size) / 2.0).to_string();
    let dimension = props.size.to_string();

    html! {
        <div class={format!("progress-ring {}", phase_class(props.phase))}
            style={format!("width: {}px; height: {}px;", props.size, props.size)}>
            <svg width={dimension.clone()} height={dimension}>
                <circle class="progress-ring-track"
                    cx={center.clone()}
                    cy={center.clone()}
                    r={radius.to_string()}
                    stroke-width={props.stroke_width.to_string()}
                    fill="transparent"
                />
                <circle class="progress-ring-bar"
                    cx={center.clone()}
                    cy={center}
                    r={radius.to_string()}
                    stroke-width={props.stroke_width.to_string()}
                    fill="transparent"
                    stroke-dasharray={circumference.to_string()}
                    stroke-dashoffset={offset.to_string()}
                    stroke-linecap="round"
                />
            </svg>
            <div class="progress-ring-content">
                { props.children.clone() }
            </div>
        </div>
    }
}

/// Workout summary shown in manual mode: total length plus the two phase
/// durations.
pub fn render_summary(config: &WorkoutConfig) -> Html {
    html! {
        <div class="summary-grid">
            <div>
                <div class="summary-label">{ "Total Time" }</div>
                <div class="summary-value">{ format_seconds(config.total_seconds()) }</div>
            </div>
            <div>
                <div class="summary-label">{ "Work" }</div>
                <div class="summary-value work">{ format!("{}s", config.work_seconds) }</div>
            </div>
            <div>
                <div class="summary-label">{ "Rest" }</div>
                <div class="summary-value rest">{ format!("{}s", config.rest_seconds) }</div>
            </div>
        </div>
    }
}

/// Exercise panel shown when a preset with exercises is active: the current
/// exercise during work, the upcoming one during rest.
pub fn render_exercise_panel(preset: &WorkoutPreset, state: &TimerState) -> Html {
    match state.phase {
        Phase::Work => {
            let name = preset
                .exercise_for_round(state.current_round)
                .map(|e| e.name.clone())
                .unwrap_or_else(|| "None".to_string());
            html! {
                <div class="exercise-panel">
                    <div class="summary-label">{ "Current Exercise" }</div>
                    <div class="summary-value work">{ name }</div>
                </div>
            }
        }
        Phase::Rest => {
            let name = preset
                .exercise_after_round(state.current_round)
                .map(|e| e.name.clone())
                .unwrap_or_else(|| "End".to_string());
            html! {
                <div class="exercise-panel">
                    <div class="summary-label">{ "Next Exercise" }</div>
                    <div class="summary-value">{ name }</div>
                </div>
            }
        }
    }
}

/// Preset selection list with a manual-mode entry at the top.
#[derive(Properties, PartialEq)]
pub struct PresetListProps {
    pub presets: Rc<Vec<WorkoutPreset>>,
    pub selected_id: Option<String>,
    pub on_select: Callback<Option<String>>,
    pub on_delete: Callback<String>,
}

#[function_component(PresetList)]
pub fn preset_list(props: &PresetListProps) -> Html {
    let manual_class = if props.selected_id.is_none() {
        "preset-button selected"
    } else {
        "preset-button"
    };
    let on_manual = {
        let on_select = props.on_select.clone();
        Callback::from(move |_| on_select.emit(None))
    };

    html! {
        <div class="preset-list">
            <button class={manual_class} onclick={on_manual}>
                { "Manual Mode (No Preset)" }
            </button>
            { props.presets.iter().map(|preset| {
                let selected = props.selected_id.as_deref() == Some(preset.id.as_str());
                let select_class = if selected { "preset-button selected" } else { "preset-button" };
                let on_select = {
                    let on_select = props.on_select.clone();
                    let id = preset.id.clone();
                    Callback::from(move |_| on_select.emit(Some(id.clone())))
                };
                let on_delete = {
                    let on_delete = props.on_delete.clone();
                    let id = preset.id.clone();
                    Callback::from(move |_| on_delete.emit(id.clone()))
                };
                html! {
                    <div class="preset-row" key={preset.id.clone()}>
                        <button class={select_class} onclick={on_select}>
                            { format!("{} ({} exercises)", preset.name, preset.exercises.len()) }
                        </button>
                        <button class="preset-delete" onclick={on_delete}>{ "✕" }</button>
                    </div>
                }
            }).collect::<Html>() }
        </div>
    }
}
