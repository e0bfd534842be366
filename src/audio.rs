//! WebAudio beep engine for the cue pipeline.
//!
//! Strictly one-way: the engine plays what the cue tracker decided and
//! never feeds anything back into the scheduler. Every failure here is
//! logged and swallowed; the countdown keeps running silently if the
//! browser refuses audio.

use gloo_timers::callback::Timeout;
use log::warn;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioContext, AudioContextState, OscillatorType};
use workout_pulse::cue::{
    Cue, COMPLETION_BEEP_COUNT, COMPLETION_BEEP_GAP_MS, COMPLETION_BEEP_MS,
    COMPLETION_FREQUENCY_HZ, COUNTDOWN_BEEP_MS, COUNTDOWN_FREQUENCY_HZ,
};

const BEEP_GAIN: f32 = 0.3;
const BEEP_GAIN_FLOOR: f32 = 0.01;

/// Lazily created audio context. Construction is cheap and idempotent; the
/// context may come up suspended when created before a user gesture and is
/// resumed on the next user-initiated start.
pub struct AudioEngine {
    context: Option<AudioContext>,
}

impl AudioEngine {
    pub fn new() -> Self {
        Self { context: None }
    }

    fn ensure_context(&mut self) {
        if self.context.is_none() {
            match AudioContext::new() {
                Ok(context) => self.context = Some(context),
                Err(err) => warn!("audio context creation failed: {:?}", err),
            }
        }
    }

    /// Resume a suspended context. Browsers only allow this from a user
    /// gesture, so the start button calls it; the returned promise is
    /// awaited fire-and-forget and never blocks a tick.
    pub fn arm(&mut self) {
        self.ensure_context();
        let Some(context) = &self.context else {
            return;
        };
        if context.state() != AudioContextState::Suspended {
            return;
        }
        match context.resume() {
            Ok(promise) => {
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(err) = JsFuture::from(promise).await {
                        warn!("audio context resume failed: {:?}", err);
                    }
                });
            }
            Err(err) => warn!("audio context resume failed: {:?}", err),
        }
    }

    /// Play the given cue. Countdown is a single beep; completion schedules
    /// the fixed three-beep sequence.
    pub fn play(&self, cue: Cue) {
        let Some(context) = &self.context else {
            return;
        };
        match cue {
            Cue::Countdown => beep(context, COUNTDOWN_FREQUENCY_HZ, COUNTDOWN_BEEP_MS),
            Cue::Completion => {
                for i in 0..COMPLETION_BEEP_COUNT {
                    let context = context.clone();
                    Timeout::new(i * COMPLETION_BEEP_GAP_MS, move || {
                        beep(&context, COMPLETION_FREQUENCY_HZ, COMPLETION_BEEP_MS);
                    })
                    .forget();
                }
            }
        }
    }

    /// Release the audio context; the engine recreates one lazily if cueing
    /// resumes later.
    pub fn close(&mut self) {
        if let Some(context) = self.context.take() {
            if let Err(err) = context.close() {
                warn!("audio context close failed: {:?}", err);
            }
        }
    }
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn beep(context: &AudioContext, frequency: f32, duration_ms: u32) {
    if let Err(err) = try_beep(context, frequency, duration_ms) {
        warn!("beep failed: {:?}", err);
    }
}

/// One sine beep: oscillator -> gain -> destination, with an exponential
/// gain ramp down so the beep ends without a click.
fn try_beep(context: &AudioContext, frequency: f32, duration_ms: u32) -> Result<(), JsValue> {
    let oscillator = context.create_oscillator()?;
    let gain = context.create_gain()?;

    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&context.destination())?;

    oscillator.set_type(OscillatorType::Sine);
    oscillator.frequency().set_value(frequency);

    let now = context.current_time();
    let duration = f64::from(duration_ms) / 1000.0;
    gain.gain().set_value_at_time(BEEP_GAIN, now)?;
    gain.gain()
        .exponential_ramp_to_value_at_time(BEEP_GAIN_FLOOR, now + duration)?;

    oscillator.start()?;
    oscillator.stop_with_when(now + duration)?;
    Ok(())
}
