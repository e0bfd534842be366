//! Application-level configuration constants.

// Tick driver: poll faster than once per second and cross-check against the
// wall clock so throttled tabs catch up instead of drifting.
pub const TICK_DRIVER_MS: u32 = 250;

// Min/Max limits for settings fields
pub const MIN_PHASE_SECONDS: u32 = 1;
pub const MAX_PHASE_SECONDS: u32 = 600;
pub const MIN_ROUNDS: u32 = 1;
pub const MAX_ROUNDS: u32 = 100;

// Progress ring geometry
pub const RING_SIZE: u32 = 280;
pub const RING_STROKE_WIDTH: u32 = 8;
