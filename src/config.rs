use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Timing and geometry knobs for every interactive feature on the page.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub toast_hide_ms: u32,
    pub submit_latency_ms: u32,
    pub counter_duration_ms: u32,
    pub frame_ms: f64,
    pub reveal_debounce_ms: u32,
    /// How far above the bottom edge of the viewport a `.reveal-on-scroll` top must be.
    pub reveal_offset_px: f64,
    pub parallax_rate: f64,
    pub reveal_threshold: f64,
    pub reveal_bottom_margin_px: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            toast_hide_ms: 5_000,
            submit_latency_ms: 2_000,
            counter_duration_ms: 2_000,
            frame_ms: 16.0, // ~60 FPS
            reveal_debounce_ms: 10,
            reveal_offset_px: 150.0,
            parallax_rate: -0.5,
            reveal_threshold: 0.1,
            reveal_bottom_margin_px: -50.0,
        }
    }
}
