use leptos::prelude::*;
use spinwave_core::{Track, TrackCatalog, VisualizerConfig};

pub const IDLE_STATUS: &str = "Pick a track to start spinning";

#[derive(Clone, Copy)]
pub struct AppState {
    pub catalog: RwSignal<TrackCatalog>,
    pub search_query: RwSignal<String>,
    pub current_track: RwSignal<Option<Track>>,
    pub status_text: RwSignal<String>,
    pub is_playing: RwSignal<bool>,
    pub volume: RwSignal<f64>,
    pub current_time: RwSignal<f64>,
    /// NaN until the media element knows it.
    pub duration: RwSignal<f64>,
    pub is_fullscreen: RwSignal<bool>,
    pub config: RwSignal<VisualizerConfig>,
    /// Bumped on every selection; fetches that finish under an older value
    /// are discarded.
    pub load_generation: RwSignal<u64>,
    pub visualizer_canvas: NodeRef<leptos::html::Canvas>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            catalog: RwSignal::new(TrackCatalog::default()),
            search_query: RwSignal::new(String::new()),
            current_track: RwSignal::new(None),
            status_text: RwSignal::new(IDLE_STATUS.to_string()),
            is_playing: RwSignal::new(false),
            volume: RwSignal::new(1.0),
            current_time: RwSignal::new(0.0),
            duration: RwSignal::new(f64::NAN),
            is_fullscreen: RwSignal::new(false),
            config: RwSignal::new(VisualizerConfig::default()),
            load_generation: RwSignal::new(0),
            visualizer_canvas: NodeRef::new(),
        }
    }

    /// Start a new load and return its generation.
    pub fn next_generation(&self) -> u64 {
        let generation = self.load_generation.get_untracked() + 1;
        self.load_generation.set(generation);
        generation
    }

    pub fn is_current_generation(&self, generation: u64) -> bool {
        self.load_generation.get_untracked() == generation
    }

    /// Forget the selected track after its session is gone, so nothing
    /// still points at a player that no longer exists.
    pub fn drop_current_track(&self) {
        self.current_track.set(None);
        self.is_playing.set(false);
        self.current_time.set(0.0);
        self.duration.set(f64::NAN);
    }

    pub fn show_now_spinning(&self, track: &Track) {
        self.status_text
            .set(format!("\u{1F3A7} Now Spinning: {}", track.display));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `value` only when it differs, so per-frame readouts don't wake
/// subscribers for nothing. NaN counts as equal to NaN.
pub fn set_if_changed(signal: RwSignal<f64>, value: f64) {
    let old = signal.get_untracked();
    if old == value || (old.is_nan() && value.is_nan()) {
        return;
    }
    signal.set(value);
}

pub fn set_flag_if_changed(signal: RwSignal<bool>, value: bool) {
    if signal.get_untracked() != value {
        signal.set(value);
    }
}
