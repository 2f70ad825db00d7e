use serde::Deserialize;

/// Tunable constants for the visualizer pipeline.
///
/// Defaults reproduce the stock look. Any subset of fields can be overridden
/// from a JSON document; missing fields keep their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Analyser transform size. The snapshot has `fft_size / 2` bins.
    pub fft_size: usize,
    /// Analyser temporal smoothing (0 = none, close to 1 = heavy).
    pub smoothing: f64,

    /// Peak fall per frame, in display units.
    pub peak_decay_step: f64,
    /// Peaks stay at least this far below the surface top.
    pub peak_margin: f64,

    /// Bars are capped this far below the surface top.
    pub bar_cap_margin: f64,
    pub bias_base: f64,
    pub bias_exponent: f64,
    pub asymmetry_gain: f64,
    pub left_rebalance_gain: f64,
    pub stretch_exponent: f64,
    pub stretch_gain: f64,
    pub fullscreen_boost: f64,
    pub normal_boost: f64,
    /// Surface height at which the height boost reaches 1.0.
    pub height_boost_reference: f64,
    pub bar_spacing: f64,
    pub bar_width_factor: f64,

    /// Central trigger window, as a fraction of the half bin count.
    pub pulse_window_fraction: f64,
    pub pulse_window_fraction_fullscreen: f64,
    /// A central bar within this distance of the top triggers the pulse.
    pub pulse_edge_margin: f64,
    pub pulse_increment: f64,
    pub pulse_decay_step: f64,
    /// Glow span at full intensity, as a fraction of surface width.
    pub glow_width_fraction: f64,
    pub glow_alpha: f64,
    pub glow_color: [u8; 3],
    pub peak_cap_height: f64,

    /// Keep residual glow when a new track is attached.
    pub carry_pulse_across_tracks: bool,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            fft_size: 128,
            smoothing: 0.8,

            peak_decay_step: 0.26,
            peak_margin: 4.0,

            bar_cap_margin: 4.0,
            bias_base: 0.5,
            bias_exponent: 2.1,
            asymmetry_gain: 0.1,
            left_rebalance_gain: 0.16,
            stretch_exponent: 2.2,
            stretch_gain: 0.5,
            fullscreen_boost: 1.9,
            normal_boost: 0.9,
            height_boost_reference: 400.0,
            bar_spacing: 1.0,
            bar_width_factor: 1.25,

            pulse_window_fraction: 0.23,
            pulse_window_fraction_fullscreen: 0.30,
            pulse_edge_margin: 4.0,
            pulse_increment: 0.3,
            pulse_decay_step: 0.02,
            glow_width_fraction: 0.4,
            glow_alpha: 0.3,
            glow_color: [255, 0, 128],
            peak_cap_height: 2.0,

            carry_pulse_across_tracks: false,
        }
    }
}

impl VisualizerConfig {
    pub fn from_json(text: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| format!("visualizer config: {e}"))?;
        config.validated()
    }

    /// Number of frequency bins the analyser produces.
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    fn validated(self) -> Result<Self, String> {
        if !(32..=32768).contains(&self.fft_size) || !self.fft_size.is_power_of_two() {
            return Err(format!(
                "fft_size must be a power of two in 32..=32768, got {}",
                self.fft_size
            ));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(format!("smoothing must be in [0, 1), got {}", self.smoothing));
        }
        if self.peak_decay_step <= 0.0 || self.pulse_decay_step <= 0.0 {
            return Err("decay steps must be positive".to_string());
        }
        // Bars stop at `h - bar_cap_margin`; the pulse fires at `h - pulse_edge_margin`.
        if self.bar_cap_margin > self.pulse_edge_margin {
            return Err(format!(
                "bar_cap_margin ({}) exceeds pulse_edge_margin ({}), bars could never trigger the pulse",
                self.bar_cap_margin, self.pulse_edge_margin
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_maps_to_64_bins() {
        assert_eq!(VisualizerConfig::default().bin_count(), 64);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = VisualizerConfig::from_json(r#"{ "peak_decay_step": 0.5, "fft_size": 256 }"#)
            .unwrap();
        assert_eq!(config.peak_decay_step, 0.5);
        assert_eq!(config.bin_count(), 128);
        assert_eq!(config.pulse_increment, 0.3);
        assert!(!config.carry_pulse_across_tracks);
    }

    #[test]
    fn test_rejects_bad_fft_size() {
        let err = VisualizerConfig::from_json(r#"{ "fft_size": 100 }"#).unwrap_err();
        assert!(err.contains("fft_size"), "unexpected error: {err}");
    }

    #[test]
    fn test_rejects_unreachable_pulse_threshold() {
        let err = VisualizerConfig::from_json(r#"{ "bar_cap_margin": 10, "pulse_edge_margin": 4 }"#)
            .unwrap_err();
        assert!(err.contains("bar_cap_margin"), "unexpected error: {err}");

        let config =
            VisualizerConfig::from_json(r#"{ "bar_cap_margin": 2, "pulse_edge_margin": 6 }"#).unwrap();
        assert_eq!(config.bar_cap_margin, 2.0);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(VisualizerConfig::from_json("{ not json").is_err());
    }
}
