use std::ops::RangeInclusive;

use crate::config::VisualizerConfig;
use crate::geometry::SurfaceSize;

/// Bin indices around the midpoint whose saturation triggers the pulse.
///
/// The window reaches `fraction` of the half bin count to either side of
/// the centre, and always holds at least the centre bin.
pub fn central_window(bin_count: usize, fraction: f64) -> RangeInclusive<usize> {
    if bin_count == 0 {
        // Empty range.
        return 1..=0;
    }
    let center = bin_count / 2;
    let reach = ((bin_count as f64 / 2.0) * fraction.max(0.0)).floor() as usize;
    center.saturating_sub(reach)..=(center + reach).min(bin_count - 1)
}

/// Edge glow to draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub intensity: f64,
    /// Depth of each edge gradient, in logical units.
    pub span: f64,
    /// Global alpha for the four gradients.
    pub alpha: f64,
    pub color: [u8; 3],
}

/// Decaying intensity in `[0, 1]`, bumped whenever a central bar hits the
/// top of the surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PulseEffect {
    intensity: f64,
}

impl PulseEffect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn reset(&mut self) {
        self.intensity = 0.0;
    }

    /// True when any bar inside the central window is within the edge
    /// margin of the surface top.
    pub fn triggered(
        bar_heights: &[f64],
        surface_height: f64,
        is_fullscreen: bool,
        config: &VisualizerConfig,
    ) -> bool {
        let fraction = if is_fullscreen {
            config.pulse_window_fraction_fullscreen
        } else {
            config.pulse_window_fraction
        };
        let threshold = surface_height - config.pulse_edge_margin;
        central_window(bar_heights.len(), fraction)
            .filter_map(|i| bar_heights.get(i))
            .any(|&h| h > 0.0 && h >= threshold)
    }

    /// Run one frame: apply the trigger, return the glow to draw (if any),
    /// then decay.
    pub fn advance(
        &mut self,
        triggered: bool,
        surface: SurfaceSize,
        config: &VisualizerConfig,
    ) -> Option<Glow> {
        if triggered {
            self.intensity = (self.intensity + config.pulse_increment).min(1.0);
        }
        if self.intensity <= 0.0 {
            return None;
        }

        let glow = Glow {
            intensity: self.intensity,
            span: surface.width * config.glow_width_fraction * self.intensity,
            alpha: self.intensity * config.glow_alpha,
            color: config.glow_color,
        };

        self.intensity -= config.pulse_decay_step;
        // Absorb rounding so a full pulse lands on exactly zero.
        if self.intensity < config.pulse_decay_step * 1e-6 {
            self.intensity = 0.0;
        }
        Some(glow)
    }
}
