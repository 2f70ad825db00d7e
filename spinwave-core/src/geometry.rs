use crate::config::VisualizerConfig;

/// Logical (CSS pixel) size of the drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Per-frame surface geometry: logical size plus the backing-store size at
/// the current device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayGeometry {
    pub logical: SurfaceSize,
    pub pixel_ratio: f64,
    pub backing_width: u32,
    pub backing_height: u32,
}

impl DisplayGeometry {
    pub fn from_logical(width: f64, height: f64, pixel_ratio: f64) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        let width = width.max(0.0);
        let height = height.max(0.0);
        Self {
            logical: SurfaceSize::new(width, height),
            pixel_ratio,
            backing_width: (width * pixel_ratio).round() as u32,
            backing_height: (height * pixel_ratio).round() as u32,
        }
    }

    /// True when the backing store must be reallocated to match.
    pub fn needs_resize(&self, current_width: u32, current_height: u32) -> bool {
        self.backing_width != current_width || self.backing_height != current_height
    }
}

/// One bar, in logical units. `x` is the left edge; the bar grows up from
/// the bottom of the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarGeometry {
    pub x: f64,
    pub width: f64,
    pub height: f64,
}

/// Bar width for `bin_count` bars, before spacing.
pub fn bar_width(bin_count: usize, surface_width: f64, config: &VisualizerConfig) -> f64 {
    if bin_count == 0 {
        return 0.0;
    }
    let n = bin_count as f64;
    let usable = surface_width - config.bar_spacing * (n - 1.0);
    (usable / n * config.bar_width_factor).floor().max(0.0)
}

/// Map bin `i` with byte magnitude `magnitude` to bar geometry.
///
/// High bins get a bias upwards, the left half a small rebalance, and
/// strong signals stretch more than weak ones. Height never exceeds
/// `surface.height - bar_cap_margin`.
pub fn map_bin(
    i: usize,
    magnitude: u8,
    bin_count: usize,
    surface: SurfaceSize,
    is_fullscreen: bool,
    config: &VisualizerConfig,
) -> BarGeometry {
    let n = bin_count.max(1) as f64;
    let pos = i as f64 / n;
    let v = magnitude as f64;

    let bias = config.bias_base + pos.powf(config.bias_exponent);
    let asymmetry_boost = 1.0 + pos * config.asymmetry_gain;
    let half = n / 2.0;
    let left_rebalance = if (i as f64) < half {
        1.0 + (1.0 - i as f64 / half) * config.left_rebalance_gain
    } else {
        1.0
    };
    let boosted = v * bias * asymmetry_boost * left_rebalance;

    let stretch_factor = 1.0 + (v / 255.0).powf(config.stretch_exponent) * config.stretch_gain;
    let fullscreen_boost = if is_fullscreen { config.fullscreen_boost } else { config.normal_boost };
    let height_boost = (surface.height / config.height_boost_reference).max(1.0);

    let cap = (surface.height - config.bar_cap_margin).max(0.0);
    let height = (boosted * stretch_factor * fullscreen_boost * height_boost).min(cap);

    let width = bar_width(bin_count, surface.width, config);
    BarGeometry {
        x: i as f64 * (width + config.bar_spacing),
        width,
        height,
    }
}

/// Loudness colour: red for loud bins, violet for quiet ones.
pub fn bar_color(magnitude: u8) -> [u8; 3] {
    let red = (magnitude as u16 + 120).min(255) as u8;
    [red, 0, 255 - magnitude]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> SurfaceSize {
        SurfaceSize::new(800.0, 300.0)
    }

    #[test]
    fn test_height_never_exceeds_cap() {
        let config = VisualizerConfig::default();
        for &(w, h) in &[(800.0, 300.0), (320.0, 120.0), (1920.0, 1080.0), (10.0, 3.0)] {
            let s = SurfaceSize::new(w, h);
            for fullscreen in [false, true] {
                for i in 0..64 {
                    for m in 0..=255u8 {
                        let bar = map_bin(i, m, 64, s, fullscreen, &config);
                        assert!(bar.height <= (h - 4.0).max(0.0), "bin {i} mag {m} at {w}x{h}");
                        assert!(bar.height >= 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_known_value() {
        let config = VisualizerConfig::default();
        // Bin 0, magnitude 100: bias 0.5, no asymmetry, full left rebalance.
        let bar = map_bin(0, 100, 64, surface(), false, &config);
        let stretch = 1.0 + (100.0f64 / 255.0).powf(2.2) * 0.5;
        let expected = 100.0 * 0.5 * 1.0 * 1.16 * stretch * 0.9 * 1.0;
        assert!((bar.height - expected).abs() < 1e-9, "{} vs {expected}", bar.height);
        assert_eq!(bar.x, 0.0);
    }

    #[test]
    fn test_silence_is_flat() {
        let config = VisualizerConfig::default();
        for i in 0..64 {
            assert_eq!(map_bin(i, 0, 64, surface(), true, &config).height, 0.0);
        }
    }

    #[test]
    fn test_fullscreen_is_taller() {
        let config = VisualizerConfig::default();
        let normal = map_bin(10, 60, 64, surface(), false, &config);
        let full = map_bin(10, 60, 64, surface(), true, &config);
        assert!(full.height > normal.height);
    }

    #[test]
    fn test_height_boost_scales_with_tall_surfaces() {
        let config = VisualizerConfig::default();
        let short = map_bin(40, 50, 64, SurfaceSize::new(800.0, 200.0), false, &config);
        let tall = map_bin(40, 50, 64, SurfaceSize::new(800.0, 800.0), false, &config);
        assert!((tall.height / short.height - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_bar_layout() {
        let config = VisualizerConfig::default();
        // (800 - 63) / 64 * 1.25 = 14.39 -> 14
        assert_eq!(bar_width(64, 800.0, &config), 14.0);
        let bar = map_bin(3, 10, 64, surface(), false, &config);
        assert_eq!(bar.width, 14.0);
        assert_eq!(bar.x, 3.0 * 15.0);
        assert_eq!(bar_width(0, 800.0, &config), 0.0);
    }

    #[test]
    fn test_bar_color() {
        assert_eq!(bar_color(0), [120, 0, 255]);
        assert_eq!(bar_color(100), [220, 0, 155]);
        assert_eq!(bar_color(255), [255, 0, 0]);
    }

    #[test]
    fn test_display_geometry() {
        let g = DisplayGeometry::from_logical(400.0, 200.0, 2.0);
        assert_eq!((g.backing_width, g.backing_height), (800, 400));
        assert!(g.needs_resize(400, 200));
        assert!(!g.needs_resize(800, 400));
        let g = DisplayGeometry::from_logical(400.0, 200.0, f64::NAN);
        assert_eq!(g.pixel_ratio, 1.0);
    }
}
