use crate::config::VisualizerConfig;
use crate::geometry::{bar_color, map_bin, SurfaceSize};
use crate::peaks::PeakTracker;
use crate::pulse::{Glow, PulseEffect};

/// One bar plus its floating peak cap, ready to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarDraw {
    pub x: f64,
    pub width: f64,
    pub height: f64,
    pub color: [u8; 3],
    /// Peak cap height above the surface bottom.
    pub peak: f64,
}

/// Everything the renderer needs for one frame, in logical units.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FramePlan {
    pub surface: SurfaceSize,
    pub cap_height: f64,
    pub bars: Vec<BarDraw>,
    pub glow: Option<Glow>,
}

/// Per-source visualizer state: peak-hold and pulse, plus the config they
/// run under.
#[derive(Clone, Debug)]
pub struct VisualizerSession {
    config: VisualizerConfig,
    peaks: PeakTracker,
    pulse: PulseEffect,
    heights: Vec<f64>,
}

impl VisualizerSession {
    pub fn new(config: VisualizerConfig) -> Self {
        let bins = config.bin_count();
        let peaks = PeakTracker::new(bins, config.peak_decay_step, config.peak_margin);
        Self {
            config,
            peaks,
            pulse: PulseEffect::new(),
            heights: Vec::with_capacity(bins),
        }
    }

    /// State for the next source, built from the config current at that
    /// time. Only the pulse survives, and only when `config` asks for it.
    pub fn handover(self, config: VisualizerConfig) -> Self {
        let carry = config.carry_pulse_across_tracks;
        let mut next = Self::new(config);
        if carry {
            next.pulse = self.pulse;
        }
        next
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// A new source was attached: zero the peaks for its bin count. The
    /// pulse is cleared too unless configured to carry over.
    pub fn attach(&mut self, bin_count: usize) {
        self.peaks.reset(bin_count);
        if !self.config.carry_pulse_across_tracks {
            self.pulse.reset();
        }
    }

    pub fn reset_peaks(&mut self) {
        let bins = self.peaks.bin_count();
        self.peaks.reset(bins);
    }

    /// Leaving fullscreen drops held peaks, which were scaled for the
    /// larger boost.
    pub fn exit_fullscreen(&mut self) {
        self.reset_peaks();
    }

    pub fn peaks(&self) -> &[f64] {
        self.peaks.heights()
    }

    pub fn pulse_intensity(&self) -> f64 {
        self.pulse.intensity()
    }

    /// Map one snapshot to bars, advance peaks and pulse.
    pub fn frame(&mut self, snapshot: &[u8], surface: SurfaceSize, is_fullscreen: bool) -> FramePlan {
        if snapshot.len() != self.peaks.bin_count() {
            self.peaks.reset(snapshot.len());
        }
        let bin_count = snapshot.len();

        self.heights.clear();
        let mut bars = Vec::with_capacity(bin_count);
        for (i, &magnitude) in snapshot.iter().enumerate() {
            let bar = map_bin(i, magnitude, bin_count, surface, is_fullscreen, &self.config);
            let peak = self.peaks.update(i, bar.height, surface.height);
            self.heights.push(bar.height);
            bars.push(BarDraw {
                x: bar.x,
                width: bar.width,
                height: bar.height,
                color: bar_color(magnitude),
                peak,
            });
        }

        let triggered =
            PulseEffect::triggered(&self.heights, surface.height, is_fullscreen, &self.config);
        let glow = self.pulse.advance(triggered, surface, &self.config);

        FramePlan {
            surface,
            cap_height: self.config.peak_cap_height,
            bars,
            glow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{FftSampler, FrequencySource};

    fn surface() -> SurfaceSize {
        SurfaceSize::new(800.0, 300.0)
    }

    /// Short enough that full-scale central bars hit the cap.
    fn short_surface() -> SurfaceSize {
        SurfaceSize::new(800.0, 200.0)
    }

    #[test]
    fn test_first_frame_after_attach_uses_fresh_peaks() {
        let mut session = VisualizerSession::new(VisualizerConfig::default());
        session.frame(&[255; 64], surface(), false);
        assert!(session.peaks().iter().any(|&p| p > 0.0));

        session.attach(64);
        assert!(session.peaks().iter().all(|&p| p == 0.0));

        // With fresh peaks, a quiet frame shows peaks equal to the bars.
        let plan = session.frame(&[20; 64], surface(), false);
        for bar in &plan.bars {
            assert_eq!(bar.peak, bar.height);
        }
    }

    #[test]
    fn test_attach_resets_pulse_by_default() {
        let mut session = VisualizerSession::new(VisualizerConfig::default());
        let plan = session.frame(&[255; 64], short_surface(), false);
        assert!(plan.glow.is_some());
        assert!(session.pulse_intensity() > 0.0);
        session.attach(64);
        assert_eq!(session.pulse_intensity(), 0.0);
    }

    #[test]
    fn test_attach_can_carry_pulse() {
        let config = VisualizerConfig {
            carry_pulse_across_tracks: true,
            ..VisualizerConfig::default()
        };
        let mut session = VisualizerSession::new(config);
        session.frame(&[255; 64], short_surface(), false);
        let before = session.pulse_intensity();
        assert!(before > 0.0);
        session.attach(64);
        assert_eq!(session.pulse_intensity(), before);
        assert!(session.peaks().iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_handover_picks_up_new_config() {
        let mut old = VisualizerSession::new(VisualizerConfig::default());
        old.frame(&[255; 64], short_surface(), false);
        assert!(old.pulse_intensity() > 0.0);

        let loaded = VisualizerConfig {
            fft_size: 256,
            peak_decay_step: 1.0,
            ..VisualizerConfig::default()
        };
        let mut next = old.handover(loaded.clone());
        assert_eq!(next.config(), &loaded);
        assert_eq!(next.peaks().len(), 128);
        assert_eq!(next.pulse_intensity(), 0.0);

        // The new decay step is the one applied.
        next.frame(&[100; 128], surface(), false);
        let held = next.peaks()[0];
        next.frame(&[0; 128], surface(), false);
        assert!((held - next.peaks()[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_handover_carries_pulse_when_new_config_asks() {
        let mut old = VisualizerSession::new(VisualizerConfig::default());
        old.frame(&[255; 64], short_surface(), false);
        let before = old.pulse_intensity();

        let carry = VisualizerConfig {
            carry_pulse_across_tracks: true,
            ..VisualizerConfig::default()
        };
        let next = old.handover(carry);
        assert_eq!(next.pulse_intensity(), before);
        assert!(next.peaks().iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_exit_fullscreen_drops_peaks() {
        let mut session = VisualizerSession::new(VisualizerConfig::default());
        session.frame(&[200; 64], surface(), true);
        session.exit_fullscreen();
        assert_eq!(session.peaks().len(), 64);
        assert!(session.peaks().iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_bin_count_change_reallocates() {
        let mut session = VisualizerSession::new(VisualizerConfig::default());
        let plan = session.frame(&[50; 16], surface(), false);
        assert_eq!(plan.bars.len(), 16);
        assert_eq!(session.peaks().len(), 16);
    }

    #[test]
    fn test_silence_draws_no_glow() {
        let mut session = VisualizerSession::new(VisualizerConfig::default());
        let plan = session.frame(&[0; 64], surface(), false);
        assert!(plan.glow.is_none());
        assert!(plan.bars.iter().all(|b| b.height == 0.0 && b.peak == 0.0));
        assert_eq!(plan.bars[0].color, [120, 0, 255]);
    }

    #[test]
    fn test_pipeline_from_sampler() {
        let config = VisualizerConfig::default();
        let mut sampler = FftSampler::new(config.fft_size, 0.0);
        let mut session = VisualizerSession::new(config);
        session.attach(sampler.bin_count());

        let sample_rate = 44_100.0f32;
        let freq = 32.0 * sample_rate / 128.0;
        let tone: Vec<f32> = (0..512)
            .map(|i| 0.9 * (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate).sin())
            .collect();
        sampler.push(&tone);

        let plan = session.frame(sampler.snapshot(), surface(), false);
        assert_eq!(plan.bars.len(), 64);
        let tallest = plan
            .bars
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.height.total_cmp(&b.1.height))
            .map(|(i, _)| i)
            .unwrap();
        assert!((30..=34).contains(&tallest), "tallest bar at {tallest}");
        assert!(plan.bars.iter().all(|b| b.height <= 296.0));
    }
}
