/// Peak-hold per bin: snaps up to new maxima instantly, falls by a fixed
/// step per frame otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct PeakTracker {
    heights: Vec<f64>,
    decay_step: f64,
    margin: f64,
}

impl PeakTracker {
    pub fn new(bin_count: usize, decay_step: f64, margin: f64) -> Self {
        Self {
            heights: vec![0.0; bin_count],
            decay_step,
            margin,
        }
    }

    /// Feed one frame of bar heights. Returns the updated peak for bin `i`.
    ///
    /// Peaks stay within `[0, surface_height - margin]`, so a shrinking
    /// surface pulls held peaks down with it.
    pub fn update(&mut self, i: usize, bar_height: f64, surface_height: f64) -> f64 {
        let Some(peak) = self.heights.get_mut(i) else { return 0.0 };
        if bar_height > *peak {
            *peak = bar_height;
        } else {
            *peak = (*peak - self.decay_step).max(0.0);
        }
        let ceiling = (surface_height - self.margin).max(0.0);
        *peak = peak.clamp(0.0, ceiling);
        *peak
    }

    /// Zero every bin, resizing to `bin_count`.
    pub fn reset(&mut self, bin_count: usize) {
        self.heights.clear();
        self.heights.resize(bin_count, 0.0);
    }

    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    pub fn bin_count(&self) -> usize {
        self.heights.len()
    }
}
