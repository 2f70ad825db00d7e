use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use realfft::{RealFftPlanner, RealToComplex};

thread_local! {
    static FFT_PLANNER: RefCell<RealFftPlanner<f32>> = RefCell::new(RealFftPlanner::new());
}

/// Analyser dB range mapped onto 0..=255.
const MIN_DB: f32 = -100.0;
const MAX_DB: f32 = -30.0;

/// Anything that hands out one byte-magnitude frame per display frame.
///
/// The returned slice is only valid until the next call; consumers copy
/// what they need to keep.
pub trait FrequencySource {
    fn bin_count(&self) -> usize;
    fn snapshot(&mut self) -> &[u8];
}

fn blackman_window(size: usize) -> Vec<f32> {
    thread_local! {
        static CACHE: RefCell<HashMap<usize, Vec<f32>>> = RefCell::new(HashMap::new());
    }
    CACHE.with(|cache| {
        cache
            .borrow_mut()
            .entry(size)
            .or_insert_with(|| {
                let a0 = 0.42;
                let a1 = 0.5;
                let a2 = 0.08;
                let n = size as f32;
                (0..size)
                    .map(|i| {
                        let x = 2.0 * std::f32::consts::PI * i as f32 / n;
                        a0 - a1 * x.cos() + a2 * (2.0 * x).cos()
                    })
                    .collect()
            })
            .clone()
    })
}

/// Software frequency sampler with the same byte-spectrum contract as a
/// browser analyser node: Blackman window, temporal smoothing, then
/// decibels in `[MIN_DB, MAX_DB]` mapped to 0..=255.
///
/// PCM is pushed as it arrives; `snapshot` analyses the latest `fft_size`
/// samples.
pub struct FftSampler {
    fft: Arc<dyn RealToComplex<f32>>,
    fft_size: usize,
    smoothing: f32,
    window: Vec<f32>,
    history: Vec<f32>,
    input: Vec<f32>,
    spectrum: Vec<realfft::num_complex::Complex<f32>>,
    smoothed: Vec<f32>,
    bytes: Vec<u8>,
}

impl FftSampler {
    pub fn new(fft_size: usize, smoothing: f64) -> Self {
        let fft = FFT_PLANNER.with(|p| p.borrow_mut().plan_fft_forward(fft_size));
        let input = fft.make_input_vec();
        let spectrum = fft.make_output_vec();
        let bins = fft_size / 2;
        Self {
            fft,
            fft_size,
            smoothing: smoothing.clamp(0.0, 0.999) as f32,
            window: blackman_window(fft_size),
            history: vec![0.0; fft_size],
            input,
            spectrum,
            smoothed: vec![0.0; bins],
            bytes: vec![0; bins],
        }
    }

    /// Append mono PCM samples in `[-1, 1]`, keeping the last `fft_size`.
    pub fn push(&mut self, samples: &[f32]) {
        if samples.len() >= self.fft_size {
            self.history
                .copy_from_slice(&samples[samples.len() - self.fft_size..]);
            return;
        }
        self.history.rotate_left(samples.len());
        let start = self.fft_size - samples.len();
        self.history[start..].copy_from_slice(samples);
    }

    fn analyse(&mut self) {
        for (inp, (&s, &w)) in self
            .input
            .iter_mut()
            .zip(self.history.iter().zip(self.window.iter()))
        {
            *inp = s * w;
        }

        if let Err(e) = self.fft.process(&mut self.input, &mut self.spectrum) {
            log::warn!("FFT failed: {e}");
            return;
        }

        let scale = 1.0 / self.fft_size as f32;
        let k = self.smoothing;
        for ((smoothed, byte), c) in self
            .smoothed
            .iter_mut()
            .zip(self.bytes.iter_mut())
            .zip(self.spectrum.iter())
        {
            *smoothed = k * *smoothed + (1.0 - k) * c.norm() * scale;
            let db = if *smoothed > 0.0 { 20.0 * smoothed.log10() } else { f32::NEG_INFINITY };
            let scaled = 255.0 / (MAX_DB - MIN_DB) * (db - MIN_DB);
            *byte = scaled.clamp(0.0, 255.0) as u8;
        }
    }
}

impl FrequencySource for FftSampler {
    fn bin_count(&self) -> usize {
        self.bytes.len()
    }

    fn snapshot(&mut self) -> &[u8] {
        self.analyse();
        &self.bytes
    }
}
