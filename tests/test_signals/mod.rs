#![allow(dead_code, unused_imports)]

mod reference;

pub use reference::{direct_convolve, direct_zero_phase, one_sided_autocorrelation};

use std::f64::consts::PI;

pub const SAMPLE_RATE: f64 = 8_000_000.0;
pub const TRANSDUCER_FREQ: f64 = 2_250_000.0;

/// Cutoffs used by the dashboard: 10% and 90% of Nyquist
pub fn default_cutoffs(sample_rate: f64) -> (f64, f64) {
    (0.1 * sample_rate / 2.0, 0.9 * sample_rate / 2.0)
}

pub fn sine(num_samples: usize, sample_rate: f64, freq: f64) -> Vec<f64> {
    (0..num_samples)
        .map(|i| (2.0 * PI * freq * i as f64 / sample_rate).sin())
        .collect()
}

pub fn impulse(num_samples: usize, position: usize) -> Vec<f64> {
    let mut frame = vec![0.0; num_samples];
    frame[position] = 1.0;
    frame
}

pub fn rms(samples: &[f64]) -> f64 {
    (samples.iter().map(|x| x * x).sum::<f64>() / samples.len() as f64).sqrt()
}

pub fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

pub fn argmax(samples: &[f64]) -> usize {
    samples
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
