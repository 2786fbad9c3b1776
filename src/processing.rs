use serde::Serialize;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::signal_processing::{HilbertEnvelope, KernelCache, ZeroPhaseBandpass};

/// Raw frame plus its derived traces
///
/// `filtered` always has the length of `raw`. `envelope` has that length
/// too, or is empty when the envelope stage is disabled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionedFrame {
    pub raw: Vec<f64>,
    pub filtered: Vec<f64>,
    /// Empty when the envelope stage is disabled
    pub envelope: Vec<f64>,
}

impl ConditionedFrame {
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Index and value of the envelope maximum
    pub fn peak_envelope(&self) -> Option<(usize, f64)> {
        self.envelope
            .iter()
            .copied()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
    }
}

/// Root-mean-square of a trace, zero for an empty trace
pub fn rms(trace: &[f64]) -> f64 {
    if trace.is_empty() {
        return 0.0;
    }
    (trace.iter().map(|x| x * x).sum::<f64>() / trace.len() as f64).sqrt()
}

/// Runs raw frames through bandpass conditioning and envelope detection
///
/// Every frame is filtered independently from a cold filter state. Kernels
/// are memoized per configuration, so swapping the configuration between
/// frames only costs a redesign when the parameters actually change.
pub struct FrameProcessor {
    config: PipelineConfig,
    kernels: KernelCache,
    frames_processed: u64,
}

impl FrameProcessor {
    /// # Errors
    /// Returns `SonoError::InvalidFilterSpec` when validation is strict and
    /// the configured filter parameters are out of range.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.check()?;
        Ok(Self {
            config,
            kernels: KernelCache::new(),
            frames_processed: 0,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Replace the configuration used for subsequent frames
    ///
    /// On error the previous configuration stays in effect.
    pub fn set_config(&mut self, config: PipelineConfig) -> Result<()> {
        config.check()?;
        if config != self.config {
            log::debug!("Pipeline configuration updated");
        }
        self.config = config;
        Ok(())
    }

    pub fn process_frame(&mut self, raw: &[f64]) -> ConditionedFrame {
        let expected = self.config.acquisition.num_samples;
        if !raw.is_empty() && raw.len() != expected {
            log::trace!(
                "Frame has {} samples, configuration expects {}",
                raw.len(),
                expected
            );
        }

        let bandpass =
            ZeroPhaseBandpass::with_kernel(self.kernels.bandpass(&self.config.bandpass_spec()));
        let filtered = bandpass.condition(raw);

        let envelope = if self.config.envelope.enabled {
            HilbertEnvelope::with_kernel(self.kernels.hilbert(&self.config.hilbert_spec()))
                .envelope(&filtered)
        } else {
            Vec::new()
        };

        self.frames_processed += 1;

        ConditionedFrame {
            raw: raw.to_vec(),
            filtered,
            envelope,
        }
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    pub fn kernel_cache_stats(&self) -> (u64, u64) {
        self.kernels.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Frequency, ValidationMode};
    use crate::error::SonoError;
    use crate::signal_processing::{BandpassSpec, condition, envelope};

    fn test_frame(len: usize) -> Vec<f64> {
        (0..len).map(|i| (i as f64 * 1.77).sin() * (1.0 + i as f64 / 100.0)).collect()
    }

    #[test]
    fn test_matches_free_functions() {
        let config = PipelineConfig::default();
        let mut processor = FrameProcessor::new(config.clone()).unwrap();
        let raw = test_frame(400);

        let frame = processor.process_frame(&raw);
        let filtered = condition(&raw, &config.bandpass_spec());
        let env = envelope(&filtered, config.envelope.num_taps);

        assert_eq!(frame.raw, raw);
        assert_eq!(frame.filtered, filtered);
        assert_eq!(frame.envelope, env);
    }

    #[test]
    fn test_empty_frame() {
        let mut processor = FrameProcessor::new(PipelineConfig::default()).unwrap();
        let frame = processor.process_frame(&[]);
        assert!(frame.is_empty());
        assert!(frame.filtered.is_empty());
        assert!(frame.envelope.is_empty());
        assert_eq!(frame.peak_envelope(), None);
    }

    #[test]
    fn test_frames_are_independent() {
        let mut processor = FrameProcessor::new(PipelineConfig::default()).unwrap();
        let raw = test_frame(300);
        let first = processor.process_frame(&raw);
        processor.process_frame(&test_frame(123));
        let again = processor.process_frame(&raw);
        assert_eq!(first, again);
        assert_eq!(processor.frames_processed(), 3);
    }

    #[test]
    fn test_kernels_reused_across_frames() {
        let mut processor = FrameProcessor::new(PipelineConfig::default()).unwrap();
        for _ in 0..5 {
            processor.process_frame(&test_frame(64));
        }
        let (hits, misses) = processor.kernel_cache_stats();
        assert_eq!(misses, 2);
        assert_eq!(hits, 8);
    }

    #[test]
    fn test_config_change_takes_effect() {
        let mut processor = FrameProcessor::new(PipelineConfig::default()).unwrap();
        let raw = test_frame(200);
        let before = processor.process_frame(&raw);

        let mut config = PipelineConfig::default();
        config.bandpass.low_cutoff = Some(Frequency::from_hz(1_500_000.0));
        processor.set_config(config.clone()).unwrap();
        let after = processor.process_frame(&raw);

        assert_ne!(before.filtered, after.filtered);
        assert_eq!(after.filtered, condition(&raw, &config.bandpass_spec()));
    }

    #[test]
    fn test_strict_rejects_bad_config() {
        let mut config = PipelineConfig::default();
        config.validation = ValidationMode::Strict;
        config.bandpass.high_cutoff = Some(Frequency::from_hz(5_000_000.0));
        assert!(matches!(
            FrameProcessor::new(config.clone()),
            Err(SonoError::InvalidFilterSpec(_))
        ));

        let mut processor = FrameProcessor::new(PipelineConfig::default()).unwrap();
        assert!(processor.set_config(config).is_err());
        assert_eq!(processor.config(), &PipelineConfig::default());
    }

    #[test]
    fn test_tolerant_accepts_bad_config() {
        let mut config = PipelineConfig::default();
        config.bandpass.high_cutoff = Some(Frequency::from_hz(5_000_000.0));
        let mut processor = FrameProcessor::new(config.clone()).unwrap();
        let frame = processor.process_frame(&test_frame(100));
        assert_eq!(frame.filtered.len(), 100);

        let spec: BandpassSpec = config.bandpass_spec();
        assert!(!spec.is_well_formed());
    }

    #[test]
    fn test_envelope_disabled() {
        let mut config = PipelineConfig::default();
        config.envelope.enabled = false;
        let mut processor = FrameProcessor::new(config).unwrap();
        let frame = processor.process_frame(&test_frame(50));
        assert_eq!(frame.filtered.len(), 50);
        assert!(frame.envelope.is_empty());
    }

    #[test]
    fn test_rms() {
        assert_eq!(rms(&[]), 0.0);
        assert!((rms(&[3.0, -3.0, 3.0, -3.0]) - 3.0).abs() < 1e-12);
    }
}
