use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::KERNEL_CACHE_CAPACITY;
use crate::signal_processing::{BandpassSpec, HilbertSpec, Kernel, design_bandpass, design_hilbert};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct BandpassKey {
    sample_rate_bits: u64,
    low_bits: u64,
    high_bits: u64,
    num_taps: usize,
}

impl From<&BandpassSpec> for BandpassKey {
    fn from(spec: &BandpassSpec) -> Self {
        Self {
            sample_rate_bits: spec.sample_rate_hz.to_bits(),
            low_bits: spec.low_cutoff_hz.to_bits(),
            high_bits: spec.high_cutoff_hz.to_bits(),
            num_taps: spec.effective_taps(),
        }
    }
}

/// Memoizes designed kernels across frames
///
/// Keys are the exact bit patterns of the filter parameters (with the tap
/// count already coerced odd), so a cached kernel is identical to a freshly
/// designed one. Each map is flushed when a new kernel would push it past
/// `KERNEL_CACHE_CAPACITY` entries.
#[derive(Default)]
pub struct KernelCache {
    bandpass: HashMap<BandpassKey, Arc<Kernel>>,
    hilbert: HashMap<usize, Arc<Kernel>>,
    hits: u64,
    misses: u64,
}

impl KernelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bandpass(&mut self, spec: &BandpassSpec) -> Arc<Kernel> {
        let key = BandpassKey::from(spec);
        if let Some(kernel) = self.bandpass.get(&key) {
            self.hits += 1;
            return Arc::clone(kernel);
        }

        self.misses += 1;
        if self.bandpass.len() >= KERNEL_CACHE_CAPACITY {
            log::debug!("Bandpass kernel cache full, flushing");
            self.bandpass.clear();
        }
        log::debug!(
            "Designing bandpass kernel: {:.0}-{:.0} Hz @ {:.0} Hz, {} taps",
            spec.low_cutoff_hz,
            spec.high_cutoff_hz,
            spec.sample_rate_hz,
            key.num_taps
        );
        let kernel = Arc::new(design_bandpass(spec));
        self.bandpass.insert(key, Arc::clone(&kernel));
        kernel
    }

    pub fn hilbert(&mut self, spec: &HilbertSpec) -> Arc<Kernel> {
        let key = spec.effective_taps();
        if let Some(kernel) = self.hilbert.get(&key) {
            self.hits += 1;
            return Arc::clone(kernel);
        }

        self.misses += 1;
        if self.hilbert.len() >= KERNEL_CACHE_CAPACITY {
            log::debug!("Hilbert kernel cache full, flushing");
            self.hilbert.clear();
        }
        log::debug!("Designing Hilbert kernel: {} taps", key);
        let kernel = Arc::new(design_hilbert(spec));
        self.hilbert.insert(key, Arc::clone(&kernel));
        kernel
    }

    pub fn len(&self) -> usize {
        self.bandpass.len() + self.hilbert.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.bandpass.clear();
        self.hilbert.clear();
    }
}
