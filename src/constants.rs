//! Default filter parameters and numeric limits
//!
//! Values match the stock acquisition setup: 8 MHz sampling, 400 samples
//! per frame, 2.25 MHz transducer.

/// Default tap count for the zero-phase bandpass kernel.
pub const DEFAULT_BANDPASS_TAPS: usize = 31;

/// Default tap count for the Hilbert transformer kernel.
pub const DEFAULT_HILBERT_TAPS: usize = 101;

/// Smallest (odd) tap count accepted by strict validation.
/// Below two taps the Hamming window divides by zero.
pub const MIN_TAPS: usize = 3;

/// Default low cutoff as a fraction of the Nyquist frequency.
pub const LOW_CUTOFF_NYQUIST_FRACTION: f64 = 0.1;

/// Default high cutoff as a fraction of the Nyquist frequency.
pub const HIGH_CUTOFF_NYQUIST_FRACTION: f64 = 0.9;

/// Default ADC sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 8_000_000.0;

/// Default number of samples per acquisition frame.
pub const DEFAULT_NUM_SAMPLES: usize = 400;

/// Default transducer center frequency in Hz.
pub const DEFAULT_TRANSDUCER_FREQ_HZ: f64 = 2_250_000.0;

/// Number of distinct kernels kept by a kernel cache before it is flushed.
pub const KERNEL_CACHE_CAPACITY: usize = 32;
