//! Windowed FIR coefficient design
//!
//! Both kernels used by the frame pipeline are built the same way: sample an
//! ideal (infinite) impulse response around a center tap, then taper it with
//! a Hamming window. Tap counts are always forced odd so a unique center tap
//! exists.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::constants::MIN_TAPS;
use crate::error::{Result, SonoError};
use crate::signal_processing::hamming_window;

/// Round an even tap count up to the next odd number
pub fn coerce_odd_taps(num_taps: usize) -> usize {
    if num_taps.is_multiple_of(2) {
        num_taps + 1
    } else {
        num_taps
    }
}

/// Normalized sinc: `sin(pi x) / (pi x)`, with `sinc(0) == 1`
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    let pix = PI * x;
    pix.sin() / pix
}

/// Parameters of the bandpass kernel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandpassSpec {
    /// ADC sample rate in Hz
    pub sample_rate_hz: f64,
    /// Lower passband edge in Hz
    pub low_cutoff_hz: f64,
    /// Upper passband edge in Hz
    pub high_cutoff_hz: f64,
    /// Requested tap count (coerced odd at design time)
    pub num_taps: usize,
}

impl BandpassSpec {
    pub fn new(sample_rate_hz: f64, low_cutoff_hz: f64, high_cutoff_hz: f64, num_taps: usize) -> Self {
        Self {
            sample_rate_hz,
            low_cutoff_hz,
            high_cutoff_hz,
            num_taps,
        }
    }

    pub fn nyquist_hz(&self) -> f64 {
        self.sample_rate_hz / 2.0
    }

    /// Tap count actually used by the designed kernel
    pub fn effective_taps(&self) -> usize {
        coerce_odd_taps(self.num_taps)
    }

    /// Lower and upper cutoffs in cycles per sample
    pub fn normalized_cutoffs(&self) -> (f64, f64) {
        (
            self.low_cutoff_hz / self.sample_rate_hz,
            self.high_cutoff_hz / self.sample_rate_hz,
        )
    }

    /// Reject specs that would produce a degenerate kernel
    ///
    /// Design itself never fails; this check is only applied when the
    /// pipeline runs in strict validation mode.
    ///
    /// # Errors
    /// Returns `SonoError::InvalidFilterSpec` if the sample rate is not
    /// positive, a cutoff is not positive, the cutoffs are not increasing,
    /// the high cutoff reaches Nyquist, or the tap count is too small.
    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate_hz.is_finite() || self.sample_rate_hz <= 0.0 {
            return Err(SonoError::InvalidFilterSpec(format!(
                "sample rate must be positive, got {} Hz",
                self.sample_rate_hz
            )));
        }
        if !self.low_cutoff_hz.is_finite() || self.low_cutoff_hz <= 0.0 {
            return Err(SonoError::InvalidFilterSpec(format!(
                "low cutoff must be positive, got {} Hz",
                self.low_cutoff_hz
            )));
        }
        if !self.high_cutoff_hz.is_finite() || self.low_cutoff_hz >= self.high_cutoff_hz {
            return Err(SonoError::InvalidFilterSpec(format!(
                "cutoffs must be increasing: low={} Hz, high={} Hz",
                self.low_cutoff_hz, self.high_cutoff_hz
            )));
        }
        if self.high_cutoff_hz >= self.nyquist_hz() {
            return Err(SonoError::InvalidFilterSpec(format!(
                "high cutoff {} Hz must be below Nyquist ({} Hz)",
                self.high_cutoff_hz,
                self.nyquist_hz()
            )));
        }
        validate_taps(self.num_taps)
    }

    /// Whether the parameters lie in the range the designer was built for
    pub fn is_well_formed(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Parameters of the Hilbert transformer kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HilbertSpec {
    /// Requested tap count (coerced odd at design time)
    pub num_taps: usize,
}

impl HilbertSpec {
    pub fn new(num_taps: usize) -> Self {
        Self { num_taps }
    }

    pub fn effective_taps(&self) -> usize {
        coerce_odd_taps(self.num_taps)
    }

    /// # Errors
    /// Returns `SonoError::InvalidFilterSpec` if the tap count is too small.
    pub fn validate(&self) -> Result<()> {
        validate_taps(self.num_taps)
    }
}

fn validate_taps(num_taps: usize) -> Result<()> {
    let taps = coerce_odd_taps(num_taps);
    if taps < MIN_TAPS {
        return Err(SonoError::InvalidFilterSpec(format!(
            "tap count must be at least {} after odd coercion, got {}",
            MIN_TAPS, taps
        )));
    }
    Ok(())
}

/// Linear-phase FIR tap weights
///
/// Always has an odd number of taps. Immutable once designed.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    taps: Vec<f64>,
}

impl Kernel {
    pub fn from_taps(taps: Vec<f64>) -> Self {
        Self { taps }
    }

    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    /// Index of the center tap, which is also the group delay in samples
    pub fn group_delay_samples(&self) -> usize {
        self.taps.len().saturating_sub(1) / 2
    }

    /// `h[i] == h[n-1-i]` within `tolerance`
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let n = self.taps.len();
        (0..n / 2).all(|i| (self.taps[i] - self.taps[n - 1 - i]).abs() <= tolerance)
    }

    /// `h[i] == -h[n-1-i]` within `tolerance`
    pub fn is_antisymmetric(&self, tolerance: f64) -> bool {
        let n = self.taps.len();
        (0..n.div_ceil(2)).all(|i| (self.taps[i] + self.taps[n - 1 - i]).abs() <= tolerance)
    }
}

/// Design a windowed-sinc bandpass kernel
///
/// Each tap is the difference of two ideal lowpass responses at the
/// normalized upper and lower cutoffs, tapered by a Hamming window:
/// `h[i] = (2*high*sinc(2*high*k) - 2*low*sinc(2*low*k)) * w[i]`
/// where `k = i - (n-1)/2`.
///
/// Out-of-range cutoffs are not rejected here; they yield an inverted or
/// degenerate passband.
pub fn design_bandpass(spec: &BandpassSpec) -> Kernel {
    let num_taps = spec.effective_taps();
    let mid = (num_taps as f64 - 1.0) / 2.0;
    let (low, high) = spec.normalized_cutoffs();
    let window = hamming_window(num_taps);

    let taps = window
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let k = i as f64 - mid;
            let ideal = 2.0 * high * sinc(2.0 * high * k) - 2.0 * low * sinc(2.0 * low * k);
            ideal * w
        })
        .collect();

    log::trace!(
        "Designed bandpass kernel: {} taps, low={:.4}, high={:.4} cycles/sample",
        num_taps,
        low,
        high
    );

    Kernel { taps }
}

/// Design a type-III FIR Hilbert transformer
///
/// `h[i] = 2 / (pi*k)` for odd offsets `k = i - (n-1)/2`, zero for even
/// offsets (including the center tap), tapered by a Hamming window.
pub fn design_hilbert(spec: &HilbertSpec) -> Kernel {
    let num_taps = spec.effective_taps();
    let mid = ((num_taps - 1) / 2) as i64;
    let window = hamming_window(num_taps);

    let taps = window
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let k = i as i64 - mid;
            let ideal = if k % 2 == 0 { 0.0 } else { 2.0 / (PI * k as f64) };
            ideal * w
        })
        .collect();

    log::trace!("Designed Hilbert kernel: {} taps", num_taps);

    Kernel { taps }
}
