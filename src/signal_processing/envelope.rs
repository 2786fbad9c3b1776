use std::sync::Arc;

use num_complex::Complex64;

use crate::signal_processing::{HilbertSpec, Kernel, convolve_causal, design_hilbert};

/// Envelope detector based on an FIR Hilbert transformer
///
/// The quadrature component is a single causal pass of the Hilbert kernel
/// over the frame; no group-delay compensation is applied, so the envelope
/// of a pure tone ripples slightly around its amplitude. Meant to run on
/// bandpass-conditioned frames.
pub struct HilbertEnvelope {
    kernel: Arc<Kernel>,
}

impl HilbertEnvelope {
    pub fn new(spec: &HilbertSpec) -> Self {
        Self::with_kernel(Arc::new(design_hilbert(spec)))
    }

    pub fn with_kernel(kernel: Arc<Kernel>) -> Self {
        Self { kernel }
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Approximate quadrature (90 degree shifted) component of `frame`
    pub fn quadrature(&self, frame: &[f64]) -> Vec<f64> {
        convolve_causal(&self.kernel, frame)
    }

    /// Pair each sample with its quadrature component
    pub fn analytic_signal(&self, frame: &[f64]) -> Vec<Complex64> {
        frame
            .iter()
            .zip(self.quadrature(frame))
            .map(|(&re, im)| Complex64::new(re, im))
            .collect()
    }

    /// Magnitude of the analytic signal, same length as `frame`
    pub fn envelope(&self, frame: &[f64]) -> Vec<f64> {
        // Complex::norm is hypot, which avoids overflow on squaring
        self.analytic_signal(frame).iter().map(|z| z.norm()).collect()
    }
}

/// Design a Hilbert kernel with `num_taps` taps and return the envelope of `frame`
pub fn envelope(frame: &[f64], num_taps: usize) -> Vec<f64> {
    HilbertEnvelope::new(&HilbertSpec::new(num_taps)).envelope(frame)
}
