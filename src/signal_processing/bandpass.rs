use std::sync::Arc;

use crate::signal_processing::{BandpassSpec, FirFilterCore, Kernel, design_bandpass};

/// Forward-backward FIR bandpass for acquisition frames
///
/// Filters the frame once, reverses the result, filters it again with the
/// same kernel and reverses back. The phase shifts of the two passes
/// cancel, so echoes stay aligned with the raw trace; the magnitude
/// response is the square of the single-pass response.
///
/// Samples within half a kernel of either end see zero padding and come
/// out attenuated. The output is never shortened.
pub struct ZeroPhaseBandpass {
    kernel: Arc<Kernel>,
}

impl ZeroPhaseBandpass {
    /// Design the kernel for `spec`
    pub fn new(spec: &BandpassSpec) -> Self {
        Self::with_kernel(Arc::new(design_bandpass(spec)))
    }

    /// Use an already designed kernel (e.g. from a `KernelCache`)
    pub fn with_kernel(kernel: Arc<Kernel>) -> Self {
        Self { kernel }
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Filter one frame; output has the same length as the input
    pub fn condition(&self, frame: &[f64]) -> Vec<f64> {
        let mut core = FirFilterCore::from_kernel(&self.kernel);

        let mut forward = core.filter_frame(frame);
        forward.reverse();

        let mut backward = core.filter_frame(&forward);
        backward.reverse();
        backward
    }
}

/// Design a bandpass kernel for `spec` and apply it forward-backward
pub fn condition(frame: &[f64], spec: &BandpassSpec) -> Vec<f64> {
    ZeroPhaseBandpass::new(spec).condition(frame)
}
