pub mod bandpass;
pub mod envelope;
pub mod fir_core;
pub mod fir_design;
pub mod kernel_cache;
pub mod window;

pub use bandpass::{ZeroPhaseBandpass, condition};
pub use envelope::{HilbertEnvelope, envelope};
pub use fir_core::{FirFilterCore, convolve_causal};
pub use fir_design::{
    BandpassSpec, HilbertSpec, Kernel, coerce_odd_taps, design_bandpass, design_hilbert, sinc,
};
pub use kernel_cache::KernelCache;
pub use window::hamming_window;
