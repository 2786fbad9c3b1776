mod noise;
mod signal;
mod source;

pub use noise::{NoiseConfig, apply_noise, signal_power};
pub use signal::{Echo, EchoConfig, generate_echo_frame, generate_tone};
pub use source::SyntheticFrameSource;
