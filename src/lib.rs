pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod processing;
pub mod signal_processing;
pub mod source;
pub mod wav;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::PipelineConfig;
pub use error::{Result, SonoError};
pub use processing::{ConditionedFrame, FrameProcessor};
pub use signal_processing::{BandpassSpec, HilbertSpec, Kernel, condition, envelope};
pub use wav::save_traces_wav;
