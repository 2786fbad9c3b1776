mod csv;
mod json;
mod text;

use chrono::Utc;
use serde::Serialize;

use crate::processing::{ConditionedFrame, rms};

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Per-frame figures reported by the CLI
#[derive(Debug, Clone, Serialize)]
pub struct FrameSummary {
    pub frame_index: u64,
    pub num_samples: usize,
    pub peak_envelope: Option<f64>,
    pub peak_index: Option<usize>,
    /// Peak position converted to microseconds after acquisition start
    pub peak_time_us: Option<f64>,
    pub raw_rms: f64,
    pub filtered_rms: f64,
}

impl FrameSummary {
    pub fn from_frame(frame_index: u64, frame: &ConditionedFrame, sample_rate_hz: f64) -> Self {
        let peak = frame.peak_envelope();
        Self {
            frame_index,
            num_samples: frame.len(),
            peak_envelope: peak.map(|(_, value)| value),
            peak_index: peak.map(|(index, _)| index),
            peak_time_us: peak.map(|(index, _)| index as f64 * 1e6 / sample_rate_hz),
            raw_rms: rms(&frame.raw),
            filtered_rms: rms(&frame.filtered),
        }
    }
}

pub trait Formatter: Send {
    fn format(&self, summary: &FrameSummary) -> String;

    /// Full per-sample dump of one frame
    fn format_traces(&self, summary: &FrameSummary, frame: &ConditionedFrame) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }

    fn traces_header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Envelope sample at `index`, if the envelope stage ran
fn envelope_at(frame: &ConditionedFrame, index: usize) -> Option<f64> {
    frame.envelope.get(index).copied()
}
