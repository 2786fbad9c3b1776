use super::{FrameSummary, Formatter, envelope_at};
use crate::processing::ConditionedFrame;

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, summary: &FrameSummary) -> String {
        let peak = match (summary.peak_envelope, summary.peak_index) {
            (Some(value), Some(index)) => format!("{:>10.4} @ {:>4}", value, index),
            _ => format!("{:>17}", "-"),
        };
        if self.verbose {
            let time = summary
                .peak_time_us
                .map_or("-".to_string(), |t| format!("{:.2} us", t));
            format!(
                "Frame {:>5}: peak {} ({}) [n: {}, raw rms: {:.4}, filtered rms: {:.4}]",
                summary.frame_index,
                peak,
                time,
                summary.num_samples,
                summary.raw_rms,
                summary.filtered_rms
            )
        } else {
            format!("Frame {:>5}: peak {}", summary.frame_index, peak)
        }
    }

    fn format_traces(&self, summary: &FrameSummary, frame: &ConditionedFrame) -> String {
        let mut out = format!("# frame {}\n", summary.frame_index);
        for (i, (raw, filtered)) in frame.raw.iter().zip(&frame.filtered).enumerate() {
            let env = envelope_at(frame, i).map_or("-".to_string(), |e| format!("{:>12.6}", e));
            out.push_str(&format!(
                "{:>5} {:>12.6} {:>12.6} {}\n",
                i, raw, filtered, env
            ));
        }
        out
    }
}
