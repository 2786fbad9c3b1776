use super::{FrameSummary, Formatter, envelope_at, iso8601_timestamp};
use crate::processing::ConditionedFrame;

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, summary: &FrameSummary) -> String {
        let peak = summary
            .peak_envelope
            .map_or(String::new(), |v| format!("{:.6}", v));
        let index = summary
            .peak_index
            .map_or(String::new(), |i| i.to_string());
        let time = summary
            .peak_time_us
            .map_or(String::new(), |t| format!("{:.3}", t));
        format!(
            "{},{},{},{},{},{},{:.6},{:.6}",
            iso8601_timestamp(),
            summary.frame_index,
            summary.num_samples,
            peak,
            index,
            time,
            summary.raw_rms,
            summary.filtered_rms
        )
    }

    fn format_traces(&self, summary: &FrameSummary, frame: &ConditionedFrame) -> String {
        frame
            .raw
            .iter()
            .zip(&frame.filtered)
            .enumerate()
            .map(|(i, (raw, filtered))| {
                let env = envelope_at(frame, i).map_or(String::new(), |e| e.to_string());
                format!("{},{},{},{},{}", summary.frame_index, i, raw, filtered, env)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn header(&self) -> Option<&'static str> {
        Some("ts,frame,num_samples,peak_envelope,peak_index,peak_time_us,raw_rms,filtered_rms")
    }

    fn traces_header(&self) -> Option<&'static str> {
        Some("frame,index,raw,filtered,envelope")
    }
}
