use serde::Serialize;

use super::{FrameSummary, Formatter, iso8601_timestamp};
use crate::processing::ConditionedFrame;

pub struct JsonFormatter;

#[derive(Serialize)]
struct SummaryRecord<'a> {
    ts: String,
    #[serde(flatten)]
    summary: &'a FrameSummary,
}

#[derive(Serialize)]
struct TraceRecord<'a> {
    ts: String,
    #[serde(flatten)]
    summary: &'a FrameSummary,
    #[serde(flatten)]
    traces: &'a ConditionedFrame,
}

impl Formatter for JsonFormatter {
    fn format(&self, summary: &FrameSummary) -> String {
        let record = SummaryRecord {
            ts: iso8601_timestamp(),
            summary,
        };
        serde_json::to_string(&record).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
    }

    fn format_traces(&self, summary: &FrameSummary, frame: &ConditionedFrame) -> String {
        let record = TraceRecord {
            ts: iso8601_timestamp(),
            summary,
            traces: frame,
        };
        serde_json::to_string(&record).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::sample_frame;

    #[test]
    fn test_summary_is_valid_json() {
        let summary = FrameSummary::from_frame(2, &sample_frame(), 8_000_000.0);
        let line = JsonFormatter.format(&summary);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["frame_index"], 2);
        assert_eq!(value["peak_index"], 1);
        assert!(value["ts"].is_string());
    }

    #[test]
    fn test_traces_include_all_samples() {
        let frame = sample_frame();
        let summary = FrameSummary::from_frame(0, &frame, 8_000_000.0);
        let line = JsonFormatter.format_traces(&summary, &frame);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["raw"].as_array().unwrap().len(), 4);
        assert_eq!(value["envelope"].as_array().unwrap().len(), 4);
    }
}
