use std::path::Path;

use hound::{WavSpec, WavWriter};

use crate::error::Result;
use crate::processing::ConditionedFrame;

/// Write a conditioned frame as an interleaved float WAV for inspection
///
/// Channels are raw, filtered and (when present) envelope. The WAV sample
/// rate is the acquisition sample rate.
pub fn save_traces_wav<P: AsRef<Path>>(
    path: P,
    frame: &ConditionedFrame,
    sample_rate: u32,
) -> Result<()> {
    let has_envelope = frame.envelope.len() == frame.len() && !frame.is_empty();
    let spec = WavSpec {
        channels: if has_envelope { 3 } else { 2 },
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)?;

    for i in 0..frame.len() {
        writer.write_sample(frame.raw[i] as f32)?;
        writer.write_sample(frame.filtered[i] as f32)?;
        if has_envelope {
            writer.write_sample(frame.envelope[i] as f32)?;
        }
    }

    writer.finalize()?;
    log::info!("Wrote {} samples to {}", frame.len(), path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;

    #[test]
    fn test_writes_three_channels() {
        let path = std::env::temp_dir().join(format!("sonoframe_wav_{}.wav", std::process::id()));
        let frame = ConditionedFrame {
            raw: vec![0.5, -0.5, 0.25],
            filtered: vec![0.4, -0.4, 0.2],
            envelope: vec![0.6, 0.6, 0.3],
        };

        save_traces_wav(&path, &frame, 8_000_000).unwrap();

        let mut reader = WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().channels, 3);
        assert_eq!(reader.spec().sample_rate, 8_000_000);
        let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0.5, 0.4, 0.6, -0.5, -0.4, 0.6, 0.25, 0.2, 0.3]);

        std::fs::remove_file(&path).unwrap();
    }
}
