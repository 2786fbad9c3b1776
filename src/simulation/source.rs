use super::{EchoConfig, NoiseConfig, apply_noise, generate_echo_frame};
use crate::source::FrameSource;

/// Yields a fixed number of noisy echo frames
///
/// Each frame gets its own noise realization; with a seed the whole
/// sequence is reproducible.
pub struct SyntheticFrameSource {
    echo: EchoConfig,
    noise: NoiseConfig,
    remaining: usize,
    frame_index: u64,
}

impl SyntheticFrameSource {
    pub fn new(echo: EchoConfig, noise: NoiseConfig, num_frames: usize) -> Self {
        Self {
            echo,
            noise,
            remaining: num_frames,
            frame_index: 0,
        }
    }
}

impl FrameSource for SyntheticFrameSource {
    fn next_frame(&mut self) -> anyhow::Result<Option<Vec<f64>>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;

        let mut frame = generate_echo_frame(&self.echo);
        let noise = NoiseConfig {
            seed: self.noise.seed.map(|s| s.wrapping_add(self.frame_index)),
            ..self.noise.clone()
        };
        apply_noise(&mut frame, &noise);
        self.frame_index += 1;

        Ok(Some(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yields_requested_frames() {
        let mut source = SyntheticFrameSource::new(
            EchoConfig::default(),
            NoiseConfig::default().with_seed(3).with_awgn(20.0),
            3,
        );
        let mut frames = Vec::new();
        while let Some(frame) = source.next_frame().unwrap() {
            assert_eq!(frame.len(), 400);
            frames.push(frame);
        }
        assert_eq!(frames.len(), 3);
        assert_ne!(frames[0], frames[1]);
    }
}
