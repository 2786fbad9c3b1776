use std::f64::consts::PI;

use crate::config::AcquisitionConfig;

/// Generate `num_samples` of a sine tone
pub fn generate_tone(num_samples: usize, sample_rate: f64, freq: f64, amplitude: f64) -> Vec<f64> {
    (0..num_samples)
        .map(|i| amplitude * (2.0 * PI * freq * i as f64 / sample_rate).sin())
        .collect()
}

/// A single reflector seen by the transducer
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Echo {
    /// Round-trip delay from acquisition start in microseconds
    pub delay_us: f64,
    pub amplitude: f64,
}

/// A-mode echo frame description
#[derive(Debug, Clone, serde::Deserialize)]
pub struct EchoConfig {
    pub num_samples: usize,
    pub sample_rate_hz: f64,
    /// Transducer center frequency in Hz
    pub center_freq_hz: f64,
    /// Burst length in carrier cycles (Gaussian full width at half maximum)
    pub burst_cycles: f64,
    pub echoes: Vec<Echo>,
}

impl EchoConfig {
    /// Default echoes, sampled the way `acquisition` describes
    pub fn from_acquisition(acquisition: &AcquisitionConfig) -> Self {
        Self {
            num_samples: acquisition.num_samples,
            sample_rate_hz: acquisition.sample_rate_hz,
            center_freq_hz: acquisition.transducer_freq_hz,
            ..Self::default()
        }
    }
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            num_samples: 400,
            sample_rate_hz: 8_000_000.0,
            center_freq_hz: 2_250_000.0,
            burst_cycles: 3.0,
            echoes: vec![
                Echo {
                    delay_us: 15.0,
                    amplitude: 1.0,
                },
                Echo {
                    delay_us: 35.0,
                    amplitude: 0.4,
                },
            ],
        }
    }
}

/// Sum of Gaussian-windowed tone bursts, one per echo
pub fn generate_echo_frame(config: &EchoConfig) -> Vec<f64> {
    let fwhm_samples = config.burst_cycles * config.sample_rate_hz / config.center_freq_hz;
    let sigma = fwhm_samples / (2.0 * (2.0 * 2.0f64.ln()).sqrt());
    let omega = 2.0 * PI * config.center_freq_hz / config.sample_rate_hz;

    let mut frame = vec![0.0; config.num_samples];
    for echo in &config.echoes {
        let center = echo.delay_us * 1e-6 * config.sample_rate_hz;
        for (i, sample) in frame.iter_mut().enumerate() {
            let offset = i as f64 - center;
            let gate = (-0.5 * (offset / sigma).powi(2)).exp();
            *sample += echo.amplitude * gate * (omega * offset).cos();
        }
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_length_and_amplitude() {
        let tone = generate_tone(400, 8_000_000.0, 2_250_000.0, 2.0);
        assert_eq!(tone.len(), 400);
        let max = tone.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(max > 1.9 && max <= 2.0, "unexpected peak {}", max);
    }

    #[test]
    fn test_echo_peaks_at_delay() {
        let config = EchoConfig {
            echoes: vec![Echo {
                delay_us: 20.0,
                amplitude: 1.0,
            }],
            ..EchoConfig::default()
        };
        let frame = generate_echo_frame(&config);
        assert_eq!(frame.len(), 400);

        // 20 us at 8 MHz
        assert!((frame[160] - 1.0).abs() < 1e-12);
        assert!(frame[0].abs() < 1e-6);
        assert!(frame[399].abs() < 1e-6);
    }

    #[test]
    fn test_from_acquisition() {
        let acquisition = AcquisitionConfig {
            sample_rate_hz: 20_000_000.0,
            num_samples: 1000,
            transducer_freq_hz: 5_000_000.0,
        };
        let config = EchoConfig::from_acquisition(&acquisition);
        assert_eq!(config.num_samples, 1000);
        assert_eq!(config.sample_rate_hz, 20_000_000.0);
        assert_eq!(config.center_freq_hz, 5_000_000.0);
        assert_eq!(config.echoes.len(), 2);

        let frame = generate_echo_frame(&config);
        assert_eq!(frame.len(), 1000);
        // First echo at 15 us, 20 MHz
        assert!((frame[300] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_echoes_is_silent() {
        let config = EchoConfig {
            echoes: Vec::new(),
            ..EchoConfig::default()
        };
        assert!(generate_echo_frame(&config).iter().all(|&x| x == 0.0));
    }
}
