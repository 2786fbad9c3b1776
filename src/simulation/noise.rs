use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Impairments added to synthetic frames
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct NoiseConfig {
    pub seed: Option<u64>,
    /// Additive white Gaussian noise at this SNR (dB, relative to frame power)
    pub snr_db: Option<f64>,
    /// Constant ADC offset added after the noise
    pub dc_offset: f64,
}

impl NoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_awgn(mut self, snr_db: f64) -> Self {
        self.snr_db = Some(snr_db);
        self
    }

    pub fn with_dc_offset(mut self, offset: f64) -> Self {
        self.dc_offset = offset;
        self
    }
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

pub fn signal_power(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|&x| x * x).sum::<f64>() / signal.len() as f64
}

fn apply_additive_noise(signal: &mut [f64], snr_db: f64, rng: &mut ChaCha8Rng) {
    let sig_power = signal_power(signal);
    if sig_power == 0.0 {
        return;
    }

    let noise_std = (sig_power / 10.0_f64.powf(snr_db / 10.0)).sqrt();
    let Ok(normal) = Normal::new(0.0, noise_std) else {
        log::warn!("Cannot generate noise with std {}", noise_std);
        return;
    };

    for sample in signal.iter_mut() {
        *sample += normal.sample(rng);
    }
}

pub fn apply_noise(signal: &mut [f64], config: &NoiseConfig) {
    let mut rng = create_rng(config.seed);

    if let Some(snr_db) = config.snr_db {
        apply_additive_noise(signal, snr_db, &mut rng);
    }

    if config.dc_offset != 0.0 {
        for sample in signal.iter_mut() {
            *sample += config.dc_offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let config = NoiseConfig::default().with_seed(42).with_awgn(10.0);
        let mut a = vec![1.0; 100];
        let mut b = vec![1.0; 100];
        apply_noise(&mut a, &config);
        apply_noise(&mut b, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_awgn_snr() {
        let clean: Vec<f64> = (0..20_000).map(|i| (i as f64 * 0.3).sin()).collect();
        let mut noisy = clean.clone();
        apply_noise(&mut noisy, &NoiseConfig::default().with_seed(7).with_awgn(10.0));

        let noise: Vec<f64> = noisy.iter().zip(&clean).map(|(n, c)| n - c).collect();
        let snr = 10.0 * (signal_power(&clean) / signal_power(&noise)).log10();
        assert!((snr - 10.0).abs() < 0.5, "measured SNR {} dB", snr);
    }

    #[test]
    fn test_dc_offset() {
        let mut signal = vec![0.0; 10];
        apply_noise(&mut signal, &NoiseConfig::default().with_dc_offset(0.5));
        assert!(signal.iter().all(|&x| x == 0.5));
    }

    #[test]
    fn test_silent_signal_gets_no_noise() {
        let mut signal = vec![0.0; 10];
        apply_noise(&mut signal, &NoiseConfig::default().with_seed(1).with_awgn(0.0));
        assert!(signal.iter().all(|&x| x == 0.0));
    }
}
