//! Configuration for the frame conditioning pipeline.
//!
//! All settings are plain values. A new `PipelineConfig` can be handed to
//! the processor between frames; nothing is shared or mutated behind the
//! pipeline's back.
//!
//! Configuration can be loaded from TOML:
//!
//! ```toml
//! validation = "strict"
//!
//! [acquisition]
//! sample_rate_hz = 8000000
//!
//! [bandpass]
//! low_cutoff = "500kHz"
//! high_cutoff = "3.5MHz"
//! num_taps = 31
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BANDPASS_TAPS, DEFAULT_HILBERT_TAPS, DEFAULT_NUM_SAMPLES, DEFAULT_SAMPLE_RATE_HZ,
    DEFAULT_TRANSDUCER_FREQ_HZ, HIGH_CUTOFF_NYQUIST_FRACTION, LOW_CUTOFF_NYQUIST_FRACTION,
};
use crate::error::{Result, SonoError};
use crate::signal_processing::{BandpassSpec, HilbertSpec};

/// Frequency in Hz
///
/// Any finite value parses; range checks belong to `ValidationMode`.
///
/// # Parsing formats
/// - `2250000` - Hz (no suffix)
/// - `100hz` / `100Hz` - Hz (explicit)
/// - `400khz` / `400kHz` - kilohertz
/// - `2.25mhz` / `2.25MHz` - megahertz
///
/// # Example
/// ```
/// use sonoframe::config::Frequency;
///
/// let f: Frequency = "2.25MHz".parse().unwrap();
/// assert_eq!(f.as_hz(), 2_250_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FrequencyRepr", into = "f64")]
pub struct Frequency(f64);

impl Frequency {
    pub fn from_hz(hz: f64) -> Self {
        Self(hz)
    }

    pub fn as_hz(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= 1e6 {
            write!(f, "{}MHz", self.0 / 1e6)
        } else if self.0 >= 1e3 {
            write!(f, "{}kHz", self.0 / 1e3)
        } else {
            write!(f, "{}Hz", self.0)
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        let (num, scale) = if let Some(num) = lower.strip_suffix("mhz") {
            (num, 1e6)
        } else if let Some(num) = lower.strip_suffix("khz") {
            (num, 1e3)
        } else if let Some(num) = lower.strip_suffix("hz") {
            (num, 1.0)
        } else {
            (lower.as_str(), 1.0)
        };

        let value: f64 = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid frequency: {}", trimmed))?;
        let hz = value * scale;
        if !hz.is_finite() {
            return Err(format!("frequency must be finite: {}", trimmed));
        }
        Ok(Self(hz))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FrequencyRepr {
    Hz(f64),
    Text(String),
}

impl TryFrom<FrequencyRepr> for Frequency {
    type Error = String;

    fn try_from(repr: FrequencyRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            FrequencyRepr::Hz(hz) if hz.is_finite() => Ok(Self(hz)),
            FrequencyRepr::Hz(hz) => Err(format!("frequency must be finite, got {}", hz)),
            FrequencyRepr::Text(s) => s.parse(),
        }
    }
}

impl From<Frequency> for f64 {
    fn from(f: Frequency) -> Self {
        f.0
    }
}

/// How malformed filter parameters are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Design whatever kernel the parameters describe, warning on degenerate ones
    #[default]
    Tolerant,
    /// Reject out-of-range cutoffs and tap counts with `InvalidFilterSpec`
    Strict,
}

/// Full pipeline configuration
///
/// # Example
/// ```
/// use sonoframe::config::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// let spec = config.bandpass_spec();
/// assert_eq!(spec.low_cutoff_hz, 400_000.0);
/// assert_eq!(spec.high_cutoff_hz, 3_600_000.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Validation policy for filter parameters
    pub validation: ValidationMode,
    /// Acquisition parameters of the device
    pub acquisition: AcquisitionConfig,
    /// Bandpass conditioning stage
    pub bandpass: BandpassConfig,
    /// Envelope detection stage
    pub envelope: EnvelopeConfig,
}

/// Acquisition parameters reported by the device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    /// ADC sample rate in Hz
    pub sample_rate_hz: f64,
    /// Samples per acquisition frame
    pub num_samples: usize,
    /// Transducer center frequency in Hz
    pub transducer_freq_hz: f64,
}

/// Bandpass stage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandpassConfig {
    /// Lower cutoff; defaults to 10% of Nyquist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_cutoff: Option<Frequency>,
    /// Upper cutoff; defaults to 90% of Nyquist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_cutoff: Option<Frequency>,
    /// Kernel length (even values are rounded up)
    pub num_taps: usize,
}

/// Envelope stage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// Compute the envelope trace at all
    pub enabled: bool,
    /// Hilbert kernel length (even values are rounded up)
    pub num_taps: usize,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            num_samples: DEFAULT_NUM_SAMPLES,
            transducer_freq_hz: DEFAULT_TRANSDUCER_FREQ_HZ,
        }
    }
}

impl AcquisitionConfig {
    pub fn nyquist_hz(&self) -> f64 {
        self.sample_rate_hz / 2.0
    }
}

impl Default for BandpassConfig {
    fn default() -> Self {
        Self {
            low_cutoff: None,
            high_cutoff: None,
            num_taps: DEFAULT_BANDPASS_TAPS,
        }
    }
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            num_taps: DEFAULT_HILBERT_TAPS,
        }
    }
}

impl PipelineConfig {
    /// Parse a TOML document; missing fields take their defaults
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| SonoError::Config(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        log::info!("Loaded pipeline configuration from {}", path.display());
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| SonoError::Config(e.to_string()))
    }

    /// Low cutoff in Hz, falling back to 10% of Nyquist
    pub fn low_cutoff_hz(&self) -> f64 {
        self.bandpass
            .low_cutoff
            .map(|f| f.as_hz())
            .unwrap_or(self.acquisition.nyquist_hz() * LOW_CUTOFF_NYQUIST_FRACTION)
    }

    /// High cutoff in Hz, falling back to 90% of Nyquist
    pub fn high_cutoff_hz(&self) -> f64 {
        self.bandpass
            .high_cutoff
            .map(|f| f.as_hz())
            .unwrap_or(self.acquisition.nyquist_hz() * HIGH_CUTOFF_NYQUIST_FRACTION)
    }

    pub fn bandpass_spec(&self) -> BandpassSpec {
        BandpassSpec::new(
            self.acquisition.sample_rate_hz,
            self.low_cutoff_hz(),
            self.high_cutoff_hz(),
            self.bandpass.num_taps,
        )
    }

    pub fn hilbert_spec(&self) -> HilbertSpec {
        HilbertSpec::new(self.envelope.num_taps)
    }

    /// Check filter parameters according to the validation mode
    ///
    /// In tolerant mode degenerate parameters are only logged.
    ///
    /// # Errors
    /// Returns `SonoError::InvalidFilterSpec` in strict mode when either
    /// kernel spec is out of range.
    pub fn check(&self) -> Result<()> {
        let bandpass = self.bandpass_spec().validate();
        let hilbert = if self.envelope.enabled {
            self.hilbert_spec().validate()
        } else {
            Ok(())
        };

        match self.validation {
            ValidationMode::Strict => bandpass.and(hilbert),
            ValidationMode::Tolerant => {
                for err in [bandpass, hilbert].into_iter().filter_map(|r| r.err()) {
                    log::warn!("{}; filtering anyway", err);
                }
                Ok(())
            }
        }
    }
}
