use std::io::Write;
use std::path::PathBuf;
use std::thread;

use clap::Parser;
use crossbeam_channel::{Receiver, bounded};
use rolling_stats::Stats;

use sonoframe::config::{Frequency, PipelineConfig, ValidationMode};
use sonoframe::output::{FrameSummary, OutputFormat, create_formatter};
use sonoframe::source::{FrameSource, TextFrameSource};
use sonoframe::{ConditionedFrame, FrameProcessor, save_traces_wav};

#[derive(Parser, Debug)]
#[command(name = "sonoframe")]
#[command(about = "Bandpass and envelope conditioning for ultrasound A-mode frames", long_about = None)]
struct Args {
    /// Text file with one frame per line (comma or whitespace separated)
    input: Option<PathBuf>,

    /// Generate this many synthetic echo frames instead of reading a file
    #[cfg(feature = "simulation")]
    #[arg(long, conflicts_with = "input")]
    synthetic: Option<usize>,

    /// Seed for synthetic frame noise
    #[cfg(feature = "simulation")]
    #[arg(long, default_value = "1")]
    seed: u64,

    /// TOML pipeline configuration
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// ADC sample rate (e.g. "8MHz", "8000000")
    #[arg(long)]
    sample_rate: Option<Frequency>,

    /// Bandpass lower cutoff (default: 10% of Nyquist)
    #[arg(long)]
    low_cutoff: Option<Frequency>,

    /// Bandpass upper cutoff (default: 90% of Nyquist)
    #[arg(long)]
    high_cutoff: Option<Frequency>,

    /// Bandpass kernel taps (rounded up to odd)
    #[arg(long)]
    bandpass_taps: Option<usize>,

    /// Hilbert kernel taps (rounded up to odd)
    #[arg(long)]
    hilbert_taps: Option<usize>,

    /// Skip envelope detection
    #[arg(long)]
    no_envelope: bool,

    /// Reject out-of-range filter parameters instead of filtering anyway
    #[arg(long)]
    strict: bool,

    /// Output format: text, json, csv
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print every sample of every trace instead of a per-frame summary
    #[arg(long)]
    traces: bool,

    /// Write the last conditioned frame to a WAV file
    #[arg(long)]
    dump_wav: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = build_config(&args)?;

    if args.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let source = open_source(&args, &config)?;
    let processor = FrameProcessor::new(config)?;

    let (frame_tx, frame_rx) = bounded(16);
    let reader = thread::spawn(move || -> anyhow::Result<()> {
        let mut source = source;
        while let Some(frame) = source.next_frame()? {
            if frame_tx.send(frame).is_err() {
                break;
            }
        }
        Ok(())
    });

    let last_frame = run_processing_loop(frame_rx, processor, &args)?;

    reader
        .join()
        .map_err(|_| anyhow::anyhow!("frame reader thread panicked"))??;

    if let (Some(path), Some((frame, sample_rate))) = (&args.dump_wav, last_frame) {
        save_traces_wav(path, &frame, sample_rate)?;
    }

    Ok(())
}

fn build_config(args: &Args) -> anyhow::Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(rate) = args.sample_rate {
        config.acquisition.sample_rate_hz = rate.as_hz();
    }
    if args.low_cutoff.is_some() {
        config.bandpass.low_cutoff = args.low_cutoff;
    }
    if args.high_cutoff.is_some() {
        config.bandpass.high_cutoff = args.high_cutoff;
    }
    if let Some(taps) = args.bandpass_taps {
        config.bandpass.num_taps = taps;
    }
    if let Some(taps) = args.hilbert_taps {
        config.envelope.num_taps = taps;
    }
    if args.no_envelope {
        config.envelope.enabled = false;
    }
    if args.strict {
        config.validation = ValidationMode::Strict;
    }

    Ok(config)
}

#[cfg(feature = "simulation")]
fn open_source(args: &Args, config: &PipelineConfig) -> anyhow::Result<Box<dyn FrameSource>> {
    use sonoframe::simulation::{EchoConfig, NoiseConfig, SyntheticFrameSource};

    if let Some(num_frames) = args.synthetic {
        log::info!("Generating {} synthetic frames", num_frames);
        let noise = NoiseConfig::default().with_seed(args.seed).with_awgn(15.0);
        return Ok(Box::new(SyntheticFrameSource::new(
            EchoConfig::from_acquisition(&config.acquisition),
            noise,
            num_frames,
        )));
    }
    open_file_source(args)
}

#[cfg(not(feature = "simulation"))]
fn open_source(args: &Args, _config: &PipelineConfig) -> anyhow::Result<Box<dyn FrameSource>> {
    open_file_source(args)
}

fn open_file_source(args: &Args) -> anyhow::Result<Box<dyn FrameSource>> {
    match &args.input {
        Some(path) => {
            log::info!("Reading frames from {}", path.display());
            Ok(Box::new(TextFrameSource::open(path)?))
        }
        None => anyhow::bail!("No input file given"),
    }
}

fn run_processing_loop(
    frame_rx: Receiver<Vec<f64>>,
    mut processor: FrameProcessor,
    args: &Args,
) -> anyhow::Result<Option<(ConditionedFrame, u32)>> {
    let sample_rate_hz = processor.config().acquisition.sample_rate_hz;
    let formatter = create_formatter(args.format, args.verbose > 0);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let header = if args.traces {
        formatter.traces_header()
    } else {
        formatter.header()
    };
    if let Some(header) = header {
        writeln!(out, "{}", header)?;
    }

    let mut peak_stats: Stats<f64> = Stats::new();
    let mut last_frame = None;

    for (index, raw) in frame_rx.iter().enumerate() {
        let frame = processor.process_frame(&raw);
        let summary = FrameSummary::from_frame(index as u64, &frame, sample_rate_hz);

        if let Some(peak) = summary.peak_envelope {
            peak_stats.update(peak);
        }

        if args.traces {
            writeln!(out, "{}", formatter.format_traces(&summary, &frame))?;
        } else {
            writeln!(out, "{}", formatter.format(&summary))?;
        }

        last_frame = Some(frame);
    }

    let (hits, misses) = processor.kernel_cache_stats();
    log::info!(
        "Processed {} frames ({} kernel designs, {} reuses)",
        processor.frames_processed(),
        misses,
        hits
    );
    if peak_stats.count > 0 {
        log::info!(
            "Peak envelope: mean {:.4}, std {:.4}, min {:.4}, max {:.4}",
            peak_stats.mean,
            peak_stats.std_dev,
            peak_stats.min,
            peak_stats.max
        );
    }

    Ok(last_frame.map(|frame| (frame, sample_rate_hz.round() as u32)))
}
