use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use aweighting::design::STANDARD_CURVE;
use aweighting::design::response::theoretical_a_weighting_db;
use aweighting::save_wav;
use aweighting::simulation::{add_gaussian_noise, multitone, sine};
use aweighting::{PoleFrequencies, SampleRate};

#[derive(Parser, Debug)]
#[command(name = "generate_wav")]
#[command(about = "Generate test tones for checking A-weighting implementations")]
struct Args {
    /// Output directory
    #[arg(short, long, default_value = "data/synthetic")]
    output_dir: PathBuf,

    /// Tones in Hz: comma-separated (e.g., "100,1000"), "iec" for the
    /// IEC 61672-1 table frequencies, or a range in octaves (e.g., "125-8000:oct")
    #[arg(short, long, default_value = "iec")]
    tones: String,

    /// Tone amplitude (full scale = 1.0)
    #[arg(short, long, default_value_t = 0.5)]
    amplitude: f64,

    /// Signal duration in seconds
    #[arg(short, long, default_value_t = 1.0)]
    duration: f64,

    /// Sample rate (e.g., "48000", "44.1k")
    #[arg(long, default_value = "48000")]
    sample_rate: SampleRate,

    /// Standard deviation of added Gaussian noise
    #[arg(long)]
    noise: Option<f64>,

    /// Base seed for reproducible noise
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Also write one file with all tones mixed together
    #[arg(long)]
    multitone: bool,

    /// Output filename prefix
    #[arg(long, default_value = "tone")]
    prefix: String,

    /// Generate manifest.json
    #[arg(long)]
    manifest: bool,
}

#[derive(Debug, serde::Serialize)]
struct ManifestEntry {
    file: String,
    frequencies_hz: Vec<f64>,
    /// Level the weighting should apply to each tone
    expected_weighting_db: Vec<f64>,
    seed: Option<u64>,
}

#[derive(Debug, serde::Serialize)]
struct Manifest {
    sample_rate: u32,
    duration: f64,
    amplitude: f64,
    noise_std_dev: Option<f64>,
    files: Vec<ManifestEntry>,
}

fn parse_tones(s: &str) -> Result<Vec<f64>> {
    let tones: Vec<f64> = if s.trim().eq_ignore_ascii_case("iec") {
        STANDARD_CURVE.iter().map(|&(f, _)| f).collect()
    } else if let Some(range) = s.strip_suffix(":oct") {
        let (start, end) = range
            .split_once('-')
            .context("Invalid range format. Use 'start-end:oct'")?;
        let start: f64 = start.trim().parse().context("Invalid start value")?;
        let end: f64 = end.trim().parse().context("Invalid end value")?;
        if !start.is_finite() || start <= 0.0 {
            anyhow::bail!("Range start must be positive");
        }
        if !end.is_finite() || end < start {
            anyhow::bail!("Range end must be finite and not below the start");
        }
        let mut tones = Vec::new();
        let mut f = start;
        // Small slack so an exact octave multiple of `start` lands on `end`
        while f <= end * (1.0 + 1e-9) {
            tones.push(f);
            f *= 2.0;
        }
        tones
    } else {
        s.split(',')
            .map(|p| p.trim().parse::<f64>().context("Invalid tone frequency"))
            .collect::<Result<_>>()?
    };

    if tones.is_empty() {
        anyhow::bail!("No tones given");
    }
    if let Some(bad) = tones.iter().find(|f| !f.is_finite() || **f <= 0.0) {
        anyhow::bail!("Tone frequency must be positive, got {}", bad);
    }
    Ok(tones)
}

fn expected_db(frequencies: &[f64]) -> Vec<f64> {
    frequencies
        .iter()
        .map(|&f| theoretical_a_weighting_db(f, &PoleFrequencies::IEC_61672))
        .collect()
}

/// Add optional noise, write one WAV file and describe it for the manifest
fn write_tone_file(
    args: &Args,
    sample_rate: u32,
    filename: String,
    mut signal: Vec<f64>,
    frequencies: Vec<f64>,
    seed: u64,
) -> Result<ManifestEntry> {
    if let Some(std_dev) = args.noise {
        add_gaussian_noise(&mut signal, std_dev, seed).context("Failed to add noise")?;
    }
    let filepath = args.output_dir.join(&filename);
    save_wav(&filepath, &[signal], sample_rate)
        .with_context(|| format!("Failed to write {}", filepath.display()))?;
    Ok(ManifestEntry {
        file: filename,
        expected_weighting_db: expected_db(&frequencies),
        frequencies_hz: frequencies,
        seed: args.noise.map(|_| seed),
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    fs::create_dir_all(&args.output_dir).context("Failed to create output directory")?;

    let tones = parse_tones(&args.tones)?;
    let sample_rate = args.sample_rate.as_whole_hz();
    let fs_hz = sample_rate as f64;
    let nyquist = fs_hz / 2.0;
    for &f in &tones {
        if f >= nyquist {
            log::warn!(
                "Tone {} Hz is at or above Nyquist ({} Hz) and will alias",
                f,
                nyquist
            );
        }
    }

    let mut manifest_entries = Vec::new();

    for (i, &f) in tones.iter().enumerate() {
        let signal = sine(f, args.amplitude, args.duration, fs_hz);
        let filename = format!("{}_{}hz.wav", args.prefix, f);
        let seed = args.seed + i as u64;
        let entry = write_tone_file(&args, sample_rate, filename, signal, vec![f], seed)?;
        manifest_entries.push(entry);
        eprint!("\rGenerating: {}/{}", i + 1, tones.len());
    }
    eprintln!();

    if args.multitone {
        let mut signal = multitone(&tones, args.duration, fs_hz);
        let gain = args.amplitude * tones.len() as f64;
        for sample in signal.iter_mut() {
            *sample *= gain;
        }
        let filename = format!("{}_multitone.wav", args.prefix);
        let seed = args.seed + tones.len() as u64;
        let entry = write_tone_file(&args, sample_rate, filename, signal, tones.clone(), seed)?;
        manifest_entries.push(entry);
    }

    let total_files = manifest_entries.len();

    if args.manifest {
        let manifest = Manifest {
            sample_rate,
            duration: args.duration,
            amplitude: args.amplitude,
            noise_std_dev: args.noise,
            files: manifest_entries,
        };
        let manifest_path = args.output_dir.join("manifest.json");
        let manifest_json =
            serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
        fs::write(&manifest_path, manifest_json).context("Failed to write manifest")?;
        eprintln!("Manifest written to: {}", manifest_path.display());
    }

    eprintln!(
        "Generated {} files in {}",
        total_files,
        args.output_dir.display()
    );
    Ok(())
}
