use anyhow::Context;
use clap::Parser;
use rolling_stats::Stats;
use serde::Serialize;
use std::path::{Path, PathBuf};

use aweighting::design::design_filter;
use aweighting::signal_processing::{LevelMeter, RealtimeFilter};
use aweighting::wav::{read_wav, save_wav};

#[derive(Parser, Debug)]
#[command(name = "weight_wav")]
#[command(about = "Apply A-weighting to WAV files and report weighted levels", long_about = None)]
struct Args {
    /// WAV files to process
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format: text, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Block length in milliseconds for short-term level statistics
    #[arg(short = 'b', long, default_value = "125")]
    block_ms: f64,

    /// Directory to write A-weighted copies of the input files
    #[arg(short = 'o', long)]
    output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
struct StatsSummary {
    count: usize,
    mean: f64,
    std_dev: f64,
    min: f64,
    max: f64,
}

impl StatsSummary {
    fn from_stats(stats: &Stats<f64>) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChannelLevels {
    channel: usize,
    rms_dbfs: f64,
    peak_dbfs: f64,
    unweighted_rms_dbfs: f64,
    block_rms_dbfs: Option<StatsSummary>,
}

#[derive(Debug, Clone, Serialize)]
struct FileLevels {
    filename: String,
    sample_rate: u32,
    frames: usize,
    channels: Vec<ChannelLevels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    if let Some(ref dir) = args.output_dir {
        std::fs::create_dir_all(dir).context("Failed to create output directory")?;
    }

    let results: Vec<FileLevels> = args
        .files
        .iter()
        .map(|path| {
            let filename = path.display().to_string();
            process_file(path, args.block_ms, args.output_dir.as_deref()).unwrap_or_else(|e| {
                log::error!("{}: {:#}", filename, e);
                FileLevels {
                    filename,
                    sample_rate: 0,
                    frames: 0,
                    channels: Vec::new(),
                    error: Some(format!("{:#}", e)),
                }
            })
        })
        .collect();

    match args.format {
        OutputFormat::Text => print_text(&results),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
    }

    Ok(())
}

fn process_file(
    path: &Path,
    block_ms: f64,
    output_dir: Option<&Path>,
) -> anyhow::Result<FileLevels> {
    let mut data =
        read_wav(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let coefficients = design_filter(data.sample_rate as f64)
        .context("Cannot design A-weighting filter for this sample rate")?
        .coefficients;

    let block_len = ((block_ms / 1000.0) * data.sample_rate as f64)
        .round()
        .max(1.0) as usize;
    let mut channels = Vec::with_capacity(data.channels.len());

    for (index, samples) in data.channels.iter_mut().enumerate() {
        // One filter per channel; delay lines are never shared
        let mut filter = RealtimeFilter::new();
        filter.bind_coefficients(&coefficients);

        let mut unweighted = LevelMeter::new();
        unweighted.add_buffer(samples);

        filter.process_buffer(samples)?;

        let mut weighted = LevelMeter::new();
        let mut block_stats: Stats<f64> = Stats::new();
        for block in samples.chunks(block_len) {
            let mut block_meter = LevelMeter::new();
            block_meter.add_buffer(block);
            weighted.add_buffer(block);
            block_stats.update(block_meter.rms_db());
        }

        channels.push(ChannelLevels {
            channel: index,
            rms_dbfs: weighted.rms_db(),
            peak_dbfs: weighted.peak_db(),
            unweighted_rms_dbfs: unweighted.rms_db(),
            block_rms_dbfs: StatsSummary::from_stats(&block_stats),
        });
    }

    if let Some(dir) = output_dir {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());
        let out_path = dir.join(format!("{}_aweighted.wav", stem));
        save_wav(&out_path, &data.channels, data.sample_rate)
            .with_context(|| format!("Failed to write {}", out_path.display()))?;
        eprintln!("Weighted audio written to {}", out_path.display());
    }

    Ok(FileLevels {
        filename: path.display().to_string(),
        sample_rate: data.sample_rate,
        frames: data.num_frames(),
        channels,
        error: None,
    })
}

fn print_text(results: &[FileLevels]) {
    for result in results {
        println!("=== {} ===", result.filename);
        if let Some(ref error) = result.error {
            println!("  error: {}", error);
            continue;
        }
        println!(
            "  {} Hz, {} frames, {} channel(s)",
            result.sample_rate,
            result.frames,
            result.channels.len()
        );
        for ch in &result.channels {
            println!(
                "  ch{}: {:>7.2} dBFS(A) rms, {:>7.2} dBFS(A) peak, {:>7.2} dBFS unweighted",
                ch.channel, ch.rms_dbfs, ch.peak_dbfs, ch.unweighted_rms_dbfs
            );
            if let Some(ref blocks) = ch.block_rms_dbfs {
                println!(
                    "        blocks: n={} mean {:.2} std {:.2} min {:.2} max {:.2}",
                    blocks.count, blocks.mean, blocks.std_dev, blocks.min, blocks.max
                );
            }
        }
    }
}
