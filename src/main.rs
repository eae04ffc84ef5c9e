use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use aweighting::config::{DesignConfig, SampleRate};
use aweighting::design::{self, ConformancePoint, DesignedFilter};
use aweighting::export::CoefficientExport;

#[derive(Parser, Debug)]
#[command(name = "aweighting")]
#[command(about = "Design an IEC 61672-1 A-weighting IIR filter", long_about = None)]
struct Args {
    /// Sample rate (e.g., "48000", "44.1k"); overrides the config file
    #[arg(short = 'r', long)]
    sample_rate: Option<SampleRate>,

    /// TOML design configuration (sample_rate, [poles])
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write the coefficient export record (JSON) to this file
    #[arg(short = 'e', long)]
    export: Option<PathBuf>,

    /// Write a frequency-response sweep (CSV) to this file
    #[arg(long)]
    response: Option<PathBuf>,

    /// Number of points in the response sweep
    #[arg(long, default_value = "8192")]
    points: usize,

    /// Report format: text, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct DesignReport {
    sample_rate: f64,
    poles_hz: [f64; 4],
    order: usize,
    b: Vec<f64>,
    a: Vec<f64>,
    stable: bool,
    max_pole_radius: f64,
    conformance: Vec<ConformancePoint>,
}

impl DesignReport {
    fn new(filter: &DesignedFilter) -> Self {
        let coefficients = &filter.coefficients;
        let max_pole_radius = coefficients
            .poles()
            .iter()
            .map(|p| p.norm())
            .fold(0.0, f64::max);
        Self {
            sample_rate: coefficients.sample_rate(),
            poles_hz: filter.poles.as_array(),
            order: coefficients.order(),
            b: coefficients.b().to_vec(),
            a: coefficients.a().to_vec(),
            stable: coefficients.is_stable(),
            max_pole_radius,
            conformance: design::conformance(coefficients),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => DesignConfig::load(path).context("Failed to load config file")?,
        None => DesignConfig::default(),
    };
    if let Some(rate) = args.sample_rate {
        config.sample_rate = rate.as_hz();
    }

    let filter = design::design_from_config(&config).context("Filter design failed")?;
    let report = DesignReport::new(&filter);

    match args.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(ref path) = args.export {
        CoefficientExport::from_coefficients(&filter.coefficients)
            .write(path)
            .context("Failed to export coefficients")?;
        eprintln!("Coefficients exported to {}", path.display());
    }

    if let Some(ref path) = args.response {
        write_response_csv(path, &filter, args.points)?;
        eprintln!("Response sweep written to {}", path.display());
    }

    Ok(())
}

fn print_text(report: &DesignReport) {
    let [f1, f2, f3, f4] = report.poles_hz;
    println!("=== A-weighting filter (IEC 61672-1) ===");
    println!("Sample rate: {} Hz", report.sample_rate);
    println!(
        "Pole frequencies: f1={} f2={} f3={} f4={} Hz",
        f1, f2, f3, f4
    );
    println!("Filter order: {}", report.order);
    println!();
    println!("Numerator (b): {} coefficients", report.b.len());
    for (i, c) in report.b.iter().enumerate() {
        println!("  b[{}] = {:>22.15e}", i, c);
    }
    println!("Denominator (a): {} coefficients", report.a.len());
    for (i, c) in report.a.iter().enumerate() {
        println!("  a[{}] = {:>22.15e}", i, c);
    }
    println!();
    println!(
        "Stable: {} (largest pole radius {:.6})",
        report.stable, report.max_pole_radius
    );
    println!();
    println!("Accuracy at IEC 61672-1 reference frequencies:");
    println!("Freq (Hz) | IEC Ref | Filter | Error (dB)");
    println!("{}", "-".repeat(45));
    for point in &report.conformance {
        println!(
            "{:9.1} | {:7.1} | {:6.1} | {:5.2}",
            point.frequency_hz,
            point.reference_db,
            point.measured_db,
            point.error_db.abs()
        );
    }
}

fn write_response_csv(path: &Path, filter: &DesignedFilter, points: usize) -> anyhow::Result<()> {
    let mut file = fs::File::create(path).context("Failed to create response file")?;
    writeln!(
        file,
        "frequency_hz,magnitude_db,phase_degrees,theoretical_db"
    )?;
    for point in design::sweep(&filter.coefficients, points) {
        writeln!(
            file,
            "{},{},{},{}",
            point.frequency_hz,
            point.magnitude_db,
            point.phase_degrees,
            design::response::theoretical_a_weighting_db(point.frequency_hz, &filter.poles)
        )?;
    }
    Ok(())
}
