use aweighting::RealtimeFilter;
use aweighting::design::design_filter;
use std::hint::black_box;
use std::time::Instant;

const SAMPLE_RATE: f64 = 48000.0;
const NUM_SAMPLES: usize = 1_000_000;

fn bench_realtime_process() -> anyhow::Result<()> {
    let designed = design_filter(SAMPLE_RATE)?;
    let mut filter = RealtimeFilter::new();
    filter.bind_coefficients(&designed.coefficients);

    // Warm up caches and the branch predictor
    for i in 0..10_000 {
        black_box(filter.process(black_box((i as f64 * 0.001).sin()))?);
    }
    filter.reset();

    let t0 = Instant::now();
    let mut checksum = 0.0f64;
    for i in 0..NUM_SAMPLES {
        let x = black_box((i as f64 * 0.001).sin());
        checksum += filter.process(x)?;
    }
    let elapsed = t0.elapsed();
    black_box(checksum);

    let samples_per_sec = NUM_SAMPLES as f64 / elapsed.as_secs_f64();
    println!(
        "RealtimeFilter::process: {} samples in {:.3?} ({:.0} ns/sample)",
        NUM_SAMPLES,
        elapsed,
        elapsed.as_secs_f64() * 1e9 / NUM_SAMPLES as f64
    );
    println!("Samples per second: {:.0}", samples_per_sec);
    println!(
        "Real-time ratio at {} Hz: {:.1}x",
        SAMPLE_RATE,
        samples_per_sec / SAMPLE_RATE
    );
    Ok(())
}

fn bench_process_buffer() -> anyhow::Result<()> {
    let designed = design_filter(SAMPLE_RATE)?;
    let mut filter = RealtimeFilter::new();
    filter.bind_coefficients(&designed.coefficients);

    let block: Vec<f64> = (0..512).map(|i| (i as f64 * 0.01).sin()).collect();
    let iters = NUM_SAMPLES / block.len();

    let t0 = Instant::now();
    let mut checksum = 0.0f64;
    for _ in 0..iters {
        let mut buf = block.clone();
        filter.process_buffer(&mut buf)?;
        checksum += buf[0];
    }
    let elapsed = t0.elapsed();
    black_box(checksum);

    let samples = iters * block.len();
    println!(
        "process_buffer (512-sample blocks): {} samples in {:.3?}, {:.1}x real time",
        samples,
        elapsed,
        samples as f64 / elapsed.as_secs_f64() / SAMPLE_RATE
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    bench_realtime_process()?;
    bench_process_buffer()?;
    Ok(())
}
