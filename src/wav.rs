use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{Result, WeightingError};

/// Decoded WAV file, one `Vec` per channel
#[derive(Debug, Clone)]
pub struct WavData {
    pub sample_rate: u32,
    pub channels: Vec<Vec<f64>>,
}

impl WavData {
    pub fn num_frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }
}

/// Read a WAV file and split it into channels scaled to [-1, 1]
pub fn read_wav(path: impl AsRef<Path>) -> Result<WavData> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let num_channels = spec.channels as usize;
    if num_channels == 0 {
        return Err(WeightingError::Signal(
            "WAV file has no channels".to_string(),
        ));
    }

    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    let mut channels = vec![Vec::with_capacity(interleaved.len() / num_channels); num_channels];
    for frame in interleaved.chunks_exact(num_channels) {
        for (channel, &sample) in channels.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }

    Ok(WavData {
        sample_rate: spec.sample_rate,
        channels,
    })
}

/// Write channels as 32-bit float WAV
///
/// Channels must all have the same length.
pub fn save_wav(path: impl AsRef<Path>, channels: &[Vec<f64>], sample_rate: u32) -> Result<()> {
    let frames = channels.first().map_or(0, Vec::len);
    if channels.iter().any(|c| c.len() != frames) {
        return Err(WeightingError::Signal(
            "channels have different lengths".to_string(),
        ));
    }
    let spec = WavSpec {
        channels: channels.len() as u16,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;

    for i in 0..frames {
        for channel in channels {
            writer.write_sample(channel[i] as f32)?;
        }
    }

    writer.finalize()?;
    Ok(())
}
