//! Audio file decoding.
//!
//! Reads WAV sample files and converts them to a mono 32-bit float signal
//! for spectral analysis. Multi-channel files are mixed down by averaging
//! channels per frame; no resampling is performed.

use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::error::{KitforgeError, Result};

/// A decoded audio file: mono samples in `[-1, 1]` plus the source rate.
#[derive(Debug, Clone)]
pub struct MonoSignal {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl MonoSignal {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of the signal in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Decode a WAV file into a mono float signal.
///
/// Accepts 8/16/24/32-bit integer PCM and 32-bit IEEE float.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidAudio` - If the file is not a readable WAV file
/// * `UnsupportedFormat` - If the bit depth is not supported
/// * `EmptyAudio` - If the file contains no frames
pub fn decode_wav(path: &Path) -> Result<MonoSignal> {
    if !path.exists() {
        return Err(KitforgeError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let reader = WavReader::open(path).map_err(|e| KitforgeError::InvalidAudio {
        reason: format!("Failed to open WAV file: {}", e),
        source: Some(Box::new(e)),
    })?;

    let spec = reader.spec();
    let channels = spec.channels as usize;
    let sample_rate = spec.sample_rate;

    let interleaved = read_samples_as_f32(reader, spec.bits_per_sample, spec.sample_format)?;

    if interleaved.is_empty() || channels == 0 {
        return Err(KitforgeError::EmptyAudio);
    }

    let samples = mixdown(&interleaved, channels);

    Ok(MonoSignal {
        samples,
        sample_rate,
    })
}

/// Read samples from a WAV reader and convert to f32
fn read_samples_as_f32<R: std::io::Read>(
    mut reader: WavReader<R>,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<Vec<f32>> {
    match sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(|e| KitforgeError::InvalidAudio {
                reason: format!("Failed to read float samples: {}", e),
                source: Some(Box::new(e)),
            }),
        SampleFormat::Int => match bits_per_sample {
            8 => reader
                .samples::<i8>()
                .map(|s| s.map(|v| v as f32 / 128.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| KitforgeError::InvalidAudio {
                    reason: format!("Failed to read 8-bit samples: {}", e),
                    source: Some(Box::new(e)),
                }),
            16 => reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / 32768.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| KitforgeError::InvalidAudio {
                    reason: format!("Failed to read 16-bit samples: {}", e),
                    source: Some(Box::new(e)),
                }),
            24 => {
                // 24-bit stored as i32 in hound
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / 8388608.0))
                    .collect::<std::result::Result<Vec<f32>, _>>()
                    .map_err(|e| KitforgeError::InvalidAudio {
                        reason: format!("Failed to read 24-bit samples: {}", e),
                        source: Some(Box::new(e)),
                    })
            }
            32 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / 2147483648.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| KitforgeError::InvalidAudio {
                    reason: format!("Failed to read 32-bit int samples: {}", e),
                    source: Some(Box::new(e)),
                }),
            _ => Err(KitforgeError::UnsupportedFormat {
                format: format!("{}-bit integer audio", bits_per_sample),
            }),
        },
    }
}

/// Mix interleaved samples down to mono by averaging channels per frame.
fn mixdown(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }

    interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hound::{WavSpec, WavWriter};
    use tempfile::tempdir;

    fn write_wav_i16(path: &Path, channels: u16, sample_rate: u32, samples: &[i16]) {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_decode_mono_16bit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        write_wav_i16(&path, 1, 44100, &[0, 16384, -16384, 32767]);

        let signal = decode_wav(&path).unwrap();
        assert_eq!(signal.len(), 4);
        assert_eq!(signal.sample_rate, 44100);
        assert_abs_diff_eq!(signal.samples[1], 0.5, epsilon = 1e-4);
        assert_abs_diff_eq!(signal.samples[2], -0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_decode_stereo_mixdown() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        // Frames: (L=1.0-ish, R=0.0), (L=-0.5, R=0.5)
        write_wav_i16(&path, 2, 22050, &[32767, 0, -16384, 16384]);

        let signal = decode_wav(&path).unwrap();
        assert_eq!(signal.len(), 2);
        assert_abs_diff_eq!(signal.samples[0], 0.5, epsilon = 1e-3);
        assert_abs_diff_eq!(signal.samples[1], 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_decode_missing_file() {
        let result = decode_wav(Path::new("/nonexistent/kick.wav"));
        assert!(matches!(result, Err(KitforgeError::FileNotFound { .. })));
    }

    #[test]
    fn test_decode_empty_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.wav");
        write_wav_i16(&path, 1, 44100, &[]);

        let result = decode_wav(&path);
        assert!(matches!(result, Err(KitforgeError::EmptyAudio)));
    }

    #[test]
    fn test_decode_garbage_is_invalid_audio() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.wav");
        std::fs::write(&path, b"not a wav file at all").unwrap();

        let result = decode_wav(&path);
        assert!(matches!(result, Err(KitforgeError::InvalidAudio { .. })));
    }
}
