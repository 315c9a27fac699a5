//! Short-time magnitude transform.
//!
//! Computes the magnitude spectrogram used as the raw material for waveform
//! envelopes: a Hann-windowed, centered short-time Fourier transform with the
//! transform size capped at [`MAX_FFT_SIZE`] but shrunk for very short inputs.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::error::{KitforgeError, Result};

/// Upper bound on the transform size.
pub const MAX_FFT_SIZE: usize = 2048;

/// Hop size as a fraction of the transform size.
pub const HOP_DIVISOR: usize = 4;

/// Smallest transform worth computing; shorter signals are rejected.
const MIN_FFT_SIZE: usize = 4;

/// Magnitude spectrogram: one vector of `num_bins` magnitudes per time frame.
#[derive(Debug, Clone)]
pub struct Spectrogram {
    pub frames: Vec<Vec<f32>>,
    pub num_bins: usize,
}

impl Spectrogram {
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }
}

/// Transform size for a signal of `len` samples: capped at [`MAX_FFT_SIZE`],
/// shrunk to half the signal length for very short inputs.
pub fn fft_size_for(len: usize) -> usize {
    MAX_FFT_SIZE.min(len / 2)
}

/// Compute the magnitude spectrogram of a mono signal.
///
/// Frames are centered: the signal is reflect-padded by half the transform
/// size on both ends, giving `1 + len / hop` frames for an even transform
/// size. Each output vector holds `fft_size / 2 + 1` non-negative bin
/// magnitudes.
///
/// # Errors
/// * `AudioTooShort` - If the signal cannot fill a minimum-size transform
pub fn magnitude_spectrogram(samples: &[f32]) -> Result<Spectrogram> {
    let len = samples.len();
    let fft_size = fft_size_for(len);

    if fft_size < MIN_FFT_SIZE {
        return Err(KitforgeError::AudioTooShort { samples: len });
    }

    let hop = fft_size / HOP_DIVISOR;
    let num_bins = fft_size / 2 + 1;

    let padded = reflect_pad(samples, fft_size / 2);
    let num_frames = (padded.len() - fft_size) / hop + 1;
    let window = hann_window(fft_size);

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(fft_size);

    let mut buffer = vec![Complex::new(0.0f32, 0.0f32); fft_size];
    let mut frames = Vec::with_capacity(num_frames);

    for t in 0..num_frames {
        let start = t * hop;
        for (i, slot) in buffer.iter_mut().enumerate() {
            *slot = Complex::new(padded[start + i] * window[i], 0.0);
        }

        fft.process(&mut buffer);

        let magnitudes: Vec<f32> = buffer[..num_bins].iter().map(|c| c.norm()).collect();
        frames.push(magnitudes);
    }

    Ok(Spectrogram { frames, num_bins })
}

/// Periodic Hann window of length `size`.
fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|n| {
            let phase = 2.0 * std::f32::consts::PI * n as f32 / size as f32;
            0.5 * (1.0 - phase.cos())
        })
        .collect()
}

/// Pad a signal by `pad` samples on each side, mirroring about the endpoints
/// without repeating them. Requires `pad < samples.len()`, which holds because
/// the pad is at most a quarter of the signal length.
fn reflect_pad(samples: &[f32], pad: usize) -> Vec<f32> {
    let len = samples.len();
    let mut padded = Vec::with_capacity(len + 2 * pad);

    for i in 0..pad {
        padded.push(samples[pad - i]);
    }
    padded.extend_from_slice(samples);
    for j in 0..pad {
        padded.push(samples[len - 2 - j]);
    }

    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    fn sine(freq: f32, sample_rate: u32, len: usize) -> Vec<f32> {
        let w = 2.0 * std::f32::consts::PI * freq / sample_rate as f32;
        (0..len).map(|i| (w * i as f32).sin()).collect()
    }

    #[test_case(10_000, 2048; "long signal uses the cap")]
    #[test_case(4096, 2048; "exactly twice the cap")]
    #[test_case(100, 50; "short signal shrinks")]
    fn test_fft_size_for(len: usize, expected: usize) {
        assert_eq!(fft_size_for(len), expected);
    }

    #[test]
    fn test_spectrogram_shape() {
        let samples = sine(440.0, 22050, 10_000);
        let spec = magnitude_spectrogram(&samples).unwrap();

        // fft = 2048, hop = 512
        assert_eq!(spec.num_bins, 1025);
        assert_eq!(spec.num_frames(), 10_000 / 512 + 1);
        for frame in &spec.frames {
            assert_eq!(frame.len(), spec.num_bins);
        }
    }

    #[test]
    fn test_spectrogram_shape_short_signal() {
        let samples = sine(440.0, 8000, 100);
        let spec = magnitude_spectrogram(&samples).unwrap();

        // fft = 50, hop = 12
        assert_eq!(spec.num_bins, 26);
        assert_eq!(spec.num_frames(), 100 / 12 + 1);
    }

    #[test]
    fn test_too_short_signal_is_rejected() {
        let samples = vec![0.1f32; 7];
        let result = magnitude_spectrogram(&samples);
        assert!(matches!(
            result,
            Err(KitforgeError::AudioTooShort { samples: 7 })
        ));
    }

    #[test]
    fn test_sine_peak_lands_in_expected_bin() {
        let sample_rate = 8000;
        let samples = sine(440.0, sample_rate, 8192);
        let spec = magnitude_spectrogram(&samples).unwrap();

        // Bin width is 8000 / 2048 ~ 3.9 Hz, so 440 Hz lands near bin 112.
        let mid = &spec.frames[spec.num_frames() / 2];
        let peak = mid
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();

        let expected = (440.0 * 2048.0 / sample_rate as f32).round() as usize;
        assert!(
            peak.abs_diff(expected) <= 1,
            "peak bin {} not near {}",
            peak,
            expected
        );
    }

    #[test]
    fn test_magnitudes_are_non_negative() {
        let samples = sine(100.0, 8000, 1000);
        let spec = magnitude_spectrogram(&samples).unwrap();
        for frame in &spec.frames {
            for &m in frame {
                assert!(m >= 0.0);
            }
        }
    }

    #[test]
    fn test_reflect_pad_mirrors_without_edges() {
        let padded = reflect_pad(&[1.0, 2.0, 3.0, 4.0, 5.0], 2);
        assert_eq!(padded, vec![3.0, 2.0, 1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0]);
    }

    #[test]
    fn test_hann_window_endpoints() {
        let w = hann_window(8);
        assert_abs_diff_eq!(w[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(w[4], 1.0, epsilon = 1e-6);
    }
}
