//! Amplitude-envelope generation.
//!
//! Turns a sample file into the precomputed JSON artifact the front-end
//! renders as a waveform: the magnitude spectrogram of the audio, averaged
//! over fixed-size blocks of time frames.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::audio;
use crate::error::{KitforgeError, Result};
use crate::spectral;

/// Default number of consecutive time frames averaged into one envelope entry.
pub const DEFAULT_WINDOW: usize = 200;

/// The JSON artifact written next to each sample:
/// `{"amplitude_envelope": [[f32, ...], ...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeEnvelope {
    pub amplitude_envelope: Vec<Vec<f32>>,
}

impl AmplitudeEnvelope {
    pub fn num_blocks(&self) -> usize {
        self.amplitude_envelope.len()
    }
}

/// Average a frame sequence over contiguous blocks of `window` frames.
///
/// Pure function over the raw magnitude matrix: partitions `frames` into
/// blocks of `window` (the final block may be shorter) and averages each
/// frequency bin within a block, yielding one vector per block. The output
/// holds `ceil(frames.len() / window)` vectors, each as long as the input
/// frames.
///
/// # Errors
/// * `InvalidWindow` - If `window` is zero
pub fn average_blocks(frames: &[Vec<f32>], window: usize) -> Result<Vec<Vec<f32>>> {
    if window == 0 {
        return Err(KitforgeError::InvalidWindow);
    }

    let mut blocks = Vec::with_capacity(frames.len().div_ceil(window));

    for chunk in frames.chunks(window) {
        let num_bins = chunk[0].len();
        let mut avg = vec![0.0f32; num_bins];
        for frame in chunk {
            for (slot, &value) in avg.iter_mut().zip(frame.iter()) {
                *slot += value;
            }
        }
        for slot in &mut avg {
            *slot /= chunk.len() as f32;
        }
        blocks.push(avg);
    }

    Ok(blocks)
}

/// Compute the envelope of a decoded signal.
pub fn compute(samples: &[f32], window: usize) -> Result<AmplitudeEnvelope> {
    let spectrogram = spectral::magnitude_spectrogram(samples)?;
    let blocks = average_blocks(&spectrogram.frames, window)?;

    Ok(AmplitudeEnvelope {
        amplitude_envelope: blocks,
    })
}

/// Generate the envelope JSON for one sample file.
///
/// Decodes `input`, computes the envelope with the given averaging window,
/// and writes the artifact wholesale to `output`. The JSON is serialized in
/// memory before the file is touched, so a failed run leaves no partial
/// output and an existing file untouched.
pub fn generate(input: &Path, output: &Path, window: usize) -> Result<()> {
    let signal = audio::decode_wav(input)?;
    debug!(
        "{}: {} samples at {} Hz",
        input.display(),
        signal.len(),
        signal.sample_rate
    );

    let envelope = compute(&signal.samples, window)?;
    let json = serde_json::to_vec(&envelope)?;
    fs::write(output, json)?;

    debug!(
        "{}: {} envelope blocks",
        output.display(),
        envelope.num_blocks()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn constant_frames(num_frames: usize, num_bins: usize) -> Vec<Vec<f32>> {
        (0..num_frames)
            .map(|t| vec![t as f32; num_bins])
            .collect()
    }

    #[test_case(10, 3, 4; "partial final block")]
    #[test_case(9, 3, 3; "exact multiple")]
    #[test_case(2, 200, 1; "window larger than input")]
    #[test_case(5, 1, 5; "window of one")]
    fn test_block_count_is_ceil(num_frames: usize, window: usize, expected: usize) {
        let frames = constant_frames(num_frames, 4);
        let blocks = average_blocks(&frames, window).unwrap();
        assert_eq!(blocks.len(), expected);
    }

    #[test]
    fn test_block_vectors_keep_bin_count() {
        let frames = constant_frames(7, 11);
        let blocks = average_blocks(&frames, 3).unwrap();
        for block in &blocks {
            assert_eq!(block.len(), 11);
        }
    }

    #[test]
    fn test_average_values() {
        // Frames [0,0], [1,1], [2,2], [3,3] with window 2:
        // blocks [0.5, 0.5] and [2.5, 2.5].
        let frames = constant_frames(4, 2);
        let blocks = average_blocks(&frames, 2).unwrap();

        assert_abs_diff_eq!(blocks[0][0], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(blocks[0][1], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(blocks[1][0], 2.5, epsilon = 1e-6);
    }

    #[test]
    fn test_short_final_block_averages_its_own_length() {
        // Frames [0], [1], [2] with window 2: final block is just [2].
        let frames = constant_frames(3, 1);
        let blocks = average_blocks(&frames, 2).unwrap();

        assert_abs_diff_eq!(blocks[0][0], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(blocks[1][0], 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let frames = constant_frames(4, 2);
        assert!(matches!(
            average_blocks(&frames, 0),
            Err(KitforgeError::InvalidWindow)
        ));
    }

    #[test]
    fn test_empty_frames_yield_empty_envelope() {
        let blocks = average_blocks(&[], 200).unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let envelope = AmplitudeEnvelope {
            amplitude_envelope: vec![vec![1.0, 2.0], vec![3.0, 4.0]],
        };
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(json, r#"{"amplitude_envelope":[[1.0,2.0],[3.0,4.0]]}"#);
    }

    #[test]
    fn test_compute_matches_spectrogram_shape() {
        let samples: Vec<f32> = (0..10_000)
            .map(|i| (0.05 * i as f32).sin())
            .collect();
        let spec = crate::spectral::magnitude_spectrogram(&samples).unwrap();

        let envelope = compute(&samples, DEFAULT_WINDOW).unwrap();
        assert_eq!(
            envelope.num_blocks(),
            spec.num_frames().div_ceil(DEFAULT_WINDOW)
        );
        for block in &envelope.amplitude_envelope {
            assert_eq!(block.len(), spec.num_bins);
        }
    }
}
