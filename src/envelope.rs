// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

/// A linear fade envelope over a buffer of known length.
/// The gain rises from zero to one over the first `fade_frames` frames,
/// stays at one, and falls back towards zero over the last `fade_frames` frames.
///
/// The arithmetic is not clamped: when the buffer is shorter than two fades,
/// the fade-in wins for the first `fade_frames` frames and the fade-out
/// covers whatever is left.
///
/// # Example
///
/// ```
/// use syntxt_tone::envelope::LinearFade;
/// let fade = LinearFade::new(4);
/// let gains: Vec<f64> = (0..10).map(|i| fade.gain(i, 10)).collect();
/// assert_eq!(
///     gains,
///     vec![0.0, 0.25, 0.5, 0.75, 1.0, 1.0, 1.0, 0.75, 0.5, 0.25]
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearFade {
    /// Number of frames the fade-in and the fade-out each take.
    pub fade_frames: usize,
}

impl LinearFade {
    pub fn new(fade_frames: usize) -> Self {
        Self { fade_frames }
    }

    /// Gain at `frame` of a buffer holding `total_frames` frames.
    pub fn gain(&self, frame: usize, total_frames: usize) -> f64 {
        let i = frame as i64;
        let total = total_frames as i64;
        let fade = self.fade_frames as i64;
        if i < fade {
            // Rise from 0.0 to 1.0
            i as f64 / fade as f64
        } else if i > total - fade {
            // Count down to 0.0 at the end of the buffer
            (total - i) as f64 / fade as f64
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plateau_is_exactly_one() {
        let fade = LinearFade::new(1600);
        let total = 10_000;
        for i in 1600..=(total - 1600) {
            assert_eq!(fade.gain(i, total), 1.0, "frame {}", i);
        }
    }

    #[test]
    fn ramps_are_linear() {
        let fade = LinearFade::new(1600);
        assert_eq!(fade.gain(0, 10_000), 0.0);
        assert_eq!(fade.gain(800, 10_000), 0.5);
        assert_eq!(fade.gain(1599, 10_000), 1599.0 / 1600.0);
        assert_eq!(fade.gain(9_200, 10_000), 0.5);
        assert_eq!(fade.gain(9_999, 10_000), 1.0 / 1600.0);
    }

    /// Short buffers keep the unclamped overlap behaviour.
    #[test]
    fn overlapping_fades() {
        let fade = LinearFade::new(1600);
        // Shorter than one fade: only the fade-in applies.
        assert_eq!(fade.gain(999, 1000), 999.0 / 1600.0);
        // Between one and two fades: the fade-out starts right after the fade-in.
        assert_eq!(fade.gain(1600, 2000), 400.0 / 1600.0);
        assert_eq!(fade.gain(1999, 2000), 1.0 / 1600.0);
    }
}
