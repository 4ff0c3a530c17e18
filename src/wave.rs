// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! This is the namespace for all parts dealing with data in sampled waves.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Number of frames per second of every buffer in this crate.
/// Should be a multiple of 8.
pub const SAMPLE_RATE: u32 = 44104;

/// Number of bytes needed for `msecs` milliseconds of interleaved 8-bit stereo audio,
/// rounded up to the next whole byte.
///
/// ```
/// use syntxt_tone::wave::pcm_byte_len;
/// assert_eq!(pcm_byte_len(1000), 88208);
/// assert_eq!(pcm_byte_len(1), 89);
/// ```
pub fn pcm_byte_len(msecs: u64) -> usize {
    let exact_times_1000 = 2 * u64::from(SAMPLE_RATE) * msecs;
    ((exact_times_1000 + 999) / 1000) as usize
}

/// The raw format every audio line is opened with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PcmFormat {
    /// Frames per second.
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub channels: u16,
    pub signed: bool,
    pub big_endian: bool,
}

impl Default for PcmFormat {
    /// 44104 Hz, 8 bit, stereo, signed, little endian.
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            bits_per_sample: 8,
            channels: 2,
            signed: true,
            big_endian: false,
        }
    }
}

/// Which speaker a tone is routed to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Channel {
    Left,
    Right,
    Stereo,
}

impl Channel {
    /// The pan control value that routes a line to this channel.
    pub fn pan(self) -> f64 {
        match self {
            Channel::Left => -1.0,
            Channel::Right => 1.0,
            Channel::Stereo => 0.0,
        }
    }

    /// Offset within a frame of the byte that must be silenced when routing
    /// to this channel without pan control.
    fn silenced_offset(self) -> Option<usize> {
        match self {
            Channel::Left => Some(1),
            Channel::Right => Some(0),
            Channel::Stereo => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Left => "left",
            Channel::Right => "right",
            Channel::Stereo => "stereo",
        };
        f.write_str(name)
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Channel::Left),
            "right" => Ok(Channel::Right),
            "stereo" => Ok(Channel::Stereo),
            _ => Err(format!(
                "unknown channel '{}', expected left, right or stereo",
                s
            )),
        }
    }
}

/// Convenience type for making things stereo, e.g. individual samples.
///
/// ```
/// use syntxt_tone::wave::*;
///
/// assert_eq!(Stereo::mono(3i8), Stereo::new(3, 3));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stereo<T> {
    pub left: T,
    pub right: T,
}

impl<T> Stereo<T> {
    pub fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    pub fn mono(mono: T) -> Self
    where
        T: Copy,
    {
        Self::new(mono, mono)
    }
}

/// A buffer of signed 8-bit samples, stored as the interleaved bytes
/// `left, right, left, right, ...` that are written to an audio line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleBuffer {
    bytes: Vec<u8>,
}

#[allow(clippy::len_without_is_empty)]
impl SampleBuffer {
    /// A silent buffer holding `frame_count` frames.
    pub fn new(frame_count: usize) -> Self {
        Self {
            bytes: vec![0; 2 * frame_count],
        }
    }

    /// Size of the buffer in frames.
    pub fn len(&self) -> usize {
        self.bytes.len() / 2
    }

    /// Size of the buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn frame(&self, index: usize) -> Stereo<i8> {
        Stereo::new(self.bytes[2 * index] as i8, self.bytes[2 * index + 1] as i8)
    }

    pub fn set_frame(&mut self, index: usize, frame: Stereo<i8>) {
        self.bytes[2 * index] = frame.left as u8;
        self.bytes[2 * index + 1] = frame.right as u8;
    }

    pub fn frames(&self) -> impl Iterator<Item = Stereo<i8>> + '_ {
        self.bytes
            .chunks_exact(2)
            .map(|pair| Stereo::new(pair[0] as i8, pair[1] as i8))
    }

    /// Silence the channel opposite to `channel`, in place.
    /// The silenced samples are gone for good, so the buffer cannot be
    /// routed to a different channel afterwards.
    ///
    /// ```
    /// use syntxt_tone::wave::*;
    ///
    /// let mut buffer = SampleBuffer::new(2);
    /// buffer.set_frame(0, Stereo::mono(5));
    /// buffer.set_frame(1, Stereo::mono(-7));
    /// buffer.mute(Channel::Left);
    /// assert_eq!(buffer.bytes(), &[5, 0, -7i8 as u8, 0]);
    /// ```
    pub fn mute(&mut self, channel: Channel) {
        if let Some(offset) = channel.silenced_offset() {
            self.bytes
                .iter_mut()
                .skip(offset)
                .step_by(2)
                .for_each(|b| *b = 0);
        }
    }

    /// The bytes of this buffer as heard on `channel`, leaving the buffer untouched.
    /// Stereo needs no copy.
    pub fn routed(&self, channel: Channel) -> Cow<'_, [u8]> {
        match channel {
            Channel::Stereo => Cow::Borrowed(&self.bytes),
            _ => {
                let mut copy = self.clone();
                copy.mute(channel);
                Cow::Owned(copy.bytes)
            }
        }
    }
}
