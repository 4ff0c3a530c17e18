// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Fixed-frequency test tones, precomputed as 8-bit stereo PCM.

use log::{debug, trace};
use snafu::ensure;

use crate::envelope::LinearFade;
use crate::error::{self, Result};
use crate::output::AudioLine;
use crate::wave::{pcm_byte_len, Channel, SampleBuffer, Stereo, SAMPLE_RATE};

/// Number of frames the tone takes to fade in and out again.
pub const FADE_FRAMES: usize = 1600;

/// Parameters of a tone.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ToneSpec {
    /// Frequency in Hz.
    pub hz: i32,
    /// Duration in milliseconds.
    pub msecs: i32,
    /// Volume between 0.0 and 1.0.
    pub vol: f64,
    pub channel: Channel,
}

impl ToneSpec {
    pub fn new(hz: i32, msecs: i32, vol: f64, channel: Channel) -> Result<Self> {
        ensure!(
            hz > 0,
            error::InvalidArgument {
                reason: "Frequency <= 0 hz"
            }
        );
        ensure!(
            msecs > 0,
            error::InvalidArgument {
                reason: "Duration <= 0 msecs"
            }
        );
        ensure!(
            (0.0..=1.0).contains(&vol),
            error::InvalidArgument {
                reason: "Volume out of range 0.0 - 1.0"
            }
        );
        Ok(Self {
            hz,
            msecs,
            vol,
            channel,
        })
    }

    /// Render the tone into a fresh buffer.
    ///
    /// Each frame holds `cos(2π · i · hz / SAMPLE_RATE) · 127 · vol`, shaped by a
    /// linear fade of `FADE_FRAMES` frames at both ends. Both channels get the same sample.
    pub fn synthesize(&self) -> SampleBuffer {
        let mut byte_len = pcm_byte_len(self.msecs as u64);
        if byte_len % 2 == 1 {
            byte_len += 1;
        }
        let frame_count = byte_len / 2;
        let fade = LinearFade::new(FADE_FRAMES);

        let mut buffer = SampleBuffer::new(frame_count);
        for i in 0..frame_count {
            let angle = (i as f64 * f64::from(self.hz) / f64::from(SAMPLE_RATE))
                * 2.0
                * std::f64::consts::PI;
            let amplitude = angle.cos() * 127.0 * self.vol * fade.gain(i, frame_count);
            buffer.set_frame(i, Stereo::mono(quantize(amplitude)));
        }
        debug!(
            "synthesized {} Hz for {} ms: {} frames, {} bytes",
            self.hz,
            self.msecs,
            frame_count,
            buffer.byte_len()
        );
        buffer
    }
}

/// Round half up and keep the low byte, like an integer cast would.
fn quantize(amplitude: f64) -> i8 {
    (amplitude + 0.5).floor() as i64 as i8
}

/// A tone together with its precomputed samples.
#[derive(Clone, Debug)]
pub struct Tone {
    spec: ToneSpec,
    buffer: SampleBuffer,
}

impl Tone {
    /// Validate the parameters and synthesize the tone.
    ///
    /// ```
    /// use syntxt_tone::{Channel, Tone};
    ///
    /// let tone = Tone::new(400, 2000, 0.5, Channel::Left).unwrap();
    /// assert_eq!(tone.buffer().byte_len(), 176_416);
    /// assert!(Tone::new(0, 2000, 0.5, Channel::Left).is_err());
    /// ```
    pub fn new(hz: i32, msecs: i32, vol: f64, channel: Channel) -> Result<Self> {
        Ok(Self::from_spec(ToneSpec::new(hz, msecs, vol, channel)?))
    }

    pub fn from_spec(spec: ToneSpec) -> Self {
        let buffer = spec.synthesize();
        Self { spec, buffer }
    }

    pub fn spec(&self) -> &ToneSpec {
        &self.spec
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    /// Write the tone to `line`, routed to the tone's channel.
    ///
    /// Uses the line's pan control if there is one. Otherwise the opposite
    /// channel is silenced in a copy of the samples, so the tone can be
    /// played again afterwards.
    pub fn play<L: AudioLine + ?Sized>(&self, line: &mut L) -> Result<()> {
        if line.has_pan_control() {
            self.pan(line)?;
            line.write(self.buffer.bytes())
        } else {
            line.write(&self.buffer.routed(self.spec.channel))
        }
    }

    /// Like `play`, but without pan control the opposite channel is silenced
    /// in the tone's own buffer. Switching the channel afterwards needs a new tone.
    pub fn play_in_place<L: AudioLine + ?Sized>(&mut self, line: &mut L) -> Result<()> {
        if line.has_pan_control() {
            self.pan(line)?;
        } else {
            self.buffer.mute(self.spec.channel);
        }
        line.write(self.buffer.bytes())
    }

    fn pan<L: AudioLine + ?Sized>(&self, line: &mut L) -> Result<()> {
        let pan = self.spec.channel.pan();
        trace!("panning {} tone to {}", self.spec.channel, pan);
        line.set_pan(pan)
    }

    /// See [`play_silence`].
    pub fn play_silence<L: AudioLine + ?Sized>(&self, line: &mut L, msecs: i32) -> Result<()> {
        play_silence(line, msecs)
    }
}

/// A zero-filled buffer of `msecs` milliseconds of stereo audio.
///
/// ```
/// use syntxt_tone::silence;
///
/// let quiet = silence(1000).unwrap();
/// assert_eq!(quiet.len(), 88_208);
/// assert!(quiet.iter().all(|b| *b == 0));
/// ```
pub fn silence(msecs: i32) -> Result<Vec<u8>> {
    ensure!(
        msecs >= 0,
        error::InvalidArgument {
            reason: "Silence duration < 0 msecs"
        }
    );
    Ok(vec![0; pcm_byte_len(msecs as u64)])
}

/// Write `msecs` milliseconds of silence to `line`.
pub fn play_silence<L: AudioLine + ?Sized>(line: &mut L, msecs: i32) -> Result<()> {
    let buffer = silence(msecs)?;
    trace!("writing {} ms of silence", msecs);
    line.write(&buffer)
}
