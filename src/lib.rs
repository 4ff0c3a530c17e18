// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Precomputed test tones as raw 8-bit stereo PCM, and a small abstraction
//! over the audio lines they are played on.

// modules for making sounds
pub mod envelope;
pub mod tone;
pub mod wave;

// Getting sound out
pub mod error;
pub mod output;

pub use error::{Result, ToneError};
pub use tone::{play_silence, silence, Tone, ToneSpec};
pub use wave::{Channel, PcmFormat, SampleBuffer, SAMPLE_RATE};
