// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use std::io;

use snafu::Snafu;

pub type Result<T, E = ToneError> = std::result::Result<T, E>;

/// Possible errors when building or playing tones.
///
/// None of these are retried; each one ends the operation that raised it.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ToneError {
    #[snafu(display("Invalid argument: {}", reason))]
    InvalidArgument { reason: String },
    #[snafu(display("Couldn't open sound line on {}: {}", device, source))]
    DeviceUnavailable { device: String, source: io::Error },
    #[snafu(display("Sound line failed to {}: {}", operation, source))]
    LineIo {
        operation: &'static str,
        source: io::Error,
    },
    #[snafu(display("The sound line has no pan control"))]
    PanUnsupported,
}
