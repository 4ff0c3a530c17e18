// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Easy interface for getting sound to play using a sox subprocess.

use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use log::{debug, trace, warn};
use snafu::ResultExt;

use super::{AudioLine, AudioSink};
use crate::error::{self, Result};
use crate::wave::PcmFormat;

pub enum SoxTarget {
    /// Play on the default speakers.
    Play,
    /// Write into a file of any sox-supported format.
    File(PathBuf),
}

/// Plays raw PCM through `play`, or converts it to a file with `sox`.
/// Sox lines have no pan control.
pub struct SoxSink {
    target: SoxTarget,
}

impl SoxSink {
    pub fn new(target: SoxTarget) -> Self {
        Self { target }
    }

    /// Arguments describing the raw audio sox reads from stdin.
    fn input_args(format: &PcmFormat) -> Vec<String> {
        vec![
            "-R".into(), // make the output reproducible
            "--type".into(),
            "raw".into(),
            "--encoding".into(),
            if format.signed {
                "signed-integer".into()
            } else {
                "unsigned-integer".into()
            },
            "--bits".into(),
            format.bits_per_sample.to_string(),
            if format.big_endian {
                "--endian=big".into()
            } else {
                "--endian=little".into()
            },
            "--channels".into(),
            format.channels.to_string(),
            "--rate".into(),
            format.sample_rate.to_string(),
            "/dev/stdin".into(),
        ]
    }
}

impl AudioSink for SoxSink {
    type Line = SoxLine;

    fn open(&mut self, format: &PcmFormat) -> Result<SoxLine> {
        // For properly recording the sox dependency on nix:
        let (play, sox) = if let Some(sox_bin) = option_env!("NIX_SOX_BIN") {
            debug!("using sox from nix store {}", sox_bin);
            let play = Path::new(sox_bin).join("play");
            let sox = Path::new(sox_bin).join("sox");
            (play, sox)
        } else {
            ("play".into(), "sox".into())
        };

        let input_args = Self::input_args(format);
        let spawned = match &self.target {
            SoxTarget::Play => Command::new(&play)
                .args(&input_args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn(),
            SoxTarget::File(outfile) => Command::new(&sox)
                .args(&input_args)
                .arg(outfile)
                .stdin(Stdio::piped())
                .spawn(),
        };
        let device = match &self.target {
            SoxTarget::Play => play.display().to_string(),
            SoxTarget::File(_) => sox.display().to_string(),
        };
        let mut player = spawned.context(error::DeviceUnavailable {
            device: device.as_str(),
        })?;

        let audio_stream = match player.stdin.take() {
            Some(stream) => stream,
            None => {
                let _ = player.kill();
                let _ = player.wait();
                return Err(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "sox process has no stdin",
                ))
                .context(error::DeviceUnavailable { device });
            }
        };
        debug!("spawned {} for {:?}", device, format);

        Ok(SoxLine {
            player,
            audio_stream: Some(audio_stream),
        })
    }
}

pub struct SoxLine {
    player: Child,
    /// Closed once the line is drained, stopped or closed.
    audio_stream: Option<ChildStdin>,
}

impl SoxLine {
    /// Close stdin so that sox plays what it got and exits, then wait for it.
    fn finish(&mut self) -> io::Result<()> {
        if let Some(mut stream) = self.audio_stream.take() {
            stream.flush()?;
        }
        let status = self.player.wait()?;
        if !status.success() {
            warn!("sox exited with {}", status);
        }
        Ok(())
    }
}

impl AudioLine for SoxLine {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        trace!("writing {} bytes to sox", bytes.len());
        match self.audio_stream.as_mut() {
            Some(stream) => stream
                .write_all(bytes)
                .and_then(|_| stream.flush())
                .context(error::LineIo { operation: "write" }),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "sox input is already closed",
            ))
            .context(error::LineIo { operation: "write" }),
        }
    }

    fn drain(&mut self) -> Result<()> {
        self.finish().context(error::LineIo { operation: "drain" })
    }

    fn stop(&mut self) -> Result<()> {
        self.audio_stream = None;
        let exited = self
            .player
            .try_wait()
            .context(error::LineIo { operation: "stop" })?;
        if exited.is_none() {
            self.player
                .kill()
                .context(error::LineIo { operation: "stop" })?;
        }
        Ok(())
    }

    fn close(mut self) -> Result<()> {
        self.finish().context(error::LineIo { operation: "close" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_raw_input() {
        let args = SoxSink::input_args(&PcmFormat::default());
        let expected = [
            "-R",
            "--type",
            "raw",
            "--encoding",
            "signed-integer",
            "--bits",
            "8",
            "--endian=little",
            "--channels",
            "2",
            "--rate",
            "44104",
            "/dev/stdin",
        ];
        assert_eq!(args, expected);
    }
}
