// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! An audio sink that keeps everything in memory instead of playing it.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use log::trace;
use snafu::{ensure, ResultExt};

use super::{AudioLine, AudioSink};
use crate::error::{self, Result};
use crate::wave::PcmFormat;

/// Something that happened to a line opened on a `MemorySink`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LineEvent {
    Open,
    SetPan(f64),
    /// A write of that many bytes.
    Write(usize),
    Drain,
    Stop,
    Close,
}

/// Everything the lines of a `MemorySink` were asked to do.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recording {
    pub format: Option<PcmFormat>,
    pub bytes: Vec<u8>,
    pub events: Vec<LineEvent>,
}

impl Recording {
    pub fn pans(&self) -> Vec<f64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                LineEvent::SetPan(pan) => Some(*pan),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct MemorySink {
    pan_control: bool,
    unavailable: bool,
    failing_writes: bool,
    recording: Rc<RefCell<Recording>>,
}

impl MemorySink {
    /// A sink whose lines have no pan control.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose lines support pan control.
    pub fn with_pan_control() -> Self {
        Self {
            pan_control: true,
            ..Self::default()
        }
    }

    /// A sink that fails to open any line.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Make every write on lines of this sink fail.
    pub fn failing_writes(mut self) -> Self {
        self.failing_writes = true;
        self
    }

    /// A snapshot of what has been recorded so far.
    pub fn recording(&self) -> Recording {
        self.recording.borrow().clone()
    }
}

impl AudioSink for MemorySink {
    type Line = MemoryLine;

    fn open(&mut self, format: &PcmFormat) -> Result<MemoryLine> {
        if self.unavailable {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no line available"))
                .context(error::DeviceUnavailable { device: "memory" });
        }
        let mut rec = self.recording.borrow_mut();
        rec.format = Some(*format);
        rec.events.push(LineEvent::Open);
        Ok(MemoryLine {
            pan_control: self.pan_control,
            failing_writes: self.failing_writes,
            recording: Rc::clone(&self.recording),
        })
    }
}

pub struct MemoryLine {
    pan_control: bool,
    failing_writes: bool,
    recording: Rc<RefCell<Recording>>,
}

impl MemoryLine {
    fn record(&self, event: LineEvent) {
        trace!("memory line: {:?}", event);
        self.recording.borrow_mut().events.push(event);
    }
}

impl AudioLine for MemoryLine {
    fn has_pan_control(&self) -> bool {
        self.pan_control
    }

    fn set_pan(&mut self, pan: f64) -> Result<()> {
        ensure!(self.pan_control, error::PanUnsupported);
        ensure!(
            (-1.0..=1.0).contains(&pan),
            error::InvalidArgument {
                reason: format!("Pan {} out of range -1.0 - 1.0", pan)
            }
        );
        self.record(LineEvent::SetPan(pan));
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        if self.failing_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "line is broken"))
                .context(error::LineIo { operation: "write" });
        }
        self.recording.borrow_mut().bytes.extend_from_slice(bytes);
        self.record(LineEvent::Write(bytes.len()));
        Ok(())
    }

    fn drain(&mut self) -> Result<()> {
        self.record(LineEvent::Drain);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.record(LineEvent::Stop);
        Ok(())
    }

    fn close(self) -> Result<()> {
        self.record(LineEvent::Close);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToneError;

    #[test]
    fn records_format_and_bytes() {
        let mut sink = MemorySink::with_pan_control();
        let mut line = sink.open(&PcmFormat::default()).unwrap();
        line.set_pan(0.5).unwrap();
        line.write(&[1, 2]).unwrap();
        line.write(&[3]).unwrap();
        line.close().unwrap();

        let rec = sink.recording();
        assert_eq!(rec.format, Some(PcmFormat::default()));
        assert_eq!(rec.bytes, vec![1, 2, 3]);
        assert_eq!(rec.pans(), vec![0.5]);
    }

    #[test]
    fn pan_out_of_range() {
        let mut sink = MemorySink::with_pan_control();
        let mut line = sink.open(&PcmFormat::default()).unwrap();
        assert!(matches!(
            line.set_pan(1.5),
            Err(ToneError::InvalidArgument { .. })
        ));
        assert!(sink.recording().pans().is_empty());
    }
}
