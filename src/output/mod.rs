// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Audio lines that raw PCM bytes are written to.

pub mod memory;
pub mod sox;

use log::{debug, warn};

use crate::error::Result;
use crate::wave::PcmFormat;

pub use memory::{LineEvent, MemorySink, Recording};
pub use sox::{SoxSink, SoxTarget};

/// Something that can hand out audio lines, e.g. a sound card.
pub trait AudioSink {
    type Line: AudioLine;

    /// Obtain and open a line in the given format.
    /// Fails with `DeviceUnavailable` if no line can be had.
    fn open(&mut self, format: &PcmFormat) -> Result<Self::Line>;
}

/// An opened audio line accepting interleaved PCM bytes.
pub trait AudioLine {
    /// Whether the line can shift the stereo position itself.
    fn has_pan_control(&self) -> bool {
        false
    }

    /// Set the stereo position, from -1.0 (left) to 1.0 (right).
    fn set_pan(&mut self, _pan: f64) -> Result<()> {
        Err(crate::error::ToneError::PanUnsupported)
    }

    /// Write the bytes, blocking until the line accepted all of them.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Block until everything written so far has been played.
    fn drain(&mut self) -> Result<()>;

    /// Stop playing, discarding whatever has not been played yet.
    fn stop(&mut self) -> Result<()>;

    /// Release the line.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// Open a line on `sink`, pass it to `callback`, and release it again afterwards.
///
/// On success the line is drained before it is closed. If the callback fails,
/// the line is stopped and closed and the callback's error is returned.
/// If the line cannot be opened, the callback is never invoked.
pub fn with_line<S, R, F>(sink: &mut S, format: &PcmFormat, callback: F) -> Result<R>
where
    S: AudioSink,
    F: FnOnce(&mut S::Line) -> Result<R>,
{
    let mut line = sink.open(format)?;
    debug!("opened audio line with {:?}", format);

    match callback(&mut line) {
        Ok(result) => {
            let drained = line.drain();
            let closed = line.close();
            drained?;
            closed?;
            debug!("drained and closed audio line");
            Ok(result)
        }
        Err(err) => {
            if let Err(stop_err) = line.stop() {
                warn!("Failed to stop audio line: {}", stop_err);
            }
            if let Err(close_err) = line.close() {
                warn!("Failed to close audio line: {}", close_err);
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToneError;

    #[test]
    fn lifecycle_on_success() {
        let mut sink = MemorySink::new();
        let written = with_line(&mut sink, &PcmFormat::default(), |line| {
            line.write(&[1, 2, 3, 4])?;
            Ok(4)
        })
        .unwrap();

        assert_eq!(written, 4);
        let rec = sink.recording();
        assert_eq!(rec.bytes, vec![1, 2, 3, 4]);
        assert_eq!(
            rec.events,
            vec![
                LineEvent::Open,
                LineEvent::Write(4),
                LineEvent::Drain,
                LineEvent::Close
            ]
        );
    }

    #[test]
    fn lifecycle_on_failure() {
        let mut sink = MemorySink::new().failing_writes();
        let result = with_line(&mut sink, &PcmFormat::default(), |line| line.write(&[0; 8]));

        assert!(matches!(
            result,
            Err(ToneError::LineIo {
                operation: "write",
                ..
            })
        ));
        let rec = sink.recording();
        assert!(rec.bytes.is_empty());
        assert_eq!(
            rec.events,
            vec![LineEvent::Open, LineEvent::Stop, LineEvent::Close]
        );
    }

    #[test]
    fn unavailable_device_skips_callback() {
        let mut sink = MemorySink::unavailable();
        let mut called = false;
        let result = with_line(&mut sink, &PcmFormat::default(), |_| {
            called = true;
            Ok(())
        });

        assert!(matches!(result, Err(ToneError::DeviceUnavailable { .. })));
        assert!(!called);
        assert!(sink.recording().events.is_empty());
    }

    #[test]
    fn lines_without_pan_control_reject_pan() {
        let mut sink = MemorySink::new();
        let mut line = sink.open(&PcmFormat::default()).unwrap();
        assert!(!line.has_pan_control());
        assert!(matches!(line.set_pan(-1.0), Err(ToneError::PanUnsupported)));
    }
}
