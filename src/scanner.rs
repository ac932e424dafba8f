//! Frame resynchronization over a raw byte stream.
//!
//! [`FrameScanner`] keeps a 4-byte sliding window. Once the window is
//! full it is checked for a valid frame; if the check fails, the oldest
//! byte is dropped and the next incoming byte refills the window. The
//! cost is linear in the number of bytes skipped.
//!
//! A single-byte XOR checksum gives roughly a 1 in 256 chance that noise
//! satisfies the frame check. Such a false lock is passed on as a frame,
//! and the repetition vote downstream is the only mitigation.

use arrayvec::ArrayVec;
use log::trace;
use nom::Err::Incomplete;

use crate::frame::{Frame, FRAME_LEN};
use crate::nom_parser;

type Window = ArrayVec<u8, FRAME_LEN>;

/// Sans-io frame scanner. Feed it one received byte at a time.
#[derive(Debug, Default, Clone)]
pub struct FrameScanner {
    window: Window,
}

impl FrameScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a received byte into the window.
    ///
    /// Returns `Some(frame)` once the window holds a valid frame, after which
    /// the scanner starts over with an empty window.
    pub fn push(&mut self, byte: u8) -> Option<Frame> {
        self.window.push(byte);

        match nom_parser::frame(&self.window) {
            Ok((_, frame)) => {
                trace!("Frame lock: {:02x?}", frame.to_bytes());
                self.reset();
                Some(frame)
            }
            Err(Incomplete(_)) if !self.window.is_full() => None,
            Err(_) => {
                if self.window.is_full() {
                    let skipped = self.window.remove(0);
                    trace!("Resync: discarding byte {:#04x}", skipped);
                }
                None
            }
        }
    }

    /// Feed bytes from `data` until a frame is found.
    ///
    /// Returns the number of bytes consumed together with the frame, if one was found.
    /// Bytes after the frame are left unconsumed.
    pub fn push_slice(&mut self, data: &[u8]) -> (usize, Option<Frame>) {
        for (n, byte) in data.iter().enumerate() {
            if let Some(frame) = self.push(*byte) {
                return (n + 1, Some(frame));
            }
        }
        (data.len(), None)
    }

    /// Number of bytes currently held in the window.
    pub fn pending(&self) -> usize {
        self.window.len()
    }

    /// Drop any partial window.
    pub fn reset(&mut self) {
        self.window.clear();
    }
}
