//! Encoding of one data byte into three redundant wire frames.

use arrayvec::ArrayVec;

use crate::frame::{Frame, FRAME_LEN};
use crate::types::{Address, Sequence, REPEAT_COUNT};

/// Wire length of one complete transmission.
pub const TRANSMISSION_LEN: usize = FRAME_LEN * REPEAT_COUNT;

pub type TransmissionBytes = ArrayVec<u8, TRANSMISSION_LEN>;

/// The three frames carrying one data byte, in sequence order 0, 1, 2.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Transmission {
    frames: [Frame; REPEAT_COUNT],
}

impl Transmission {
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The frames back to back, as they go out on the wire.
    pub fn to_bytes(&self) -> TransmissionBytes {
        let mut data = TransmissionBytes::new();
        for frame in self.frames.iter() {
            data.try_extend_from_slice(&frame.to_bytes())
                .expect("BUG: Transmit buffer too small.");
        }
        data
    }
}

/// Encode `data` for `address` as three frames with sequence numbers 0, 1 and 2.
///
/// # Example
/// ```
/// use rftrx_proto::{addr, encode_packet};
/// let tx = encode_packet(addr(3), 42);
/// assert_eq!(&tx.to_bytes()[..4], &[0xAA, 0x18, 42, 0x18 ^ 42]);
/// ```
pub fn encode_packet(address: Address, data: u8) -> Transmission {
    let [s0, s1, s2] = Sequence::ALL;
    Transmission {
        frames: [
            Frame::new(address, s0, data),
            Frame::new(address, s1, data),
            Frame::new(address, s2, data),
        ],
    }
}
