//! Decoded form of a wire frame.

use crate::frame::Frame;
use crate::types::{Address, Sequence};

/// A logical packet: the address, sequence number and data of one frame.
///
/// The sequence field is kept raw since a frame that passes the checksum
/// may still carry a corrupted sequence number in the range 3..=7.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Packet {
    address: Address,
    sequence: u8,
    data: u8,
}

impl Packet {
    /// Create a packet with a known-good sequence number.
    pub const fn new(address: Address, sequence: Sequence, data: u8) -> Self {
        Self {
            address,
            sequence: sequence.index() as u8,
            data,
        }
    }

    /// Decode a frame. The frame is assumed to have passed the validity check.
    pub const fn decode(frame: &Frame) -> Self {
        let addr_seq = frame.addr_seq();
        Self {
            address: Address::from_addr_seq(addr_seq),
            sequence: addr_seq & 0x7,
            data: frame.data(),
        }
    }

    pub const fn address(&self) -> Address {
        self.address
    }

    /// The sequence number, or `None` if the field is out of range.
    pub fn sequence(&self) -> Option<Sequence> {
        Sequence::new(self.sequence).ok()
    }

    /// The 3-bit sequence field as received.
    pub const fn raw_sequence(&self) -> u8 {
        self.sequence
    }

    pub const fn data(&self) -> u8 {
        self.data
    }
}

impl From<Frame> for Packet {
    fn from(frame: Frame) -> Self {
        Self::decode(&frame)
    }
}

impl From<&Frame> for Packet {
    fn from(frame: &Frame) -> Self {
        Self::decode(frame)
    }
}
