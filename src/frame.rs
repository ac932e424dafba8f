//! The 4-byte wire frame.
//!
//! ```text
//! +------+---------------------+------+----------+
//! | SYNC | ADDR(5) | SEQ(3)    | DATA | CHECKSUM |
//! | 0xAA | (addr << 3) | seq   | any  | AS ^ D   |
//! +------+---------------------+------+----------+
//! ```

use crate::types::{Address, Sequence};

/// Frame synchronization byte
pub const SYNC: u8 = 0xAA;

/// Length of one wire frame in bytes
pub const FRAME_LEN: usize = 4;

/// Checksum over the addrSeq and data bytes.
pub const fn checksum(addr_seq: u8, data: u8) -> u8 {
    addr_seq ^ data
}

/// One wire frame, as received or about to be transmitted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    sync: u8,
    addr_seq: u8,
    data: u8,
    checksum: u8,
}

impl Frame {
    /// Build a valid frame carrying `data` for `address`.
    pub const fn new(address: Address, sequence: Sequence, data: u8) -> Self {
        let addr_seq = address.addr_seq(sequence);
        Self {
            sync: SYNC,
            addr_seq,
            data,
            checksum: checksum(addr_seq, data),
        }
    }

    /// Reinterpret four raw bytes as a frame. The result may be invalid.
    pub const fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self {
            sync: bytes[0],
            addr_seq: bytes[1],
            data: bytes[2],
            checksum: bytes[3],
        }
    }

    pub const fn to_bytes(self) -> [u8; FRAME_LEN] {
        [self.sync, self.addr_seq, self.data, self.checksum]
    }

    /// A frame is valid iff the sync byte matches and the checksum holds.
    pub const fn is_valid(&self) -> bool {
        self.sync == SYNC && self.checksum == checksum(self.addr_seq, self.data)
    }

    pub const fn addr_seq(&self) -> u8 {
        self.addr_seq
    }

    pub const fn data(&self) -> u8 {
        self.data
    }

    pub const fn checksum(&self) -> u8 {
        self.checksum
    }
}

impl From<[u8; FRAME_LEN]> for Frame {
    fn from(bytes: [u8; FRAME_LEN]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Frame> for [u8; FRAME_LEN] {
    fn from(frame: Frame) -> Self {
        frame.to_bytes()
    }
}
