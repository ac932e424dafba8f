//! This crate is a sans-io implementation of a small RF telemetry link,
//! carrying single data bytes to addressed devices over an unreliable
//! serial radio.
//!
//! Each data byte is sent as three 4-byte frames (`0xAA`, address and
//! sequence number, data, checksum) that differ only in sequence number. The receiver
//! resynchronizes byte by byte on corrupted input, drops frames to other
//! addresses, and votes over the three copies.
//!
//! The protocol pieces, [`encode_packet`], [`FrameScanner`] and
//! [`VoteCollector`], don't do any I/O. [`Link`] drives them over a
//! blocking [`ByteChannel`] such as an [`IoChannel`] wrapping a serial port.
//!
//! Transmission errors are masked, not reported. A corrupted frame that
//! happens to pass the checksum is accepted, and a dropped frame shortens
//! the vote.

pub mod channel;
pub mod debug;
mod encoder;
mod frame;
pub mod link;
mod nom_parser;
mod packet;
mod scanner;
pub mod types;
mod vote;

pub use channel::{ByteChannel, ChannelConfig, IoChannel};
pub use encoder::{encode_packet, Transmission, TransmissionBytes, TRANSMISSION_LEN};
pub use frame::{checksum, Frame, FRAME_LEN, SYNC};
pub use link::{Error, Link};
pub use packet::Packet;
pub use scanner::FrameScanner;
pub use types::{addr, Address, IntoAddress, Sequence, DEFAULT_ADDRESS};
pub use vote::{Vote, VoteCollector, VoteWindow};
