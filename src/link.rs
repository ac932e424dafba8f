//! Blocking link driver on top of a [`ByteChannel`].
//!
//! [`Link`] wires the sans-io pieces of this crate to a channel: the
//! encoder on the transmit side, and scanner, decoder, address filter
//! and vote combiner on the receive side.

use log::debug;
use snafu::Snafu;

use crate::channel::ByteChannel;
use crate::encoder::encode_packet;
use crate::frame::Frame;
use crate::packet::Packet;
use crate::scanner::FrameScanner;
use crate::types::{Address, Error as TypeError, IntoAddress};
use crate::vote::{Vote, VoteCollector};

/// Errors reported by the channels in this crate.
///
/// Corrupted frames are never reported, they are skipped by the scanner.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum Error {
    /// The underlying stream failed.
    #[snafu(display("Channel I/O error: {}", source))]
    Io { source: std::io::Error },
    /// The channel was opened without the transmit direction.
    #[snafu(display("Transmitter not enabled"))]
    TransmitDisabled,
    /// The channel was opened without the receive direction.
    #[snafu(display("Receiver not enabled"))]
    ReceiveDisabled,
    /// No byte arrived within the configured read timeout.
    #[snafu(display("Receive timed out"))]
    Timeout,
    /// The stream reached end of file.
    #[snafu(display("Channel disconnected"))]
    Disconnected,
    /// An argument was out of range.
    #[snafu(context(false), display("{}", source))]
    InvalidArgument { source: TypeError },
}

/// A device on the link. Owns the channel exclusively.
///
/// # Example
/// ```
/// use rftrx_proto::{addr, ChannelConfig, IoChannel, Link};
/// # use std::io::Cursor;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut tx = Link::new(IoChannel::open(Cursor::new(Vec::<u8>::new()), ChannelConfig::default()));
/// tx.send_packet(addr(3), 42)?;
///
/// let wire = tx.into_inner().into_inner().into_inner();
/// let mut rx = Link::new(IoChannel::open(Cursor::new(wire), ChannelConfig::default()));
/// assert_eq!(rx.receive_personal_packet(3)?, 42);
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct Link<C> {
    channel: C,
}

impl<C> Link<C>
where
    C: ByteChannel,
{
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    /// Transmit `data` to `address` as three back-to-back frames.
    pub fn send_packet(&mut self, address: Address, data: u8) -> Result<(), C::Error> {
        debug!("Sending {} to address {}", data, *address);
        self.channel
            .transmit_all(encode_packet(address, data).to_bytes().as_slice())
    }

    /// Block until a valid frame has been received.
    ///
    /// Misaligned and corrupted bytes are discarded. No scanner state
    /// survives between calls.
    pub fn next_frame(&mut self) -> Result<Frame, C::Error> {
        let mut scanner = FrameScanner::new();
        loop {
            if let Some(frame) = scanner.push(self.channel.receive_byte()?) {
                return Ok(frame);
            }
        }
    }

    /// Block until a packet, for any address, has been received.
    pub fn next_packet(&mut self) -> Result<Packet, C::Error> {
        self.next_frame().map(Packet::from)
    }

    /// Block until a packet to `address` has been received.
    /// Packets to other addresses are dropped.
    pub fn next_packet_for(&mut self, address: Address) -> Result<Packet, C::Error> {
        loop {
            let packet = self.next_packet()?;
            if packet.address() == address {
                return Ok(packet);
            }
            debug!("Dropping packet to address {}", *packet.address());
        }
    }

    /// Receive one transmission to `address` and return the voted value.
    ///
    /// # Errors
    /// Fails with [`TypeError::InvalidAddress`] converted into the channel error
    /// if the address is out of range.
    pub fn receive_personal_packet(&mut self, address: impl IntoAddress) -> Result<u8, C::Error>
    where
        C::Error: From<TypeError>,
    {
        let address = address.into_address()?;
        self.receive_vote(address)
    }

    /// Like [`receive_personal_packet`](Self::receive_personal_packet) for an already checked address.
    pub fn receive_vote(&mut self, address: Address) -> Result<u8, C::Error> {
        let mut collector = VoteCollector::new(address);
        loop {
            // Only the first packet of a window goes through the address filter,
            // later packets to other addresses end the window.
            let packet = if collector.is_idle() {
                self.next_packet_for(address)?
            } else {
                self.next_packet()?
            };
            collector = match collector.receive_packet(packet) {
                Vote::NeedPacket(collector) => collector,
                Vote::Resolved(value) => return Ok(value),
            };
        }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn into_inner(self) -> C {
        self.channel
    }
}
