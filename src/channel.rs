//! The byte channel the link runs over.
//!
//! A channel moves single raw bytes in either direction and blocks until
//! it can. [`IoChannel`] adapts anything implementing [`std::io::Read`] and
//! [`std::io::Write`], e.g. a `serialport::SerialPort`, into a channel.

use std::io::{ErrorKind, Read, Write};
use std::time::{Duration, Instant};

use log::trace;
use snafu::{ensure, ResultExt};

use crate::link::{
    DisconnectedSnafu, Error, IoSnafu, ReceiveDisabledSnafu, TimeoutSnafu, TransmitDisabledSnafu,
};

/// Bit rate of the original RF modules, in bit/s.
pub const DEFAULT_BIT_RATE: u32 = 1000;

/// Capability to send and receive single bytes.
pub trait ByteChannel {
    type Error;

    /// Transmit one byte. Returns once the byte has been accepted.
    fn transmit_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Receive one byte. Blocks until a byte has arrived.
    fn receive_byte(&mut self) -> Result<u8, Self::Error>;

    /// Transmit all of `data`, in order.
    fn transmit_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for byte in data {
            self.transmit_byte(*byte)?;
        }
        Ok(())
    }
}

impl<C: ByteChannel + ?Sized> ByteChannel for &mut C {
    type Error = C::Error;

    fn transmit_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).transmit_byte(byte)
    }

    fn receive_byte(&mut self) -> Result<u8, Self::Error> {
        (**self).receive_byte()
    }

    fn transmit_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).transmit_all(data)
    }
}

/// Channel setup, applied once when the channel is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Bit rate in bit/s. Informational for adapters that are already open.
    pub bit_rate: u32,
    pub transmit_enabled: bool,
    pub receive_enabled: bool,
    /// Give up a receive after this long without a byte. `None` blocks forever.
    pub read_timeout: Option<Duration>,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            bit_rate: DEFAULT_BIT_RATE,
            transmit_enabled: true,
            receive_enabled: true,
            read_timeout: None,
        }
    }
}

impl ChannelConfig {
    /// Transmit-only configuration.
    pub fn transmitter(bit_rate: u32) -> Self {
        Self {
            bit_rate,
            receive_enabled: false,
            ..Self::default()
        }
    }

    /// Receive-only configuration.
    pub fn receiver(bit_rate: u32) -> Self {
        Self {
            bit_rate,
            transmit_enabled: false,
            ..Self::default()
        }
    }
}

/// [`ByteChannel`] over a blocking `Read + Write` stream.
#[derive(Debug)]
pub struct IoChannel<IO> {
    io: IO,
    config: ChannelConfig,
}

impl<IO> IoChannel<IO>
where
    IO: Read + Write,
{
    /// Take ownership of `io` and enable the directions given in `config`.
    pub fn open(io: IO, config: ChannelConfig) -> Self {
        trace!("Opening channel: {:?}", config);
        Self { io, config }
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    pub fn get_ref(&self) -> &IO {
        &self.io
    }

    pub fn get_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    pub fn into_inner(self) -> IO {
        self.io
    }
}

impl<IO> ByteChannel for IoChannel<IO>
where
    IO: Read + Write,
{
    type Error = Error;

    fn transmit_byte(&mut self, byte: u8) -> Result<(), Error> {
        ensure!(self.config.transmit_enabled, TransmitDisabledSnafu);
        self.io.write_all(&[byte]).context(IoSnafu)
    }

    fn transmit_all(&mut self, data: &[u8]) -> Result<(), Error> {
        ensure!(self.config.transmit_enabled, TransmitDisabledSnafu);
        self.io.write_all(data).context(IoSnafu)?;
        self.io.flush().context(IoSnafu)
    }

    fn receive_byte(&mut self) -> Result<u8, Error> {
        ensure!(self.config.receive_enabled, ReceiveDisabledSnafu);
        let deadline = self.config.read_timeout.map(|t| Instant::now() + t);
        let mut buf = [0; 1];
        loop {
            match self.io.read(&mut buf) {
                Ok(0) => return DisconnectedSnafu.fail(),
                Ok(_) => return Ok(buf[0]),
                Err(e) if is_retryable(e.kind()) => {
                    if let Some(deadline) = deadline {
                        ensure!(Instant::now() < deadline, TimeoutSnafu);
                    }
                }
                Err(e) => return Err(e).context(IoSnafu),
            }
        }
    }
}

fn is_retryable(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
    )
}
