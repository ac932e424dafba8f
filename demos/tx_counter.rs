//! Transmit an incrementing counter, 0 to 99 and around again, once per second.
//!
//! Usage: tx_counter [PORT] [ADDRESS]

use anyhow::{Context, Result};
use std::time::Duration;

use rftrx_proto::channel::DEFAULT_BIT_RATE;
use rftrx_proto::debug::{counter, CRLF};
use rftrx_proto::{Address, ByteChannel, ChannelConfig, IoChannel, Link, DEFAULT_ADDRESS};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args();
    args.next(); // Skip program name
    let port = args.next().unwrap_or("/dev/ttyUSB0".to_string());
    let address = match args.next() {
        Some(a) => Address::new(a.parse::<u8>().context("Address must be a number")?)
            .context("Address out of range")?,
        None => DEFAULT_ADDRESS,
    };

    let config = ChannelConfig::transmitter(DEFAULT_BIT_RATE);
    let serial = serialport::new(&port, config.bit_rate)
        .timeout(Duration::from_millis(100))
        .open()
        .with_context(|| format!("Failed to open serial port {}", port))?;

    let mut link = Link::new(IoChannel::open(serial, config));
    for value in counter() {
        link.send_packet(address, value)?;
        // separates transmissions on a terminal, receivers drop it as noise
        link.channel_mut().transmit_all(CRLF)?;
        log::info!("Sent {} to address {}", value, *address);
        std::thread::sleep(Duration::from_secs(1));
    }
    Ok(())
}
