//! Receive values sent to our address and echo them in decimal, one per line,
//! back out on the same serial port for a terminal to display.
//!
//! Usage: rx_print [PORT] [ADDRESS]

use anyhow::{Context, Result};
use std::time::Duration;

use rftrx_proto::channel::DEFAULT_BIT_RATE;
use rftrx_proto::debug::print_uint;
use rftrx_proto::{ChannelConfig, IoChannel, Link, DEFAULT_ADDRESS};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args();
    args.next(); // Skip program name
    let port = args.next().unwrap_or("/dev/ttyUSB0".to_string());
    let address = args.next().map_or(Ok(*DEFAULT_ADDRESS), |a| a.parse::<u8>())?;

    let config = ChannelConfig {
        bit_rate: DEFAULT_BIT_RATE,
        ..ChannelConfig::default()
    };
    let serial = serialport::new(&port, config.bit_rate)
        .timeout(Duration::from_millis(100))
        .open()
        .with_context(|| format!("Failed to open serial port {}", port))?;

    let mut link = Link::new(IoChannel::open(serial, config));
    loop {
        let value = link.receive_personal_packet(address)?;
        log::info!("Received {}", value);
        print_uint(link.channel_mut(), value)?;
    }
}
