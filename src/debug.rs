//! Helpers for the demo programs: a decimal printer and the counter
//! sequence the demo transmitter sends.

use arrayvec::ArrayVec;

use crate::channel::ByteChannel;

/// Values sent by the transmit demo.
pub const COUNTER_MODULUS: u8 = 100;

/// Line terminator written after each printed value.
pub const CRLF: &[u8] = b"\r\n";

/// ASCII decimal digits of `value`, most significant first, without leading zeros.
pub fn decimal_digits(value: u8) -> ArrayVec<u8, 3> {
    let mut digits = ArrayVec::new();
    let mut x = value;
    loop {
        digits.push(b'0' + x % 10);
        x /= 10;
        if x == 0 {
            break;
        }
    }
    digits.reverse();
    digits
}

/// Write `value` in decimal followed by CR LF to the channel.
pub fn print_uint<C: ByteChannel>(channel: &mut C, value: u8) -> Result<(), C::Error> {
    channel.transmit_all(&decimal_digits(value))?;
    channel.transmit_all(CRLF)
}

/// 0, 1, ..., 99, 0, 1, ... forever.
pub fn counter() -> impl Iterator<Item = u8> {
    (0..COUNTER_MODULUS).cycle()
}
