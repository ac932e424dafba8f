//! This module defines range-checked types for link addresses and frame
//! sequence numbers, meant to simplify correct usage of the API.

use snafu::{ensure, OptionExt, Snafu};

use core::convert::{TryFrom, TryInto};
use core::ops::Deref;

/// Highest address that fits in the 5-bit address field.
pub const MAX_ADDRESS: u8 = 31;

/// Number of redundant frames carrying one data byte.
pub const REPEAT_COUNT: usize = 3;

/// Error type for this module
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The value isn't a valid device address.
    #[snafu(display("Invalid address"))]
    InvalidAddress,
    /// The value isn't a valid frame sequence number.
    #[snafu(display("Invalid sequence number"))]
    InvalidSequence,
}

const fn invalid_address() -> InvalidAddressSnafu {
    InvalidAddressSnafu
}

const fn invalid_sequence() -> InvalidSequenceSnafu {
    InvalidSequenceSnafu
}

/// Address is a range-checked [0, 31] integer, representing a device address.
///
/// ## Example
/// ```
/// use rftrx_proto::Address;
/// use std::convert::TryInto;
/// let addr = Address::new(10).unwrap();
/// let addr: Address = 10usize.try_into().unwrap();
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone, Hash)]
#[repr(transparent)]
pub struct Address(u8);

/// Create a new [`Address`], panics if it is out of range.
pub const fn addr(a: u8) -> Address {
    if a <= MAX_ADDRESS {
        return Address(a);
    }
    panic!("Invalid address.")
}

/// The address the receive demo listens on when none is configured.
pub const DEFAULT_ADDRESS: Address = addr(0);

impl Address {
    /// Create a new address, checking that the address is in \[0, 31\].
    /// # Errors
    /// Returns [`Error::InvalidAddress`] if `address` is out of range.
    pub fn new(address: impl TryInto<u8>) -> Result<Self, Error> {
        let address = address.try_into().ok().with_context(invalid_address)?;
        ensure!(address <= MAX_ADDRESS, invalid_address());
        Ok(Self(address))
    }

    /// Extract the address from the high five bits of an addrSeq byte.
    /// Always in range.
    pub(crate) const fn from_addr_seq(addr_seq: u8) -> Self {
        Self(addr_seq >> 3)
    }

    /// Combine with a sequence number into the addrSeq byte.
    pub(crate) const fn addr_seq(self, sequence: Sequence) -> u8 {
        (self.0 << 3) | sequence.0
    }
}

impl Deref for Address {
    type Target = u8;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq<usize> for Address {
    fn eq(&self, other: &usize) -> bool {
        self.0 as usize == *other
    }
}

/// Trait to convert `T: TryInto<u8>` into an [`Address`].
pub trait IntoAddress {
    /// Convert self to an Address.
    /// # Errors
    /// Returns `Error:InvalidAddress` if self isn't a valid address.
    fn into_address(self) -> Result<Address, Error>;
}

impl IntoAddress for Address {
    fn into_address(self) -> Result<Address, Error> {
        Ok(self)
    }
}

impl<T> IntoAddress for T
where
    T: TryInto<u8>,
{
    fn into_address(self) -> Result<Address, Error> {
        Address::new(self)
    }
}

impl TryFrom<usize> for Address {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Position of a frame within its three-frame transmission, [0, 2].
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone, Hash)]
#[repr(transparent)]
pub struct Sequence(u8);

impl Sequence {
    /// All sequence numbers, in transmit order.
    pub const ALL: [Self; REPEAT_COUNT] = [Self(0), Self(1), Self(2)];

    /// # Errors
    /// Returns [`Error::InvalidSequence`] if `sequence` is greater than 2.
    pub fn new(sequence: impl TryInto<u8>) -> Result<Self, Error> {
        let sequence = sequence.try_into().ok().with_context(invalid_sequence)?;
        ensure!((sequence as usize) < REPEAT_COUNT, invalid_sequence());
        Ok(Self(sequence))
    }

    /// Vote slot index for this sequence number.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Deref for Sequence {
    type Target = u8;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq<usize> for Sequence {
    fn eq(&self, other: &usize) -> bool {
        self.0 as usize == *other
    }
}
