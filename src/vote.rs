//! Repetition-code vote over the three frames of one transmission.
//!
//! See [`VoteCollector`] for how packets are gathered and
//! [`VoteWindow::resolve`] for how a value is picked.

use log::{debug, warn};

use crate::packet::Packet;
use crate::types::{Address, Sequence, REPEAT_COUNT};

/// Up to three votes, one slot per sequence number.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct VoteWindow {
    slots: [Option<u8>; REPEAT_COUNT],
}

impl VoteWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the value received with sequence number `sequence`.
    pub fn record(&mut self, sequence: Sequence, data: u8) {
        debug!("Vote slot {}: {}", sequence.index(), data);
        self.slots[sequence.index()] = Some(data);
    }

    pub fn get(&self, sequence: Sequence) -> Option<u8> {
        self.slots[sequence.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Pick the value to trust.
    ///
    /// Slot 0 wins unless all three slots are filled and slots 1 and 2
    /// agree against it. Without slot 0, slot 1 wins over slot 2.
    /// Returns `None` only for an empty window.
    pub fn resolve(&self) -> Option<u8> {
        match self.slots {
            [Some(v0), Some(v1), Some(v2)] if v0 != v1 && v1 == v2 => Some(v1),
            [Some(v0), _, _] => Some(v0),
            [None, Some(v1), _] => Some(v1),
            [None, None, v2] => v2,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Stage {
    /// Waiting for the first packet to our address.
    First,
    /// A sequence 0 packet was recorded, the next packet may be sequence 1.
    AfterFirst,
    /// A sequence 1 packet was recorded, the next packet may be sequence 2.
    AfterSecond,
}

/// Outcome of feeding a packet to a [`VoteCollector`].
#[derive(Debug)]
pub enum Vote {
    /// Another packet is needed. Feed it to the inner collector.
    NeedPacket(VoteCollector),
    /// The vote is complete.
    Resolved(u8),
}

/// Sans-io vote combiner for one logical value.
///
/// Packets are consumed strictly in arrival order. Frames are never
/// retried, so a lost frame or a packet to another address simply ends
/// the window early, and the value is resolved from what was collected.
///
/// # Example
/// ```
/// use rftrx_proto::{addr, Packet, Sequence, Vote, VoteCollector};
/// let me = addr(3);
/// let mut vote = Vote::NeedPacket(VoteCollector::new(me));
/// for (seq, data) in Sequence::ALL.iter().zip([5, 9, 9].iter()) {
///     vote = match vote {
///         Vote::NeedPacket(collector) => collector.receive_packet(Packet::new(me, *seq, *data)),
///         resolved => resolved,
///     };
/// }
/// assert!(matches!(vote, Vote::Resolved(9)));
/// ```
#[derive(Debug, Clone)]
pub struct VoteCollector {
    address: Address,
    stage: Stage,
    window: VoteWindow,
}

impl VoteCollector {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            stage: Stage::First,
            window: VoteWindow::new(),
        }
    }

    /// The address votes are collected for.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Whether the collector is still waiting for the first packet of a window.
    /// Only then are packets to other addresses skipped instead of ending the window.
    pub fn is_idle(&self) -> bool {
        self.stage == Stage::First
    }

    /// Feed the next received packet.
    pub fn receive_packet(mut self, packet: Packet) -> Vote {
        let for_us = packet.address() == self.address;
        let sequence = packet.sequence().map(Sequence::index);

        if self.stage == Stage::First {
            if !for_us {
                debug!("Skipping packet to address {}", *packet.address());
                return Vote::NeedPacket(self);
            }
            if sequence == Some(0) {
                self.record(&packet);
                self.stage = Stage::AfterFirst;
                return Vote::NeedPacket(self);
            }
        }
        if self.stage != Stage::AfterSecond && for_us && sequence == Some(1) {
            self.record(&packet);
            self.stage = Stage::AfterSecond;
            return Vote::NeedPacket(self);
        }
        if for_us && sequence == Some(2) {
            self.record(&packet);
        }
        self.resolve()
    }

    fn record(&mut self, packet: &Packet) {
        if let Some(sequence) = packet.sequence() {
            self.window.record(sequence, packet.data());
        }
    }

    fn resolve(self) -> Vote {
        match self.window.resolve() {
            Some(value) => {
                debug!("Resolved value {} for address {}", value, *self.address);
                Vote::Resolved(value)
            }
            None => {
                warn!("Empty vote window, sequence field out of range. Restarting.");
                Vote::NeedPacket(Self::new(self.address))
            }
        }
    }
}
