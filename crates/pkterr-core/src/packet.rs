//! Packet handle consumed by error models.
//!
//! Error models only need two facts about a packet: its uid (assigned by the
//! host packet system) and its length. [`PacketView`] exposes exactly that, so
//! hosts can plug their own packet representation in. [`Packet`] is a plain
//! implementation backed by [`Bytes`] for simulations and tests.

use bytes::Bytes;

/// Unique packet identifier assigned by the host packet system.
pub type PacketUid = u64;

/// Read-only view of a packet as seen by an error model.
pub trait PacketView {
    /// Unique identifier of this packet instance.
    fn uid(&self) -> PacketUid;

    /// Packet length in bytes.
    fn byte_len(&self) -> usize;

    /// Packet length in bits.
    ///
    /// Defaults to `byte_len() * 8`. Hosts that track a true bit length (for
    /// example, packets with a trailing partial byte) override this.
    fn bit_len(&self) -> u64 {
        self.byte_len() as u64 * 8
    }
}

/// A packet with a uid and an immutable payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    uid: PacketUid,
    payload: Bytes,
}

impl Packet {
    /// Create a packet from a uid and payload.
    pub fn new(uid: PacketUid, payload: impl Into<Bytes>) -> Self {
        Self { uid, payload: payload.into() }
    }

    /// Create a packet of `len` zero bytes.
    pub fn zeroed(uid: PacketUid, len: usize) -> Self {
        Self::new(uid, vec![0u8; len])
    }

    /// Packet uid.
    pub fn uid(&self) -> PacketUid {
        self.uid
    }

    /// Payload bytes.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// True if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

impl PacketView for Packet {
    fn uid(&self) -> PacketUid {
        self.uid
    }

    fn byte_len(&self) -> usize {
        self.payload.len()
    }
}
