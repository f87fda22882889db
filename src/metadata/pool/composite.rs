use std::fmt;

/// Two 16-bit symbol pool handles packed into one 32-bit slot.
///
/// Composite pool entries (method references, name-and-type pairs) store both of their
/// sub-handles in a single word:
/// - The high half (bits 16-31) holds the first sub-handle
/// - The low half (bits 0-15) holds the second sub-handle
///
/// For a method reference the high half is the name-and-type handle and the low half the
/// class handle. For a name-and-type entry the high half is the descriptor handle and the
/// low half the name handle.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompositeRef(pub u32);

impl CompositeRef {
    /// Packs `high` and `low` into one slot
    #[must_use]
    pub const fn new(high: u16, low: u16) -> Self {
        CompositeRef(((high as u32) << 16) | low as u32)
    }

    /// Returns the raw packed value
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the high sub-handle (bits 16-31)
    #[must_use]
    pub const fn high(&self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// Extracts the low sub-handle (bits 0-15)
    #[must_use]
    pub const fn low(&self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }
}

impl From<u32> for CompositeRef {
    fn from(value: u32) -> Self {
        CompositeRef(value)
    }
}

impl From<CompositeRef> for u32 {
    fn from(composite: CompositeRef) -> Self {
        composite.0
    }
}

impl fmt::Debug for CompositeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CompositeRef(0x{:08x}, high: {}, low: {})",
            self.0,
            self.high(),
            self.low()
        )
    }
}

impl fmt::Display for CompositeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}
