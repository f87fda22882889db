use strum::{Display, EnumCount, EnumIter};

/// Slot layout of a record table.
///
/// The three layouts are successive designs of the same concept. A table picks exactly one
/// when it is built and every record in it uses that layout.
///
/// | Schema | Slots                                                         | Width |
/// |--------|---------------------------------------------------------------|-------|
/// | V1     | access_flags, name_index, descriptor_index, signature_index   | 4     |
/// | V2     | as V1; each slot written once, through the builder only       | 4     |
/// | V3     | accessor_index                                                | 1     |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
pub enum SchemaVersion {
    /// Four slots, fields settable individually while the table is built
    V1,
    /// Four slots, each field of a record written exactly once
    V2,
    /// One slot referencing the parameter's accessor method
    V3,
}

impl SchemaVersion {
    /// The schema new tables should be built with
    pub const CANONICAL: SchemaVersion = SchemaVersion::V3;

    /// Number of 16-bit words per record
    #[must_use]
    pub const fn slot_width(self) -> usize {
        match self {
            SchemaVersion::V1 | SchemaVersion::V2 => 4,
            SchemaVersion::V3 => 1,
        }
    }

    /// `true` if records store descriptor, signature and access flags directly
    #[must_use]
    pub const fn is_described(self) -> bool {
        matches!(self, SchemaVersion::V1 | SchemaVersion::V2)
    }

    /// `true` if each field may be written only once during construction
    #[must_use]
    pub const fn is_set_once(self) -> bool {
        matches!(self, SchemaVersion::V2 | SchemaVersion::V3)
    }

    /// Number of records held by `words` words, if they divide evenly.
    #[must_use]
    pub const fn record_count(self, words: usize) -> Option<usize> {
        let width = self.slot_width();
        if words % width == 0 {
            Some(words / width)
        } else {
            None
        }
    }
}
