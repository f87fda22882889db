//! Internal helpers shared by the metadata modules.

mod bitset;

pub(crate) use bitset::BitSet;
