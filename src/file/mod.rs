//! Byte-level access to persisted class-file data.
//!
//! The record table's in-memory layout mirrors the on-disk `Record` attribute, an array
//! of big-endian 16-bit words. This module holds the primitives used to move between the
//! two representations:
//!
//! - [`io`] - endian-aware, bounds-checked reads and writes of primitive types
//! - [`parser`] - a cursor over a byte slice built on top of [`io`]

pub mod io;
pub mod parser;
