//! # Record Parameter Tables
//!
//! A record class's canonical constructor parameters are described by a compact,
//! fixed-width table of 16-bit slots. Every table uses one of three slot layouts, selected
//! by [`SchemaVersion`]:
//!
//! - **V1** stores `access_flags`, `name_index`, `descriptor_index` and `signature_index`
//!   per parameter. Fields are set individually while the table is being built.
//! - **V2** stores the same four slots, but each field of a record is written exactly once
//!   during construction.
//! - **V3** stores only `accessor_index`, a handle to the method reference of the parameter's
//!   accessor. The name is recovered through the symbol pool; nothing else is.
//!
//! Tables are written through a [`RecordTableBuilder`] during class loading and frozen into
//! an immutable [`RecordTable`]. Reads go through [`RecordStream`], a forward cursor over a
//! half-open range of records that borrows both the table and the
//! [`crate::metadata::pool::SymbolPool`].
//!
//! ## Example
//!
//! ```rust
//! use recparams::metadata::{
//!     pool::ConstantPoolBuilder,
//!     record::{RecordStream, RecordTableBuilder, SchemaVersion},
//! };
//!
//! let mut pool = ConstantPoolBuilder::new();
//! let x = pool.utf8("x")?;
//! let y = pool.utf8("y")?;
//! let int = pool.utf8("I")?;
//! let pool = pool.build();
//!
//! let mut builder = RecordTableBuilder::new(SchemaVersion::V1, 2);
//! builder.set_name_index(0, x)?;
//! builder.set_descriptor_index(0, int)?;
//! builder.set_name_index(1, y)?;
//! builder.set_descriptor_index(1, int)?;
//! let table = builder.freeze()?;
//!
//! let mut names = Vec::new();
//! let mut stream = RecordStream::new(&table, &pool);
//! while !stream.done() {
//!     names.push(stream.name()?);
//!     stream.advance();
//! }
//! assert_eq!(names, ["x", "y"]);
//! # Ok::<(), recparams::Error>(())
//! ```

mod attribute;
mod builder;
mod info;
mod schema;
mod stream;
mod table;

pub use attribute::{NestedAttribute, RecordAttribute};
pub use builder::{RecordTableBuilder, RecordWriter};
pub use info::{AccessorParamInfo, RecordParamInfo, RecordView};
pub use schema::SchemaVersion;
pub use stream::RecordStream;
pub use table::{RecordIter, RecordTable};

use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    /// Access flags of a record parameter (V1, V2 only).
    ///
    /// Bits outside the named set are preserved as stored.
    pub struct RecordAccessFlags: u16 {
        /// Declared `public`
        const PUBLIC = 0x0001;
        /// Declared `private`
        const PRIVATE = 0x0002;
        /// Declared `protected`
        const PROTECTED = 0x0004;
        /// Declared `final`
        const FINAL = 0x0010;
        /// Not present in source
        const SYNTHETIC = 0x1000;
        /// Implicitly declared
        const MANDATED = 0x8000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_flag_bits_retained() {
        let flags = RecordAccessFlags::from_bits_retain(0x0012 | 0x0100);
        assert!(flags.contains(RecordAccessFlags::FINAL));
        assert!(flags.contains(RecordAccessFlags::PRIVATE));
        assert_eq!(flags.bits(), 0x0112);
    }
}
