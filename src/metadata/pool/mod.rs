//! # Symbol Pool Module
//!
//! The symbol pool is the class's table of interned identifiers and composite
//! cross-references. Record tables never store text; they store 16-bit handles that are
//! resolved against a pool implementing [`SymbolPool`].
//!
//! The pool is owned by the class metadata and outlives every stream built against it.
//! It is read-only once the class is loaded, so resolution needs no synchronization.
//!
//! ## Entry kinds
//!
//! - `Utf8` - an interned identifier
//! - `Class` - a class entry pointing at its utf8 name
//! - `MethodRef` - a [`CompositeRef`] of `(name_and_type, class)`
//! - `NameAndType` - a [`CompositeRef`] of `(descriptor, name)`
//!
//! ## Usage
//!
//! ```rust
//! use recparams::metadata::pool::{ConstantPoolBuilder, SymbolPool};
//!
//! let mut builder = ConstantPoolBuilder::new();
//! let name = builder.utf8("x")?;
//! let pool = builder.build();
//!
//! assert_eq!(pool.symbol_at(name)?, "x");
//! # Ok::<(), recparams::Error>(())
//! ```

mod composite;
mod constantpool;

pub use composite::CompositeRef;
pub use constantpool::{ConstantPool, ConstantPoolBuilder};

use strum::{Display, EnumCount, EnumIter};

use crate::{Error, Result};

/// A resolved symbol pool entry, borrowing from the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolEntry<'a> {
    /// An interned identifier
    Utf8(&'a str),
    /// A class entry; holds the handle of its utf8 name
    Class(u16),
    /// A method reference; `high` = name-and-type handle, `low` = class handle
    MethodRef(CompositeRef),
    /// A name-and-type pair; `high` = descriptor handle, `low` = name handle
    NameAndType(CompositeRef),
}

impl PoolEntry<'_> {
    /// Returns the kind tag of this entry
    #[must_use]
    pub fn kind(&self) -> PoolEntryKind {
        match self {
            PoolEntry::Utf8(_) => PoolEntryKind::Utf8,
            PoolEntry::Class(_) => PoolEntryKind::Class,
            PoolEntry::MethodRef(_) => PoolEntryKind::MethodRef,
            PoolEntry::NameAndType(_) => PoolEntryKind::NameAndType,
        }
    }
}

/// Kind tag of a [`PoolEntry`], used in error reporting
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
pub enum PoolEntryKind {
    /// An interned identifier
    Utf8,
    /// A class entry
    Class,
    /// A method reference
    MethodRef,
    /// A name-and-type pair
    NameAndType,
}

/// Read-only access to a class's symbol pool.
///
/// Only [`SymbolPool::entry`] and [`SymbolPool::len`] must be provided. The typed helpers
/// check the kind of the resolved entry and report a mismatch as
/// [`Error::UnexpectedPoolEntry`], so a composite entry is never read where a symbol was
/// expected or the other way around.
///
/// Implementations must be `Sync`: streams over the same pool are used from many threads
/// at once during the read phase.
pub trait SymbolPool: Sync {
    /// Number of slots in the pool, including the unused slot `0`
    fn len(&self) -> usize;

    /// Returns `true` if the pool has no usable entries
    fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Resolve `handle` to its entry.
    ///
    /// # Errors
    /// Returns [`Error::InvalidHandle`] if `handle` does not name an entry.
    fn entry(&self, handle: u16) -> Result<PoolEntry<'_>>;

    /// Resolve `handle` as an interned identifier.
    ///
    /// # Errors
    /// Returns [`Error::InvalidHandle`] for a dangling handle, or
    /// [`Error::UnexpectedPoolEntry`] if the entry is not `Utf8`.
    fn symbol_at(&self, handle: u16) -> Result<&str> {
        match self.entry(handle)? {
            PoolEntry::Utf8(symbol) => Ok(symbol),
            other => Err(unexpected(handle, PoolEntryKind::Utf8, other.kind())),
        }
    }

    /// Read the packed slot of the method reference at `handle`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidHandle`] for a dangling handle, or
    /// [`Error::UnexpectedPoolEntry`] if the entry is not a `MethodRef`.
    fn method_ref_at(&self, handle: u16) -> Result<CompositeRef> {
        match self.entry(handle)? {
            PoolEntry::MethodRef(composite) => Ok(composite),
            other => Err(unexpected(handle, PoolEntryKind::MethodRef, other.kind())),
        }
    }

    /// Read the packed slot of the name-and-type entry at `handle`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidHandle`] for a dangling handle, or
    /// [`Error::UnexpectedPoolEntry`] if the entry is not a `NameAndType`.
    fn name_and_type_at(&self, handle: u16) -> Result<CompositeRef> {
        match self.entry(handle)? {
            PoolEntry::NameAndType(composite) => Ok(composite),
            other => Err(unexpected(handle, PoolEntryKind::NameAndType, other.kind())),
        }
    }
}

fn unexpected(handle: u16, expected: PoolEntryKind, found: PoolEntryKind) -> Error {
    Error::UnexpectedPoolEntry {
        handle,
        expected,
        found,
    }
}
