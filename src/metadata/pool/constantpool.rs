//! `Vec`-backed [`SymbolPool`] implementation and its write-phase builder.
//!
//! [`ConstantPoolBuilder`] is used while a class is being loaded; [`ConstantPoolBuilder::build`]
//! consumes it and yields an immutable [`ConstantPool`] that can be shared between threads.
//! Slot `0` is reserved and never resolves, matching the class-file convention.

use std::collections::HashMap;

use crate::{
    metadata::pool::{CompositeRef, PoolEntry, SymbolPool},
    Error, Result,
};

/// Highest handle a pool may hand out.
const MAX_HANDLE: usize = u16::MAX as usize;

/// Owned storage of one pool slot.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Slot {
    Utf8(Box<str>),
    Class(u16),
    MethodRef(CompositeRef),
    NameAndType(CompositeRef),
}

impl Slot {
    fn as_entry(&self) -> PoolEntry<'_> {
        match self {
            Slot::Utf8(symbol) => PoolEntry::Utf8(symbol),
            Slot::Class(name) => PoolEntry::Class(*name),
            Slot::MethodRef(composite) => PoolEntry::MethodRef(*composite),
            Slot::NameAndType(composite) => PoolEntry::NameAndType(*composite),
        }
    }
}

/// An immutable symbol pool.
///
/// Built once through [`ConstantPoolBuilder`] and read-only afterwards; it is `Send + Sync`
/// and is typically shared behind an `Arc` by every record stream of its class.
///
/// # Examples
///
/// ```rust
/// use recparams::metadata::pool::{ConstantPoolBuilder, SymbolPool};
///
/// let mut builder = ConstantPoolBuilder::new();
/// let name = builder.utf8("origin")?;
/// let descriptor = builder.utf8("()I")?;
/// let nat = builder.name_and_type(name, descriptor)?;
///
/// let pool = builder.build();
/// let composite = pool.name_and_type_at(nat)?;
/// assert_eq!(pool.symbol_at(composite.low())?, "origin");
/// # Ok::<(), recparams::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct ConstantPool {
    slots: Vec<Option<Slot>>,
}

impl Default for ConstantPool {
    /// A pool holding only the reserved slot `0`.
    fn default() -> Self {
        ConstantPoolBuilder::new().build()
    }
}

impl SymbolPool for ConstantPool {
    fn len(&self) -> usize {
        self.slots.len()
    }

    fn entry(&self, handle: u16) -> Result<PoolEntry<'_>> {
        match self.slots.get(handle as usize) {
            Some(Some(slot)) => Ok(slot.as_entry()),
            _ => Err(Error::InvalidHandle(handle)),
        }
    }
}

/// Write-phase builder for [`ConstantPool`].
///
/// Entries are appended in order and receive increasing handles starting at `1`.
/// Identifiers added through [`ConstantPoolBuilder::utf8`] are deduplicated. Entries can
/// also be placed at an explicit handle with the `set_*` methods, which is how a class-file
/// reader reproduces the handles found on disk; skipped slots stay empty and never resolve.
#[derive(Debug)]
pub struct ConstantPoolBuilder {
    slots: Vec<Option<Slot>>,
    utf8: HashMap<Box<str>, u16>,
}

impl ConstantPoolBuilder {
    /// Creates an empty builder holding only the reserved slot `0`.
    #[must_use]
    pub fn new() -> Self {
        ConstantPoolBuilder {
            slots: vec![None],
            utf8: HashMap::new(),
        }
    }

    /// Adds an identifier, returning the existing handle if it was added before.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if the pool has no free handle left.
    pub fn utf8(&mut self, symbol: &str) -> Result<u16> {
        if let Some(&handle) = self.utf8.get(symbol) {
            return Ok(handle);
        }

        let handle = self.push(Slot::Utf8(symbol.into()))?;
        self.utf8.insert(symbol.into(), handle);
        Ok(handle)
    }

    /// Adds a class entry pointing at the identifier `name`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if the pool has no free handle left.
    pub fn class(&mut self, name: u16) -> Result<u16> {
        self.push(Slot::Class(name))
    }

    /// Adds a name-and-type entry, packed as `(descriptor, name)`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if the pool has no free handle left.
    pub fn name_and_type(&mut self, name: u16, descriptor: u16) -> Result<u16> {
        self.push(Slot::NameAndType(CompositeRef::new(descriptor, name)))
    }

    /// Adds a method reference, packed as `(name_and_type, class)`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if the pool has no free handle left.
    pub fn method_ref(&mut self, class: u16, name_and_type: u16) -> Result<u16> {
        self.push(Slot::MethodRef(CompositeRef::new(name_and_type, class)))
    }

    /// Places an identifier at `handle`.
    ///
    /// Later calls to [`ConstantPoolBuilder::utf8`] return `handle` for `symbol` unless the
    /// symbol already has a live handle.
    ///
    /// # Errors
    /// Returns [`Error::InvalidHandle`] for the reserved handle `0`.
    pub fn set_utf8(&mut self, handle: u16, symbol: &str) -> Result<()> {
        self.place(handle, Slot::Utf8(symbol.into()))?;
        self.utf8.entry(symbol.into()).or_insert(handle);
        Ok(())
    }

    /// Places a class entry at `handle`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidHandle`] for the reserved handle `0`.
    pub fn set_class(&mut self, handle: u16, name: u16) -> Result<()> {
        self.place(handle, Slot::Class(name))
    }

    /// Places a method reference with a raw packed slot at `handle`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidHandle`] for the reserved handle `0`.
    pub fn set_method_ref(&mut self, handle: u16, packed: CompositeRef) -> Result<()> {
        self.place(handle, Slot::MethodRef(packed))
    }

    /// Places a name-and-type entry with a raw packed slot at `handle`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidHandle`] for the reserved handle `0`.
    pub fn set_name_and_type(&mut self, handle: u16, packed: CompositeRef) -> Result<()> {
        self.place(handle, Slot::NameAndType(packed))
    }

    /// Freezes the builder into an immutable [`ConstantPool`].
    #[must_use]
    pub fn build(self) -> ConstantPool {
        log::debug!("constant pool frozen with {} slots", self.slots.len());
        ConstantPool { slots: self.slots }
    }

    fn push(&mut self, slot: Slot) -> Result<u16> {
        let handle = self.slots.len();
        if handle > MAX_HANDLE {
            return Err(Error::OutOfBounds);
        }

        self.slots.push(Some(slot));
        // Bounded by MAX_HANDLE above
        #[allow(clippy::cast_possible_truncation)]
        Ok(handle as u16)
    }

    fn place(&mut self, handle: u16, slot: Slot) -> Result<()> {
        if handle == 0 {
            return Err(Error::InvalidHandle(handle));
        }

        let index = handle as usize;
        if self.slots.len() <= index {
            self.slots.resize(index + 1, None);
        }
        if let Some(Slot::Utf8(old)) = self.slots[index].replace(slot) {
            self.forget(&old, handle);
        }
        Ok(())
    }

    /// Drops the dedup entry of `symbol` if it pointed at the overwritten `handle`,
    /// falling back to another slot that still holds the same symbol.
    // Slot indices never exceed MAX_HANDLE
    #[allow(clippy::cast_possible_truncation)]
    fn forget(&mut self, symbol: &str, handle: u16) {
        if self.utf8.get(symbol) != Some(&handle) {
            return;
        }

        let survivor = self
            .slots
            .iter()
            .position(|slot| matches!(slot, Some(Slot::Utf8(other)) if other.as_ref() == symbol));
        match survivor {
            Some(other) => self.utf8.insert(symbol.into(), other as u16),
            None => self.utf8.remove(symbol),
        };
    }
}

impl Default for ConstantPoolBuilder {
    fn default() -> Self {
        Self::new()
    }
}
