//! Zero-copy views over single records of a record table.
//!
//! A view borrows exactly `slot_width` words of the table and interprets them according to
//! the table's [`SchemaVersion`]. Views never bounds-check: [`crate::metadata::record::RecordTable`]
//! and [`crate::metadata::record::RecordStream`] own the bounds and hand out views only for
//! indices inside the table.
//!
//! Setters exist only on the `*Mut` views, which are reachable exclusively through
//! [`crate::metadata::record::RecordTableBuilder`] during the write phase.

use crate::{
    metadata::{
        pool::SymbolPool,
        record::{RecordAccessFlags, SchemaVersion},
    },
    Error, Result,
};

/// Slot offsets of the four-slot layout (V1, V2).
pub(crate) mod offset {
    pub(crate) const ACCESS_FLAGS: usize = 0;
    pub(crate) const NAME_INDEX: usize = 1;
    pub(crate) const DESCRIPTOR_INDEX: usize = 2;
    pub(crate) const SIGNATURE_INDEX: usize = 3;

    /// Slot offset of the one-slot layout (V3).
    pub(crate) const ACCESSOR_INDEX: usize = 0;
}

/// View over a four-slot record (V1, V2).
///
/// Stores the pool handles of the parameter's name, descriptor and generic signature, plus
/// its access flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordParamInfo<'a> {
    schema: SchemaVersion,
    slots: &'a [u16],
}

impl<'a> RecordParamInfo<'a> {
    pub(crate) fn from_slots(schema: SchemaVersion, slots: &'a [u16]) -> Self {
        debug_assert!(schema.is_described());
        debug_assert_eq!(slots.len(), schema.slot_width());
        RecordParamInfo { schema, slots }
    }

    /// Schema of the table this record belongs to
    #[must_use]
    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    /// Raw access flags
    #[must_use]
    pub fn access_flags(&self) -> u16 {
        self.slots[offset::ACCESS_FLAGS]
    }

    /// Access flags as a typed bit set; unknown bits are retained
    #[must_use]
    pub fn flags(&self) -> RecordAccessFlags {
        RecordAccessFlags::from_bits_retain(self.access_flags())
    }

    /// Pool handle of the parameter name
    #[must_use]
    pub fn name_index(&self) -> u16 {
        self.slots[offset::NAME_INDEX]
    }

    /// Pool handle of the parameter's field descriptor
    #[must_use]
    pub fn descriptor_index(&self) -> u16 {
        self.slots[offset::DESCRIPTOR_INDEX]
    }

    /// Pool handle of the parameter's generic signature, `0` when it has none
    #[must_use]
    pub fn signature_index(&self) -> u16 {
        self.slots[offset::SIGNATURE_INDEX]
    }

    /// Resolve the parameter name.
    ///
    /// # Errors
    /// Returns an error if the name handle does not resolve to a utf8 symbol.
    pub fn name<'p, P: SymbolPool + ?Sized>(&self, pool: &'p P) -> Result<&'p str> {
        pool.symbol_at(self.name_index())
    }

    /// Resolve the parameter descriptor.
    ///
    /// # Errors
    /// Returns an error if the descriptor handle does not resolve to a utf8 symbol.
    pub fn descriptor<'p, P: SymbolPool + ?Sized>(&self, pool: &'p P) -> Result<&'p str> {
        pool.symbol_at(self.descriptor_index())
    }

    /// Resolve the generic signature, `None` if the parameter has none.
    ///
    /// # Errors
    /// Returns an error if a non-zero signature handle does not resolve to a utf8 symbol.
    pub fn signature<'p, P: SymbolPool + ?Sized>(&self, pool: &'p P) -> Result<Option<&'p str>> {
        match self.signature_index() {
            0 => Ok(None),
            handle => pool.symbol_at(handle).map(Some),
        }
    }
}

/// View over a one-slot record (V3).
///
/// The only stored field is a handle to the method reference of the parameter's accessor.
/// The name is recovered by walking that reference through the pool; descriptor, signature
/// and access flags are not recoverable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessorParamInfo<'a> {
    slots: &'a [u16],
}

impl<'a> AccessorParamInfo<'a> {
    pub(crate) fn from_slots(slots: &'a [u16]) -> Self {
        debug_assert_eq!(slots.len(), SchemaVersion::V3.slot_width());
        AccessorParamInfo { slots }
    }

    /// Pool handle of the accessor's method reference
    #[must_use]
    pub fn accessor_index(&self) -> u16 {
        self.slots[offset::ACCESSOR_INDEX]
    }

    /// Pool handle of the accessor's name-and-type entry (first hop of the decode chain).
    ///
    /// # Errors
    /// Returns an error if the accessor handle is not a method reference.
    pub fn name_and_type_index<P: SymbolPool + ?Sized>(&self, pool: &P) -> Result<u16> {
        Ok(pool.method_ref_at(self.accessor_index())?.high())
    }

    /// Pool handle of the parameter name (second hop of the decode chain).
    ///
    /// # Errors
    /// Returns an error if either hop lands on an entry of the wrong kind.
    pub fn name_index<P: SymbolPool + ?Sized>(&self, pool: &P) -> Result<u16> {
        let name_and_type = self.name_and_type_index(pool)?;
        let name = pool.name_and_type_at(name_and_type)?.low();
        log::trace!(
            "accessor {} -> name_and_type {} -> name {}",
            self.accessor_index(),
            name_and_type,
            name
        );
        Ok(name)
    }

    /// Resolve the parameter name through the accessor's method reference.
    ///
    /// The chain is `accessor -> MethodRef.high -> NameAndType.low -> Utf8`.
    ///
    /// # Errors
    /// Returns an error if any hop resolves to a dangling handle or an entry of the wrong
    /// kind.
    pub fn name<'p, P: SymbolPool + ?Sized>(&self, pool: &'p P) -> Result<&'p str> {
        pool.symbol_at(self.name_index(pool)?)
    }
}

/// A view over one record, tagged by the schema of its table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordView<'a> {
    /// Four-slot record (V1, V2)
    Described(RecordParamInfo<'a>),
    /// One-slot record (V3)
    Accessor(AccessorParamInfo<'a>),
}

impl<'a> RecordView<'a> {
    pub(crate) fn from_slots(schema: SchemaVersion, slots: &'a [u16]) -> Self {
        if schema.is_described() {
            RecordView::Described(RecordParamInfo::from_slots(schema, slots))
        } else {
            RecordView::Accessor(AccessorParamInfo::from_slots(slots))
        }
    }

    /// Schema of the table this record belongs to
    #[must_use]
    pub fn schema(&self) -> SchemaVersion {
        match self {
            RecordView::Described(info) => info.schema(),
            RecordView::Accessor(_) => SchemaVersion::V3,
        }
    }

    /// Resolve the parameter name, whatever the schema.
    ///
    /// # Errors
    /// Returns an error if the stored handles do not resolve as required.
    pub fn name<'p, P: SymbolPool + ?Sized>(&self, pool: &'p P) -> Result<&'p str> {
        match self {
            RecordView::Described(info) => info.name(pool),
            RecordView::Accessor(info) => info.name(pool),
        }
    }

    /// Resolve the parameter descriptor.
    ///
    /// # Errors
    /// Returns [`Error::FieldUnavailable`] for V3 records, otherwise an error if the handle
    /// does not resolve to a utf8 symbol.
    pub fn descriptor<'p, P: SymbolPool + ?Sized>(&self, pool: &'p P) -> Result<&'p str> {
        self.described("descriptor")?.descriptor(pool)
    }

    /// Resolve the generic signature, `None` if the parameter has none.
    ///
    /// # Errors
    /// Returns [`Error::FieldUnavailable`] for V3 records, otherwise an error if the handle
    /// does not resolve to a utf8 symbol.
    pub fn signature<'p, P: SymbolPool + ?Sized>(&self, pool: &'p P) -> Result<Option<&'p str>> {
        self.described("signature")?.signature(pool)
    }

    /// Typed access flags.
    ///
    /// # Errors
    /// Returns [`Error::FieldUnavailable`] for V3 records.
    pub fn access_flags(&self) -> Result<RecordAccessFlags> {
        Ok(self.described("access_flags")?.flags())
    }

    /// Stored name handle.
    ///
    /// # Errors
    /// Returns [`Error::FieldUnavailable`] for V3 records, whose name is derived.
    pub fn name_index(&self) -> Result<u16> {
        Ok(self.described("name_index")?.name_index())
    }

    /// Stored descriptor handle.
    ///
    /// # Errors
    /// Returns [`Error::FieldUnavailable`] for V3 records.
    pub fn descriptor_index(&self) -> Result<u16> {
        Ok(self.described("descriptor_index")?.descriptor_index())
    }

    /// Stored signature handle.
    ///
    /// # Errors
    /// Returns [`Error::FieldUnavailable`] for V3 records.
    pub fn signature_index(&self) -> Result<u16> {
        Ok(self.described("signature_index")?.signature_index())
    }

    /// Stored accessor handle.
    ///
    /// # Errors
    /// Returns [`Error::FieldUnavailable`] for V1 and V2 records.
    pub fn accessor_index(&self) -> Result<u16> {
        match self {
            RecordView::Accessor(info) => Ok(info.accessor_index()),
            RecordView::Described(info) => Err(Error::FieldUnavailable {
                field: "accessor_index",
                schema: info.schema(),
            }),
        }
    }

    fn described(&self, field: &'static str) -> Result<&RecordParamInfo<'a>> {
        match self {
            RecordView::Described(info) => Ok(info),
            RecordView::Accessor(_) => Err(Error::FieldUnavailable {
                field,
                schema: SchemaVersion::V3,
            }),
        }
    }
}

/// Mutable view over a four-slot record; write phase only.
pub(crate) struct RecordParamInfoMut<'a> {
    slots: &'a mut [u16],
}

impl<'a> RecordParamInfoMut<'a> {
    pub(crate) fn from_slots(slots: &'a mut [u16]) -> Self {
        debug_assert_eq!(slots.len(), SchemaVersion::V1.slot_width());
        RecordParamInfoMut { slots }
    }

    pub(crate) fn set_access_flags(&mut self, value: u16) {
        self.slots[offset::ACCESS_FLAGS] = value;
    }

    pub(crate) fn set_name_index(&mut self, value: u16) {
        self.slots[offset::NAME_INDEX] = value;
    }

    pub(crate) fn set_descriptor_index(&mut self, value: u16) {
        self.slots[offset::DESCRIPTOR_INDEX] = value;
    }

    pub(crate) fn set_signature_index(&mut self, value: u16) {
        self.slots[offset::SIGNATURE_INDEX] = value;
    }
}

/// Mutable view over a one-slot record; write phase only.
pub(crate) struct AccessorParamInfoMut<'a> {
    slots: &'a mut [u16],
}

impl<'a> AccessorParamInfoMut<'a> {
    pub(crate) fn from_slots(slots: &'a mut [u16]) -> Self {
        debug_assert_eq!(slots.len(), SchemaVersion::V3.slot_width());
        AccessorParamInfoMut { slots }
    }

    pub(crate) fn initialize(&mut self, accessor_index: u16) {
        self.slots[offset::ACCESSOR_INDEX] = accessor_index;
    }
}
