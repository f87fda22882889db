//! Write-phase construction of record tables.
//!
//! A [`RecordTableBuilder`] is created with a fixed schema and record count while a class is
//! being loaded. Fields are written through the builder directly or through a
//! [`RecordWriter`] cursor, then [`RecordTableBuilder::freeze`] consumes the builder and
//! yields the immutable [`RecordTable`]. There is no way back from a frozen table to a
//! builder.
//!
//! # Write rules
//!
//! | Schema | Fields                        | Rewrites                              |
//! |--------|-------------------------------|---------------------------------------|
//! | V1     | the four `set_*` setters      | allowed until freeze                  |
//! | V2     | the four `set_*` setters      | each field once, [`Error::AlreadyInitialized`] after |
//! | V3     | [`RecordTableBuilder::initialize`] | once, [`Error::AlreadyInitialized`] after |
//!
//! Using a setter of the other layout is rejected with [`Error::SchemaMismatch`].
//!
//! A record counts as initialized once its name and descriptor (V1, V2) or its accessor
//! (V3) have been written. Access flags and signature default to `0`.

use crate::{
    metadata::{
        pool::SymbolPool,
        record::{
            info::{offset, AccessorParamInfoMut, RecordParamInfoMut},
            RecordTable, SchemaVersion,
        },
        validation::{validate_record_count, validate_table, ValidationConfig},
    },
    utils::BitSet,
    Error, Result,
};

/// Builder for a [`RecordTable`] of a fixed schema and record count.
///
/// # Example
///
/// ```rust
/// use recparams::{
///     metadata::record::{RecordTableBuilder, SchemaVersion},
///     Error,
/// };
///
/// let mut builder = RecordTableBuilder::new(SchemaVersion::V3, 2);
/// builder.initialize(0, 10)?;
/// builder.initialize(1, 11)?;
/// assert!(matches!(builder.initialize(1, 12), Err(Error::AlreadyInitialized(1))));
///
/// let table = builder.freeze()?;
/// assert_eq!(table.words(), &[10, 11]);
/// # Ok::<(), recparams::Error>(())
/// ```
#[derive(Debug)]
pub struct RecordTableBuilder {
    schema: SchemaVersion,
    words: Vec<u16>,
    /// One bit per word; set once the word has been written
    written: BitSet,
}

impl RecordTableBuilder {
    /// Creates a builder for `count` zeroed records laid out in `schema`.
    ///
    /// # Panics
    /// Panics if `count` records of `schema` do not fit in `usize` words.
    #[must_use]
    pub fn new(schema: SchemaVersion, count: usize) -> Self {
        let Some(words) = count.checked_mul(schema.slot_width()) else {
            panic!("{count} {schema} records overflow the word count");
        };
        RecordTableBuilder {
            schema,
            words: vec![0; words],
            written: BitSet::new(words),
        }
    }

    /// Schema of the table being built
    #[must_use]
    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len() / self.schema.slot_width()
    }

    /// `true` if the table will hold no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Opens a write cursor positioned at the first record.
    #[must_use]
    pub fn writer(&mut self) -> RecordWriter<'_> {
        RecordWriter {
            builder: self,
            index: 0,
        }
    }

    /// Sets the access flags of record `index` (V1, V2).
    ///
    /// # Errors
    /// Returns [`Error::SchemaMismatch`] on a V3 builder, [`Error::OutOfBounds`] for an
    /// index past the end, or [`Error::AlreadyInitialized`] when rewriting a V2 field.
    pub fn set_access_flags(&mut self, index: usize, value: u16) -> Result<()> {
        self.described(index, offset::ACCESS_FLAGS)?
            .set_access_flags(value);
        Ok(())
    }

    /// Sets the name handle of record `index` (V1, V2).
    ///
    /// # Errors
    /// See [`RecordTableBuilder::set_access_flags`].
    pub fn set_name_index(&mut self, index: usize, value: u16) -> Result<()> {
        self.described(index, offset::NAME_INDEX)?
            .set_name_index(value);
        Ok(())
    }

    /// Sets the descriptor handle of record `index` (V1, V2).
    ///
    /// # Errors
    /// See [`RecordTableBuilder::set_access_flags`].
    pub fn set_descriptor_index(&mut self, index: usize, value: u16) -> Result<()> {
        self.described(index, offset::DESCRIPTOR_INDEX)?
            .set_descriptor_index(value);
        Ok(())
    }

    /// Sets the signature handle of record `index` (V1, V2); `0` means no signature.
    ///
    /// # Errors
    /// See [`RecordTableBuilder::set_access_flags`].
    pub fn set_signature_index(&mut self, index: usize, value: u16) -> Result<()> {
        self.described(index, offset::SIGNATURE_INDEX)?
            .set_signature_index(value);
        Ok(())
    }

    /// Stores the accessor handle of record `index` (V3). Each record is initialized once.
    ///
    /// # Errors
    /// Returns [`Error::SchemaMismatch`] on a V1 or V2 builder, [`Error::OutOfBounds`] for
    /// an index past the end, or [`Error::AlreadyInitialized`] on a second call.
    pub fn initialize(&mut self, index: usize, accessor_index: u16) -> Result<()> {
        if self.schema.is_described() {
            return Err(Error::SchemaMismatch {
                expected: SchemaVersion::V3,
                found: self.schema,
            });
        }

        let slots = self.claim(index, offset::ACCESSOR_INDEX)?;
        AccessorParamInfoMut::from_slots(slots).initialize(accessor_index);
        Ok(())
    }

    /// Freezes the builder into an immutable table.
    ///
    /// Runs the checks of [`ValidationConfig::minimal`], which need no symbol pool.
    ///
    /// # Errors
    /// Returns [`Error::Uninitialized`] naming the first record that was never written, or
    /// [`Error::Malformed`] if the record count exceeds the configured limit.
    pub fn freeze(self) -> Result<RecordTable> {
        self.check(&ValidationConfig::minimal())?;
        self.into_table()
    }

    /// Freezes the builder, then validates the table against `pool` as selected by `config`.
    ///
    /// The pool is only consulted if [`ValidationConfig::needs_pool`] holds.
    ///
    /// # Errors
    /// Returns the first problem found; see [`RecordTableBuilder::freeze`] and
    /// [`crate::metadata::validation::validate_table`].
    pub fn freeze_validated<P: SymbolPool + ?Sized>(
        self,
        pool: &P,
        config: &ValidationConfig,
    ) -> Result<RecordTable> {
        self.check(config)?;
        let table = self.into_table()?;
        if config.needs_pool() {
            validate_table(&table, pool, config)?;
        }
        Ok(table)
    }

    fn check(&self, config: &ValidationConfig) -> Result<()> {
        if config.enable_structural_validation {
            validate_record_count(self.len(), config)?;
        }
        if config.enable_initialization_check {
            if let Some(index) = self.first_uninitialized() {
                log::warn!("{} record {} was never initialized", self.schema, index);
                return Err(Error::Uninitialized(index));
            }
        }
        Ok(())
    }

    fn into_table(self) -> Result<RecordTable> {
        log::debug!(
            "{} record table frozen with {} records",
            self.schema,
            self.len()
        );
        RecordTable::from_words(self.schema, self.words)
    }

    fn first_uninitialized(&self) -> Option<usize> {
        if self.written.is_full() {
            return None;
        }
        if !self.schema.is_described() {
            return self.written.first_unset();
        }

        let width = self.schema.slot_width();
        (0..self.len()).find(|&index| {
            let base = index * width;
            !(self.written.contains(base + offset::NAME_INDEX)
                && self.written.contains(base + offset::DESCRIPTOR_INDEX))
        })
    }

    fn described(&mut self, index: usize, slot: usize) -> Result<RecordParamInfoMut<'_>> {
        if !self.schema.is_described() {
            return Err(Error::SchemaMismatch {
                expected: SchemaVersion::V1,
                found: self.schema,
            });
        }

        Ok(RecordParamInfoMut::from_slots(self.claim(index, slot)?))
    }

    /// Marks word `slot` of record `index` as written and returns the record's slots.
    fn claim(&mut self, index: usize, slot: usize) -> Result<&mut [u16]> {
        if index >= self.len() {
            return Err(Error::OutOfBounds);
        }

        let width = self.schema.slot_width();
        let start = index * width;
        if !self.written.insert(start + slot) && self.schema.is_set_once() {
            return Err(Error::AlreadyInitialized(index));
        }
        Ok(&mut self.words[start..start + width])
    }
}

/// Write-phase cursor over the records of a [`RecordTableBuilder`].
///
/// Follows the same `index`/`advance`/`done` protocol as
/// [`crate::metadata::record::RecordStream`]; every setter writes the record at the
/// current position.
///
/// ```rust
/// use recparams::metadata::record::{RecordTableBuilder, SchemaVersion};
///
/// let accessors = [10, 11, 12];
/// let mut builder = RecordTableBuilder::new(SchemaVersion::V3, accessors.len());
///
/// let mut writer = builder.writer();
/// for accessor in accessors {
///     writer.initialize(accessor)?;
///     writer.advance();
/// }
/// assert!(writer.done());
///
/// assert_eq!(builder.freeze()?.len(), 3);
/// # Ok::<(), recparams::Error>(())
/// ```
#[derive(Debug)]
pub struct RecordWriter<'a> {
    builder: &'a mut RecordTableBuilder,
    index: usize,
}

impl RecordWriter<'_> {
    /// Current record index
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves to the next record
    pub fn advance(&mut self) {
        debug_assert!(!self.done(), "advance past the end of the table");
        self.index += 1;
    }

    /// `true` once every record has been visited
    #[must_use]
    pub fn done(&self) -> bool {
        self.index >= self.builder.len()
    }

    /// Sets the access flags of the current record.
    ///
    /// # Errors
    /// See [`RecordTableBuilder::set_access_flags`].
    pub fn set_access_flags(&mut self, value: u16) -> Result<()> {
        self.builder.set_access_flags(self.index, value)
    }

    /// Sets the name handle of the current record.
    ///
    /// # Errors
    /// See [`RecordTableBuilder::set_name_index`].
    pub fn set_name_index(&mut self, value: u16) -> Result<()> {
        self.builder.set_name_index(self.index, value)
    }

    /// Sets the descriptor handle of the current record.
    ///
    /// # Errors
    /// See [`RecordTableBuilder::set_descriptor_index`].
    pub fn set_descriptor_index(&mut self, value: u16) -> Result<()> {
        self.builder.set_descriptor_index(self.index, value)
    }

    /// Sets the signature handle of the current record.
    ///
    /// # Errors
    /// See [`RecordTableBuilder::set_signature_index`].
    pub fn set_signature_index(&mut self, value: u16) -> Result<()> {
        self.builder.set_signature_index(self.index, value)
    }

    /// Initializes the accessor handle of the current record.
    ///
    /// # Errors
    /// See [`RecordTableBuilder::initialize`].
    pub fn initialize(&mut self, accessor_index: u16) -> Result<()> {
        self.builder.initialize(self.index, accessor_index)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::test::factories::{accessor_chain_pool, described_pool};

    #[test]
    fn v1_fields_rewritable() {
        let mut builder = RecordTableBuilder::new(SchemaVersion::V1, 1);
        builder.set_name_index(0, 1).unwrap();
        builder.set_name_index(0, 2).unwrap();
        builder.set_descriptor_index(0, 3).unwrap();
        let table = builder.freeze().unwrap();

        assert_eq!(table.words(), &[0, 2, 3, 0]);
    }

    #[test]
    fn v2_fields_set_once() {
        let mut builder = RecordTableBuilder::new(SchemaVersion::V2, 2);
        builder.set_name_index(1, 1).unwrap();
        builder.set_access_flags(1, 0x10).unwrap();
        assert!(matches!(
            builder.set_name_index(1, 2),
            Err(Error::AlreadyInitialized(1))
        ));
        assert!(matches!(
            builder.set_access_flags(1, 0),
            Err(Error::AlreadyInitialized(1))
        ));
        // other fields of the same record and other records are unaffected
        builder.set_descriptor_index(1, 3).unwrap();
        builder.set_name_index(0, 4).unwrap();
    }

    #[test]
    fn v3_initialize_once() {
        let mut builder = RecordTableBuilder::new(SchemaVersion::V3, 1);
        builder.initialize(0, 10).unwrap();
        assert!(matches!(
            builder.initialize(0, 10),
            Err(Error::AlreadyInitialized(0))
        ));
    }

    #[test]
    fn setters_isolated_by_schema() {
        let mut v3 = RecordTableBuilder::new(SchemaVersion::V3, 1);
        assert!(matches!(
            v3.set_name_index(0, 1),
            Err(Error::SchemaMismatch {
                expected: SchemaVersion::V1,
                found: SchemaVersion::V3,
            })
        ));
        assert!(v3.set_signature_index(0, 1).is_err());

        for schema in [SchemaVersion::V1, SchemaVersion::V2] {
            let mut described = RecordTableBuilder::new(schema, 1);
            assert!(matches!(
                described.initialize(0, 1),
                Err(Error::SchemaMismatch {
                    expected: SchemaVersion::V3,
                    ..
                })
            ));
        }
    }

    #[test]
    fn out_of_range_index() {
        for schema in SchemaVersion::iter() {
            let mut builder = RecordTableBuilder::new(schema, 2);
            let result = if schema.is_described() {
                builder.set_name_index(2, 1)
            } else {
                builder.initialize(2, 1)
            };
            assert!(matches!(result, Err(Error::OutOfBounds)));
        }
    }

    #[test]
    fn uninitialized_record_rejected() {
        let mut builder = RecordTableBuilder::new(SchemaVersion::V1, 3);
        builder.set_name_index(0, 1).unwrap();
        builder.set_descriptor_index(0, 2).unwrap();
        builder.set_name_index(1, 1).unwrap();
        assert!(matches!(builder.freeze(), Err(Error::Uninitialized(1))));

        let mut builder = RecordTableBuilder::new(SchemaVersion::V3, 100);
        for index in (0..100).filter(|&i| i != 70) {
            builder.initialize(index, 1).unwrap();
        }
        assert!(matches!(builder.freeze(), Err(Error::Uninitialized(70))));
    }

    #[test]
    fn initialization_check_can_be_disabled() {
        let pool = accessor_chain_pool();
        let builder = RecordTableBuilder::new(SchemaVersion::V3, 2);
        let table = builder
            .freeze_validated(&pool, &ValidationConfig::disabled())
            .unwrap();
        assert_eq!(table.words(), &[0, 0]);
    }

    #[test]
    fn empty_builder_freezes() {
        for schema in SchemaVersion::iter() {
            let builder = RecordTableBuilder::new(schema, 0);
            assert!(builder.is_empty());
            let table = builder.freeze().unwrap();
            assert!(table.is_empty());
            assert_eq!(table.schema(), schema);
        }
    }

    #[test]
    fn writer_walks_every_record() {
        let mut builder = RecordTableBuilder::new(SchemaVersion::V2, 3);
        let mut writer = builder.writer();
        let mut visited = Vec::new();
        while !writer.done() {
            let handle = writer.index() as u16 + 1;
            writer.set_access_flags(0x0010).unwrap();
            writer.set_name_index(handle).unwrap();
            writer.set_descriptor_index(handle).unwrap();
            writer.set_signature_index(0).unwrap();
            visited.push(writer.index());
            writer.advance();
        }
        assert_eq!(visited, [0, 1, 2]);

        let table = builder.freeze().unwrap();
        assert_eq!(
            table.words(),
            &[0x10, 1, 1, 0, 0x10, 2, 2, 0, 0x10, 3, 3, 0]
        );
    }

    #[test]
    fn writer_rejects_writes_after_done() {
        for schema in SchemaVersion::iter() {
            let mut builder = RecordTableBuilder::new(schema, 1);
            let mut writer = builder.writer();
            writer.advance();
            assert!(writer.done());

            let result = if schema.is_described() {
                writer.set_name_index(1)
            } else {
                writer.initialize(1)
            };
            assert!(matches!(result, Err(Error::OutOfBounds)));
            if schema.is_described() {
                assert!(matches!(writer.set_access_flags(0), Err(Error::OutOfBounds)));
                assert!(matches!(writer.set_descriptor_index(1), Err(Error::OutOfBounds)));
                assert!(matches!(writer.set_signature_index(1), Err(Error::OutOfBounds)));
            }
        }
    }

    #[test]
    #[should_panic(expected = "overflow the word count")]
    fn oversized_count_panics() {
        let _ = RecordTableBuilder::new(SchemaVersion::V1, usize::MAX / 2);
    }

    #[test]
    fn pool_free_config_skips_pool() {
        let (pool, handles) = described_pool();
        let mut builder = RecordTableBuilder::new(SchemaVersion::V1, 1);
        builder.set_name_index(0, handles.name + 100).unwrap();
        builder.set_descriptor_index(0, handles.name + 100).unwrap();

        let config = ValidationConfig::minimal();
        assert!(!config.needs_pool());
        assert!(builder.freeze_validated(&pool, &config).is_ok());
    }

    #[test]
    fn freeze_validated_checks_handles() {
        let (pool, handles) = described_pool();

        let mut builder = RecordTableBuilder::new(SchemaVersion::V1, 1);
        builder.set_name_index(0, handles.name).unwrap();
        builder.set_descriptor_index(0, handles.name + 100).unwrap();
        assert!(matches!(
            builder.freeze_validated(&pool, &ValidationConfig::comprehensive()),
            Err(Error::InvalidHandle(_))
        ));

        let mut builder = RecordTableBuilder::new(SchemaVersion::V1, 1);
        builder.set_name_index(0, handles.name).unwrap();
        builder.set_descriptor_index(0, handles.descriptor).unwrap();
        builder.set_signature_index(0, handles.signature).unwrap();
        assert!(builder
            .freeze_validated(&pool, &ValidationConfig::comprehensive())
            .is_ok());
    }

    #[test]
    fn record_limit_enforced() {
        let pool = accessor_chain_pool();
        let mut builder = RecordTableBuilder::new(SchemaVersion::V3, 3);
        for index in 0..3 {
            builder.initialize(index, 10).unwrap();
        }
        let config = ValidationConfig {
            max_records: 2,
            ..ValidationConfig::comprehensive()
        };
        assert!(matches!(
            builder.freeze_validated(&pool, &config),
            Err(Error::Malformed { .. })
        ));
    }
}
