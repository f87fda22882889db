//! Forward cursor over a contiguous range of records.
//!
//! [`RecordStream`] is the read-side access path into a [`RecordTable`]. It borrows the
//! table and the [`SymbolPool`] the table's handles point into, walks the half-open range
//! `[start, limit)` one record at a time, and resolves fields of the current record on
//! request. Bounds are checked once, when the stream is created.
//!
//! Streams are cheap (two references and two indices). Each thread that reads a table
//! creates its own; nothing is shared between streams except the borrowed data.

use crate::{
    metadata::{
        pool::SymbolPool,
        record::{RecordAccessFlags, RecordTable, RecordView},
    },
    Error, Result,
};

/// A cursor over records `[start, limit)` of a [`RecordTable`].
///
/// # Protocol
///
/// ```rust
/// use recparams::metadata::{
///     pool::ConstantPoolBuilder,
///     record::{RecordStream, RecordTable, SchemaVersion},
/// };
///
/// let pool = ConstantPoolBuilder::new().build();
/// let table = RecordTable::from_words(SchemaVersion::V3, vec![7, 8, 9, 10])?;
///
/// // a limit below start selects everything up to the end of the table
/// let mut stream = RecordStream::with_range(&table, &pool, 2, 0)?;
/// let mut seen = Vec::new();
/// while !stream.done() {
///     seen.push((stream.index(), stream.accessor_index()?));
///     stream.advance();
/// }
/// assert_eq!(seen, [(2, 9), (3, 10)]);
/// # Ok::<(), recparams::Error>(())
/// ```
///
/// Field accessors read the record at [`RecordStream::index`] and must not be called once
/// [`RecordStream::done`] returns `true`.
#[derive(Debug)]
pub struct RecordStream<'a, P: ?Sized> {
    table: &'a RecordTable,
    pool: &'a P,
    index: usize,
    limit: usize,
}

impl<P: ?Sized> Clone for RecordStream<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized> Copy for RecordStream<'_, P> {}

impl<'a, P: SymbolPool + ?Sized> RecordStream<'a, P> {
    /// Creates a stream over every record of `table`.
    #[must_use]
    pub fn new(table: &'a RecordTable, pool: &'a P) -> Self {
        RecordStream {
            table,
            pool,
            index: 0,
            limit: table.len(),
        }
    }

    /// Creates a stream over records `[start, limit)`.
    ///
    /// A `limit` smaller than `start` means "no explicit limit": the stream runs to the end
    /// of the table.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `start` or the effective limit lies past the end of
    /// the table.
    pub fn with_range(
        table: &'a RecordTable,
        pool: &'a P,
        start: usize,
        limit: usize,
    ) -> Result<Self> {
        let len = table.len();
        let limit = if limit < start { len } else { limit };
        if start > len || limit > len {
            return Err(Error::OutOfBounds);
        }

        Ok(RecordStream {
            table,
            pool,
            index: start,
            limit,
        })
    }

    /// Current record index
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Exclusive end of the range
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of records left, including the current one
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.index)
    }

    /// Moves to the next record
    pub fn advance(&mut self) {
        debug_assert!(!self.done(), "advance past the end of the stream");
        self.index += 1;
    }

    /// `true` once the cursor has reached the end of its range
    #[must_use]
    pub fn done(&self) -> bool {
        self.index >= self.limit
    }

    /// The pool this stream resolves through
    #[must_use]
    pub fn pool(&self) -> &'a P {
        self.pool
    }

    /// View of the current record.
    ///
    /// # Panics
    /// Panics if the stream is [`done`](RecordStream::done).
    #[must_use]
    pub fn view(&self) -> RecordView<'a> {
        debug_assert!(!self.done(), "record read past the end of the stream");
        let schema = self.table.schema();
        let width = schema.slot_width();
        let start = self.index * width;
        RecordView::from_slots(schema, &self.table.words()[start..start + width])
    }

    /// Access flags of the current record.
    ///
    /// # Errors
    /// Returns [`Error::FieldUnavailable`] on a V3 table.
    pub fn access_flags(&self) -> Result<RecordAccessFlags> {
        self.view().access_flags()
    }

    /// Name of the current record's parameter, resolved through the pool.
    ///
    /// # Errors
    /// Returns an error if the stored handles do not resolve as the schema requires.
    pub fn name(&self) -> Result<&'a str> {
        self.view().name(self.pool)
    }

    /// Descriptor of the current record's parameter.
    ///
    /// # Errors
    /// Returns [`Error::FieldUnavailable`] on a V3 table, or a resolution error.
    pub fn descriptor(&self) -> Result<&'a str> {
        self.view().descriptor(self.pool)
    }

    /// Generic signature of the current record's parameter, `None` if it has none.
    ///
    /// # Errors
    /// Returns [`Error::FieldUnavailable`] on a V3 table, or a resolution error.
    pub fn signature(&self) -> Result<Option<&'a str>> {
        self.view().signature(self.pool)
    }

    /// Stored name handle of the current record.
    ///
    /// # Errors
    /// Returns [`Error::FieldUnavailable`] on a V3 table.
    pub fn name_index(&self) -> Result<u16> {
        self.view().name_index()
    }

    /// Stored descriptor handle of the current record.
    ///
    /// # Errors
    /// Returns [`Error::FieldUnavailable`] on a V3 table.
    pub fn descriptor_index(&self) -> Result<u16> {
        self.view().descriptor_index()
    }

    /// Stored signature handle of the current record.
    ///
    /// # Errors
    /// Returns [`Error::FieldUnavailable`] on a V3 table.
    pub fn signature_index(&self) -> Result<u16> {
        self.view().signature_index()
    }

    /// Stored accessor handle of the current record.
    ///
    /// # Errors
    /// Returns [`Error::FieldUnavailable`] on a V1 or V2 table.
    pub fn accessor_index(&self) -> Result<u16> {
        self.view().accessor_index()
    }
}
