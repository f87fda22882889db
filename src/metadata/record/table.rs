//! Frozen record parameter tables.
//!
//! A [`RecordTable`] is a flat run of `N * slot_width` 16-bit words. It is produced by
//! [`crate::metadata::record::RecordTableBuilder::freeze`] or by
//! [`RecordTable::from_words`] and is immutable afterwards, so any number of threads can
//! read it concurrently without coordination.

use std::slice::ChunksExact;

use rayon::prelude::*;

use crate::{
    metadata::{
        pool::SymbolPool,
        record::{RecordStream, RecordView, SchemaVersion},
    },
    Error, Result,
};

/// An immutable table of record parameter descriptors.
///
/// ## Thread Safety
///
/// The table owns its words and exposes them only through shared borrows, which makes it
/// `Send + Sync`. Share it behind an `Arc` or borrow it directly from scoped threads.
///
/// ## Example
///
/// ```rust
/// use recparams::metadata::record::{RecordTable, SchemaVersion};
///
/// let table = RecordTable::from_words(SchemaVersion::V3, vec![10, 11, 12])?;
/// assert_eq!(table.len(), 3);
///
/// let accessors: Vec<u16> = table
///     .iter()
///     .map(|record| record.accessor_index())
///     .collect::<recparams::Result<_>>()?;
/// assert_eq!(accessors, [10, 11, 12]);
/// # Ok::<(), recparams::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordTable {
    schema: SchemaVersion,
    words: Box<[u16]>,
}

impl RecordTable {
    /// Creates a table from raw words laid out in `schema`.
    ///
    /// # Errors
    /// Returns [`Error::TableWidthMismatch`] if `words.len()` is not a multiple of the
    /// schema's slot width.
    pub fn from_words(schema: SchemaVersion, words: Vec<u16>) -> Result<Self> {
        if schema.record_count(words.len()).is_none() {
            return Err(Error::TableWidthMismatch {
                words: words.len(),
                width: schema.slot_width(),
            });
        }

        Ok(RecordTable {
            schema,
            words: words.into_boxed_slice(),
        })
    }

    /// Creates a table with no records.
    #[must_use]
    pub fn empty(schema: SchemaVersion) -> Self {
        RecordTable {
            schema,
            words: Box::default(),
        }
    }

    /// The slot layout of every record in this table
    #[must_use]
    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len() / self.schema.slot_width()
    }

    /// `true` if the table holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The raw backing words, `len() * schema().slot_width()` of them
    #[must_use]
    pub fn words(&self) -> &[u16] {
        &self.words
    }

    /// Returns a view of record `index`, or `None` if it is out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<RecordView<'_>> {
        self.slots(index)
            .map(|slots| RecordView::from_slots(self.schema, slots))
    }

    /// Opens a stream over every record, resolving through `pool`.
    #[must_use]
    pub fn stream<'a, P: SymbolPool + ?Sized>(&'a self, pool: &'a P) -> RecordStream<'a, P> {
        RecordStream::new(self, pool)
    }

    /// Sequential iterator over record views in table order.
    #[must_use]
    pub fn iter(&self) -> RecordIter<'_> {
        RecordIter {
            schema: self.schema,
            chunks: self.words.chunks_exact(self.schema.slot_width()),
        }
    }

    /// Parallel iterator over record views.
    ///
    /// Records are independent, so any order of evaluation yields the same per-record
    /// results; indexed adapters such as `collect` preserve table order.
    pub fn par_iter(&self) -> impl IndexedParallelIterator<Item = RecordView<'_>> + '_ {
        let schema = self.schema;
        self.words
            .par_chunks_exact(schema.slot_width())
            .map(move |slots| RecordView::from_slots(schema, slots))
    }

    pub(crate) fn slots(&self, index: usize) -> Option<&[u16]> {
        let width = self.schema.slot_width();
        let start = index.checked_mul(width)?;
        self.words.get(start..start.checked_add(width)?)
    }
}

impl<'a> IntoIterator for &'a RecordTable {
    type Item = RecordView<'a>;
    type IntoIter = RecordIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sequential iterator over the records of a [`RecordTable`].
pub struct RecordIter<'a> {
    schema: SchemaVersion,
    chunks: ChunksExact<'a, u16>,
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = RecordView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks
            .next()
            .map(|slots| RecordView::from_slots(self.schema, slots))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for RecordIter<'_> {}

impl DoubleEndedIterator for RecordIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.chunks
            .next_back()
            .map(|slots| RecordView::from_slots(self.schema, slots))
    }
}
