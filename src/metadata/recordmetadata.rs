//! Record parameter metadata of one class.
//!
//! [`RecordMetadata`] pairs a frozen [`RecordTable`] with the symbol pool its handles point
//! into. The pool is shared through an `Arc`, so the metadata can be cloned and handed to
//! other threads while every clone resolves against the same pool.

use std::sync::Arc;

use crate::{
    metadata::{
        pool::SymbolPool,
        record::{RecordStream, RecordTable, SchemaVersion},
    },
    Result,
};

/// A class's record parameter table together with its symbol pool.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use recparams::metadata::{
///     pool::ConstantPoolBuilder,
///     record::{RecordTableBuilder, SchemaVersion},
///     RecordMetadata,
/// };
///
/// let mut pool = ConstantPoolBuilder::new();
/// let class_name = pool.utf8("Point")?;
/// let class = pool.class(class_name)?;
/// let int_getter = pool.utf8("()I")?;
///
/// let mut builder = RecordTableBuilder::new(SchemaVersion::V3, 2);
/// for (index, field) in ["x", "y"].into_iter().enumerate() {
///     let name = pool.utf8(field)?;
///     let name_and_type = pool.name_and_type(name, int_getter)?;
///     builder.initialize(index, pool.method_ref(class, name_and_type)?)?;
/// }
///
/// let metadata = RecordMetadata::new(Arc::new(pool.build()), builder.freeze()?);
/// assert_eq!(metadata.param_names()?, ["x", "y"]);
/// assert_eq!(metadata.position_of("y")?, Some(1));
/// # Ok::<(), recparams::Error>(())
/// ```
#[derive(Debug)]
pub struct RecordMetadata<P: ?Sized> {
    pool: Arc<P>,
    table: RecordTable,
}

impl<P: ?Sized> Clone for RecordMetadata<P> {
    fn clone(&self) -> Self {
        RecordMetadata {
            pool: Arc::clone(&self.pool),
            table: self.table.clone(),
        }
    }
}

impl<P: SymbolPool + ?Sized> RecordMetadata<P> {
    /// Bundles `table` with the pool it was built against.
    #[must_use]
    pub fn new(pool: Arc<P>, table: RecordTable) -> Self {
        RecordMetadata { pool, table }
    }

    /// The symbol pool
    #[must_use]
    pub fn pool(&self) -> &Arc<P> {
        &self.pool
    }

    /// The record parameter table
    #[must_use]
    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    /// Schema of the table
    #[must_use]
    pub fn schema(&self) -> SchemaVersion {
        self.table.schema()
    }

    /// Number of record parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// `true` if the record has no parameters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Stream over every parameter.
    #[must_use]
    pub fn stream(&self) -> RecordStream<'_, P> {
        RecordStream::new(&self.table, &*self.pool)
    }

    /// Stream over parameters `[start, limit)`; see [`RecordStream::with_range`].
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range reaches past the last parameter.
    pub fn stream_range(&self, start: usize, limit: usize) -> Result<RecordStream<'_, P>> {
        RecordStream::with_range(&self.table, &*self.pool, start, limit)
    }

    /// Stream positioned on the parameter at `position`, covering only that parameter.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `position` is not a parameter index.
    pub fn param_at(&self, position: usize) -> Result<RecordStream<'_, P>> {
        self.stream_range(position, position.saturating_add(1))
    }

    /// Names of every parameter, in declaration order.
    ///
    /// # Errors
    /// Returns the first resolution error encountered.
    pub fn param_names(&self) -> Result<Vec<&str>> {
        let mut names = Vec::with_capacity(self.len());
        let mut stream = self.stream();
        while !stream.done() {
            names.push(stream.name()?);
            stream.advance();
        }
        Ok(names)
    }

    /// Position of the parameter called `name`, if there is one.
    ///
    /// # Errors
    /// Returns the first resolution error encountered before a match.
    pub fn position_of(&self, name: &str) -> Result<Option<usize>> {
        let mut stream = self.stream();
        while !stream.done() {
            if stream.name()? == name {
                return Ok(Some(stream.index()));
            }
            stream.advance();
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::pool::ConstantPool,
        test::factories::{described_table, point_record},
        Error,
    };

    #[test]
    fn names_in_order() {
        let metadata = point_record(&["x", "y", "z"]);
        assert_eq!(metadata.len(), 3);
        assert_eq!(metadata.schema(), SchemaVersion::V3);
        assert_eq!(metadata.param_names().unwrap(), ["x", "y", "z"]);
    }

    #[test]
    fn lookup_by_name() {
        let metadata = point_record(&["x", "y", "z"]);
        assert_eq!(metadata.position_of("z").unwrap(), Some(2));
        assert_eq!(metadata.position_of("w").unwrap(), None);
    }

    #[test]
    fn param_at_single_record() {
        let metadata = point_record(&["x", "y"]);
        let mut stream = metadata.param_at(1).unwrap();
        assert_eq!(stream.index(), 1);
        assert_eq!(stream.name().unwrap(), "y");
        stream.advance();
        assert!(stream.done());

        assert!(matches!(metadata.param_at(2), Err(Error::OutOfBounds)));
    }

    #[test]
    fn described_metadata() {
        let (pool, table) = described_table();
        let metadata = RecordMetadata::new(Arc::new(pool), table);
        assert_eq!(metadata.param_names().unwrap(), ["first", "items"]);
        assert_eq!(metadata.stream_range(1, 0).unwrap().descriptor().unwrap(), "Ljava/util/List;");
    }

    #[test]
    fn empty_record() {
        let metadata = RecordMetadata::new(
            Arc::new(ConstantPool::default()),
            RecordTable::empty(SchemaVersion::CANONICAL),
        );
        assert!(metadata.is_empty());
        assert!(metadata.param_names().unwrap().is_empty());
        assert!(metadata.stream().done());
    }

    #[test]
    fn clones_share_pool() {
        let metadata = point_record(&["x"]);
        let clone = metadata.clone();
        assert!(Arc::ptr_eq(metadata.pool(), clone.pool()));
    }
}
