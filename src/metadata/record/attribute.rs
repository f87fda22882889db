//! Codec for the class-file `Record` attribute body.
//!
//! # Layout
//!
//! ```text
//! u2 num_params
//! param[num_params]
//! u2 attributes_count
//! attribute[attributes_count] {
//!     u2 name_index
//!     u4 length
//!     u1 info[length]
//! }
//! ```
//!
//! A V1/V2 `param` is `name_index, access_flags, descriptor_index, signature_index`; this
//! is not the in-memory slot order, so the codec reorders on the way in and out. A V3
//! `param` is a single `accessor_index`. Every integer is big-endian.
//!
//! Nested attributes are not interpreted. They are returned as borrowed slices of the
//! input so a caller can hand them to the attribute readers it knows about.

use crate::{
    file::{io::write_be_at, parser::Parser},
    metadata::{
        pool::SymbolPool,
        record::{info::offset, RecordTable, RecordView, SchemaVersion},
        validation::{validate_table, ValidationConfig},
    },
    Error, Result,
};

/// An attribute nested inside the `Record` attribute, left undecoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NestedAttribute<'a> {
    /// Pool handle of the attribute's name
    pub name_index: u16,
    /// Raw attribute body
    pub info: &'a [u8],
}

/// A decoded `Record` attribute: the parameter table plus any nested attributes.
///
/// # Example
///
/// ```rust
/// use recparams::metadata::record::{RecordAttribute, SchemaVersion};
///
/// #[rustfmt::skip]
/// let data = [
///     0x00, 0x02,             // num_params
///     0x00, 0x0A,             // accessor_index
///     0x00, 0x0B,             // accessor_index
///     0x00, 0x00,             // attributes_count
/// ];
///
/// let attribute = RecordAttribute::parse(&data, SchemaVersion::V3)?;
/// assert_eq!(attribute.table().words(), &[10, 11]);
/// assert!(attribute.attributes().is_empty());
///
/// assert_eq!(attribute.to_bytes()?, data);
/// # Ok::<(), recparams::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordAttribute<'a> {
    table: RecordTable,
    attributes: Vec<NestedAttribute<'a>>,
}

impl<'a> RecordAttribute<'a> {
    /// Decodes a `Record` attribute body laid out in `schema`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `data` is truncated, or
    /// [`Error::Malformed`] if bytes remain after the last nested attribute.
    pub fn parse(data: &'a [u8], schema: SchemaVersion) -> Result<Self> {
        let mut parser = Parser::new(data);

        let count = parser.read_be::<u16>()? as usize;
        let width = schema.slot_width();
        if parser.remaining() < count * width * 2 {
            return Err(Error::OutOfBounds);
        }

        let mut words = Vec::with_capacity(count * width);
        for _ in 0..count {
            if schema.is_described() {
                let mut record = [0u16; 4];
                record[offset::NAME_INDEX] = parser.read_be()?;
                record[offset::ACCESS_FLAGS] = parser.read_be()?;
                record[offset::DESCRIPTOR_INDEX] = parser.read_be()?;
                record[offset::SIGNATURE_INDEX] = parser.read_be()?;
                words.extend_from_slice(&record);
            } else {
                words.push(parser.read_be()?);
            }
        }

        let attributes_count = parser.read_be::<u16>()?;
        let mut attributes = Vec::with_capacity(attributes_count as usize);
        for _ in 0..attributes_count {
            let name_index = parser.read_be::<u16>()?;
            let length = parser.read_be::<u32>()?;
            let info = parser.read_bytes(length as usize)?;
            attributes.push(NestedAttribute { name_index, info });
        }

        if parser.has_more_data() {
            return Err(malformed_error!(
                "{} trailing bytes after Record attribute at offset {}",
                parser.remaining(),
                parser.pos()
            ));
        }

        let table = RecordTable::from_words(schema, words)?;
        log::debug!(
            "decoded {} Record attribute: {} params, {} nested attributes",
            schema,
            table.len(),
            attributes.len()
        );

        Ok(RecordAttribute { table, attributes })
    }

    /// Decodes a `Record` attribute body and validates the table against `pool`.
    ///
    /// # Errors
    /// Returns any decoding error of [`RecordAttribute::parse`], then the first validation
    /// error selected by `config`.
    pub fn parse_validated<P: SymbolPool + ?Sized>(
        data: &'a [u8],
        schema: SchemaVersion,
        pool: &P,
        config: &ValidationConfig,
    ) -> Result<Self> {
        let attribute = Self::parse(data, schema)?;
        validate_table(&attribute.table, pool, config)?;
        Ok(attribute)
    }

    /// Creates an attribute from an existing table, for encoding.
    #[must_use]
    pub fn new(table: RecordTable, attributes: Vec<NestedAttribute<'a>>) -> Self {
        RecordAttribute { table, attributes }
    }

    /// The decoded parameter table
    #[must_use]
    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    /// The nested attributes, in input order
    #[must_use]
    pub fn attributes(&self) -> &[NestedAttribute<'a>] {
        &self.attributes
    }

    /// Takes the parameter table, dropping the nested attributes.
    #[must_use]
    pub fn into_table(self) -> RecordTable {
        self.table
    }

    /// Encodes this attribute; see [`RecordAttribute::encode`].
    ///
    /// # Errors
    /// See [`RecordAttribute::encode`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Self::encode(&self.table, &self.attributes)
    }

    /// Encodes `table` and `attributes` as a `Record` attribute body.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if a count or length does not fit its
    /// class-file field.
    pub fn encode(table: &RecordTable, attributes: &[NestedAttribute<'_>]) -> Result<Vec<u8>> {
        let count = u16::try_from(table.len())
            .map_err(|_| malformed_error!("{} params exceed the u2 count", table.len()))?;
        let attributes_count = u16::try_from(attributes.len()).map_err(|_| {
            malformed_error!("{} nested attributes exceed the u2 count", attributes.len())
        })?;

        let size = 4
            + table.words().len() * 2
            + attributes
                .iter()
                .map(|attribute| 6 + attribute.info.len())
                .sum::<usize>();
        let mut data = vec![0u8; size];
        let mut position = 0;

        write_be_at(&mut data, &mut position, count)?;
        for record in table.iter() {
            match record {
                RecordView::Described(info) => {
                    write_be_at(&mut data, &mut position, info.name_index())?;
                    write_be_at(&mut data, &mut position, info.access_flags())?;
                    write_be_at(&mut data, &mut position, info.descriptor_index())?;
                    write_be_at(&mut data, &mut position, info.signature_index())?;
                }
                RecordView::Accessor(info) => {
                    write_be_at(&mut data, &mut position, info.accessor_index())?;
                }
            }
        }

        write_be_at(&mut data, &mut position, attributes_count)?;
        for attribute in attributes {
            let length = u32::try_from(attribute.info.len()).map_err(|_| {
                malformed_error!("nested attribute of {} bytes", attribute.info.len())
            })?;
            write_be_at(&mut data, &mut position, attribute.name_index)?;
            write_be_at(&mut data, &mut position, length)?;
            data[position..position + attribute.info.len()].copy_from_slice(attribute.info);
            position += attribute.info.len();
        }

        Ok(data)
    }
}
