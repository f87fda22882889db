use thiserror::Error;

use crate::metadata::{pool::PoolEntryKind, record::SchemaVersion};

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every variant describes a structural inconsistency in the record metadata of one class.
/// None of them is retryable: the operation that orchestrates class loading is expected to
/// reject the class as a whole when it receives one of these.
///
/// # Error Categories
///
/// ## Decoding Errors
/// - [`Error::Malformed`] - Corrupted or invalid attribute structure
/// - [`Error::OutOfBounds`] - Attempted to read beyond the provided data or table
/// - [`Error::TableWidthMismatch`] - Word count does not fit the schema's record width
///
/// ## Symbol Pool Errors
/// - [`Error::InvalidHandle`] - A handle does not name an entry of the pool
/// - [`Error::UnexpectedPoolEntry`] - A handle names an entry of the wrong kind
///
/// ## Schema Errors
/// - [`Error::SchemaMismatch`] - An operation of one schema was applied to another
/// - [`Error::FieldUnavailable`] - The schema does not store the requested field
///
/// ## Construction Errors
/// - [`Error::AlreadyInitialized`] - A set-once record was written twice
/// - [`Error::Uninitialized`] - A record was never written before the table was frozen
///
/// # Examples
///
/// ```rust
/// use recparams::{Error, metadata::record::{RecordTable, SchemaVersion}};
///
/// match RecordTable::from_words(SchemaVersion::V1, vec![0; 6]) {
///     Ok(_) => unreachable!(),
///     Err(Error::TableWidthMismatch { words, width }) => {
///         assert_eq!((words, width), (6, 4));
///     }
///     Err(e) => panic!("unexpected error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The input is damaged and could not be decoded.
    ///
    /// The error includes the source location where the malformation was detected for
    /// debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted.
    ///
    /// Raised when decoding would read past the end of the input, or when a stream range
    /// reaches past the end of its table.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// The number of words is not a multiple of the record width of the schema.
    ///
    /// A table built under one schema can never be reinterpreted under another; this is
    /// what catches the attempt.
    #[error("Record table of {words} words does not divide into records of width {width}")]
    TableWidthMismatch {
        /// Number of 16-bit words supplied
        words: usize,
        /// Record width of the requested schema
        width: usize,
    },

    /// The handle does not name an entry of the symbol pool.
    ///
    /// Handle `0` and unused slots are never valid.
    #[error("Invalid symbol pool handle - {0}")]
    InvalidHandle(u16),

    /// The handle names an entry of a different kind than the one required.
    #[error("Symbol pool entry {handle} is {found}, expected {expected}")]
    UnexpectedPoolEntry {
        /// The handle that was resolved
        handle: u16,
        /// The kind of entry that was required
        expected: PoolEntryKind,
        /// The kind of entry that was found
        found: PoolEntryKind,
    },

    /// An operation belonging to one schema was applied to a table of another.
    #[error("Operation requires schema {expected}, table uses {found}")]
    SchemaMismatch {
        /// The schema the operation belongs to
        expected: SchemaVersion,
        /// The schema of the table
        found: SchemaVersion,
    },

    /// The schema of the table does not store the requested field.
    ///
    /// [`SchemaVersion::V3`] only stores a reference to the accessor method; descriptor,
    /// signature and access flags are not recoverable from it. Consumers that need them
    /// require a format extension.
    #[error("Schema {schema} does not carry the `{field}` field")]
    FieldUnavailable {
        /// Name of the requested field
        field: &'static str,
        /// Schema of the table
        schema: SchemaVersion,
    },

    /// A record that may only be initialized once was initialized again.
    #[error("Record {0} has already been initialized")]
    AlreadyInitialized(usize),

    /// A record was never initialized before the table was frozen.
    #[error("Record {0} was never initialized")]
    Uninitialized(usize),
}
