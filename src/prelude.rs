//! # recparams Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! of the library. Import this module to get quick access to everything needed to build
//! and read record parameter tables.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all recparams operations
pub use crate::Error;

/// The result type used throughout recparams
pub use crate::Result;

/// Configuration for table validation
pub use crate::ValidationConfig;

// ================================================================================================
// Symbol Pool
// ================================================================================================

/// Pool access trait and the concrete pool
pub use crate::metadata::pool::{
    CompositeRef, ConstantPool, ConstantPoolBuilder, PoolEntry, PoolEntryKind, SymbolPool,
};

// ================================================================================================
// Record Tables
// ================================================================================================

/// Schema selection and flags
pub use crate::metadata::record::{RecordAccessFlags, SchemaVersion};

/// Construction and frozen tables
pub use crate::metadata::record::{RecordTable, RecordTableBuilder, RecordWriter};

/// Reading
pub use crate::metadata::record::{RecordStream, RecordView};

/// Class-file codec
pub use crate::metadata::record::{NestedAttribute, RecordAttribute};

/// A table bundled with its pool
pub use crate::metadata::RecordMetadata;
