// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0


#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # recparams
//!
//! Compact, versioned tables describing the canonical constructor parameters of JVM record
//! classes, together with zero-copy streams that read them through the class's symbol pool.
//!
//! Three slot layouts exist, in order of introduction:
//!
//! - **V1** - four 16-bit slots per parameter (flags, name, descriptor, signature)
//! - **V2** - the same four slots, each written once while the class is loaded
//! - **V3** - one slot per parameter: a handle to the accessor method's reference, from which
//!   the name is recovered through the symbol pool
//!
//! ## Features
//!
//! - **📦 Compact storage** - One boxed `u16` slice per table, no per-record allocation
//! - **🔍 Zero-copy reads** - Views and streams borrow the table and resolve names in place
//! - **⚡ Parallel reads** - Frozen tables are immutable and expose a `rayon` iterator
//! - **🛡️ Checked construction** - Set-once records, schema isolation, pool validation
//!
//! ## Quick Start
//!
//! ```rust
//! use recparams::prelude::*;
//!
//! let mut pool = ConstantPoolBuilder::new();
//! let class_name = pool.utf8("Point")?;
//! let class = pool.class(class_name)?;
//! let name = pool.utf8("x")?;
//! let getter = pool.utf8("()I")?;
//! let name_and_type = pool.name_and_type(name, getter)?;
//! let accessor = pool.method_ref(class, name_and_type)?;
//! let pool = pool.build();
//!
//! let mut builder = RecordTableBuilder::new(SchemaVersion::V3, 1);
//! builder.initialize(0, accessor)?;
//! let table = builder.freeze_validated(&pool, &ValidationConfig::comprehensive())?;
//!
//! let stream = RecordStream::new(&table, &pool);
//! assert_eq!(stream.name()?, "x");
//! # Ok::<(), recparams::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`metadata::pool`] - The [`metadata::pool::SymbolPool`] trait and a concrete pool
//! - [`metadata::record`] - Schemas, tables, builders, views, streams and the attribute codec
//! - [`metadata::validation`] - Configurable consistency checks
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Lifecycle
//!
//! Tables are written single-threaded through a builder while a class loads, then frozen.
//! Frozen tables and pools are immutable and `Send + Sync`; any number of threads can open
//! streams over them at once without locking.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and installs no logger itself: `debug` when a
//! table is frozen or decoded, `warn` when validation rejects a table, `trace` for each
//! resolved V3 name.
//!
//! ## Development
//!
//! ```bash
//! cargo test
//! cargo bench
//! cargo +nightly fuzz run record_attribute
//! ```

#[macro_use]
pub(crate) mod error;
pub(crate) mod file;
pub(crate) mod utils;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use recparams::prelude::*;
///
/// let table = RecordTable::empty(SchemaVersion::CANONICAL);
/// let pool = ConstantPoolBuilder::new().build();
/// assert!(RecordStream::new(&table, &pool).done());
/// ```
pub mod prelude;

/// Record parameter metadata: symbol pool, record tables and validation.
///
/// The pieces are layered bottom-up:
///
/// - [`metadata::pool`] - handles, composite entries and the [`metadata::pool::SymbolPool`] trait
/// - [`metadata::record`] - the three schemas and everything that reads or writes them
/// - [`metadata::validation`] - checks run on freeze and decode
/// - [`metadata::RecordMetadata`] - a table bundled with its shared pool
pub mod metadata;

/// `recparams` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`]. This is used consistently throughout the crate for all fallible operations.
///
/// # Examples
///
/// ```rust
/// use recparams::{metadata::record::{RecordTable, SchemaVersion}, Result};
///
/// fn accessor_count(words: Vec<u16>) -> Result<usize> {
///     Ok(RecordTable::from_words(SchemaVersion::V3, words)?.len())
/// }
/// # assert_eq!(accessor_count(vec![1, 2]).unwrap(), 2);
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `recparams` Error type
///
/// The main error type for all operations in this crate, covering decoding, pool
/// resolution, schema and construction errors.
pub use error::Error;

/// Bounds-checked big-endian reader used by the attribute codec.
///
/// # Example
///
/// ```rust
/// use recparams::Parser;
///
/// let mut parser = Parser::new(&[0x00, 0x02, 0xFF]);
/// assert_eq!(parser.read_be::<u16>()?, 2);
/// assert_eq!(parser.remaining(), 1);
/// # Ok::<(), recparams::Error>(())
/// ```
pub use file::parser::Parser;

/// Validation configuration, re-exported for convenience.
pub use metadata::validation::ValidationConfig;
