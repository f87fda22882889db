//! Record parameter metadata of JVM classes.
//!
//! This module holds everything needed to store and read the canonical constructor
//! parameters of a record class: the symbol pool the parameters refer into, the versioned
//! record tables themselves, and the consistency checks run over them.
//!
//! # Key Components
//!
//! - [`pool`] - Symbol pool access, composite entries and a concrete pool implementation
//! - [`record`] - Schemas, builders, frozen tables, views, streams and the attribute codec
//! - [`validation`] - Configurable validation run on freeze and decode
//! - [`RecordMetadata`] - A frozen table bundled with its shared pool
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use recparams::metadata::{
//!     pool::ConstantPoolBuilder,
//!     record::{RecordAttribute, SchemaVersion},
//!     RecordMetadata,
//! };
//!
//! let mut pool = ConstantPoolBuilder::new();
//! let name = pool.utf8("radius")?;
//! let descriptor = pool.utf8("D")?;
//! let pool = Arc::new(pool.build());
//!
//! let data = [
//!     0x00, 0x01,
//!     0x00, name as u8, 0x00, 0x10, 0x00, descriptor as u8, 0x00, 0x00,
//!     0x00, 0x00,
//! ];
//! let attribute = RecordAttribute::parse(&data, SchemaVersion::V1)?;
//!
//! let metadata = RecordMetadata::new(pool, attribute.into_table());
//! assert_eq!(metadata.param_names()?, ["radius"]);
//! # Ok::<(), recparams::Error>(())
//! ```

pub mod pool;
pub mod record;
pub mod validation;

mod recordmetadata;

pub use recordmetadata::RecordMetadata;
