//! # Record Table Validation
//!
//! Consistency checks run when a table is frozen or decoded, selected by
//! [`ValidationConfig`]. Each check reports the first problem it finds as an [`crate::Error`]
//! and logs it at `warn` level before returning; the caller is expected to reject the class.
//!
//! - Structural: the record count stays within [`ValidationConfig::max_records`]
//! - Handles: every stored handle resolves to an entry of the expected kind
//! - Decode: every V3 record's name resolves through the full decode chain
//!
//! The initialization check needs the builder's write tracking and therefore lives in
//! [`crate::metadata::record::RecordTableBuilder::freeze_validated`].

mod config;

pub use config::ValidationConfig;

use crate::{
    metadata::{
        pool::SymbolPool,
        record::{RecordTable, RecordView},
    },
    Result,
};

/// Runs every pool-backed and structural check enabled in `config` against `table`.
///
/// # Errors
/// Returns the first error found, in the order structural, handle, decode.
pub fn validate_table<P: SymbolPool + ?Sized>(
    table: &RecordTable,
    pool: &P,
    config: &ValidationConfig,
) -> Result<()> {
    if config.enable_structural_validation {
        validate_record_count(table.len(), config)?;
    }
    if config.enable_handle_validation {
        validate_handles(table, pool)?;
    }
    if config.enable_decode_validation {
        validate_decode(table, pool)?;
    }
    Ok(())
}

pub(crate) fn validate_record_count(count: usize, config: &ValidationConfig) -> Result<()> {
    if count > config.max_records {
        log::warn!(
            "record table holds {} records, limit is {}",
            count,
            config.max_records
        );
        return Err(malformed_error!(
            "Record table holds {} records, limit is {}",
            count,
            config.max_records
        ));
    }
    Ok(())
}

fn validate_handles<P: SymbolPool + ?Sized>(table: &RecordTable, pool: &P) -> Result<()> {
    for (index, record) in table.iter().enumerate() {
        let checked = match record {
            RecordView::Described(info) => pool
                .symbol_at(info.name_index())
                .and_then(|_| pool.symbol_at(info.descriptor_index()))
                .and_then(|_| info.signature(pool))
                .map(|_| ()),
            RecordView::Accessor(info) => pool.method_ref_at(info.accessor_index()).map(|_| ()),
        };
        checked.inspect_err(|error| log::warn!("record {index}: {error}"))?;
    }
    Ok(())
}

fn validate_decode<P: SymbolPool + ?Sized>(table: &RecordTable, pool: &P) -> Result<()> {
    for (index, record) in table.iter().enumerate() {
        if let RecordView::Accessor(info) = record {
            info.name(pool)
                .inspect_err(|error| log::warn!("record {index}: name not decodable: {error}"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{pool::PoolEntryKind, record::SchemaVersion},
        test::factories::{accessor_chain_pool, described_pool},
        Error,
    };

    #[test]
    fn record_limit() {
        let config = ValidationConfig {
            max_records: 2,
            ..ValidationConfig::default()
        };
        assert!(validate_record_count(2, &config).is_ok());
        assert!(matches!(
            validate_record_count(3, &config),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn described_handles() {
        let (pool, handles) = described_pool();
        let good = RecordTable::from_words(
            SchemaVersion::V1,
            vec![0, handles.name, handles.descriptor, 0],
        )
        .unwrap();
        assert!(validate_table(&good, &pool, &ValidationConfig::comprehensive()).is_ok());

        let dangling = RecordTable::from_words(
            SchemaVersion::V2,
            vec![0, handles.name, 999, 0],
        )
        .unwrap();
        assert!(matches!(
            validate_table(&dangling, &pool, &ValidationConfig::production()),
            Err(Error::InvalidHandle(999))
        ));
        assert!(validate_table(&dangling, &pool, &ValidationConfig::minimal()).is_ok());
    }

    #[test]
    fn accessor_handles_and_decode() {
        let pool = accessor_chain_pool();

        let good = RecordTable::from_words(SchemaVersion::V3, vec![10]).unwrap();
        assert!(validate_table(&good, &pool, &ValidationConfig::comprehensive()).is_ok());

        let wrong_kind = RecordTable::from_words(SchemaVersion::V3, vec![20]).unwrap();
        assert!(matches!(
            validate_table(&wrong_kind, &pool, &ValidationConfig::production()),
            Err(Error::UnexpectedPoolEntry {
                handle: 20,
                expected: PoolEntryKind::MethodRef,
                found: PoolEntryKind::NameAndType,
            })
        ));
    }

    #[test]
    fn decode_checked_only_when_enabled() {
        use crate::metadata::pool::{CompositeRef, ConstantPoolBuilder};

        // method ref resolves, but its name-and-type hop dangles
        let mut builder = ConstantPoolBuilder::new();
        builder
            .set_method_ref(10, CompositeRef::new(20, 0))
            .unwrap();
        let pool = builder.build();
        let table = RecordTable::from_words(SchemaVersion::V3, vec![10]).unwrap();

        assert!(validate_table(&table, &pool, &ValidationConfig::production()).is_ok());
        assert!(matches!(
            validate_table(&table, &pool, &ValidationConfig::comprehensive()),
            Err(Error::InvalidHandle(20))
        ));
    }
}
