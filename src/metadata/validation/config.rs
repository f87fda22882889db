//! Validation configuration for record table construction
//!
//! Tables decoded from class files are structurally checked as they are read. The options
//! here select which additional consistency checks run when a table is frozen or an
//! attribute is decoded.

/// Configuration for record table validation
///
/// Checks are grouped by cost:
/// - Structural checks only look at word and record counts
/// - The initialization check looks at which records the builder wrote
/// - Handle and decode checks resolve every stored handle against the symbol pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ValidationConfig {
    /// Enable record count checks against `max_records` (recommended: always true)
    pub enable_structural_validation: bool,

    /// Require every record to have been written before the table is frozen
    /// Has no effect on tables decoded from bytes, which are complete by construction
    pub enable_initialization_check: bool,

    /// Resolve every stored handle and check the kind of the entry it names
    pub enable_handle_validation: bool,

    /// Walk the full name decode chain of every V3 record
    pub enable_decode_validation: bool,

    /// Maximum number of records in one table (default: `u16::MAX`, the limit of a `u2` count)
    pub max_records: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enable_structural_validation: true,
            enable_initialization_check: true,
            enable_handle_validation: true,
            enable_decode_validation: true,
            max_records: u16::MAX as usize,
        }
    }
}

impl ValidationConfig {
    /// Creates a disabled validation configuration for maximum performance
    ///
    /// **Warning**: Use only when the table comes from a trusted producer.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enable_structural_validation: false,
            enable_initialization_check: false,
            enable_handle_validation: false,
            enable_decode_validation: false,
            max_records: u16::MAX as usize,
        }
    }

    /// Creates a minimal validation configuration
    ///
    /// Only checks what can be checked without a symbol pool.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            enable_structural_validation: true,
            enable_initialization_check: true,
            enable_handle_validation: false,
            enable_decode_validation: false,
            max_records: u16::MAX as usize,
        }
    }

    /// Creates a validation configuration suitable for production use
    ///
    /// Every stored handle must name an entry of the right kind; the decode chain beyond
    /// the first hop is resolved lazily on access.
    #[must_use]
    pub fn production() -> Self {
        Self {
            enable_structural_validation: true,
            enable_initialization_check: true,
            enable_handle_validation: true,
            enable_decode_validation: false,
            max_records: u16::MAX as usize,
        }
    }

    /// Creates a comprehensive validation configuration for maximum safety
    #[must_use]
    pub fn comprehensive() -> Self {
        Self::default()
    }

    /// `true` if any check needs the symbol pool
    #[must_use]
    pub fn needs_pool(&self) -> bool {
        self.enable_handle_validation || self.enable_decode_validation
    }
}
