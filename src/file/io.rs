//! Low-level byte order and safe reading/writing utilities for class-file structures.
//!
//! Everything the class-file format persists is big-endian. This module provides the
//! bounds-checked primitives that the [`crate::file::parser::Parser`] and the record
//! attribute codec are built on.
//!
//! # Key Components
//!
//! - [`crate::file::io::ClassIO`] - Trait defining big-endian conversion for primitive types
//! - [`crate::file::io::read_be_at`] - Read a value at an offset and advance the offset
//! - [`crate::file::io::write_be_at`] - Write a value at an offset and advance the offset
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use recparams::file::io::{read_be_at, write_be_at};
//!
//! let mut data = [0u8; 6];
//! let mut offset = 0;
//! write_be_at(&mut data, &mut offset, 0x0102u16)?;
//! write_be_at(&mut data, &mut offset, 0x0304_0506u32)?;
//! assert_eq!(data, [0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
//!
//! offset = 0;
//! let first: u16 = read_be_at(&data, &mut offset)?;
//! assert_eq!(first, 0x0102);
//! # Ok::<(), recparams::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All functions return [`crate::Error::OutOfBounds`] if the buffer is too short for the
//! requested operation.
//!
//! # Thread Safety
//!
//! All functions are pure and operate on caller-provided buffers only.

use crate::{Error::OutOfBounds, Result};

/// Trait for type-specific big-endian conversion.
///
/// Each implementation names the fixed-size byte array that backs the type
/// (e.g. `[u8; 2]` for `u16`) so the generic readers and writers can slice the
/// exact number of bytes.
pub trait ClassIO: Sized + Copy {
    /// Byte array type for this numeric type.
    type Bytes: Sized + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in big-endian
    fn from_be_bytes(bytes: Self::Bytes) -> Self;

    /// Write T to a byte buffer in big-endian
    fn to_be_bytes(self) -> Self::Bytes;
}

macro_rules! impl_class_io {
    ($($ty:ty => $n:literal),* $(,)?) => {
        $(
            impl ClassIO for $ty {
                type Bytes = [u8; $n];

                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }

                fn to_be_bytes(self) -> Self::Bytes {
                    <$ty>::to_be_bytes(self)
                }
            }
        )*
    };
}

impl_class_io!(u8 => 1, u16 => 2, u32 => 4, u64 => 8);

/// Safely reads `T` in big-endian at `offset`, advancing `offset` by the size of `T`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()` bytes remain
/// after `offset`.
pub fn read_be_at<T: ClassIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let end = offset.checked_add(type_len).ok_or(OutOfBounds)?;
    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(bytes) = T::Bytes::try_from(&data[*offset..end]) else {
        return Err(OutOfBounds);
    };

    *offset = end;
    Ok(T::from_be_bytes(bytes))
}

/// Safely writes `value` in big-endian at `offset`, advancing `offset` by the size of `T`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the buffer does not have room for `T`
/// at `offset`.
pub fn write_be_at<T: ClassIO>(data: &mut [u8], offset: &mut usize, value: T) -> Result<()> {
    let type_len = std::mem::size_of::<T>();
    let end = offset.checked_add(type_len).ok_or(OutOfBounds)?;
    if end > data.len() {
        return Err(OutOfBounds);
    }

    data[*offset..end].copy_from_slice(value.to_be_bytes().as_ref());
    *offset = end;
    Ok(())
}
