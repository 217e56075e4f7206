//! Byte-level encoding primitives for the frozen image format.
//!
//! This module provides the bounds-checked scalar encoding and decoding that every other
//! part of the crate is built on. The image format stores all multi-byte values in
//! little-endian byte order regardless of the host, so the functions here are the single
//! place where that byte order is applied.
//!
//! # Architecture
//!
//! The module is built around the [`crate::io::FrostScalar`] trait, which ties each
//! fixed-width primitive to its encoded byte array. On top of it sit four free functions:
//!
//! - [`crate::io::read_le`] - Decode a value from the start of a buffer
//! - [`crate::io::read_le_at`] - Decode at an offset, advancing the offset
//! - [`crate::io::write_le`] - Encode a value at the start of a buffer
//! - [`crate::io::write_le_at`] - Encode at an offset, advancing the offset
//!
//! All four are bounds-checked and return [`crate::Error::OutOfBounds`] rather than
//! truncating or panicking when the buffer is too short.
//!
//! # Supported Types
//!
//! [`crate::io::FrostScalar`] is implemented for:
//! - **Unsigned integers**: `u8`, `u16`, `u32`, `u64`
//! - **Signed integers**: `i8`, `i16`, `i32`, `i64`
//! - **Floating point**: `f32`, `f64`
//!
//! These are exactly the scalar widths a frozen field may have; wider or variable-width
//! encodings do not exist in the format.
//!
//! # Usage Examples
//!
//! ## Sequential Writing with Offset Tracking
//!
//! ```rust
//! use permafrost::io::write_le_at;
//!
//! let mut data = [0u8; 8];
//! let mut offset = 0;
//!
//! write_le_at(&mut data, &mut offset, 1u16)?;  // offset: 0 -> 2
//! write_le_at(&mut data, &mut offset, 2u16)?;  // offset: 2 -> 4
//! write_le_at(&mut data, &mut offset, 3u32)?;  // offset: 4 -> 8
//!
//! assert_eq!(data, [0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00]);
//! # Ok::<(), permafrost::Error>(())
//! ```
//!
//! ## Sequential Reading with Offset Tracking
//!
//! ```rust
//! use permafrost::io::read_le_at;
//!
//! let data = [0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00];
//! let mut offset = 0;
//!
//! let first: u16 = read_le_at(&data, &mut offset)?;
//! let second: u16 = read_le_at(&data, &mut offset)?;
//! let third: u32 = read_le_at(&data, &mut offset)?;
//!
//! assert_eq!((first, second, third), (1, 2, 3));
//! assert_eq!(offset, 8);
//! # Ok::<(), permafrost::Error>(())
//! ```
//!
//! # Integration
//!
//! This module integrates with:
//! - [`crate::image::page`] - Every typed page write funnels through [`write_le_at`]
//! - [`crate::image::header`] - Header encode/decode
//! - [`crate::image::view`] - Table decoding during image validation

use crate::{Error, Result};

/// Trait tying each fixed-width scalar to its little-endian encoded form.
///
/// Implementations delegate to the standard library's `to_le_bytes`/`from_le_bytes`
/// pairs; the trait exists so that the page writer and the read-side helpers can be
/// generic over every scalar the image format admits while staying fully
/// monomorphized (no `dyn` dispatch on the freeze path).
///
/// The `Bytes` associated type is the fixed-size byte array for the scalar, e.g.
/// `[u8; 4]` for `u32`.
pub trait FrostScalar: Copy {
    /// The encoded byte array type for this scalar.
    type Bytes: AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Decode a value from its little-endian byte array.
    fn from_le_bytes(bytes: Self::Bytes) -> Self;

    /// Encode this value into its little-endian byte array.
    fn to_le_bytes(self) -> Self::Bytes;
}

macro_rules! impl_frost_scalar {
    ($($ty:ty => $len:expr),* $(,)?) => {
        $(
            impl FrostScalar for $ty {
                type Bytes = [u8; $len];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn to_le_bytes(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }
            }
        )*
    };
}

impl_frost_scalar! {
    u8 => 1, i8 => 1,
    u16 => 2, i16 => 2,
    u32 => 4, i32 => 4,
    u64 => 8, i64 => 8,
    f32 => 4, f64 => 8,
}

/// Safely reads a value of type `T` in little-endian byte order from the start of a buffer.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if the buffer holds fewer bytes than the
/// width of `T`.
///
/// # Examples
///
/// ```rust
/// use permafrost::io::read_le;
///
/// let data = [0x01, 0x00, 0x00, 0x00];
/// let value: u32 = read_le(&data)?;
/// assert_eq!(value, 1);
/// # Ok::<(), permafrost::Error>(())
/// ```
pub fn read_le<T: FrostScalar>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Safely reads a value of type `T` in little-endian byte order at a specific offset.
///
/// The offset is advanced by the width of `T` after a successful read, so consecutive
/// calls decode consecutive fields.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()` bytes remain
/// at `offset`.
pub fn read_le_at<T: FrostScalar>(data: &[u8], offset: &mut usize) -> Result<T> {
    let width = std::mem::size_of::<T>();
    let end = match offset.checked_add(width) {
        Some(end) if end <= data.len() => end,
        _ => {
            return Err(Error::OutOfBounds {
                offset: *offset,
                width,
                length: data.len(),
            })
        }
    };

    let Ok(bytes) = data[*offset..end].try_into() else {
        return Err(Error::OutOfBounds {
            offset: *offset,
            width,
            length: data.len(),
        });
    };

    *offset = end;

    Ok(T::from_le_bytes(bytes))
}

/// Safely writes a value of type `T` in little-endian byte order to the start of a buffer.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if the buffer holds fewer bytes than the
/// width of `T`.
///
/// # Examples
///
/// ```rust
/// use permafrost::io::write_le;
///
/// let mut data = [0u8; 4];
/// write_le(&mut data, 1u32)?;
/// assert_eq!(data, [0x01, 0x00, 0x00, 0x00]);
/// # Ok::<(), permafrost::Error>(())
/// ```
pub fn write_le<T: FrostScalar>(data: &mut [u8], value: T) -> Result<()> {
    let mut offset = 0_usize;
    write_le_at(data, &mut offset, value)
}

/// Safely writes a value of type `T` in little-endian byte order at a specific offset.
///
/// The offset is advanced by the width of `T` after a successful write, so consecutive
/// calls encode consecutive fields.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()` bytes remain
/// at `offset`. The buffer is untouched in that case.
pub fn write_le_at<T: FrostScalar>(data: &mut [u8], offset: &mut usize, value: T) -> Result<()> {
    let width = std::mem::size_of::<T>();
    let end = match offset.checked_add(width) {
        Some(end) if end <= data.len() => end,
        _ => {
            return Err(Error::OutOfBounds {
                offset: *offset,
                width,
                length: data.len(),
            })
        }
    };

    data[*offset..end].copy_from_slice(value.to_le_bytes().as_ref());
    *offset = end;

    Ok(())
}
