//! The per-type freezing contract.
//!
//! Any type that can appear in a frozen image implements [`crate::freeze::Freeze`]. The
//! trait is the only thing the writer knows about user types: a declared inline size, a
//! reference/value classification and a serialization procedure. Implementations are
//! typically mechanical - one write call per field, in declaration order - and may be
//! hand-written or emitted by external tooling; the writer consumes them purely through
//! generic bounds, so dispatch is resolved at compile time.
//!
//! # Field size rules
//!
//! [`Freeze::FROZEN_SIZE`] must equal the exact sum of each field's contribution:
//!
//! | Field kind | Contribution |
//! |---|---|
//! | fixed-width scalar | its width (1, 2, 4 or 8 bytes) |
//! | string | [`STRING_FIELD_SIZE`] (16 bytes: length + pointer) |
//! | array | [`ARRAY_FIELD_SIZE`] (16 bytes: count + pointer) |
//! | embedded value-classified type | that type's `FROZEN_SIZE` |
//! | reference-classified type | [`POINTER_SIZE`] (8 bytes) |
//!
//! # Examples
//!
//! A small aggregate frozen inline wherever it is used, and a larger record that is
//! always boxed into its own page:
//!
//! ```rust
//! use std::io::Write;
//! use permafrost::{Freeze, PageWriter, Result, ARRAY_FIELD_SIZE, STRING_FIELD_SIZE};
//!
//! struct Extents {
//!     width: f32,
//!     height: f32,
//! }
//!
//! impl Freeze for Extents {
//!     const FROZEN_SIZE: usize = 4 + 4;
//!     const IS_REFERENCE: bool = false;
//!
//!     fn freeze<W: Write>(&self, page: &mut PageWriter<'_, W>, offset: usize) -> Result<()> {
//!         page.write(offset, self.width)?;
//!         page.write(offset + 4, self.height)
//!     }
//! }
//!
//! struct Sprite {
//!     name: String,
//!     extents: Extents,
//!     frames: Vec<u16>,
//! }
//!
//! impl Freeze for Sprite {
//!     const FROZEN_SIZE: usize = STRING_FIELD_SIZE + Extents::FROZEN_SIZE + ARRAY_FIELD_SIZE;
//!     const IS_REFERENCE: bool = true;
//!
//!     fn freeze<W: Write>(&self, page: &mut PageWriter<'_, W>, offset: usize) -> Result<()> {
//!         page.write_str(offset, &self.name)?;
//!         page.write_value(offset + 16, &self.extents)?;
//!         page.write_scalars(offset + 24, &self.frames)
//!     }
//! }
//! ```

use std::io::Write;

use crate::{image::page::PageWriter, Result};

/// The size of a pointer in an image, in bytes.
pub const POINTER_SIZE: usize = 8;

/// The size of an array field in its containing page, in bytes.
///
/// An 8-byte element count followed by a pointer to the element page. The elements
/// themselves live in a separate page and are not included in this figure.
pub const ARRAY_FIELD_SIZE: usize = 8 + POINTER_SIZE;

/// The size of a string field in its containing page, in bytes.
///
/// Strings are encoded like arrays of bytes: an 8-byte length followed by a pointer
/// to the character data.
pub const STRING_FIELD_SIZE: usize = ARRAY_FIELD_SIZE;

/// A type that can be frozen into an image.
///
/// See the [module documentation](crate::freeze) for the field size rules and a full
/// example. The writer calls [`Freeze::freeze`] with a page guaranteed to have at
/// least `FROZEN_SIZE` bytes available at `offset`; the implementation must write
/// every declared field and nothing else, in a fixed order, so that freezing the same
/// value always produces identical bytes.
pub trait Freeze {
    /// The number of bytes a value of this type spans when frozen.
    const FROZEN_SIZE: usize;

    /// Whether values of this type are boxed into their own page.
    ///
    /// Reference-classified types always live in a dedicated page and are referred to
    /// through a pointer slot; value-classified types are embedded inline at the point
    /// of use.
    const IS_REFERENCE: bool;

    /// Writes this value's fields to the given page, starting at `offset`.
    fn freeze<W: Write>(&self, page: &mut PageWriter<'_, W>, offset: usize) -> Result<()>;
}
