//! The fixed-size header at the start of every frozen image.
//!
//! The header identifies the blob as an image, carries the caller-supplied payload
//! format version, and locates the two tables that trail the page data. It is written
//! first in the stream but its values are only known once every page has been laid
//! out, so the writer materializes it during finalization.
//!
//! All header fields are little-endian and all offsets are relative to the first byte
//! of the header itself, which is what lets an image be embedded at an arbitrary
//! position inside a larger file.

use crate::{
    io::{read_le_at, write_le_at},
    Error, Result,
};

/// The expected value of [`ImageHeader::magic`] for valid frozen images.
///
/// This value is 'FRST' when written as little-endian.
pub const IMAGE_MAGIC: u32 = 0x5453_5246;

/// The header of a frozen image.
///
/// Pure data holder; the only behavior is encoding to and decoding from the fixed
/// 40-byte wire layout:
///
/// | Offset | Size | Field |
/// |---|---|---|
/// | 0  | 4 | magic |
/// | 4  | 4 | payload format version |
/// | 8  | 8 | pointer count |
/// | 16 | 8 | pointer table offset |
/// | 24 | 8 | root object count |
/// | 32 | 8 | root table offset |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    /// The value that identifies this blob as a frozen image. Valid images have
    /// the value [`IMAGE_MAGIC`].
    pub magic: u32,

    /// A user-supplied version number identifying the format of the objects that
    /// are contained within the image. Opaque to this crate.
    pub payload_version: u32,

    /// The number of pointer slots within the image that need to be transformed
    /// from relative offsets into addresses when the image is loaded.
    pub pointer_count: u64,

    /// The header-relative offset of the pointer-relocation table.
    pub pointer_table_offset: u64,

    /// The number of root objects contained within the image.
    pub root_count: u64,

    /// The header-relative offset of the root-object table.
    pub root_table_offset: u64,
}

impl ImageHeader {
    /// The number of bytes an [`ImageHeader`] spans in an image.
    pub const SIZE: usize = 4 + 4 + 8 + 8 + 8 + 8;

    /// Encodes this header into the first [`ImageHeader::SIZE`] bytes of `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if `buf` is shorter than
    /// [`ImageHeader::SIZE`].
    pub fn write_to(&self, buf: &mut [u8]) -> Result<()> {
        let mut offset = 0;
        write_le_at(buf, &mut offset, self.magic)?;
        write_le_at(buf, &mut offset, self.payload_version)?;
        write_le_at(buf, &mut offset, self.pointer_count)?;
        write_le_at(buf, &mut offset, self.pointer_table_offset)?;
        write_le_at(buf, &mut offset, self.root_count)?;
        write_le_at(buf, &mut offset, self.root_table_offset)?;
        Ok(())
    }

    /// Decodes a header from the first [`ImageHeader::SIZE`] bytes of `data` and
    /// validates its magic tag.
    ///
    /// The payload version is not checked here; it is opaque at this layer. Readers
    /// that pin a version compare it themselves (see
    /// [`crate::ImageView::from_mem`]).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if `data` is shorter than
    /// [`ImageHeader::SIZE`], or [`crate::Error::BadMagic`] if the magic tag does
    /// not match [`IMAGE_MAGIC`].
    pub fn read_from(data: &[u8]) -> Result<Self> {
        let mut offset = 0;
        let magic = read_le_at::<u32>(data, &mut offset)?;
        if magic != IMAGE_MAGIC {
            return Err(Error::BadMagic { found: magic });
        }

        Ok(ImageHeader {
            magic,
            payload_version: read_le_at(data, &mut offset)?,
            pointer_count: read_le_at(data, &mut offset)?,
            pointer_table_offset: read_le_at(data, &mut offset)?,
            root_count: read_le_at(data, &mut offset)?,
            root_table_offset: read_le_at(data, &mut offset)?,
        })
    }
}
