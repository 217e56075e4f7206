//! Read-side access to a finished image.
//!
//! [`crate::ImageView`] opens an image from a byte buffer or a memory-mapped file and
//! validates its structure before handing out any data: magic tag, optional payload
//! version pin, table bounds, and containment of every pointer inside the image. It
//! is the inspection and verification surface of the crate; the zero-copy consumer
//! that patches relative offsets into live pointers lives on the native side and is
//! deliberately not reproduced here.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use permafrost::ImageView;
//!
//! let view = ImageView::from_file("assets/world.img".as_ref(), Some(1))?;
//! for root in view.root_offsets() {
//!     println!("root object at {root:#x}");
//! }
//! # Ok::<(), permafrost::Error>(())
//! ```

use std::{fs::File, path::Path};

use memmap2::Mmap;

use crate::{image::header::ImageHeader, io::read_le, Error, Result};

/// The bytes backing a view, either owned or memory-mapped.
enum Backing {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl Backing {
    fn bytes(&self) -> &[u8] {
        match self {
            Backing::Owned(data) => data,
            Backing::Mapped(mmap) => mmap,
        }
    }
}

/// A validated, read-only view of a finished image.
///
/// Opening a view proves that the buffer is structurally sound: the header parses,
/// both tables lie inside the image, every pointer slot named by the pointer table
/// is addressable, and every non-null relative pointer stays inside
/// `[0, image_len)`. After that, accessors are infallible.
pub struct ImageView {
    backing: Backing,
    header: ImageHeader,
}

impl ImageView {
    /// Opens an image from an owned byte buffer.
    ///
    /// `expected_version` pins the payload format: `Some(v)` refuses images frozen
    /// with any other version, `None` accepts all (the caller inspects
    /// [`ImageView::payload_version`] itself).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::BadMagic`], [`crate::Error::PayloadVersionMismatch`]
    /// or [`crate::Error::Malformed`] when the buffer is not a well-formed image.
    pub fn from_mem(data: Vec<u8>, expected_version: Option<u32>) -> Result<Self> {
        let header = Self::validate(&data, expected_version)?;
        Ok(ImageView {
            backing: Backing::Owned(data),
            header,
        })
    }

    /// Opens an image by memory-mapping a file.
    ///
    /// Semantics are identical to [`ImageView::from_mem`]; the file must contain
    /// exactly one image starting at byte 0.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file cannot be opened or mapped, plus
    /// the validation errors of [`ImageView::from_mem`].
    pub fn from_file(path: &Path, expected_version: Option<u32>) -> Result<Self> {
        let file = File::open(path)?;

        // SAFETY: the mapping is read-only and the file is owned by this process for
        // the lifetime of the view; mutation by another process is outside the
        // contract, as with any mapped input.
        let mmap = unsafe { Mmap::map(&file)? };

        let header = Self::validate(&mmap, expected_version)?;
        Ok(ImageView {
            backing: Backing::Mapped(mmap),
            header,
        })
    }

    /// The decoded image header.
    pub fn header(&self) -> &ImageHeader {
        &self.header
    }

    /// The payload format version recorded in the header.
    pub fn payload_version(&self) -> u32 {
        self.header.payload_version
    }

    /// The raw bytes of the entire image.
    pub fn data(&self) -> &[u8] {
        self.backing.bytes()
    }

    /// The header-relative offsets of every pointer slot, in discovery order.
    pub fn pointer_offsets(&self) -> impl Iterator<Item = u64> + '_ {
        Self::table(
            self.data(),
            self.header.pointer_table_offset,
            self.header.pointer_count,
        )
    }

    /// The header-relative offsets of every root object, in write order.
    pub fn root_offsets(&self) -> impl Iterator<Item = u64> + '_ {
        Self::table(
            self.data(),
            self.header.root_table_offset,
            self.header.root_count,
        )
    }

    /// Decodes one 8-byte-entry table. Bounds were proven at open time.
    fn table(data: &[u8], offset: u64, count: u64) -> impl Iterator<Item = u64> + '_ {
        let start = offset as usize;
        let end = start + count as usize * 8;
        data[start..end]
            .chunks_exact(8)
            .map(|entry| u64::from_le_bytes([
                entry[0], entry[1], entry[2], entry[3],
                entry[4], entry[5], entry[6], entry[7],
            ]))
    }

    fn validate(data: &[u8], expected_version: Option<u32>) -> Result<ImageHeader> {
        let header = ImageHeader::read_from(data)?;

        if let Some(expected) = expected_version {
            if header.payload_version != expected {
                return Err(Error::PayloadVersionMismatch {
                    expected,
                    found: header.payload_version,
                });
            }
        }

        let length = data.len() as u64;
        Self::check_table(
            "pointer table",
            header.pointer_table_offset,
            header.pointer_count,
            length,
        )?;
        Self::check_table(
            "root table",
            header.root_table_offset,
            header.root_count,
            length,
        )?;

        for slot in Self::table(data, header.pointer_table_offset, header.pointer_count) {
            let Some(slot_end) = slot.checked_add(8) else {
                return Err(malformed_error!("Pointer slot offset {} overflows", slot));
            };
            if slot_end > length {
                return Err(malformed_error!(
                    "Pointer slot at {} escapes the {} byte image",
                    slot,
                    length
                ));
            }

            let value = read_le::<u64>(&data[slot as usize..])?;
            if value >= length {
                return Err(malformed_error!(
                    "Pointer at {} targets {} outside the {} byte image",
                    slot,
                    value,
                    length
                ));
            }
        }

        for root in Self::table(data, header.root_table_offset, header.root_count) {
            if root >= length {
                return Err(malformed_error!(
                    "Root object offset {} escapes the {} byte image",
                    root,
                    length
                ));
            }
        }

        Ok(header)
    }

    fn check_table(name: &str, offset: u64, count: u64, length: u64) -> Result<()> {
        let Some(bytes) = count.checked_mul(8) else {
            return Err(malformed_error!("{} count overflows", name));
        };
        let Some(end) = offset.checked_add(bytes) else {
            return Err(malformed_error!("{} extent overflows", name));
        };
        if offset < ImageHeader::SIZE as u64 || end > length {
            return Err(malformed_error!(
                "{} [{}, {}) lies outside the {} byte image",
                name,
                offset,
                end,
                length
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::header::IMAGE_MAGIC;

    fn empty_image(version: u32) -> Vec<u8> {
        let mut buffer = Vec::new();
        crate::ImageWriter::new(&mut buffer, version).finish().unwrap();
        buffer
    }

    #[test]
    fn opens_minimal_image() {
        let view = ImageView::from_mem(empty_image(5), None).unwrap();
        assert_eq!(view.payload_version(), 5);
        assert_eq!(view.header().magic, IMAGE_MAGIC);
        assert_eq!(view.pointer_offsets().count(), 0);
        assert_eq!(view.root_offsets().count(), 0);
    }

    #[test]
    fn pinned_version_must_match() {
        let result = ImageView::from_mem(empty_image(5), Some(6));
        assert!(matches!(
            result,
            Err(Error::PayloadVersionMismatch {
                expected: 6,
                found: 5
            })
        ));

        assert!(ImageView::from_mem(empty_image(5), Some(5)).is_ok());
    }

    #[test]
    fn garbage_is_not_an_image() {
        assert!(matches!(
            ImageView::from_mem(vec![0u8; 64], None),
            Err(Error::BadMagic { .. })
        ));
    }

    #[test]
    fn truncated_header_is_rejected() {
        assert!(ImageView::from_mem(b"FRST".to_vec(), None).is_err());
    }

    #[test]
    fn truncated_table_is_rejected() {
        let mut image = empty_image(1);
        // Claim a pointer table that extends past the end of the buffer.
        image[8..16].copy_from_slice(&4u64.to_le_bytes());
        assert!(matches!(
            ImageView::from_mem(image, None),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn escaping_pointer_is_rejected() {
        // Hand-build: header + one 16-byte page + a pointer table naming a slot
        // whose stored value points far outside the image.
        let mut buffer = Vec::new();
        let mut writer = crate::ImageWriter::new(&mut buffer, 1);
        let page = writer.append_page(16);
        crate::PageWriter::new(&mut writer, page)
            .write(0, 0xFFFF_u64)
            .unwrap();
        writer.record_pointer_slot(ImageHeader::SIZE as u64);
        writer.finish().unwrap();

        assert!(matches!(
            ImageView::from_mem(buffer, None),
            Err(Error::Malformed { .. })
        ));
    }
}
