//! Typed write access to a single page of an image under construction.
//!
//! A page is one contiguous, independently addressed byte range within the image. The
//! buffers themselves are owned by the [`crate::ImageWriter`]; this module provides
//! [`crate::PageWriter`], a borrowed handle that [`crate::Freeze`] implementations use
//! to lay their fields down. Every operation takes an offset within the page's own
//! buffer and is bounds-checked against the page's reserved length.
//!
//! # Encoding rules
//!
//! The operations on [`crate::PageWriter`] encode the three field shapes of the format:
//!
//! - **Scalars** are copied in place, little-endian, at the given offset.
//! - **Arrays** occupy 16 bytes in the containing page: an element count followed by a
//!   pointer to a freshly allocated element page (null when the array is empty, in
//!   which case no page is allocated at all).
//! - **Strings** are byte arrays of UTF-8 data with a NUL terminator appended in the
//!   character page; the recorded length excludes the terminator. An empty string
//!   allocates nothing: its pointer targets its own length field, whose zero bytes
//!   double as a one-byte empty C string.
//!
//! Nested [`crate::Freeze`] values follow the type's classification: value-classified
//! types are frozen inline, reference-classified types get a dedicated page and a
//! pointer slot. Pages for nested data are allocated depth-first at the moment the
//! field is encountered, which makes the layout a pure function of the value graph.

use std::io::Write;

use crate::{
    freeze::{Freeze, ARRAY_FIELD_SIZE, POINTER_SIZE, STRING_FIELD_SIZE},
    image::writer::ImageWriter,
    io::{self, FrostScalar},
    Error, Result,
};

/// Identifies one allocated page within an [`ImageWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageId(pub(crate) usize);

/// Writes data to a contiguous block of memory in an image under construction.
///
/// Handles to the page buffers owned by an [`ImageWriter`]; obtained by the writer
/// itself when a root object or a boxed value is frozen. [`crate::Freeze`]
/// implementations receive a `PageWriter` and use its typed operations to encode
/// their fields.
///
/// All offsets are relative to the start of this page's own buffer. Writes that
/// would cross the page's reserved length fail with [`crate::Error::OutOfBounds`]
/// and leave the page unchanged.
pub struct PageWriter<'a, W: Write> {
    image: &'a mut ImageWriter<W>,
    page: PageId,
}

impl<'a, W: Write> PageWriter<'a, W> {
    pub(crate) fn new(image: &'a mut ImageWriter<W>, page: PageId) -> Self {
        PageWriter { image, page }
    }

    /// The reserved length of this page in bytes.
    pub fn len(&self) -> usize {
        self.image.page_len(self.page)
    }

    /// Whether this page has zero reserved bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The offset of the beginning of this page relative to the image header.
    pub fn start_offset(&self) -> u64 {
        self.image.page_start(self.page)
    }

    /// Writes a fixed-width scalar at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if `offset` plus the scalar's width
    /// exceeds the page length.
    pub fn write<T: FrostScalar>(&mut self, offset: usize, value: T) -> Result<()> {
        let mut cursor = offset;
        io::write_le_at(self.image.page_bytes_mut(self.page), &mut cursor, value)
    }

    /// Writes a string field at `offset`.
    ///
    /// Encodes the UTF-8 byte length (excluding the NUL terminator) followed by a
    /// pointer to a new page holding the bytes plus the terminator. An empty string
    /// allocates no page; its pointer targets the length field itself.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the 16-byte field does not fit at
    /// `offset`.
    pub fn write_str(&mut self, offset: usize, value: &str) -> Result<()> {
        self.check_range(offset, STRING_FIELD_SIZE)?;

        let bytes = value.as_bytes();
        self.write(offset, bytes.len() as u64)?;

        if bytes.is_empty() {
            // The length field holds zero, which doubles as a one-byte empty
            // null-terminated string.
            let target = self.page;
            self.write_page_pointer(offset + 8, Some((target, offset as u64)))
        } else {
            let page = self.image.append_page(bytes.len() + 1);
            self.image.page_bytes_mut(page)[..bytes.len()].copy_from_slice(bytes);
            self.write_page_pointer(offset + 8, Some((page, 0)))
        }
    }

    /// Writes an array of fixed-width scalars at `offset`.
    ///
    /// Encodes the element count followed by a pointer to a new page holding the raw
    /// little-endian element bytes, packed contiguously. An empty slice writes a null
    /// pointer and allocates nothing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the 16-byte field does not fit at
    /// `offset`.
    pub fn write_scalars<T: FrostScalar>(&mut self, offset: usize, values: &[T]) -> Result<()> {
        let element_size = std::mem::size_of::<T>();
        if let Some(page) = self.write_array_header(offset, values.len(), element_size)? {
            let buf = self.image.page_bytes_mut(page);
            let mut cursor = 0;
            for value in values {
                io::write_le_at(buf, &mut cursor, *value)?;
            }
        }
        Ok(())
    }

    /// Writes a freezable value at `offset`.
    ///
    /// Value-classified types are frozen directly inline at `offset` with no
    /// allocation. Reference-classified types are frozen into a freshly allocated
    /// page of `T::FROZEN_SIZE` bytes, with a pointer to it written at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the field does not fit at `offset`,
    /// or [`crate::Error::RecursionLimit`] if boxing the value would exceed the
    /// writer's maximum freeze depth.
    pub fn write_value<T: Freeze>(&mut self, offset: usize, value: &T) -> Result<()> {
        if T::IS_REFERENCE {
            self.image.enter_box()?;
            let result = self.write_boxed(offset, value);
            self.image.leave_box();
            result
        } else {
            value.freeze(self, offset)
        }
    }

    /// Writes an array of freezable values at `offset`.
    ///
    /// The element size within the array page is [`POINTER_SIZE`] for
    /// reference-classified element types (each slot points at an individually boxed
    /// element) and `T::FROZEN_SIZE` for value-classified element types (elements are
    /// packed contiguously with no indirection). An empty slice writes a null pointer
    /// and allocates nothing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the 16-byte field does not fit at
    /// `offset`, or [`crate::Error::RecursionLimit`] for graphs beyond the writer's
    /// maximum freeze depth.
    pub fn write_values<T: Freeze>(&mut self, offset: usize, values: &[T]) -> Result<()> {
        let element_size = if T::IS_REFERENCE {
            POINTER_SIZE
        } else {
            T::FROZEN_SIZE
        };

        if let Some(page) = self.write_array_header(offset, values.len(), element_size)? {
            let mut elements = PageWriter::new(&mut *self.image, page);
            for (index, value) in values.iter().enumerate() {
                elements.write_value(element_size * index, value)?;
            }
        }
        Ok(())
    }

    /// Writes an array of strings at `offset`.
    ///
    /// The array page holds one 16-byte string field per element; each non-empty
    /// element gets its own character page.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the 16-byte field does not fit at
    /// `offset`.
    pub fn write_strs<S: AsRef<str>>(&mut self, offset: usize, values: &[S]) -> Result<()> {
        if let Some(page) = self.write_array_header(offset, values.len(), STRING_FIELD_SIZE)? {
            let mut elements = PageWriter::new(&mut *self.image, page);
            for (index, value) in values.iter().enumerate() {
                elements.write_str(STRING_FIELD_SIZE * index, value.as_ref())?;
            }
        }
        Ok(())
    }

    /// Boxes `value` into its own page and writes the pointer at `offset`.
    fn write_boxed<T: Freeze>(&mut self, offset: usize, value: &T) -> Result<()> {
        let page = self.image.append_page(T::FROZEN_SIZE);
        self.write_page_pointer(offset, Some((page, 0)))?;

        let mut boxed = PageWriter::new(&mut *self.image, page);
        value.freeze(&mut boxed, 0)
    }

    /// Writes the element count at `offset` and, for non-empty arrays, allocates the
    /// element page and writes a pointer to it at `offset + 8`. Empty arrays get a
    /// null pointer and no page.
    fn write_array_header(
        &mut self,
        offset: usize,
        count: usize,
        element_size: usize,
    ) -> Result<Option<PageId>> {
        self.check_range(offset, ARRAY_FIELD_SIZE)?;
        self.write(offset, count as u64)?;

        if count > 0 {
            let page = self.image.append_page(count * element_size);
            self.write_page_pointer(offset + 8, Some((page, 0)))?;
            Ok(Some(page))
        } else {
            self.write_page_pointer(offset + 8, None)?;
            Ok(None)
        }
    }

    /// Writes the header-relative offset of `target` (plus an adjustment into that
    /// page) at `offset`, and records the slot with the image writer. Writes zero and
    /// records nothing when `target` is `None`.
    fn write_page_pointer(&mut self, offset: usize, target: Option<(PageId, u64)>) -> Result<()> {
        match target {
            Some((page, adjust)) => {
                self.write(offset, self.image.page_start(page) + adjust)?;
                let slot = self.start_offset() + offset as u64;
                self.image.record_pointer_slot(slot);
            }
            None => {
                self.write(offset, 0u64)?;
            }
        }
        Ok(())
    }

    fn check_range(&self, offset: usize, width: usize) -> Result<()> {
        let length = self.len();
        match offset.checked_add(width) {
            Some(end) if end <= length => Ok(()),
            _ => Err(Error::OutOfBounds {
                offset,
                width,
                length,
            }),
        }
    }
}
