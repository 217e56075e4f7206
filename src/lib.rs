// Copyright 2026 the permafrost contributors
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
//#![deny(unsafe_code)]
// - 'image/view.rs' maps files into memory for reading

//! # permafrost
//!
//! A writer for relocatable frozen-object images: serialize an in-memory value graph
//! into a single binary blob that a native runtime can load by mapping the raw bytes
//! and patching a small table of relative offsets into absolute pointers. No
//! per-field deserialization happens on the consumer side - the frozen bytes *are*
//! the runtime representation.
//!
//! ## Features
//!
//! - **🧊 Zero-deserialization loading** - consumers map the bytes and patch one pointer table
//! - **📐 Deterministic layout** - freezing the same value graph always yields identical bytes
//! - **📦 Relocatable output** - every stored offset is relative to the image header, so an
//!   image can be embedded at any position inside a larger file
//! - **🛡️ Bounds-checked writes** - nothing is ever silently truncated; faults carry context
//! - **🔧 Static dispatch** - the per-type freezing contract is resolved at compile time
//!
//! ## Quick Start
//!
//! Implement [`Freeze`] for your types and hand roots to an [`ImageWriter`]:
//!
//! ```rust
//! use std::io::Write;
//! use permafrost::prelude::*;
//!
//! struct Settings {
//!     gravity: f32,
//!     tags: Vec<u32>,
//!     title: String,
//! }
//!
//! impl Freeze for Settings {
//!     const FROZEN_SIZE: usize = 4 + ARRAY_FIELD_SIZE + STRING_FIELD_SIZE;
//!     const IS_REFERENCE: bool = false;
//!
//!     fn freeze<W: Write>(&self, page: &mut PageWriter<'_, W>, offset: usize) -> Result<()> {
//!         page.write(offset, self.gravity)?;
//!         page.write_scalars(offset + 4, &self.tags)?;
//!         page.write_str(offset + 4 + ARRAY_FIELD_SIZE, &self.title)
//!     }
//! }
//!
//! let settings = Settings {
//!     gravity: -9.81,
//!     tags: vec![3, 5, 8],
//!     title: "overworld".to_string(),
//! };
//!
//! let mut buffer = Vec::new();
//! let mut writer = ImageWriter::new(&mut buffer, 1);
//! writer.write_root(&settings)?;
//! writer.finish()?;
//!
//! // The buffer now starts with the image header.
//! assert_eq!(&buffer[0..4], b"FRST");
//! # Ok::<(), permafrost::Error>(())
//! ```
//!
//! ## Image Layout
//!
//! | Region | Content |
//! |---|---|
//! | Header (40 bytes) | magic, payload version, table locations |
//! | Pages | page buffers concatenated in allocation order |
//! | Pointer table | header-relative offsets of every pointer slot |
//! | Root table | header-relative offsets of every root object |
//!
//! All multi-byte values are little-endian. A pointer slot holds 0 for null or a
//! header-relative offset otherwise; the consumer adds its load base address to
//! every slot named by the pointer table and can then walk the objects in place.
//!
//! ## Architecture
//!
//! `permafrost` is organized into a handful of small modules:
//!
//! - [`freeze`] - The per-type freezing contract ([`Freeze`]) and field size rules
//! - [`image`] - Header, page writer, image writer and read-side view
//! - [`io`] - Bounds-checked little-endian scalar encoding
//! - [`Error`] and [`Result`] - Comprehensive error handling
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). A failed write leaves no
//! valid image; there is no partial success and no retry:
//!
//! ```rust
//! use permafrost::{Error, ImageView};
//!
//! match ImageView::from_mem(vec![0u8; 64], None) {
//!     Ok(view) => println!("{} roots", view.header().root_count),
//!     Err(Error::BadMagic { .. }) => println!("not a frozen image"),
//!     Err(e) => println!("error: {e}"),
//! }
//! ```

#[macro_use]
pub(crate) mod error;

pub mod freeze;
pub mod image;
pub mod io;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use permafrost::prelude::*;
///
/// let mut buffer = Vec::new();
/// let writer = ImageWriter::new(&mut buffer, 1);
/// writer.finish()?;
/// # Ok::<(), permafrost::Error>(())
/// ```
pub mod prelude;

/// `permafrost` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always
/// [`Error`]. Used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `permafrost` Error type
///
/// The main error type for all operations in this crate, covering the full fault
/// taxonomy from bounds violations to image validation failures.
pub use error::Error;

/// The per-type freezing contract and the field size constants.
pub use freeze::{Freeze, ARRAY_FIELD_SIZE, POINTER_SIZE, STRING_FIELD_SIZE};

/// The fixed image header and magic tag.
pub use image::header::{ImageHeader, IMAGE_MAGIC};

/// Typed write access to one page of an image under construction.
pub use image::page::PageWriter;

/// Read-side validation and inspection of finished images.
pub use image::view::ImageView;

/// The image writer: allocation, bookkeeping and finalization.
pub use image::writer::{ImageWriter, DEFAULT_MAX_DEPTH};
