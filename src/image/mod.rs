//! The image pipeline: header, pages, writer and read-side view.
//!
//! # Key Components
//!
//! - [`crate::image::header`] - The fixed 40-byte header and the image magic tag
//! - [`crate::image::page`] - Typed, bounds-checked write access to one page
//! - [`crate::image::writer`] - Page allocation, relocation bookkeeping, finalization
//! - [`crate::image::view`] - Validation and inspection of finished images
//!
//! The commonly used types are re-exported from the crate root; this module tree
//! mostly exists to keep the writing and reading halves of the format side by side.

pub mod header;
pub mod page;
pub mod view;
pub mod writer;
