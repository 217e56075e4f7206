//! # permafrost Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and
//! traits of the crate. Importing it brings everything needed to implement
//! [`crate::Freeze`] for a type and write images.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all permafrost operations
pub use crate::Error;

/// The result type used throughout permafrost
pub use crate::Result;

// ================================================================================================
// Writing Images
// ================================================================================================

/// The image writer and its default freeze depth limit
pub use crate::{ImageWriter, DEFAULT_MAX_DEPTH};

/// Typed write access to one page
pub use crate::PageWriter;

/// The per-type freezing contract
pub use crate::Freeze;

/// Field size rules for computing `FROZEN_SIZE`
pub use crate::{ARRAY_FIELD_SIZE, POINTER_SIZE, STRING_FIELD_SIZE};

// ================================================================================================
// Reading Images
// ================================================================================================

/// Read-side validation and inspection of a finished image
pub use crate::ImageView;

/// The fixed image header and its magic tag
pub use crate::{ImageHeader, IMAGE_MAGIC};
