use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers everything that can go wrong while freezing values into an image and while
/// validating a finished image. Each variant carries enough context to diagnose the failure
/// without a debugger attached.
///
/// # Error Categories
///
/// ## Freezing Errors
/// - [`Error::OutOfBounds`] - A typed write landed outside its page's reserved range
/// - [`Error::RecursionLimit`] - The value graph descended through too many boxed values
/// - [`Error::PageDrift`] - A page did not flush at its reserved offset (internal fault)
///
/// ## Image Validation Errors
/// - [`Error::BadMagic`] - The buffer does not begin with an image header
/// - [`Error::PayloadVersionMismatch`] - The image was frozen with a different payload format
/// - [`Error::Malformed`] - The image is truncated or internally inconsistent
///
/// ## I/O Errors
/// - [`Error::Io`] - Errors from the underlying output sink or filesystem
///
/// # Examples
///
/// ```rust
/// use permafrost::{Error, ImageView};
///
/// match ImageView::from_mem(vec![0u8; 64], None) {
///     Ok(view) => println!("image with {} roots", view.header().root_count),
///     Err(Error::BadMagic { found }) => eprintln!("not an image (magic {found:#010x})"),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("malformed image: {message} ({file}:{line})");
///     }
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A write would have landed outside the page it targets.
    ///
    /// Page writes are bounds-checked against the page's reserved length; nothing is
    /// ever silently truncated. The offending offset, the width of the attempted
    /// access and the page length are all captured.
    #[error("Access of {width} bytes at offset {offset} is outside the {length} byte range!")]
    OutOfBounds {
        /// Offset within the page at which the access started
        offset: usize,
        /// Width in bytes of the attempted access
        width: usize,
        /// Reserved length of the page (or buffer) that was targeted
        length: usize,
    },

    /// A page's flush position did not match its reserved start offset.
    ///
    /// This is an internal consistency fault in the page allocator, never a problem
    /// with the data being frozen. If it occurs, the produced stream must be discarded.
    #[error("Page flushed at offset {actual} but was reserved at {expected}!")]
    PageDrift {
        /// The start offset the page was reserved at
        expected: u64,
        /// The stream position the page was actually flushed at
        actual: u64,
    },

    /// The buffer does not start with the image magic tag.
    ///
    /// Whatever was handed to the reader is not a frozen image, or the image start
    /// offset within a larger file was computed incorrectly.
    #[error("Image magic mismatch - found {found:#010x}")]
    BadMagic {
        /// The 4 bytes found where the magic tag was expected
        found: u32,
    },

    /// The image was frozen with a different payload format version than expected.
    ///
    /// The payload version is an opaque tag chosen by whoever defines the frozen
    /// types; readers that pin a version refuse images frozen with any other.
    #[error("Image payload format version {found} does not match expected version {expected}")]
    PayloadVersionMismatch {
        /// The version the reader expected
        expected: u32,
        /// The version recorded in the image header
        found: u32,
    },

    /// The image is damaged and could not be validated.
    ///
    /// Covers truncated tables, offsets pointing outside the image, and similar
    /// structural damage. The error includes the source location where the damage
    /// was detected for debugging purposes.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Recursion limit reached while freezing a value graph.
    ///
    /// Every descent into a boxed (reference-classified) value deepens the freeze
    /// recursion; a configurable limit bounds it so that cyclic or pathologically
    /// deep graphs fail cleanly instead of exhausting the stack.
    ///
    /// The associated value shows the recursion limit that was reached.
    #[error("Reached the maximum freeze depth allowed - {0}")]
    RecursionLimit(usize),

    /// File or sink I/O error.
    ///
    /// Wraps standard I/O errors from the output sink during finalization or from
    /// the filesystem while mapping an image for reading.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
