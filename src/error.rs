//! Structured error types for the burin rasterizer.
//!
//! Everything a font can do wrong funnels into one enum. Truncated or
//! malicious input is always reported through `Err`, never a panic: every
//! read against font memory is bounds-checked first.

use thiserror::Error;

/// The unified error type returned by all public burin API functions.
#[derive(Debug, Error)]
pub enum BurinError {
    /// The font file could not be opened or mapped.
    #[error("failed to read font file: {0}")]
    Io(#[from] std::io::Error),

    /// The scaler type at offset 0 is not a TrueType magic number.
    #[error("not a TrueType font (unrecognized scaler type)")]
    UnrecognizedFormat,

    /// A table the pipeline needs is absent from the table directory.
    #[error("required table `{0}` is missing")]
    MissingTable(&'static str),

    /// A read ran past the end of the font data. Covers truncated files
    /// and directory entries pointing outside the mapped range.
    #[error("font data ends unexpectedly")]
    UnexpectedEof,

    /// The font uses a feature outside the supported subset, such as a
    /// cmap subtable format other than 4 or 6.
    #[error("unsupported font feature: {0}")]
    Unsupported(&'static str),

    /// A glyph outline violates its own structural rules.
    #[error("corrupt glyph outline: {0}")]
    BadOutline(&'static str),
}
