//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("not a thermal metadata block")]
    UnrecognizedFormat,
    #[error("unsupported major version: {0}")]
    UnsupportedVersion(u16),
    #[error("length exceeded: {0} > {1}")]
    LengthExceeded(usize, usize), // found, max
    #[error("buffer too small: {0} < {1}")]
    BufferTooSmall(usize, usize), // available, required
    #[error("invalid data in {0}: {1}")]
    Invalid(&'static str, &'static str), // context, message
}
