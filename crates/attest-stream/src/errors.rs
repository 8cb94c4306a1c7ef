use std::io;

use thiserror::Error;

use attest_core::AssertionError;

/// Errors that can occur while decoding or encoding assertion streams.
#[derive(Error, Debug)]
pub enum StreamError {
    /// I/O error from the underlying reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The stream ended in the middle of an assertion.
    #[error("unexpected end of assertion stream")]
    UnexpectedEof,
    /// A component exceeded its size cap before its delimiter was found.
    #[error("maximum size exceeded while looking for delimiter {delim:?}")]
    MaxSizeExceeded {
        /// The delimiter being searched for.
        delim: String,
    },
    /// The declared body length exceeds the configured cap.
    #[error("assertion body length {length} exceeds maximum body size")]
    BodyTooLarge {
        /// The declared `body-length` value.
        length: i64,
    },
    /// A non-empty body was not followed by the content/signature separator.
    #[error("missing content/signature separator")]
    MissingSeparator,
    /// The assertion failed to parse, validate or assemble.
    #[error(transparent)]
    Assertion(#[from] AssertionError),
    /// An encoded assertion was unexpectedly empty.
    #[error("internal error: encoded assertion cannot be empty")]
    EmptyEncoding,
}
