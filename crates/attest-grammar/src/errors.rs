use thiserror::Error;

/// Errors that can occur while parsing a header block.
#[derive(Error, Debug)]
pub enum HeaderError {
    /// The header block contains invalid UTF-8.
    #[error("header is not utf8")]
    NotUtf8,
    /// A header entry has no `:` separator.
    #[error("header entry missing ':' separator: {entry:?}")]
    MissingColon {
        /// The offending entry.
        entry: String,
    },
    /// A header name does not match the sanity pattern.
    #[error("invalid header name: {name:?}")]
    InvalidName {
        /// The offending name.
        name: String,
    },
    /// A single-line entry lacks the space between `:` and the value.
    #[error("header entry should have a space or newline (multiline) before value: {entry:?}")]
    MissingSpace {
        /// The offending entry.
        entry: String,
    },
    /// A multi-line entry has no continuation lines.
    #[error("empty multiline header value: {entry:?}")]
    EmptyMultiline {
        /// The offending entry.
        entry: String,
    },
}
