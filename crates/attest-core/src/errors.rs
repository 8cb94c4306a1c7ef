use thiserror::Error;

use attest_grammar::HeaderError;

/// Errors raised while decoding, validating or assembling assertions.
#[derive(Error, Debug)]
pub enum AssertionError {
    /// The header block failed to parse.
    #[error("parsing assertion headers: {0}")]
    Headers(#[from] HeaderError),
    /// The envelope has no content/signature separator.
    #[error("assertion content/signature separator not found")]
    SeparatorNotFound,
    /// A mandatory header is absent.
    #[error("{name:?} header is mandatory")]
    MissingHeader {
        /// Name of the absent header.
        name: String,
    },
    /// A mandatory header is present but empty.
    #[error("{name:?} header should not be empty")]
    EmptyHeader {
        /// Name of the empty header.
        name: String,
    },
    /// An integer-valued header does not parse as a base-10 integer.
    #[error("{name:?} header is not an integer: {value}")]
    NotAnInteger {
        /// Name of the header.
        name: String,
        /// The offending value.
        value: String,
    },
    /// The `revision` header is negative.
    #[error("revision should be positive: {revision}")]
    NegativeRevision {
        /// The offending revision value.
        revision: i64,
    },
    /// The `type` header names no registered assertion type.
    #[error("unknown assertion type: {name:?}")]
    UnknownType {
        /// The unregistered type name.
        name: String,
    },
    /// A primary-key header is absent.
    #[error("assertion {assert_type}: {name:?} primary key header is mandatory")]
    MissingPrimaryKey {
        /// Name of the assertion type.
        assert_type: &'static str,
        /// Name of the absent header.
        name: &'static str,
    },
    /// A primary-key header is present but empty.
    #[error("assertion {assert_type}: {name:?} primary key header should not be empty")]
    EmptyPrimaryKey {
        /// Name of the assertion type.
        assert_type: &'static str,
        /// Name of the empty header.
        name: &'static str,
    },
    /// A primary-key header contains a `/`.
    #[error("assertion {assert_type}: {name:?} primary key header cannot contain '/'")]
    InvalidPrimaryKey {
        /// Name of the assertion type.
        assert_type: &'static str,
        /// Name of the offending header.
        name: &'static str,
    },
    /// The actual body length differs from the declared `body-length`.
    #[error("assertion body length and declared body-length don't match: {actual} != {declared}")]
    BodyLengthMismatch {
        /// Actual body length in bytes.
        actual: usize,
        /// Declared `body-length` value.
        declared: i64,
    },
    /// The signature bytes are empty.
    #[error("empty assertion signature")]
    EmptySignature,
    /// The signer failed to sign the canonical content.
    #[error("cannot sign assertion: {0}")]
    Signing(#[from] crate::sign::SignError),
}
