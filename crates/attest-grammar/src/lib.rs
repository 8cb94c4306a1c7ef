//! Header-block grammar for the assertion wire format.
//!
//! This crate owns the text grammar shared by every assertion envelope:
//! - `parse_headers` turns a raw header block into a name → value map
//! - `write_header` emits one header entry in canonical form
//!
//! Every byte that participates in signing is produced or consumed here.
//! The grammar is strict: UTF-8 only, lowercase dashed names, exactly one
//! space after the colon, and one-space-indented continuation lines for
//! multi-line values.
//!
#![deny(missing_docs)]

/// Errors reported while parsing a header block.
pub mod errors;
/// Parsing and serialization of header entries.
pub mod headers;

pub use errors::HeaderError;
pub use headers::{parse_headers, write_header, Headers};
