//! Core model and codec for signed, typed assertions.
//!
//! This crate provides:
//! - The `Assertion` value type and its typed variants
//! - The static registry of known assertion types and their primary keys
//! - Field validation shared by the decode and sign paths
//! - Single-shot decoding and encoding of complete envelopes
//! - The canonical encoder used as the signing input, and the signer contract
//!
//! Core invariants:
//! - Assertions are immutable once assembled
//! - The canonical content bytes are deterministic for the same logical input
//! - `body-length` always matches the actual body length
//! - Every primary-key header is present, non-empty and free of `/`
//!
#![deny(missing_docs)]

/// The assertion value type, its typed variants and assembly.
pub mod assertion;
/// Single-shot envelope decoding and encoding.
pub mod codec;
/// Error types for assertion handling.
pub mod errors;
/// Canonical encoding, the signer contract and assemble-and-sign.
pub mod sign;
/// The static registry of assertion types.
pub mod types;
/// Header field validation helpers.
pub mod validate;

pub use assertion::{
    assemble, Account, AccountKey, Assertion, AssertionBase, Model, Serial, SnapBuild,
    SnapDeclaration, SnapRevision,
};
pub use attest_grammar::Headers;
pub use codec::{decode, encode};
pub use errors::AssertionError;
pub use sign::{assemble_and_sign, KeypairSigner, SignError, Signer};
pub use types::{lookup, AssertionType};

/// Media type for encoded assertions on the wire.
pub const MEDIA_TYPE: &str = "application/x.ubuntu.assertion";
