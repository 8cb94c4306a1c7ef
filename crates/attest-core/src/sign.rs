//! Canonical encoding and signing of assertions.
//!
//! The canonical content bytes produced here are the exact input to the
//! signer; two callers with the same logical inputs get identical bytes.

use std::fmt;

use ed25519_dalek::{Signer as _, SigningKey};
use sha2::{Digest, Sha256};
use thiserror::Error;

use attest_grammar::{write_header, Headers};

use crate::assertion::{Assertion, AssertionBase};
use crate::errors::AssertionError;
use crate::types::AssertionType;
use crate::validate::{check_not_empty, check_primary_key, check_revision};

/// Opaque failure reported by a [`Signer`].
#[derive(Error, Debug)]
#[error("{0}")]
pub struct SignError(
    /// Human-readable failure description from the signer.
    pub String,
);

/// The signing contract consumed by [`assemble_and_sign`]: raw signature
/// bytes over the canonical content bytes.
///
/// Signatures are opaque to the codec; no verification happens here.
pub trait Signer {
    /// Signs the canonical content bytes.
    fn sign(&self, content: &[u8]) -> Result<Vec<u8>, SignError>;
}

/// Assembles and signs a new assertion of `assert_type`.
///
/// The `type` and `body-length` headers are forced from the arguments.
/// Canonical header emission order:
///
/// 1. `type` (no leading newline)
/// 2. `authority-id`
/// 3. `revision`, only when positive (otherwise the header is dropped)
/// 4. the primary-key headers, in the order declared by the type
/// 5. all remaining headers, in lexicographic order
/// 6. `body-length`, only when the body is non-empty (otherwise dropped)
///
/// A non-empty body follows after a `"\n\n"` separator. The signature gets
/// one trailing `\n` so that concatenated streams stay cat-friendly.
pub fn assemble_and_sign<S: Signer + ?Sized>(
    assert_type: &'static AssertionType,
    headers: Headers,
    body: &[u8],
    signer: &S,
) -> Result<Assertion, AssertionError> {
    let mut final_headers = headers;
    let body_length = body.len();
    final_headers.insert("type".to_string(), assert_type.name().to_string());
    final_headers.insert("body-length".to_string(), body_length.to_string());

    check_not_empty(&final_headers, "authority-id")?;
    let revision = check_revision(&final_headers)?;

    let mut content = b"type: ".to_vec();
    content.extend_from_slice(assert_type.name().as_bytes());
    write_header(&mut content, &final_headers, "authority-id");
    if revision > 0 {
        write_header(&mut content, &final_headers, "revision");
    } else {
        final_headers.remove("revision");
    }

    for name in assert_type.primary_key() {
        check_primary_key(&final_headers, assert_type, name)?;
        write_header(&mut content, &final_headers, name);
    }

    // the remaining headers; lexicographic order comes with the map
    let bookkept = |name: &str| {
        matches!(name, "type" | "authority-id" | "revision" | "body-length")
            || assert_type.primary_key().iter().any(|k| *k == name)
    };
    let other: Vec<String> = final_headers
        .keys()
        .filter(|name| !bookkept(name))
        .cloned()
        .collect();
    for name in &other {
        write_header(&mut content, &final_headers, name);
    }

    let final_body = if body_length > 0 {
        write_header(&mut content, &final_headers, "body-length");
        content.extend_from_slice(b"\n\n");
        content.extend_from_slice(body);
        Some(body.to_vec())
    } else {
        final_headers.remove("body-length");
        None
    };

    let mut signature = signer.sign(&content)?;
    // cat friendly: the trailing newline keeps concatenated streams splittable
    signature.push(b'\n');

    assert_type.assemble(AssertionBase::new(
        assert_type,
        final_headers,
        final_body,
        revision,
        content,
        signature,
    ))
}

/// An Ed25519 [`Signer`] holding a private signing key.
#[derive(Clone)]
pub struct KeypairSigner {
    signing_key: SigningKey,
}

impl KeypairSigner {
    /// Generates a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            signing_key: SigningKey::generate(&mut rng),
        }
    }

    /// Creates a keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// A stable identifier for the public key: base64url (no padding) of
    /// the SHA-256 of the public key bytes.
    pub fn public_key_id(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.signing_key.verifying_key().as_bytes());
        use base64::Engine;
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hasher.finalize())
    }
}

impl Signer for KeypairSigner {
    /// The envelope is text-framed, so the raw 64-byte signature is emitted
    /// as base64url (no padding) text; it can never contain a `"\n\n"`.
    fn sign(&self, content: &[u8]) -> Result<Vec<u8>, SignError> {
        use base64::Engine;
        let raw = self.signing_key.sign(content).to_bytes();
        Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode(raw)
            .into_bytes())
    }
}

impl fmt::Debug for KeypairSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeypairSigner({})", self.public_key_id())
    }
}
