//! Single-shot decoding and encoding of complete assertion envelopes.

use attest_grammar::parse_headers;

use crate::assertion::{assemble, Assertion};
use crate::errors::AssertionError;

const NLNL: &[u8] = b"\n\n";

/// Parses a complete serialized assertion.
///
/// The expected serialization format looks like:
///
/// ```text
/// HEADERS ("\n\n" BODY)? "\n\n" SIGNATURE
/// ```
///
/// The *last* `"\n\n"` separates content from signature (the body length is
/// unknown before the headers are parsed), the *first* `"\n\n"` within the
/// content separates headers from body. An empty body is treated as absent.
///
/// The following headers are mandatory: `type`, `authority-id`, and every
/// primary-key header of the assertion type. `revision` and `body-length`
/// expect integer values and default to 0 when omitted.
pub fn decode(serialized: &[u8]) -> Result<Assertion, AssertionError> {
    // snapshot the input; the assertion owns its bytes outright
    let snapshot = serialized.to_vec();
    let content_signature_split = snapshot
        .windows(NLNL.len())
        .rposition(|w| w == NLNL)
        .ok_or(AssertionError::SeparatorNotFound)?;
    let content = &snapshot[..content_signature_split];
    let signature = snapshot[content_signature_split + NLNL.len()..].to_vec();

    let (head, body) = match content.windows(NLNL.len()).position(|w| w == NLNL) {
        Some(headers_body_split) => {
            let body = &content[headers_body_split + NLNL.len()..];
            let body = (!body.is_empty()).then(|| body.to_vec());
            (&content[..headers_body_split], body)
        }
        None => (content, None),
    };

    let headers = parse_headers(head)?;
    assemble(headers, body, content.to_vec(), signature)
}

/// Serializes an assertion back into its envelope bytes.
pub fn encode(assertion: &Assertion) -> Vec<u8> {
    let (content, signature) = assertion.signature();
    let mut buf = Vec::with_capacity(content.len() + NLNL.len() + signature.len());
    buf.extend_from_slice(content);
    buf.extend_from_slice(NLNL);
    buf.extend_from_slice(signature);
    buf
}
