//! Per-component size caps for the streaming decoder.

/// Maximum header block size: 128 KiB.
pub const MAX_HEADERS_SIZE: usize = 128 * 1024;

/// Maximum body size: 2 MiB.
pub const MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Maximum signature size: 128 KiB.
pub const MAX_SIGNATURE_SIZE: usize = 128 * 1024;

/// Per-component size caps enforced by [`Decoder`](crate::Decoder).
///
/// The caps bound peak memory per assertion to roughly
/// `max_headers_size + max_body_size + 2 * max_signature_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Cap on the header block, including its terminating separator.
    pub max_headers_size: usize,
    /// Cap on the declared body length.
    pub max_body_size: usize,
    /// Cap on the signature, including its terminating separator.
    pub max_signature_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_headers_size: MAX_HEADERS_SIZE,
            max_body_size: MAX_BODY_SIZE,
            max_signature_size: MAX_SIGNATURE_SIZE,
        }
    }
}
