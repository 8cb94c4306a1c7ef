//! Streaming decoder implementation.

use std::io::{self, Read};

use attest_core::validate::check_integer;
use attest_core::{assemble, Assertion, AssertionError};
use attest_grammar::parse_headers;

use crate::errors::StreamError;
use crate::limits::Limits;

const NLNL: &[u8] = b"\n\n";

/// Initial size of the scan window; it grows by doubling up to the cap of
/// the component being read.
const INITIAL_BUF_SIZE: usize = 4096;

/// Result of scanning the buffered stream for a delimiter.
enum Scan {
    /// The delimiter was found; the payload includes it.
    Found(Vec<u8>),
    /// The stream ended first; the payload is whatever remained.
    Eof(Vec<u8>),
}

/// Streaming assertion decoder.
///
/// Parses one assertion per [`decode`](Decoder::decode) call from a stream
/// of assertions separated by double newlines. `Ok(None)` marks the end of
/// a well-formed stream; a stream ending mid-assertion is an error.
///
/// # Example
///
/// ```
/// use attest_stream::Decoder;
///
/// let stream: &[u8] =
///     b"type: account\nauthority-id: canonical\naccount-id: alice\n\nopenpgp sig\n";
/// let mut decoder = Decoder::new(stream);
/// let assertion = decoder.decode()?.expect("one assertion");
/// assert_eq!(assertion.authority_id(), "canonical");
/// assert!(decoder.decode()?.is_none());
/// # Ok::<(), attest_stream::StreamError>(())
/// ```
pub struct Decoder<R: Read> {
    rd: R,
    buf: Vec<u8>,
    eof: bool,
    failed: Option<(io::ErrorKind, String)>,
    limits: Limits,
}

impl<R: Read> Decoder<R> {
    /// Creates a decoder with the default [`Limits`].
    pub fn new(rd: R) -> Self {
        Self::with_limits(rd, Limits::default())
    }

    /// Creates a decoder with explicit per-component size caps.
    pub fn with_limits(rd: R, limits: Limits) -> Self {
        Self {
            rd,
            buf: Vec::with_capacity(INITIAL_BUF_SIZE),
            eof: false,
            failed: None,
            limits,
        }
    }

    /// Parses the next assertion from the stream.
    ///
    /// Returns `Ok(None)` at the end of a well-formed stream. Once the
    /// underlying reader has failed, every subsequent call reports that
    /// same error.
    pub fn decode(&mut self) -> Result<Option<Assertion>, StreamError> {
        // the headers and the "\n\n" separator after them
        let head_and_sep = match self.read_until(NLNL, self.limits.max_headers_size)? {
            Scan::Found(head_and_sep) => head_and_sep,
            Scan::Eof(rest) => {
                if rest.is_empty() {
                    return Ok(None);
                }
                return Err(StreamError::UnexpectedEof);
            }
        };

        let head_len = head_and_sep.len() - NLNL.len();
        let headers = parse_headers(&head_and_sep[..head_len]).map_err(AssertionError::from)?;

        let length = check_integer(&headers, "body-length", 0)?;
        if length > self.limits.max_body_size as i64 {
            return Err(StreamError::BodyTooLarge { length });
        }

        // capture the whole signed content exactly as read
        let mut content = Vec::with_capacity(head_and_sep.len() + length.max(0) as usize);
        content.extend_from_slice(&head_and_sep);

        if length > 0 {
            let body = self.read_exact(length as usize)?;
            content.extend_from_slice(&body);
        }

        // the end of body a.k.a. the content/signature separator
        let mut sig = match self.read_until(NLNL, self.limits.max_signature_size)? {
            Scan::Found(end_of_body) if end_of_body == NLNL => {
                // a proper separator; the signature and the assertion
                // boundary come next
                match self.read_until(NLNL, self.limits.max_signature_size)? {
                    Scan::Found(sig) | Scan::Eof(sig) => sig,
                }
            }
            Scan::Found(end_of_body) | Scan::Eof(end_of_body) => {
                // the signature came directly, which is valid only without
                // a body: the header separator doubled as the
                // content/signature one
                if length > 0 {
                    return Err(StreamError::MissingSeparator);
                }
                content.truncate(head_len);
                end_of_body
            }
        };

        // normalize: the second newline of a trailing "\n\n" is the
        // inter-assertion separator, not part of the signature
        if sig.ends_with(NLNL) {
            sig.pop();
        }

        let body = if length > 0 {
            Some(content[head_len + NLNL.len()..].to_vec())
        } else {
            None
        };

        let assertion = assemble(headers, body, content, sig)?;
        Ok(Some(assertion))
    }

    fn sticky(&self) -> Option<io::Error> {
        self.failed
            .as_ref()
            .map(|(kind, msg)| io::Error::new(*kind, msg.clone()))
    }

    /// Fills the buffer until at least `size` bytes are available, the
    /// stream ends, or the reader fails. Reader failures are sticky.
    fn fill_to(&mut self, size: usize) -> io::Result<()> {
        if let Some(err) = self.sticky() {
            return Err(err);
        }
        let mut chunk = [0u8; INITIAL_BUF_SIZE];
        while self.buf.len() < size && !self.eof {
            let want = (size - self.buf.len()).min(chunk.len());
            match self.rd.read(&mut chunk[..want]) {
                Ok(0) => self.eof = true,
                Ok(n) => self.buf.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.failed = Some((e.kind(), e.to_string()));
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Consumes and returns the first `n` buffered bytes.
    fn take(&mut self, n: usize) -> Vec<u8> {
        let rest = self.buf.split_off(n);
        std::mem::replace(&mut self.buf, rest)
    }

    /// Scans forward for `delim`, growing the scan window by doubling from
    /// [`INITIAL_BUF_SIZE`]; a window about to exceed `max_size` fails.
    fn read_until(&mut self, delim: &[u8], max_size: usize) -> Result<Scan, StreamError> {
        let mut searched = 0;
        let mut size = INITIAL_BUF_SIZE;
        loop {
            self.fill_to(size)?;
            let window = &self.buf[..self.buf.len().min(size)];
            if let Some(i) = find(&window[searched..], delim) {
                return Ok(Scan::Found(self.take(searched + i + delim.len())));
            }
            if window.len() < size {
                // the stream is exhausted and the delimiter never came
                let n = self.buf.len();
                return Ok(Scan::Eof(self.take(n)));
            }
            searched = size - delim.len() + 1;
            size *= 2;
            if size > max_size {
                return Err(StreamError::MaxSizeExceeded {
                    delim: String::from_utf8_lossy(delim).into_owned(),
                });
            }
        }
    }

    /// Reads exactly `size` bytes; a premature end of stream is an error.
    fn read_exact(&mut self, size: usize) -> Result<Vec<u8>, StreamError> {
        self.fill_to(size)?;
        if self.buf.len() < size {
            let n = self.buf.len();
            self.take(n);
            return Err(StreamError::UnexpectedEof);
        }
        Ok(self.take(size))
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
