//! Streaming encoder implementation.

use std::io::Write;

use attest_core::{encode, Assertion};

use crate::errors::StreamError;

/// Streaming assertion encoder.
///
/// Emits a stream of assertions separated by a single `\n`; together with
/// the `\n` every encoded assertion ends in, that yields the `"\n\n"`
/// boundary the decoder splits on. No separator precedes the first
/// assertion.
pub struct Encoder<W: Write> {
    wr: W,
    next_sep: &'static [u8],
}

impl<W: Write> Encoder<W> {
    /// Creates an encoder emitting to `wr`.
    pub fn new(wr: W) -> Self {
        Self { wr, next_sep: b"" }
    }

    /// Emits the assertion into the stream with the required separator.
    ///
    /// Errors here are always about writing, as encoding an assertion
    /// itself cannot fail.
    pub fn encode(&mut self, assertion: &Assertion) -> Result<(), StreamError> {
        self.append(&encode(assertion))
    }

    /// Emits an already encoded assertion into the stream with the
    /// required separator, appending a final `\n` if the encoding lacks
    /// one.
    pub fn append(&mut self, encoded: &[u8]) -> Result<(), StreamError> {
        let Some(&last) = encoded.last() else {
            return Err(StreamError::EmptyEncoding);
        };

        self.wr.write_all(self.next_sep)?;
        self.wr.write_all(encoded)?;
        if last != b'\n' {
            self.wr.write_all(b"\n")?;
        }
        self.next_sep = b"\n";

        Ok(())
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> Result<(), StreamError> {
        self.wr.flush()?;
        Ok(())
    }

    /// Consumes the encoder, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.wr
    }
}
