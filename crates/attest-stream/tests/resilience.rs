use std::io::{self, Read};

use attest_stream::{Decoder, Limits, StreamError};

/// Yields its data, then fails every read with the same error kind.
struct BrokenReader {
    data: io::Cursor<Vec<u8>>,
}

impl BrokenReader {
    fn new(data: &[u8]) -> Self {
        Self {
            data: io::Cursor::new(data.to_vec()),
        }
    }
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe burst")),
            n => Ok(n),
        }
    }
}

#[test]
fn test_oversized_declared_body_rejected_before_reading_it() {
    let stream: &[u8] = b"type: account\nauthority-id: canonical\naccount-id: alice\n\
                          body-length: 3000000\n\n";
    // no body follows at all; the declared length alone must trip the cap
    let mut decoder = Decoder::new(stream);
    match decoder.decode().unwrap_err() {
        StreamError::BodyTooLarge { length } => assert_eq!(length, 3000000),
        other => panic!("expected body-too-large, got {other}"),
    }
}

#[test]
fn test_oversized_headers_rejected() {
    let mut stream = Vec::from(&b"type: account\nauthority-id: canonical\nblob:\n"[..]);
    // a single huge multi-line header, never terminated by "\n\n"
    for _ in 0..5000 {
        stream.extend_from_slice(b" 0123456789012345678901234567890123456789\n");
    }
    let mut decoder = Decoder::new(&stream[..]);
    match decoder.decode().unwrap_err() {
        StreamError::MaxSizeExceeded { delim } => assert_eq!(delim, "\n\n"),
        other => panic!("expected max-size-exceeded, got {other}"),
    }
}

#[test]
fn test_small_limits_are_honored() {
    let limits = Limits {
        max_headers_size: 8192,
        max_body_size: 4,
        max_signature_size: 8192,
    };
    let stream: &[u8] = b"type: snap-build\nauthority-id: canonical\nseries: 16\n\
                          snap-id: abc\nsnap-digest: xyz\nbody-length: 5\n\nhello\n\nSIG\n";
    let mut decoder = Decoder::with_limits(stream, limits);
    assert!(matches!(
        decoder.decode().unwrap_err(),
        StreamError::BodyTooLarge { length: 5 }
    ));
}

#[test]
fn test_oversized_signature_rejected() {
    let mut stream =
        Vec::from(&b"type: account\nauthority-id: canonical\naccount-id: alice\n\n"[..]);
    // a signature larger than its cap, never terminated by "\n\n"
    stream.resize(stream.len() + 200_000, b'A');
    let mut decoder = Decoder::new(&stream[..]);
    assert!(matches!(
        decoder.decode().unwrap_err(),
        StreamError::MaxSizeExceeded { .. }
    ));
}

#[test]
fn test_truncated_headers_is_unexpected_eof() {
    // valid header lines but no "\n\n" terminator
    let stream: &[u8] = b"type: account\nauthority-id: canonical";
    let mut decoder = Decoder::new(stream);
    assert!(matches!(
        decoder.decode().unwrap_err(),
        StreamError::UnexpectedEof
    ));
}

#[test]
fn test_truncated_body_is_unexpected_eof() {
    let stream: &[u8] = b"type: snap-build\nauthority-id: canonical\nseries: 16\n\
                          snap-id: abc\nsnap-digest: xyz\nbody-length: 100\n\nonly a few bytes";
    let mut decoder = Decoder::new(stream);
    assert!(matches!(
        decoder.decode().unwrap_err(),
        StreamError::UnexpectedEof
    ));
}

#[test]
fn test_body_without_signature_separator_rejected() {
    // the body runs straight into trailing garbage with no "\n\n"
    let stream: &[u8] = b"type: snap-build\nauthority-id: canonical\nseries: 16\n\
                          snap-id: abc\nsnap-digest: xyz\nbody-length: 5\n\nhelloSIG";
    let mut decoder = Decoder::new(stream);
    assert!(matches!(
        decoder.decode().unwrap_err(),
        StreamError::MissingSeparator
    ));
}

#[test]
fn test_stream_ending_after_headers_has_no_signature() {
    let stream: &[u8] = b"type: account\nauthority-id: canonical\naccount-id: alice\n\n";
    let mut decoder = Decoder::new(stream);
    let err = decoder.decode().unwrap_err();
    assert_eq!(err.to_string(), "empty assertion signature");
}

#[test]
fn test_reader_errors_are_sticky() {
    let mut decoder = Decoder::new(BrokenReader::new(
        b"type: account\nauthority-id: canonical\n",
    ));

    for _ in 0..2 {
        match decoder.decode().unwrap_err() {
            StreamError::Io(err) => {
                assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
                assert_eq!(err.to_string(), "pipe burst");
            }
            other => panic!("expected I/O error, got {other}"),
        }
    }
}

#[test]
fn test_garbage_headers_reported_with_context() {
    let stream: &[u8] = b"not a header block\n\nSIG\n";
    let mut decoder = Decoder::new(stream);
    let err = decoder.decode().unwrap_err();
    assert!(err
        .to_string()
        .starts_with("parsing assertion headers: header entry missing ':' separator"));
}

#[test]
fn test_unknown_type_rejected_in_stream() {
    let stream: &[u8] = b"type: gizmo\nauthority-id: canonical\n\nSIG\n";
    let mut decoder = Decoder::new(stream);
    let err = decoder.decode().unwrap_err();
    assert_eq!(err.to_string(), "unknown assertion type: \"gizmo\"");
}
