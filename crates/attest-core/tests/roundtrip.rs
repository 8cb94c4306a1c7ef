use attest_core::{
    assemble_and_sign, decode, encode, lookup, Assertion, Headers, KeypairSigner, SignError,
    Signer,
};
use serde_json::json;

struct StaticSigner(&'static [u8]);

impl Signer for StaticSigner {
    fn sign(&self, _content: &[u8]) -> Result<Vec<u8>, SignError> {
        Ok(self.0.to_vec())
    }
}

fn headers(pairs: &[(&str, &str)]) -> Headers {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

#[test]
fn test_decode_encode_reproduces_input() {
    let input: &[u8] =
        b"type: account\nauthority-id: canonical\naccount-id: alice\n\nopenpgp sig";
    let assertion = decode(input).unwrap();
    assert_eq!(encode(&assertion), input);
}

#[test]
fn test_sign_decode_round_trip_preserves_everything() {
    let assertion = assemble_and_sign(
        lookup("snap-build").unwrap(),
        headers(&[
            ("authority-id", "canonical"),
            ("series", "16"),
            ("snap-id", "abc"),
            ("snap-digest", "xyz"),
            ("revision", "3"),
            ("grade", "stable"),
        ]),
        b"hello",
        &StaticSigner(b"SIG"),
    )
    .unwrap();

    let decoded = decode(&encode(&assertion)).unwrap();
    assert_eq!(decoded.assert_type().name(), "snap-build");
    assert_eq!(decoded.revision(), 3);
    assert_eq!(decoded.authority_id(), "canonical");
    assert_eq!(decoded.body(), Some(&b"hello"[..]));
    assert_eq!(
        serde_json::to_value(decoded.headers()).unwrap(),
        json!({
            "type": "snap-build",
            "authority-id": "canonical",
            "revision": "3",
            "series": "16",
            "snap-id": "abc",
            "snap-digest": "xyz",
            "grade": "stable",
            "body-length": "5",
        })
    );

    match decoded {
        Assertion::SnapBuild(build) => {
            assert_eq!(build.series(), "16");
            assert_eq!(build.snap_id(), "abc");
            assert_eq!(build.snap_digest(), "xyz");
        }
        other => panic!("expected snap-build assertion, got {other:?}"),
    }
}

#[test]
fn test_zero_revision_and_empty_body_leave_no_trace() {
    let assertion = assemble_and_sign(
        lookup("account").unwrap(),
        headers(&[
            ("authority-id", "canonical"),
            ("account-id", "alice"),
            ("revision", "0"),
        ]),
        b"",
        &StaticSigner(b"SIG"),
    )
    .unwrap();

    let decoded = decode(&encode(&assertion)).unwrap();
    assert_eq!(decoded.revision(), 0);
    assert_eq!(
        serde_json::to_value(decoded.headers()).unwrap(),
        json!({
            "type": "account",
            "authority-id": "canonical",
            "account-id": "alice",
        })
    );
}

#[test]
fn test_multiline_description_round_trips() {
    let assertion = assemble_and_sign(
        lookup("model").unwrap(),
        headers(&[
            ("authority-id", "brand"),
            ("series", "16"),
            ("brand-id", "brand"),
            ("model", "widget"),
            ("description", "first line\nsecond line"),
        ]),
        b"",
        &StaticSigner(b"SIG"),
    )
    .unwrap();

    let encoded = encode(&assertion);
    let rendered = String::from_utf8(encoded.clone()).unwrap();
    assert!(rendered.contains("description:\n first line\n second line"));

    let decoded = decode(&encoded).unwrap();
    assert_eq!(decoded.header("description"), Some("first line\nsecond line"));
}

#[test]
fn test_ed25519_signed_assertion_decodes() {
    let signer = KeypairSigner::from_seed(&[7; 32]);
    let assertion = assemble_and_sign(
        lookup("serial").unwrap(),
        headers(&[
            ("authority-id", "brand"),
            ("brand-id", "brand"),
            ("model", "widget"),
            ("serial", "A-0001"),
        ]),
        b"",
        &signer,
    )
    .unwrap();

    let decoded = decode(&encode(&assertion)).unwrap();
    let (content, signature) = decoded.signature();
    assert_eq!(content, assertion.signature().0);
    assert_eq!(signature, assertion.signature().1);
}
