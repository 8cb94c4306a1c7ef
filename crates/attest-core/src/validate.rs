//! Header field validation shared by the decode and sign paths.

use attest_grammar::Headers;

use crate::errors::AssertionError;
use crate::types::AssertionType;

/// Parses the integer-valued header `name`, returning `default` when the
/// header is absent.
///
/// Integer headers are stored as strings on the wire and parsed on demand.
pub fn check_integer(headers: &Headers, name: &str, default: i64) -> Result<i64, AssertionError> {
    match headers.get(name) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| AssertionError::NotAnInteger {
            name: name.to_string(),
            value: value.clone(),
        }),
    }
}

/// Checks that the header `name` is present and non-empty, returning its
/// value.
pub fn check_not_empty<'a>(headers: &'a Headers, name: &str) -> Result<&'a str, AssertionError> {
    let value = headers.get(name).ok_or_else(|| AssertionError::MissingHeader {
        name: name.to_string(),
    })?;
    if value.is_empty() {
        return Err(AssertionError::EmptyHeader {
            name: name.to_string(),
        });
    }
    Ok(value)
}

/// Parses and bounds-checks the `revision` header; absent means 0.
pub fn check_revision(headers: &Headers) -> Result<u64, AssertionError> {
    let revision = check_integer(headers, "revision", 0)?;
    if revision < 0 {
        return Err(AssertionError::NegativeRevision { revision });
    }
    Ok(revision as u64)
}

/// Checks one primary-key header for `assert_type`: present, non-empty and
/// free of `/`, returning its value.
pub fn check_primary_key<'a>(
    headers: &'a Headers,
    assert_type: &AssertionType,
    name: &'static str,
) -> Result<&'a str, AssertionError> {
    let value = headers.get(name).ok_or(AssertionError::MissingPrimaryKey {
        assert_type: assert_type.name(),
        name,
    })?;
    if value.is_empty() {
        return Err(AssertionError::EmptyPrimaryKey {
            assert_type: assert_type.name(),
            name,
        });
    }
    if value.contains('/') {
        return Err(AssertionError::InvalidPrimaryKey {
            assert_type: assert_type.name(),
            name,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types;

    fn headers(pairs: &[(&str, &str)]) -> Headers {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn check_integer_defaults_when_absent() {
        assert_eq!(check_integer(&Headers::new(), "body-length", 0).unwrap(), 0);
        assert_eq!(check_integer(&Headers::new(), "revision", 7).unwrap(), 7);
    }

    #[test]
    fn check_integer_parses_base_10() {
        let h = headers(&[("body-length", "42")]);
        assert_eq!(check_integer(&h, "body-length", 0).unwrap(), 42);
    }

    #[test]
    fn check_integer_rejects_non_integers() {
        for value in ["", "1.5", "0x10", "ten"] {
            let h = headers(&[("revision", value)]);
            let err = check_integer(&h, "revision", 0).unwrap_err();
            assert!(matches!(err, AssertionError::NotAnInteger { .. }), "{value:?}");
        }
    }

    #[test]
    fn check_not_empty_reports_missing_and_empty() {
        let err = check_not_empty(&Headers::new(), "authority-id").unwrap_err();
        assert_eq!(err.to_string(), "\"authority-id\" header is mandatory");

        let h = headers(&[("authority-id", "")]);
        let err = check_not_empty(&h, "authority-id").unwrap_err();
        assert_eq!(err.to_string(), "\"authority-id\" header should not be empty");
    }

    #[test]
    fn check_revision_accepts_zero_and_positive() {
        assert_eq!(check_revision(&headers(&[("revision", "0")])).unwrap(), 0);
        assert_eq!(check_revision(&headers(&[("revision", "12")])).unwrap(), 12);
        assert_eq!(check_revision(&Headers::new()).unwrap(), 0);
    }

    #[test]
    fn check_revision_rejects_negative() {
        let err = check_revision(&headers(&[("revision", "-3")])).unwrap_err();
        assert_eq!(err.to_string(), "revision should be positive: -3");
    }

    #[test]
    fn check_primary_key_covers_all_failure_modes() {
        let account = types::lookup("account").unwrap();

        let err = check_primary_key(&Headers::new(), account, "account-id").unwrap_err();
        assert!(matches!(err, AssertionError::MissingPrimaryKey { .. }));

        let h = headers(&[("account-id", "")]);
        let err = check_primary_key(&h, account, "account-id").unwrap_err();
        assert!(matches!(err, AssertionError::EmptyPrimaryKey { .. }));

        let h = headers(&[("account-id", "acme/evil")]);
        let err = check_primary_key(&h, account, "account-id").unwrap_err();
        assert!(matches!(err, AssertionError::InvalidPrimaryKey { .. }));

        let h = headers(&[("account-id", "acme")]);
        assert_eq!(check_primary_key(&h, account, "account-id").unwrap(), "acme");
    }
}
