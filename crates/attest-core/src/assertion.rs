//! The assertion value type, its typed variants and assembly.

use attest_grammar::Headers;

use crate::errors::AssertionError;
use crate::types::{self, AssertionType};
use crate::validate::{check_integer, check_not_empty, check_primary_key, check_revision};

/// Shared representation data behind every typed assertion.
///
/// Immutable once assembled: the signed content bytes, the signature and
/// the parsed headers never change for the lifetime of the value.
#[derive(Debug, Clone)]
pub struct AssertionBase {
    assert_type: &'static AssertionType,
    headers: Headers,
    body: Option<Vec<u8>>,
    revision: u64,
    content: Vec<u8>,
    signature: Vec<u8>,
}

impl AssertionBase {
    pub(crate) fn new(
        assert_type: &'static AssertionType,
        headers: Headers,
        body: Option<Vec<u8>>,
        revision: u64,
        content: Vec<u8>,
        signature: Vec<u8>,
    ) -> Self {
        Self {
            assert_type,
            headers,
            body,
            revision,
            content,
            signature,
        }
    }

    /// The assertion type.
    pub fn assert_type(&self) -> &'static AssertionType {
        self.assert_type
    }

    /// The assertion revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The authority that signed this assertion.
    pub fn authority_id(&self) -> &str {
        self.header("authority-id").unwrap_or("")
    }

    /// The value of the header with `name`, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// The complete headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The body of this assertion, absent when empty.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// The signed content and its unprocessed signature.
    pub fn signature(&self) -> (&[u8], &[u8]) {
        (&self.content, &self.signature)
    }
}

macro_rules! assertion_variant {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            base: AssertionBase,
        }

        impl $name {
            pub(crate) fn assemble(base: AssertionBase) -> Result<Assertion, AssertionError> {
                Ok(Assertion::$name($name { base }))
            }
        }

        impl std::ops::Deref for $name {
            type Target = AssertionBase;

            fn deref(&self) -> &AssertionBase {
                &self.base
            }
        }
    };
}

assertion_variant!(
    /// `account`: the existence and identity of an account.
    Account
);

impl Account {
    /// The account identifier.
    pub fn account_id(&self) -> &str {
        self.header("account-id").unwrap_or("")
    }
}

assertion_variant!(
    /// `account-key`: a public key belonging to an account.
    AccountKey
);

impl AccountKey {
    /// The identifier of the owning account.
    pub fn account_id(&self) -> &str {
        self.header("account-id").unwrap_or("")
    }

    /// The identifier of the public key.
    pub fn public_key_id(&self) -> &str {
        self.header("public-key-id").unwrap_or("")
    }
}

assertion_variant!(
    /// `model`: a device model description.
    Model
);

impl Model {
    /// The series the model belongs to.
    pub fn series(&self) -> &str {
        self.header("series").unwrap_or("")
    }

    /// The brand account identifier.
    pub fn brand_id(&self) -> &str {
        self.header("brand-id").unwrap_or("")
    }

    /// The model name.
    pub fn model(&self) -> &str {
        self.header("model").unwrap_or("")
    }
}

assertion_variant!(
    /// `serial`: the identity of a device instance.
    Serial
);

impl Serial {
    /// The brand account identifier.
    pub fn brand_id(&self) -> &str {
        self.header("brand-id").unwrap_or("")
    }

    /// The model name.
    pub fn model(&self) -> &str {
        self.header("model").unwrap_or("")
    }

    /// The device serial.
    pub fn serial(&self) -> &str {
        self.header("serial").unwrap_or("")
    }
}

assertion_variant!(
    /// `snap-declaration`: the existence and naming of a snap.
    SnapDeclaration
);

impl SnapDeclaration {
    /// The series the declaration applies to.
    pub fn series(&self) -> &str {
        self.header("series").unwrap_or("")
    }

    /// The snap identifier.
    pub fn snap_id(&self) -> &str {
        self.header("snap-id").unwrap_or("")
    }
}

assertion_variant!(
    /// `snap-build`: a builder's statement about a snap build.
    SnapBuild
);

impl SnapBuild {
    /// The series the build applies to.
    pub fn series(&self) -> &str {
        self.header("series").unwrap_or("")
    }

    /// The snap identifier.
    pub fn snap_id(&self) -> &str {
        self.header("snap-id").unwrap_or("")
    }

    /// The digest of the built snap content.
    pub fn snap_digest(&self) -> &str {
        self.header("snap-digest").unwrap_or("")
    }
}

assertion_variant!(
    /// `snap-revision`: a store's statement about a snap upload.
    SnapRevision
);

impl SnapRevision {
    /// The series the revision applies to.
    pub fn series(&self) -> &str {
        self.header("series").unwrap_or("")
    }

    /// The snap identifier.
    pub fn snap_id(&self) -> &str {
        self.header("snap-id").unwrap_or("")
    }

    /// The digest of the uploaded snap content.
    pub fn snap_digest(&self) -> &str {
        self.header("snap-digest").unwrap_or("")
    }
}

/// A signed, typed metadata record.
///
/// One variant per registered assertion type; every variant exposes the
/// base operations (`assert_type`, `revision`, `authority_id`, `header`,
/// `headers`, `body`, `signature`) uniformly.
#[derive(Debug, Clone)]
pub enum Assertion {
    /// An `account` assertion.
    Account(Account),
    /// An `account-key` assertion.
    AccountKey(AccountKey),
    /// A `model` assertion.
    Model(Model),
    /// A `serial` assertion.
    Serial(Serial),
    /// A `snap-declaration` assertion.
    SnapDeclaration(SnapDeclaration),
    /// A `snap-build` assertion.
    SnapBuild(SnapBuild),
    /// A `snap-revision` assertion.
    SnapRevision(SnapRevision),
}

impl Assertion {
    fn base(&self) -> &AssertionBase {
        match self {
            Assertion::Account(a) => &a.base,
            Assertion::AccountKey(a) => &a.base,
            Assertion::Model(a) => &a.base,
            Assertion::Serial(a) => &a.base,
            Assertion::SnapDeclaration(a) => &a.base,
            Assertion::SnapBuild(a) => &a.base,
            Assertion::SnapRevision(a) => &a.base,
        }
    }

    /// The assertion type.
    pub fn assert_type(&self) -> &'static AssertionType {
        self.base().assert_type()
    }

    /// The assertion revision.
    pub fn revision(&self) -> u64 {
        self.base().revision()
    }

    /// The authority that signed this assertion.
    pub fn authority_id(&self) -> &str {
        self.base().authority_id()
    }

    /// The value of the header with `name`, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.base().header(name)
    }

    /// The complete headers.
    pub fn headers(&self) -> &Headers {
        self.base().headers()
    }

    /// The body of this assertion, absent when empty.
    pub fn body(&self) -> Option<&[u8]> {
        self.base().body()
    }

    /// The signed content and its unprocessed signature.
    pub fn signature(&self) -> (&[u8], &[u8]) {
        self.base().signature()
    }
}

/// Assembles an assertion from its components, validating the headers
/// against the mandatory-header, primary-key and integer-header rules.
///
/// `content` must be the exact signed bytes and `signature` the detached
/// signature over them; both are stored as-is.
pub fn assemble(
    headers: Headers,
    body: Option<Vec<u8>>,
    content: Vec<u8>,
    signature: Vec<u8>,
) -> Result<Assertion, AssertionError> {
    let body = body.filter(|b| !b.is_empty());

    let length = check_integer(&headers, "body-length", 0)?;
    let actual = body.as_ref().map_or(0, Vec::len);
    if length != actual as i64 {
        return Err(AssertionError::BodyLengthMismatch {
            actual,
            declared: length,
        });
    }

    check_not_empty(&headers, "authority-id")?;
    let type_name = check_not_empty(&headers, "type")?;
    let assert_type = types::lookup(type_name).ok_or_else(|| AssertionError::UnknownType {
        name: type_name.to_string(),
    })?;

    for name in assert_type.primary_key() {
        check_primary_key(&headers, assert_type, name)?;
    }

    let revision = check_revision(&headers)?;

    if signature.is_empty() {
        return Err(AssertionError::EmptySignature);
    }

    assert_type.assemble(AssertionBase::new(
        assert_type,
        headers,
        body,
        revision,
        content,
        signature,
    ))
}
