//! The static registry of known assertion types.

use std::fmt;

use crate::assertion::{
    Account, AccountKey, Assertion, AssertionBase, Model, Serial, SnapBuild, SnapDeclaration,
    SnapRevision,
};
use crate::errors::AssertionError;

/// Describes a known assertion type: its name, the ordered header names
/// that constitute its unique primary key, and the assembler that promotes
/// a validated base record into the typed variant.
///
/// All descriptors are static; the registry is fixed at compile time and
/// freely shareable across threads. Descriptors cannot be constructed
/// outside this crate, so holding a `&'static AssertionType` implies the
/// type is registered.
pub struct AssertionType {
    name: &'static str,
    primary_key: &'static [&'static str],
    assembler: fn(AssertionBase) -> Result<Assertion, AssertionError>,
}

impl AssertionType {
    /// Name of the type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Names of the headers that constitute the primary key, in order.
    pub fn primary_key(&self) -> &'static [&'static str] {
        self.primary_key
    }

    pub(crate) fn assemble(&self, base: AssertionBase) -> Result<Assertion, AssertionError> {
        (self.assembler)(base)
    }
}

impl fmt::Debug for AssertionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssertionType({})", self.name)
    }
}

impl PartialEq for AssertionType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for AssertionType {}

/// The `account` assertion type.
pub static ACCOUNT: AssertionType = AssertionType {
    name: "account",
    primary_key: &["account-id"],
    assembler: Account::assemble,
};

/// The `account-key` assertion type.
pub static ACCOUNT_KEY: AssertionType = AssertionType {
    name: "account-key",
    primary_key: &["account-id", "public-key-id"],
    assembler: AccountKey::assemble,
};

/// The `model` assertion type.
pub static MODEL: AssertionType = AssertionType {
    name: "model",
    primary_key: &["series", "brand-id", "model"],
    assembler: Model::assemble,
};

/// The `serial` assertion type.
pub static SERIAL: AssertionType = AssertionType {
    name: "serial",
    primary_key: &["brand-id", "model", "serial"],
    assembler: Serial::assemble,
};

/// The `snap-declaration` assertion type.
pub static SNAP_DECLARATION: AssertionType = AssertionType {
    name: "snap-declaration",
    primary_key: &["series", "snap-id"],
    assembler: SnapDeclaration::assemble,
};

/// The `snap-build` assertion type.
pub static SNAP_BUILD: AssertionType = AssertionType {
    name: "snap-build",
    primary_key: &["series", "snap-id", "snap-digest"],
    assembler: SnapBuild::assemble,
};

/// The `snap-revision` assertion type.
pub static SNAP_REVISION: AssertionType = AssertionType {
    name: "snap-revision",
    primary_key: &["series", "snap-id", "snap-digest"],
    assembler: SnapRevision::assemble,
};

static TYPES: &[&AssertionType] = &[
    &ACCOUNT,
    &ACCOUNT_KEY,
    &MODEL,
    &SERIAL,
    &SNAP_DECLARATION,
    &SNAP_BUILD,
    &SNAP_REVISION,
];

/// Returns the [`AssertionType`] registered under `name`, if any.
pub fn lookup(name: &str) -> Option<&'static AssertionType> {
    TYPES.iter().copied().find(|t| t.name == name)
}
