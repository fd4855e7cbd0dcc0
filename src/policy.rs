//! Deciding whether a set of license types permits redistribution.

use std::collections::BTreeSet;

use crate::classifier::LicenseType;

/// License types that permit a hosting service to redistribute source.
pub const REDISTRIBUTABLE_TYPES: &[LicenseType] = &[
    // OSI approved.
    LicenseType::Afl30,
    LicenseType::Agpl30,
    LicenseType::Apache20,
    LicenseType::Artistic20,
    LicenseType::BlueOak100,
    LicenseType::Bsd0,
    LicenseType::Bsd1Clause,
    LicenseType::Bsd2Clause,
    LicenseType::Bsd2ClausePatent,
    LicenseType::Bsd3Clause,
    LicenseType::Bsl10,
    LicenseType::Cc010,
    LicenseType::Epl20,
    LicenseType::Eupl12,
    LicenseType::Gpl20,
    LicenseType::Gpl30,
    LicenseType::Isc,
    LicenseType::Lgpl21,
    LicenseType::Lgpl30,
    LicenseType::Mit,
    LicenseType::Mit0,
    LicenseType::Mpl20,
    LicenseType::Ncsa,
    LicenseType::OpenSsl,
    LicenseType::PostgreSql,
    LicenseType::Unlicense,
    LicenseType::Upl10,
    LicenseType::Zlib,
    // Not OSI approved, but permit redistribution.
    LicenseType::CcBy30,
    LicenseType::CcBy40,
    LicenseType::CcBySa40,
    LicenseType::Json,
    LicenseType::Python20,
    LicenseType::UnicodeDfs2016,
    LicenseType::X11,
];

/// Detected types that are not licenses of their own, such as patent
/// grants that accompany a license.
pub const IGNORABLE_TYPES: &[LicenseType] = &[
    LicenseType::GooglePatentClause,
    LicenseType::GooglePatentsFile,
];

#[derive(Debug, Clone)]
pub struct Policy {
    allowed: BTreeSet<LicenseType>,
    ignorable: BTreeSet<LicenseType>,
}

impl Policy {
    pub fn new(
        allowed: impl IntoIterator<Item = LicenseType>,
        ignorable: impl IntoIterator<Item = LicenseType>,
    ) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
            ignorable: ignorable.into_iter().collect(),
        }
    }

    pub fn is_allowed(&self, license_type: &LicenseType) -> bool {
        self.allowed.contains(license_type)
    }

    pub fn is_ignorable(&self, license_type: &LicenseType) -> bool {
        self.ignorable.contains(license_type)
    }

    /// Reports whether `types` together permit redistribution. One
    /// disqualifying type fails the whole set, and a set with no qualifying
    /// type fails too.
    pub fn is_redistributable<'a>(&self, types: impl IntoIterator<Item = &'a LicenseType>) -> bool {
        let mut qualified = false;
        for license_type in types {
            if self.is_ignorable(license_type) {
                continue;
            }
            if !self.is_allowed(license_type) {
                return false;
            }
            qualified = true;
        }
        qualified
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::new(
            REDISTRIBUTABLE_TYPES.iter().cloned(),
            IGNORABLE_TYPES.iter().cloned(),
        )
    }
}
