use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! license_types {
    ($($variant:ident => $id:literal,)*) => {
        /// A canonical license type identifier.
        ///
        /// Identifiers outside the known set parse to [`LicenseType::Other`],
        /// which no policy list contains.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum LicenseType {
            $($variant,)*
            /// Text that could not be classified.
            Unknown,
            Other(String),
        }

        impl LicenseType {
            pub fn as_str(&self) -> &str {
                match self {
                    $(LicenseType::$variant => $id,)*
                    LicenseType::Unknown => "UNKNOWN",
                    LicenseType::Other(id) => id,
                }
            }
        }

        impl From<&str> for LicenseType {
            fn from(id: &str) -> Self {
                match id {
                    $($id => LicenseType::$variant,)*
                    "UNKNOWN" => LicenseType::Unknown,
                    other => LicenseType::Other(other.to_string()),
                }
            }
        }
    };
}

license_types! {
    Afl30 => "AFL-3.0",
    Agpl30 => "AGPL-3.0",
    Apache20 => "Apache-2.0",
    Artistic20 => "Artistic-2.0",
    BlueOak100 => "BlueOak-1.0.0",
    Bsd0 => "0BSD",
    Bsd1Clause => "BSD-1-Clause",
    Bsd2Clause => "BSD-2-Clause",
    Bsd2ClausePatent => "BSD-2-Clause-Patent",
    Bsd3Clause => "BSD-3-Clause",
    Bsl10 => "BSL-1.0",
    CcBy30 => "CC-BY-3.0",
    CcBy40 => "CC-BY-4.0",
    CcBySa40 => "CC-BY-SA-4.0",
    CcByNc40 => "CC-BY-NC-4.0",
    Cc010 => "CC0-1.0",
    CommonsClause => "Commons-Clause",
    Epl20 => "EPL-2.0",
    Eupl12 => "EUPL-1.2",
    Gpl20 => "GPL-2.0",
    Gpl30 => "GPL-3.0",
    Isc => "ISC",
    Json => "JSON",
    Lgpl21 => "LGPL-2.1",
    Lgpl30 => "LGPL-3.0",
    Mit => "MIT",
    Mit0 => "MIT-0",
    Mpl20 => "MPL-2.0",
    Ncsa => "NCSA",
    OpenSsl => "OpenSSL",
    PostgreSql => "PostgreSQL",
    Python20 => "Python-2.0",
    UnicodeDfs2016 => "Unicode-DFS-2016",
    Unlicense => "Unlicense",
    Upl10 => "UPL-1.0",
    X11 => "X11",
    Zlib => "Zlib",
    GooglePatentClause => "GooglePatentClause",
    GooglePatentsFile => "GooglePatentsFile",
}

impl LicenseType {
    pub fn is_unknown(&self) -> bool {
        matches!(self, LicenseType::Unknown)
    }
}

impl From<String> for LicenseType {
    fn from(id: String) -> Self {
        LicenseType::from(id.as_str())
    }
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LicenseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LicenseType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        Ok(LicenseType::from(id))
    }
}

/// The set of license types a single file expresses.
pub type TypeSet = BTreeSet<LicenseType>;

/// The fail-closed classification result.
pub fn unknown_set() -> TypeSet {
    BTreeSet::from([LicenseType::Unknown])
}
