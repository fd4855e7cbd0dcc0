//! The built-in license text catalog.

macro_rules! catalog {
    ($($id:literal,)*) => {
        /// Catalog identifier and full text of every bundled license.
        pub const BUILTIN_TEXTS: &[(&str, &str)] = &[
            $(($id, include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/license-rules/texts/", $id, ".txt"))),)*
        ];
    };
}

catalog! {
    "0BSD",
    "AGPL-3.0",
    "AGPL-3.0-Header",
    "Apache-2.0",
    "Apache-2.0-Header",
    "Artistic-2.0",
    "BSD-2-Clause",
    "BSD-2-Clause-Patent",
    "BSD-3-Clause",
    "BSL-1.0",
    "BlueOak-1.0.0",
    "CC-BY-SA-4.0",
    "CC0-1.0",
    "Commons-Clause",
    "GPL-2.0",
    "GPL-2.0-Appendix",
    "GPL-2.0-Header",
    "GPL-3.0",
    "GPL-3.0-Appendix",
    "GPL-3.0-Header",
    "GooglePatentsFile",
    "ISC",
    "LGPL-2.1",
    "LGPL-2.1-Appendix",
    "LGPL-3.0",
    "LGPL-3.0-Header",
    "MIT",
    "MIT-0",
    "MPL-2.0",
    "MPL-2.0-Header",
    "NCSA",
    "PostgreSQL",
    "UPL-1.0",
    "Unicode-DFS-2016",
    "Unlicense",
    "X11",
    "Zlib",
}

/// Catalog identifiers that stand for another license type. Header notices
/// and "how to apply" appendices resolve to the license they belong to.
pub const CANONICAL_TYPES: &[(&str, &[&str])] = &[
    ("AGPL-3.0-Header", &["AGPL-3.0"]),
    ("Apache-2.0-Header", &["Apache-2.0"]),
    ("GPL-2.0-Appendix", &["GPL-2.0"]),
    ("GPL-2.0-Header", &["GPL-2.0"]),
    ("GPL-3.0-Appendix", &["GPL-3.0"]),
    ("GPL-3.0-Header", &["GPL-3.0"]),
    ("LGPL-2.1-Appendix", &["LGPL-2.1"]),
    ("LGPL-3.0-Header", &["LGPL-3.0"]),
    ("MPL-2.0-Header", &["MPL-2.0"]),
];
