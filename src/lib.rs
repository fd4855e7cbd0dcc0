/// License Detector
///
/// Finds the license files of a module, classifies their text against a
/// catalog of known licenses, and decides whether the module and each of its
/// packages may be redistributed.
pub mod classifier;
pub mod cli;
pub mod config;
pub mod detector;
pub mod discovery;
pub mod error;
pub mod exceptions;
pub mod logging;
pub mod policy;
pub mod tree;

pub use classifier::{Classifier, LicenseType, TypeSet};
pub use config::{Config, ConfigBuilder};
pub use detector::{Detector, License, LicenseMetadata, PackageInfo};
pub use error::{Error, Result};
pub use policy::Policy;
pub use tree::{DirTree, FileTree, MemTree};
