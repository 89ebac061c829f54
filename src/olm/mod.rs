pub mod builder;
pub mod error;
pub mod package_manifest;

pub use builder::{PackageManifestBuilder, Presence};
pub use error::PackageManifestError;
pub use package_manifest::PackageManifest;
