pub mod bundle;
pub mod error;
pub mod flash;
pub mod manifest;

pub use bundle::{build_manifest, write_bundle, write_bundle_to, BundleOptions, PartitionImage};
pub use error::BundleError;
pub use flash::{FlashLayout, PartitionKind};
pub use manifest::{Manifest, PartitionEntry};
