#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod catalogue;
pub mod encoding;
pub mod models;
pub mod packer;
pub mod references;
pub mod rewrite;

pub use catalogue::{AssetCatalogue, CatalogueNode, normalize_reference_path};
pub use models::{Archive, ResourceMap};
pub use packer::AppCachePacker;
pub use references::{PartitionedReferences, partition_references};
