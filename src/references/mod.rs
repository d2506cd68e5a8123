//! Discovery and filtering of resource references inside an HTML document.
//!
//! Extraction and filtering are deliberately separate submodules: extraction
//! only reads the parsed document and preserves markup order and duplicates,
//! while filtering decides which of the discovered references can be resolved
//! against the filesystem at all.

mod extraction;
mod filters;

pub use extraction::{document_summary, document_title, extract_resource_map};
pub use filters::{PartitionedReferences, is_external_reference, partition_references};
