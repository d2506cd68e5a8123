//! Partitioning discovered references into filesystem-resolvable and external sets.

use regex::Regex;

use crate::models::ResourceMap;

fn external_reference_pattern() -> &'static Regex {
    use std::sync::OnceLock;

    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\w+://").expect("invalid external reference regex"))
}

/// Determine whether a reference is an absolute URL that cannot be resolved
/// against the filesystem.
///
/// Only `scheme://` forms count as external; scheme-prefixed values without
/// the double slash (such as `data:` URIs) pass through as internal and fail
/// filesystem resolution per-asset further down the pipeline.
pub fn is_external_reference(value: &str) -> bool {
    external_reference_pattern().is_match(value)
}

/// References split into internal (resolvable) and external (skipped) sets.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PartitionedReferences {
    /// Trimmed references that should be resolved against the filesystem.
    pub internal: Vec<String>,
    /// Absolute URLs recorded for visibility only.
    pub external: Vec<String>,
}

/// Flatten a resource map and partition its references.
///
/// Values are trimmed and empties dropped before partitioning; order and
/// duplicates of the flattened map are preserved within each set.
pub fn partition_references(map: &ResourceMap) -> PartitionedReferences {
    let mut partitioned = PartitionedReferences::default();

    for reference in map.flatten() {
        let trimmed = reference.trim();
        if trimmed.is_empty() {
            continue;
        }
        if is_external_reference(trimmed) {
            partitioned.external.push(trimmed.to_string());
        } else {
            partitioned.internal.push(trimmed.to_string());
        }
    }

    partitioned
}
