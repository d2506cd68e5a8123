//! Hierarchical asset catalogue mirroring the directory structure of inlined assets.

use std::collections::BTreeMap;

use serde::Serialize;

/// One node of the catalogue tree: either an inlined asset or a directory level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CatalogueNode {
    /// Encoded asset contents stored at this path.
    Leaf(String),
    /// Directory level keyed by the next path segment.
    Branch(BTreeMap<String, CatalogueNode>),
}

/// Nested key-value tree of encoded asset contents, keyed by path segment.
///
/// The path from the root to any leaf, joined by `/`, equals the normalized
/// relative path of the asset stored there. Shared directory prefixes share
/// nodes; inserting at an occupied path replaces the previous leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AssetCatalogue {
    root: BTreeMap<String, CatalogueNode>,
}

impl AssetCatalogue {
    /// Insert encoded contents at the given normalized relative path.
    ///
    /// Intermediate segments become branch nodes as needed; a leaf occupying an
    /// intermediate segment is replaced by a branch, and a prior leaf at the
    /// exact path is overwritten (last write wins).
    pub fn insert(&mut self, normalized_path: &str, contents: String) {
        let segments: Vec<&str> = normalized_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        let Some((last, intermediate)) = segments.split_last() else {
            return;
        };

        let mut node = &mut self.root;
        for segment in intermediate {
            let child = node
                .entry((*segment).to_string())
                .or_insert_with(|| CatalogueNode::Branch(BTreeMap::new()));
            if !matches!(child, CatalogueNode::Branch(_)) {
                *child = CatalogueNode::Branch(BTreeMap::new());
            }
            let CatalogueNode::Branch(children) = child else {
                unreachable!("intermediate catalogue nodes are always branches");
            };
            node = children;
        }

        node.insert((*last).to_string(), CatalogueNode::Leaf(contents));
    }

    /// Look up the node stored at a normalized relative path.
    pub fn get(&self, normalized_path: &str) -> Option<&CatalogueNode> {
        let mut segments = normalized_path
            .split('/')
            .filter(|segment| !segment.is_empty());
        let first = segments.next()?;
        let mut node = self.root.get(first)?;
        for segment in segments {
            let CatalogueNode::Branch(children) = node else {
                return None;
            };
            node = children.get(segment)?;
        }
        Some(node)
    }

    /// Returns `true` when no asset has been inserted.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

/// Normalize a reference path: collapse `./` segments, resolve `../` where a
/// parent segment is available, and drop redundant separators.
///
/// Leading `..` segments that cannot be resolved are kept, matching how the
/// path would be interpreted relative to the resolution base directory.
pub fn normalize_reference_path(reference: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in reference.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(&last) if last != "..") {
                    segments.pop();
                } else {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_current_dir_and_duplicate_separators() {
        assert_eq!(normalize_reference_path("./img//x.png"), "img/x.png");
        assert_eq!(normalize_reference_path("a/./b/c.js"), "a/b/c.js");
    }

    #[test]
    fn resolves_parent_segments_where_possible() {
        assert_eq!(normalize_reference_path("a/b/../c.js"), "a/c.js");
        assert_eq!(normalize_reference_path("../shared/x.css"), "../shared/x.css");
        assert_eq!(normalize_reference_path("a/../../x"), "../x");
    }

    #[test]
    fn shared_prefixes_share_branch_nodes() {
        let mut catalogue = AssetCatalogue::default();
        catalogue.insert("a/b/c.js", "first".into());
        catalogue.insert("a/b/d.js", "second".into());

        let CatalogueNode::Branch(a) = catalogue.get("a").unwrap() else {
            panic!("expected branch at a");
        };
        assert_eq!(a.len(), 1);
        assert_eq!(
            catalogue.get("a/b/c.js"),
            Some(&CatalogueNode::Leaf("first".into()))
        );
        assert_eq!(
            catalogue.get("a/b/d.js"),
            Some(&CatalogueNode::Leaf("second".into()))
        );
    }

    #[test]
    fn duplicate_paths_keep_last_contents() {
        let mut catalogue = AssetCatalogue::default();
        catalogue.insert("img/x.png", "old".into());
        catalogue.insert("img/x.png", "new".into());

        assert_eq!(
            catalogue.get("img/x.png"),
            Some(&CatalogueNode::Leaf("new".into()))
        );
    }

    #[test]
    fn serializes_as_nested_objects() {
        let mut catalogue = AssetCatalogue::default();
        catalogue.insert("img/x.png", "data:image/png;base64,AAAA".into());

        let value = serde_json::to_value(&catalogue).unwrap();
        assert_eq!(value["img"]["x.png"], "data:image/png;base64,AAAA");
    }
}
