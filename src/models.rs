//! Data structures describing the AppCache archive and the discovered references.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalogue::AssetCatalogue;

/// Schema identifier stamped into every archive's metadata.
pub const ARCHIVE_SCHEMA_TYPE: &str = "lsw://schemas@LSW/62B6DF144A2A7B65A2CA4BE37C779E372B0D5EBDD0EDC35A58D2F7D0553D3568C54C431EC84D576BC0678466060F1BF5F19E93D4C994754D2A8ADCA61383A869/AppCacheSchema";

/// License tag stamped into every archive's contents.
pub const ARCHIVE_LICENSE: &str = "ISC";

/// Resource references discovered in one HTML document, grouped by category.
///
/// Order and duplicates are preserved exactly as they appear in the markup;
/// downstream stages are responsible for trimming and filtering.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResourceMap {
  /// `src` attributes of `<script>` elements.
  pub scripts: Vec<String>,
  /// `src` attributes of `<img>` elements.
  pub images: Vec<String>,
  /// `href` attributes of `<link rel="stylesheet">` elements.
  pub stylesheets: Vec<String>,
  /// `href` attributes of `<link rel="import">` elements.
  pub imports: Vec<String>,
  /// `href` attributes of `<link rel="preload">` elements.
  pub preloads: Vec<String>,
  /// Touch icons, favicons and Microsoft tile images.
  pub icons: Vec<String>,
  /// `href` attributes of `<a>` elements.
  pub links: Vec<String>,
  /// Browser config, humans file and web manifest references.
  pub misc: Vec<String>,
}

impl ResourceMap {
  /// Categories paired with their references, in the fixed archive order.
  pub fn categories(&self) -> [(&'static str, &[String]); 8] {
    [
      ("scripts", self.scripts.as_slice()),
      ("images", self.images.as_slice()),
      ("stylesheets", self.stylesheets.as_slice()),
      ("imports", self.imports.as_slice()),
      ("preloads", self.preloads.as_slice()),
      ("icons", self.icons.as_slice()),
      ("links", self.links.as_slice()),
      ("misc", self.misc.as_slice()),
    ]
  }

  /// Flatten every category into one ordered reference list.
  pub fn flatten(&self) -> Vec<String> {
    self
      .categories()
      .iter()
      .flat_map(|(_, references)| references.iter().cloned())
      .collect()
  }

  /// Total number of references across all categories.
  pub fn len(&self) -> usize {
    self
      .categories()
      .iter()
      .map(|(_, references)| references.len())
      .sum()
  }

  /// Returns `true` when no category holds any reference.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Metadata block of the serialized archive.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveMetadata {
  /// Hardcoded schema identifier for AppCache archives.
  #[serde(rename = "type")]
  pub schema_type: String,
  /// Document title taken from `<title>`.
  pub title: String,
  /// Document summary taken from `<meta name="description">`.
  pub summary: String,
  /// Permissions placeholder, always empty.
  pub permissions: BTreeMap<String, serde_json::Value>,
}

/// Contents block of the serialized archive.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveContents {
  /// The rewritten main HTML document.
  pub main: String,
  /// Configuration placeholder, always empty.
  pub config: BTreeMap<String, serde_json::Value>,
  /// Nested catalogue of inlined asset contents.
  pub assets: AssetCatalogue,
  /// Readme placeholder, always empty.
  pub readme: String,
  /// License tag, always `"ISC"`.
  pub license: String,
}

/// The terminal archive artifact written to disk as a single JSON document.
#[derive(Debug, Clone, Serialize)]
pub struct Archive {
  /// Archive metadata.
  pub metadata: ArchiveMetadata,
  /// Archive contents.
  pub contents: ArchiveContents,
}

impl Archive {
  /// Assemble an archive from the pipeline outputs.
  pub fn new(title: String, summary: String, main: String, assets: AssetCatalogue) -> Self {
    Self {
      metadata: ArchiveMetadata {
        schema_type: ARCHIVE_SCHEMA_TYPE.to_string(),
        title,
        summary,
        permissions: BTreeMap::new(),
      },
      contents: ArchiveContents {
        main,
        config: BTreeMap::new(),
        assets,
        readme: String::new(),
        license: ARCHIVE_LICENSE.to_string(),
      },
    }
  }

  /// Serialize the archive as a single JSON document.
  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string(self)
  }
}
