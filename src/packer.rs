//! Sequential packing pipeline turning one HTML document into an AppCache archive.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::catalogue::{AssetCatalogue, normalize_reference_path};
use crate::encoding::encode_asset;
use crate::models::Archive;
use crate::references::{
  document_summary, document_title, extract_resource_map, partition_references,
};
use crate::rewrite::{asset_indirection_path, rewrite_document};

/// Packs a single-page HTML application and its local assets into an archive.
///
/// The pipeline runs strictly sequentially: extraction, filtering, per-asset
/// resolution and encoding, catalogue insertion, document rewriting, archive
/// assembly. Only the input document read, parse and output write are fatal;
/// every per-asset failure is reported and skipped.
pub struct AppCachePacker {
  base_dir: PathBuf,
}

impl AppCachePacker {
  /// Create a packer resolving asset references against the given directory.
  pub fn new(base_dir: impl Into<PathBuf>) -> Self {
    Self {
      base_dir: base_dir.into(),
    }
  }

  /// Pack the HTML document at `input` and write the serialized archive to `output`.
  pub fn pack_file(&self, input: &Path, output: &Path) -> Result<()> {
    println!("Packing {} into {}...", input.display(), output.display());

    let html = fs::read_to_string(input)
      .with_context(|| format!("failed to read input document {}", input.display()))?;

    let archive = self.pack_html(&html)?;
    let json = archive
      .to_json()
      .context("failed to serialize the archive")?;

    println!("Writing AppCache to file {}", output.display());
    fs::write(output, json)
      .with_context(|| format!("failed to write archive to {}", output.display()))?;
    println!("- Done.");

    Ok(())
  }

  /// Run the full pipeline over an in-memory HTML document.
  pub fn pack_html(&self, html: &str) -> Result<Archive> {
    let dom = tl::parse(html, tl::ParserOptions::default())
      .map_err(|err| anyhow::anyhow!("failed to parse the input document: {err}"))?;

    println!("Processing HTML URLs");
    let resource_map = extract_resource_map(&dom);
    println!("- Discovered a total of {} URLs", resource_map.len());
    for (category, references) in resource_map.categories() {
      println!("-- {category}:");
      for reference in references {
        println!("--- {reference}");
      }
    }

    let partitioned = partition_references(&resource_map);
    println!(
      "- Of which, {} are viable asset URLs",
      partitioned.internal.len()
    );
    for reference in &partitioned.internal {
      println!("-- {reference}");
    }
    println!("- Done.");

    println!("Generating the assets catalogue:");
    let mut catalogue = AssetCatalogue::default();
    let mut rewritable = Vec::new();
    for reference in &partitioned.internal {
      println!("- Processing URL: {reference}");
      let asset_path = normalize_reference_path(reference);
      let candidate = self.base_dir.join(&asset_path);
      match read_and_encode(&candidate) {
        Ok(contents) => {
          catalogue.insert(&asset_path, contents);
          rewritable.push(reference.clone());
        }
        Err(err) => {
          eprintln!(
            "-- Unable to process asset URL \"{}\" via local path \"{}\": {:#}",
            reference,
            candidate.display(),
            err
          );
        }
      }
    }
    println!("- Done.");

    println!("Generating the main:");
    println!("- Resolving internal URLs to asset URLs:");
    for reference in &rewritable {
      println!("-- Processing URL: {reference}");
      println!("--- Resolved to: {}", asset_indirection_path(reference));
    }
    let main = rewrite_document(html.to_string(), &rewritable);
    println!("- Done.");

    let title = document_title(&dom);
    let summary = document_summary(&dom);

    Ok(Archive::new(title, summary, main, catalogue))
  }
}

fn read_and_encode(candidate: &Path) -> Result<String> {
  let resolved = fs::canonicalize(candidate)
    .with_context(|| format!("failed to resolve {}", candidate.display()))?;
  let data =
    fs::read(&resolved).with_context(|| format!("failed to read {}", resolved.display()))?;
  Ok(encode_asset(&resolved, &data))
}
