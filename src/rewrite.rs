//! Rewriting internal references in the main document to catalogue lookups.

use crate::catalogue::normalize_reference_path;

/// Runtime accessor embedded in every rewritten reference. Resolving it is the
/// responsibility of the AppCache consumer, not this crate.
pub const RUNTIME_ACCESSOR: &str = "LSW.App.instance.getAppCacheDataURL";

/// Catalogue indirection path for a reference, e.g. `#/assets/img/x.png`.
pub fn asset_indirection_path(reference: &str) -> String {
    format!("#/assets/{}", normalize_reference_path(reference))
}

/// Template expression substituted for one rewritten reference.
pub fn accessor_expression(reference: &str) -> String {
    format!("${{{}('{}')}}", RUNTIME_ACCESSOR, asset_indirection_path(reference))
}

/// Replace each reference's first remaining occurrence in the document text
/// with its accessor expression.
///
/// This is a literal substring rewrite, one occurrence per list entry: a
/// reference listed twice rewrites two occurrences, and a reference string
/// that also appears inside unrelated text can be corrupted. Both behaviors
/// are deliberate; a DOM-aware rewrite would change observable output.
pub fn rewrite_document(html: String, references: &[String]) -> String {
    let mut main = html;
    for reference in references {
        let expression = accessor_expression(reference);
        main = main.replacen(reference.as_str(), &expression, 1);
    }
    main
}
