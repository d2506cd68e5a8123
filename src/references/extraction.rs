//! Category-tagged reference extraction from a parsed HTML document.

use tl::VDom;

use crate::models::ResourceMap;

/// The eight reference categories recognised in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Scripts,
    Images,
    Stylesheets,
    Imports,
    Preloads,
    Icons,
    Links,
    Misc,
}

/// One extraction rule: elements with `tag` (optionally gated on an attribute
/// holding an exact value) contribute their `source` attribute to `category`.
struct ExtractionRule {
    category: Category,
    tag: &'static str,
    gate: Option<(&'static str, &'static str)>,
    source: &'static str,
}

/// Extraction table consumed by the generic scan below. Rules for the same
/// category run in the listed order, so composite categories (icons, misc)
/// concatenate their sub-selections deterministically.
const EXTRACTION_RULES: &[ExtractionRule] = &[
    ExtractionRule {
        category: Category::Scripts,
        tag: "script",
        gate: None,
        source: "src",
    },
    ExtractionRule {
        category: Category::Images,
        tag: "img",
        gate: None,
        source: "src",
    },
    ExtractionRule {
        category: Category::Stylesheets,
        tag: "link",
        gate: Some(("rel", "stylesheet")),
        source: "href",
    },
    ExtractionRule {
        category: Category::Imports,
        tag: "link",
        gate: Some(("rel", "import")),
        source: "href",
    },
    ExtractionRule {
        category: Category::Preloads,
        tag: "link",
        gate: Some(("rel", "preload")),
        source: "href",
    },
    ExtractionRule {
        category: Category::Icons,
        tag: "link",
        gate: Some(("rel", "apple-touch-icon")),
        source: "href",
    },
    ExtractionRule {
        category: Category::Icons,
        tag: "link",
        gate: Some(("rel", "icon")),
        source: "href",
    },
    ExtractionRule {
        category: Category::Icons,
        tag: "meta",
        gate: Some(("name", "msapplication-square150x150logo")),
        source: "content",
    },
    ExtractionRule {
        category: Category::Icons,
        tag: "meta",
        gate: Some(("name", "msapplication-square310x310logo")),
        source: "content",
    },
    ExtractionRule {
        category: Category::Icons,
        tag: "meta",
        gate: Some(("name", "msapplication-square70x70logo")),
        source: "content",
    },
    ExtractionRule {
        category: Category::Icons,
        tag: "meta",
        gate: Some(("name", "msapplication-wide310x150logo")),
        source: "content",
    },
    ExtractionRule {
        category: Category::Icons,
        tag: "meta",
        gate: Some(("name", "msapplication-TileImage")),
        source: "content",
    },
    ExtractionRule {
        category: Category::Links,
        tag: "a",
        gate: None,
        source: "href",
    },
    ExtractionRule {
        category: Category::Misc,
        tag: "meta",
        gate: Some(("name", "msapplication-config")),
        source: "content",
    },
    ExtractionRule {
        category: Category::Misc,
        tag: "link",
        gate: Some(("rel", "author")),
        source: "href",
    },
    ExtractionRule {
        category: Category::Misc,
        tag: "link",
        gate: Some(("rel", "manifest")),
        source: "href",
    },
];

/// Extract every category-tagged resource reference from the parsed document.
///
/// References appear in document order within each rule, duplicates included;
/// empty and missing source attributes are dropped.
pub fn extract_resource_map(dom: &VDom) -> ResourceMap {
    let mut map = ResourceMap::default();

    for rule in EXTRACTION_RULES {
        let references = collect_rule_matches(dom, rule);
        let bucket = match rule.category {
            Category::Scripts => &mut map.scripts,
            Category::Images => &mut map.images,
            Category::Stylesheets => &mut map.stylesheets,
            Category::Imports => &mut map.imports,
            Category::Preloads => &mut map.preloads,
            Category::Icons => &mut map.icons,
            Category::Links => &mut map.links,
            Category::Misc => &mut map.misc,
        };
        bucket.extend(references);
    }

    map
}

/// Text of the first `<title>` element, or an empty string when absent.
pub fn document_title(dom: &VDom) -> String {
    let parser = dom.parser();
    for node in dom.nodes() {
        if let Some(tag) = node.as_tag() {
            if tag.name().as_utf8_str().eq_ignore_ascii_case("title") {
                return tag.inner_text(parser).into_owned();
            }
        }
    }
    String::new()
}

/// `content` attribute of the first `<meta name="description">` element, or an
/// empty string when absent.
pub fn document_summary(dom: &VDom) -> String {
    for node in dom.nodes() {
        if let Some(tag) = node.as_tag() {
            if !tag.name().as_utf8_str().eq_ignore_ascii_case("meta") {
                continue;
            }
            if attribute_value(tag, "name").as_deref() == Some("description") {
                return attribute_value(tag, "content").unwrap_or_default();
            }
        }
    }
    String::new()
}

fn collect_rule_matches(dom: &VDom, rule: &ExtractionRule) -> Vec<String> {
    let mut references = Vec::new();

    for node in dom.nodes() {
        let Some(tag) = node.as_tag() else {
            continue;
        };
        if !tag.name().as_utf8_str().eq_ignore_ascii_case(rule.tag) {
            continue;
        }
        if let Some((attribute, expected)) = rule.gate {
            if attribute_value(tag, attribute).as_deref() != Some(expected) {
                continue;
            }
        }
        let Some(value) = attribute_value(tag, rule.source) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        references.push(value);
    }

    references
}

fn attribute_value(tag: &tl::HTMLTag, name: &str) -> Option<String> {
    for (key, value) in tag.attributes().iter() {
        let key_str: &str = key.as_ref();
        if key_str.eq_ignore_ascii_case(name) {
            return value.map(|value| value.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> VDom<'_> {
        tl::parse(html, tl::ParserOptions::default()).unwrap()
    }

    #[test]
    fn extracts_each_category_from_its_selector() {
        let dom = parse(concat!(
            r#"<script src="app.js"></script>"#,
            r#"<img src="logo.png">"#,
            r#"<link rel="stylesheet" href="main.css">"#,
            r#"<link rel="import" href="part.html">"#,
            r#"<link rel="preload" href="font.woff2">"#,
            r#"<link rel="icon" href="favicon.ico">"#,
            r#"<a href="about.html">about</a>"#,
            r#"<link rel="manifest" href="site.webmanifest">"#,
        ));
        let map = extract_resource_map(&dom);

        assert_eq!(map.scripts, vec!["app.js"]);
        assert_eq!(map.images, vec!["logo.png"]);
        assert_eq!(map.stylesheets, vec!["main.css"]);
        assert_eq!(map.imports, vec!["part.html"]);
        assert_eq!(map.preloads, vec!["font.woff2"]);
        assert_eq!(map.icons, vec!["favicon.ico"]);
        assert_eq!(map.links, vec!["about.html"]);
        assert_eq!(map.misc, vec!["site.webmanifest"]);
    }

    #[test]
    fn ungated_links_never_leak_into_gated_categories() {
        let dom = parse(r#"<link rel="dns-prefetch" href="other.html"><link href="bare.css">"#);
        let map = extract_resource_map(&dom);
        assert!(map.is_empty());
    }

    #[test]
    fn preserves_order_and_duplicates() {
        let dom = parse(r#"<img src="a.png"><img src="b.png"><img src="a.png">"#);
        let map = extract_resource_map(&dom);
        assert_eq!(map.images, vec!["a.png", "b.png", "a.png"]);
    }

    #[test]
    fn drops_missing_and_empty_attribute_values() {
        let dom = parse(r#"<script></script><script src=""></script><img alt="no src">"#);
        let map = extract_resource_map(&dom);
        assert!(map.scripts.is_empty());
        assert!(map.images.is_empty());
    }

    #[test]
    fn icons_concatenate_link_and_tile_meta_variants() {
        let dom = parse(concat!(
            r#"<meta name="msapplication-TileImage" content="tile.png">"#,
            r#"<link rel="apple-touch-icon" href="touch.png">"#,
            r#"<link rel="icon" href="favicon.ico">"#,
        ));
        let map = extract_resource_map(&dom);
        // Link variants come before tile metas regardless of markup order.
        assert_eq!(map.icons, vec!["touch.png", "favicon.ico", "tile.png"]);
    }

    #[test]
    fn reads_title_text_and_description_content() {
        let dom = parse(concat!(
            r#"<head><title>T</title>"#,
            r#"<meta name="description" content="S"></head>"#,
        ));
        assert_eq!(document_title(&dom), "T");
        assert_eq!(document_summary(&dom), "S");
    }

    #[test]
    fn missing_title_and_description_yield_empty_strings() {
        let dom = parse("<body></body>");
        assert_eq!(document_title(&dom), "");
        assert_eq!(document_summary(&dom), "");
    }
}
