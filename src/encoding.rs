//! Content classification and encoding of resolved assets.
//!
//! Each asset is classified as text or binary from its extension and byte
//! patterns. Text assets are stored verbatim; binary assets become
//! `data:<mime>;base64,<payload>` strings with the MIME type detected from a
//! magic-byte signature table.

use std::path::Path;

use base64::{Engine as _, engine::general_purpose};

/// Two-case classification result for asset contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Contents are stored as verbatim text.
    Text,
    /// Contents are stored as a base64 data URL.
    Binary,
}

/// File extensions always treated as text regardless of byte contents.
const TEXT_EXTENSIONS: &[&str] = &[
    "css", "csv", "htm", "html", "ini", "js", "json", "map", "md", "mjs", "svg", "toml", "txt",
    "webmanifest", "xhtml", "xml", "yaml", "yml",
];

/// File extensions always treated as binary regardless of byte contents.
const BINARY_EXTENSIONS: &[&str] = &[
    "avif", "bin", "bmp", "eot", "flac", "gif", "gz", "ico", "jpeg", "jpg", "mp3", "mp4", "ogg",
    "otf", "pdf", "png", "ttf", "wasm", "webm", "webp", "woff", "woff2", "zip",
];

/// Number of leading bytes inspected when the extension is not decisive.
const SNIFF_WINDOW: usize = 1024;

/// A magic-byte signature: every `(offset, bytes)` pair must match.
struct MagicSignature {
    parts: &'static [(usize, &'static [u8])],
    mime: &'static str,
}

/// Signature table consulted in order; first match wins.
const MAGIC_SIGNATURES: &[MagicSignature] = &[
    MagicSignature {
        parts: &[(0, &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])],
        mime: "image/png",
    },
    MagicSignature {
        parts: &[(0, &[0xFF, 0xD8, 0xFF])],
        mime: "image/jpeg",
    },
    MagicSignature {
        parts: &[(0, b"GIF87a")],
        mime: "image/gif",
    },
    MagicSignature {
        parts: &[(0, b"GIF89a")],
        mime: "image/gif",
    },
    MagicSignature {
        parts: &[(0, b"RIFF"), (8, b"WEBP")],
        mime: "image/webp",
    },
    MagicSignature {
        parts: &[(0, &[0x00, 0x00, 0x01, 0x00])],
        mime: "image/x-icon",
    },
    MagicSignature {
        parts: &[(0, b"wOF2")],
        mime: "font/woff2",
    },
    MagicSignature {
        parts: &[(0, b"wOFF")],
        mime: "font/woff",
    },
    MagicSignature {
        parts: &[(0, b"OTTO")],
        mime: "font/otf",
    },
    MagicSignature {
        parts: &[(0, &[0x00, 0x01, 0x00, 0x00])],
        mime: "font/ttf",
    },
    MagicSignature {
        parts: &[(0, b"%PDF")],
        mime: "application/pdf",
    },
    MagicSignature {
        parts: &[(0, &[0x50, 0x4B, 0x03, 0x04])],
        mime: "application/zip",
    },
    MagicSignature {
        parts: &[(0, &[0x1F, 0x8B])],
        mime: "application/gzip",
    },
    MagicSignature {
        parts: &[(0, b"ID3")],
        mime: "audio/mpeg",
    },
    MagicSignature {
        parts: &[(0, b"OggS")],
        mime: "audio/ogg",
    },
    MagicSignature {
        parts: &[(0, b"fLaC")],
        mime: "audio/flac",
    },
    MagicSignature {
        parts: &[(4, b"ftyp")],
        mime: "video/mp4",
    },
    MagicSignature {
        parts: &[(0, &[0x1A, 0x45, 0xDF, 0xA3])],
        mime: "video/webm",
    },
    MagicSignature {
        parts: &[(0, &[0x00, 0x61, 0x73, 0x6D])],
        mime: "application/wasm",
    },
];

/// Classify raw contents as text or binary.
///
/// Known text and binary extensions short-circuit the decision; otherwise the
/// leading bytes are inspected for NUL bytes and invalid UTF-8.
pub fn classify_content(path: &Path, data: &[u8]) -> ContentKind {
    if let Some(extension) = file_extension(path) {
        if TEXT_EXTENSIONS.contains(&extension.as_str()) {
            return ContentKind::Text;
        }
        if BINARY_EXTENSIONS.contains(&extension.as_str()) {
            return ContentKind::Binary;
        }
    }

    if sniff_is_binary(data) {
        ContentKind::Binary
    } else {
        ContentKind::Text
    }
}

/// Detect the MIME type of binary contents from the signature table.
///
/// Falls back to `application/octet-stream` when no signature matches.
pub fn sniff_mime_type(data: &[u8]) -> &'static str {
    for signature in MAGIC_SIGNATURES {
        let matches = signature
            .parts
            .iter()
            .all(|(offset, pattern)| data.get(*offset..).is_some_and(|tail| tail.starts_with(pattern)));
        if matches {
            return signature.mime;
        }
    }
    "application/octet-stream"
}

/// Encode the contents of a resolved asset for storage in the catalogue.
///
/// Text assets are decoded lossily as UTF-8 (non-UTF-8 text encodings are an
/// accepted limitation); binary assets become base64 data URLs.
pub fn encode_asset(path: &Path, data: &[u8]) -> String {
    match classify_content(path, data) {
        ContentKind::Text => String::from_utf8_lossy(data).into_owned(),
        ContentKind::Binary => {
            let mime = sniff_mime_type(data);
            let payload = general_purpose::STANDARD.encode(data);
            format!("data:{mime};base64,{payload}")
        }
    }
}

fn file_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|extension| extension.to_string_lossy().to_ascii_lowercase())
}

fn sniff_is_binary(data: &[u8]) -> bool {
    let window = &data[..data.len().min(SNIFF_WINDOW)];
    if window.contains(&0) {
        return true;
    }
    // A multi-byte sequence truncated by the window boundary is not evidence
    // of binary content, so only reject errors found strictly inside it.
    match std::str::from_utf8(window) {
        Ok(_) => false,
        Err(err) => err.valid_up_to() + 4 < window.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn known_text_extensions_stay_text() {
        assert_eq!(
            classify_content(Path::new("app.js"), b"console.log(1);"),
            ContentKind::Text
        );
        assert_eq!(
            classify_content(Path::new("style.CSS"), b"body {}"),
            ContentKind::Text
        );
    }

    #[test]
    fn known_binary_extensions_stay_binary() {
        assert_eq!(
            classify_content(Path::new("logo.png"), b"not actually a png"),
            ContentKind::Binary
        );
    }

    #[test]
    fn unknown_extensions_fall_back_to_byte_sniffing() {
        assert_eq!(
            classify_content(Path::new("notes"), b"plain words"),
            ContentKind::Text
        );
        assert_eq!(
            classify_content(Path::new("blob.dat"), &[0x00, 0x01, 0x02]),
            ContentKind::Binary
        );
    }

    #[test]
    fn sniffs_common_mime_types() {
        assert_eq!(sniff_mime_type(PNG_HEADER), "image/png");
        assert_eq!(sniff_mime_type(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
        let mut webp = b"RIFF".to_vec();
        webp.extend_from_slice(&[0, 0, 0, 0]);
        webp.extend_from_slice(b"WEBP");
        assert_eq!(sniff_mime_type(&webp), "image/webp");
        assert_eq!(sniff_mime_type(b"garbage"), "application/octet-stream");
    }

    #[test]
    fn text_assets_encode_verbatim() {
        assert_eq!(
            encode_asset(Path::new("main.css"), b"body { margin: 0; }"),
            "body { margin: 0; }"
        );
    }

    #[test]
    fn binary_assets_encode_as_data_urls() {
        let encoded = encode_asset(Path::new("x.png"), PNG_HEADER);
        let payload = encoded
            .strip_prefix("data:image/png;base64,")
            .expect("data URL prefix");
        assert_eq!(
            general_purpose::STANDARD.decode(payload).unwrap(),
            PNG_HEADER
        );
    }
}
