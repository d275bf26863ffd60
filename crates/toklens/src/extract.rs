//! Text extraction from supported file formats, with classified failures.
//!
//! Plain-text formats (text, Markdown, common code/config files) are read
//! verbatim; HTML is reduced to its visible text. Container and binary
//! document formats (PDF, DOCX, ZIP) are reported as unsupported.

use std::path::{Path, PathBuf};

use scraper::{Html, Node, Selector};

/// Largest file we will extract (50 MB).
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Extensions read verbatim as UTF-8 text.
const PLAIN_EXTENSIONS: &[&str] = &[
    "txt", "md", "markdown", "rs", "java", "py", "js", "ts", "css", "xml", "json", "toml", "yaml",
    "yml",
];

/// Extensions reduced from HTML to visible text.
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

/// Classified extraction failure.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ExtractError {
    /// The path does not exist.
    #[error("file not found: {path}")]
    #[diagnostic(code(toklens::extract::not_found))]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The file exists but could not be read as text.
    #[error("cannot read {path}: {reason}")]
    #[diagnostic(code(toklens::extract::unreadable))]
    Unreadable {
        /// The unreadable path.
        path: PathBuf,
        /// Why reading failed (I/O error, invalid UTF-8, ...).
        reason: String,
    },

    /// The file exceeds [`MAX_FILE_SIZE`].
    #[error("{path} is too large: {size} bytes")]
    #[diagnostic(
        code(toklens::extract::too_large),
        help("files over 50 MB are not analyzed")
    )]
    TooLarge {
        /// The oversized path.
        path: PathBuf,
        /// Its size in bytes.
        size: u64,
    },

    /// The extension is not one we can extract text from.
    #[error("unsupported file type: {extension:?}")]
    #[diagnostic(
        code(toklens::extract::unsupported),
        help("supported: plain text, Markdown, HTML, and common code formats")
    )]
    UnsupportedFormat {
        /// The offending extension (lowercased, may be empty).
        extension: String,
    },
}

/// Returns `true` when [`extract`] knows how to handle `path`'s extension.
#[must_use]
pub fn is_supported(path: &Path) -> bool {
    let ext = extension_of(path);
    PLAIN_EXTENSIONS.contains(&ext.as_str()) || HTML_EXTENSIONS.contains(&ext.as_str())
}

/// Extract the text content of `path`.
pub fn extract(path: &Path) -> Result<String, ExtractError> {
    let ext = extension_of(path);

    if HTML_EXTENSIONS.contains(&ext.as_str()) {
        return Ok(html_to_text(&read_text(path)?));
    }
    if PLAIN_EXTENSIONS.contains(&ext.as_str()) {
        return read_text(path);
    }
    Err(ExtractError::UnsupportedFormat { extension: ext })
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Read `path` as UTF-8 text, validating existence and size first.
fn read_text(path: &Path) -> Result<String, ExtractError> {
    let meta = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ExtractError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ExtractError::Unreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    })?;

    if meta.len() > MAX_FILE_SIZE {
        return Err(ExtractError::TooLarge {
            path: path.to_path_buf(),
            size: meta.len(),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| ExtractError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|_| ExtractError::Unreadable {
        path: path.to_path_buf(),
        reason: "not valid UTF-8 text".to_owned(),
    })
}

// ─── HTML reduction ──────────────────────────────────────────────────────────

/// Reduce an HTML document to its visible text.
///
/// The document title (when present) leads, followed by the body's text
/// with script, style, and noscript content dropped. Whitespace between
/// text nodes collapses to single spaces.
fn html_to_text(html: &str) -> String {
    let doc = Html::parse_document(html);

    let mut out = String::new();

    if let Some(title) = select_text(&doc, "title") {
        if !title.is_empty() {
            out.push_str(&title);
            out.push_str("\n\n");
        }
    }

    out.push_str(&visible_text(&doc));
    out
}

/// The trimmed text of the first element matching `selector`, if any.
fn select_text(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    doc.select(&sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_owned())
}

/// Collect body text, skipping non-visible containers.
fn visible_text(doc: &Html) -> String {
    let body = Selector::parse("body")
        .ok()
        .and_then(|sel| doc.select(&sel).next());

    let Some(body) = body else {
        return String::new();
    };

    let mut segments: Vec<String> = Vec::new();
    for node in body.descendants() {
        if let Node::Text(t) = node.value() {
            let hidden = node.ancestors().any(|a| {
                matches!(
                    a.value(),
                    Node::Element(e) if matches!(e.name(), "script" | "style" | "noscript")
                )
            });
            if hidden {
                continue;
            }
            let trimmed = t.trim();
            if !trimmed.is_empty() {
                segments.push(trimmed.to_owned());
            }
        }
    }
    segments.join(" ")
}
