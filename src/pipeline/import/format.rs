use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Upload formats the pipeline knows how to read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileFormat {
    Pdf,
    PlainText,
    Jpeg,
}

/// Extensions accepted at upload, in the order they are listed to users.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["txt", "pdf", "jpg"];

impl FileFormat {
    /// Map a lower-cased extension to a format.
    /// Only the exact extensions `pdf`, `txt` and `jpg` are recognized.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::PlainText),
            "jpg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::PlainText => "txt",
            Self::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accepted extensions as listed in user-facing messages: `.txt, .pdf, or .jpg`.
pub fn accepted_extensions_phrase() -> String {
    let dotted: Vec<String> = ACCEPTED_EXTENSIONS.iter().map(|e| format!(".{e}")).collect();
    match dotted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{}, or {last}", rest.join(", ")),
        Some((last, _)) => last.clone(),
        None => String::new(),
    }
}

/// Lower-cased text after the last `.` of a filename.
/// A filename without any `.` is its own extension, so an upload named `txt`
/// is read as text.
pub fn extension_of(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Sanitize a filename: strip path components, limit length.
pub fn sanitize_filename(original: &str) -> String {
    let name = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document");

    let clean: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0'))
        .take(255)
        .collect();

    if clean.is_empty() {
        "document".to_string()
    } else {
        clean
    }
}
