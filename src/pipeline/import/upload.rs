use super::format::{extension_of, FileFormat};

/// A file as received from the request layer: name plus raw bytes.
///
/// The extension is derived once at construction and never changes.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    filename: String,
    bytes: Vec<u8>,
    extension: String,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let filename = filename.into();
        let extension = extension_of(&filename);
        Self {
            filename,
            bytes: bytes.into(),
            extension,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lower-cased filename suffix, empty when the name has no `.`.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Format implied by the extension, if it is one we accept.
    pub fn format(&self) -> Option<FileFormat> {
        FileFormat::from_extension(&self.extension)
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}
