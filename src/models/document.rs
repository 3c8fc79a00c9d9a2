//! Uploaded documents and their normalized raster form.

/// A document as received from the reviewer: raw bytes plus what the
/// uploader claimed about them. Immutable; lives for one request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    /// Original filename, or "upload" when the client sent none.
    pub file_name: String,
    /// Media type declared by the uploader (not trusted; content sniffing
    /// decides what the bytes actually are).
    pub declared_mime: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(file_name: Option<String>, declared_mime: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.unwrap_or_else(|| "upload".to_string()),
            declared_mime: declared_mime.unwrap_or_else(|| "application/octet-stream".to_string()),
            bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A single raster image ready for inference: PNG for rasterized PDFs,
/// the source encoding for pass-through images.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    /// Filename to present to the endpoint (PDF stems get a .png suffix).
    pub file_name: String,
    /// Media type of the pixel buffer.
    pub mime_type: String,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uploaded_document_defaults() {
        let doc = UploadedDocument::new(None, None, vec![1, 2, 3]);
        assert_eq!(doc.file_name, "upload");
        assert_eq!(doc.declared_mime, "application/octet-stream");
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_uploaded_document_empty() {
        let doc = UploadedDocument::new(Some("a.png".into()), Some("image/png".into()), vec![]);
        assert!(doc.is_empty());
    }
}
