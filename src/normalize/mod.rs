//! Document normalization: uploaded file in, single raster image out.
//!
//! Media types are decided by content sniffing (magic bytes), never by the
//! uploader's declared type. PDFs are rasterized to PNG; supported images
//! pass through byte-for-byte after validation.

mod pdf;

use std::path::Path;

use thiserror::Error;

use crate::models::{NormalizedImage, UploadedDocument};

/// Only page 1 of a PDF is ever sent for inference. This is a deliberate,
/// documented limitation of the pipeline, not a generalization point.
pub const FIRST_PAGE: u32 = 1;

/// Image media types accepted without conversion.
const SUPPORTED_IMAGE_MIMES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/tiff",
];

/// Errors from normalization. Surfaced directly to the reviewer; never
/// retried.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Rasterization failed: {0}")]
    Rasterization(String),
}

/// Normalize an uploaded document into a single raster image.
///
/// PDFs render page 1 at `dpi` to PNG; all subsequent pages are silently
/// ignored. Images pass through unchanged. Anything else fails with
/// `UnsupportedFormat`.
pub fn normalize(doc: &UploadedDocument, dpi: u32) -> Result<NormalizedImage, NormalizeError> {
    let detected = infer::get(&doc.bytes);

    let mime = match detected {
        Some(kind) => kind.mime_type(),
        // Magic byte detection found nothing recognizable; report whatever
        // the uploader claimed so the message names the offending type.
        None => {
            return Err(NormalizeError::UnsupportedFormat(
                doc.declared_mime.clone(),
            ))
        }
    };

    if mime == "application/pdf" {
        let png = pdf::rasterize_first_page(&doc.bytes, dpi)?;
        return Ok(NormalizedImage {
            file_name: png_file_name(&doc.file_name),
            mime_type: "image/png".to_string(),
            bytes: png,
        });
    }

    if SUPPORTED_IMAGE_MIMES.contains(&mime) {
        return Ok(NormalizedImage {
            file_name: doc.file_name.clone(),
            mime_type: mime.to_string(),
            bytes: doc.bytes.clone(),
        });
    }

    Err(NormalizeError::UnsupportedFormat(mime.to_string()))
}

/// Replace the extension of an uploaded filename with .png.
fn png_file_name(original: &str) -> String {
    let stem = Path::new(original)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("upload");
    format!("{}.png", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Smallest byte sequences that magic-byte detection recognizes.
    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0];

    fn upload(name: &str, mime: &str, bytes: &[u8]) -> UploadedDocument {
        UploadedDocument::new(Some(name.into()), Some(mime.into()), bytes.to_vec())
    }

    #[test]
    fn test_png_passes_through_unchanged() {
        let doc = upload("scan.png", "image/png", PNG_MAGIC);
        let image = normalize(&doc, 220).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.file_name, "scan.png");
        assert_eq!(image.bytes, doc.bytes);
    }

    #[test]
    fn test_jpeg_passes_through_unchanged() {
        let doc = upload("invoice.jpg", "image/jpeg", JPEG_MAGIC);
        let image = normalize(&doc, 220).unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.bytes, doc.bytes);
    }

    #[test]
    fn test_detection_ignores_declared_mime() {
        // Uploader lies: PNG bytes declared as PDF still normalize as PNG.
        let doc = upload("fake.pdf", "application/pdf", PNG_MAGIC);
        let image = normalize(&doc, 220).unwrap();
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn test_plain_text_is_unsupported() {
        let doc = upload("notes.txt", "text/plain", b"just some words");
        match normalize(&doc, 220) {
            Err(NormalizeError::UnsupportedFormat(mime)) => {
                assert_eq!(mime, "text/plain");
            }
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_recognized_but_unsupported_type() {
        // A zip archive is detectable but not a document we accept.
        let doc = upload("bundle.zip", "application/zip", b"PK\x03\x04rest");
        match normalize(&doc, 220) {
            Err(NormalizeError::UnsupportedFormat(mime)) => {
                assert_eq!(mime, "application/zip");
            }
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_bytes_are_unsupported() {
        let doc = upload("empty.bin", "application/octet-stream", b"");
        assert!(matches!(
            normalize(&doc, 220),
            Err(NormalizeError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_png_file_name() {
        assert_eq!(png_file_name("invoice.pdf"), "invoice.png");
        assert_eq!(png_file_name("scans/march.PDF"), "march.png");
        assert_eq!(png_file_name(""), "upload.png");
    }
}
