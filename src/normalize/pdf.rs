//! PDF page rasterization via pdftoppm.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::{NormalizeError, FIRST_PAGE};

const PDFTOPPM_NOT_FOUND: &str =
    "pdftoppm not installed. Install with: apt install poppler-utils";

/// Rasterize page 1 of a PDF to PNG bytes at the given DPI.
///
/// Later pages are never rendered: pdftoppm is told to stop at page 1,
/// so a 40-page scan costs the same as a 1-page one.
pub fn rasterize_first_page(pdf_bytes: &[u8], dpi: u32) -> Result<Vec<u8>, NormalizeError> {
    let temp_dir = tempfile::tempdir()
        .map_err(|e| NormalizeError::Rasterization(format!("temp dir: {}", e)))?;

    let pdf_path = temp_dir.path().join("input.pdf");
    std::fs::write(&pdf_path, pdf_bytes)
        .map_err(|e| NormalizeError::Rasterization(format!("temp file: {}", e)))?;

    let page_str = FIRST_PAGE.to_string();
    let output_prefix = temp_dir.path().join("page");

    let output = Command::new("pdftoppm")
        .args(["-png", "-r", &dpi.to_string(), "-f", &page_str, "-l", &page_str])
        .arg(&pdf_path)
        .arg(&output_prefix)
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let image_path = find_page_image(temp_dir.path(), FIRST_PAGE).ok_or_else(|| {
                NormalizeError::Rasterization("PDF contained no renderable pages".to_string())
            })?;
            std::fs::read(&image_path)
                .map_err(|e| NormalizeError::Rasterization(format!("read page image: {}", e)))
        }
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr);
            Err(NormalizeError::Rasterization(format!(
                "pdftoppm failed: {}",
                stderr.trim()
            )))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(NormalizeError::Rasterization(PDFTOPPM_NOT_FOUND.to_string()))
        }
        Err(e) => Err(NormalizeError::Rasterization(e.to_string())),
    }
}

/// Find the image file pdftoppm produced for a page.
///
/// pdftoppm pads page numbers to the document's total page count, so the
/// same page can land at page-1.png, page-01.png, page-001.png, ...
pub fn find_page_image(dir: &Path, page_num: u32) -> Option<PathBuf> {
    for digits in [1, 2, 3, 4] {
        let filename = format!("page-{:0width$}.png", page_num, width = digits);
        let path = dir.join(&filename);
        if path.exists() {
            return Some(path);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_page_image_not_found() {
        let temp = TempDir::new().unwrap();
        assert!(find_page_image(temp.path(), 1).is_none());
    }

    #[test]
    fn test_find_page_image_without_padding() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("page-1.png");
        std::fs::write(&path, b"fake png").unwrap();

        assert_eq!(find_page_image(temp.path(), 1), Some(path));
    }

    #[test]
    fn test_find_page_image_with_2_digit_padding() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("page-01.png");
        std::fs::write(&path, b"fake png").unwrap();

        assert_eq!(find_page_image(temp.path(), 1), Some(path));
    }

    #[test]
    fn test_find_page_image_with_3_digit_padding() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("page-001.png");
        std::fs::write(&path, b"fake png").unwrap();

        assert_eq!(find_page_image(temp.path(), 1), Some(path));
    }

    #[test]
    fn test_find_page_image_ignores_other_pages() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("page-2.png"), b"fake png").unwrap();

        assert!(find_page_image(temp.path(), 1).is_none());
    }
}
