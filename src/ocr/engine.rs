//! Local OCR engine invocation for the inference server.
//!
//! Wraps the deepseek-ocr.rs CLI via subprocess. The engine binary owns the
//! model entirely; this wrapper only hands it an image path and collects
//! stdout. Install from: https://github.com/TimmyOVO/deepseek-ocr.rs

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::config::EngineSettings;

/// Prompt style per the model card: markdown conversion with grounding.
const ENGINE_PROMPT: &str = "<image>\n<|grounding|>Convert the document to markdown.";

/// Errors from the local engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("OCR engine not available: {0}")]
    NotAvailable(String),

    #[error("OCR engine failed: {0}")]
    Failed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Subprocess wrapper around the OCR engine CLI.
pub struct OcrEngine {
    binary: PathBuf,
    device: String,
    dtype: String,
    model: String,
}

impl OcrEngine {
    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self {
            binary: PathBuf::from(&settings.binary),
            device: settings.device.clone(),
            dtype: settings.dtype.clone(),
            model: settings.model.clone(),
        }
    }

    /// Check whether the engine binary can be found.
    pub fn is_available(&self) -> bool {
        which::which(&self.binary).is_ok() || self.binary.exists()
    }

    /// Human-readable availability status for health reporting.
    pub fn availability_hint(&self) -> String {
        if self.is_available() {
            format!(
                "OCR engine available (binary: {}, device: {}, model: {})",
                self.binary.display(),
                self.device,
                self.model
            )
        } else {
            format!(
                "OCR engine not found at '{}'. Install from: https://github.com/TimmyOVO/deepseek-ocr.rs",
                self.binary.display()
            )
        }
    }

    /// Run the engine on an image file and return the extracted text.
    ///
    /// Blocking; callers inside async handlers run this on a blocking task.
    pub fn extract_text(&self, image_path: &Path) -> Result<String, EngineError> {
        let output = Command::new(&self.binary)
            .arg("--quiet")
            .args(["--prompt", ENGINE_PROMPT])
            .args(["--image", &image_path.to_string_lossy()])
            .args(["--device", &self.device])
            .args(["--dtype", &self.dtype])
            .args(["--model", &self.model])
            .args(["--max-new-tokens", "4096"])
            .output();

        match output {
            Ok(out) if out.status.success() => {
                Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
            }
            Ok(out) => {
                let stderr = String::from_utf8_lossy(&out.stderr);
                Err(EngineError::Failed(stderr.trim().to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(EngineError::NotAvailable(self.availability_hint()))
            }
            Err(e) => Err(EngineError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_engine() -> OcrEngine {
        OcrEngine::from_settings(&EngineSettings {
            binary: "definitely-not-a-real-ocr-binary".to_string(),
            ..EngineSettings::default()
        })
    }

    #[test]
    fn test_missing_binary_is_unavailable() {
        let engine = missing_engine();
        assert!(!engine.is_available());
        assert!(engine.availability_hint().contains("not found"));
    }

    #[test]
    fn test_extract_with_missing_binary() {
        let engine = missing_engine();
        match engine.extract_text(Path::new("/tmp/whatever.png")) {
            Err(EngineError::NotAvailable(hint)) => {
                assert!(hint.contains("deepseek-ocr.rs"));
            }
            other => panic!("expected NotAvailable, got {:?}", other),
        }
    }
}
