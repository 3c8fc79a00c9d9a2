//! Runtime configuration for invocr.
//!
//! All settings come from environment variables (a `.env` file is loaded
//! at startup) with documented defaults. There is no config file: every
//! value here is a runtime parameter, not a protocol contract.

use std::time::Duration;

use url::Url;

/// Default OCR endpoint base URL (the local inference server).
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:7861";

/// Default request timeout for endpoint calls, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Default DPI for PDF rasterization.
pub const DEFAULT_RASTER_DPI: u32 = 220;

/// Default bind addresses for the three processes.
pub const DEFAULT_UI_BIND: &str = "127.0.0.1:7860";
pub const DEFAULT_INFERENCE_BIND: &str = "127.0.0.1:7861";
pub const DEFAULT_API_BIND: &str = "127.0.0.1:7862";

/// Local OCR engine invocation settings for the inference server.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Path or name of the OCR engine CLI binary.
    pub binary: String,
    /// Device to run on (cpu, metal, cuda).
    pub device: String,
    /// Data type (f32, f16, bf16).
    pub dtype: String,
    /// Model identifier passed to the engine.
    pub model: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            binary: "deepseek-ocr-cli".to_string(),
            device: "cpu".to_string(),
            dtype: "f32".to_string(),
            model: "deepseek-ocr".to_string(),
        }
    }
}

/// Central settings object shared by all three processes.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the OCR endpoint the client talks to.
    pub endpoint_url: String,
    /// How long to wait for an endpoint response before giving up.
    pub request_timeout: Duration,
    /// DPI used when rasterizing PDF page 1.
    pub raster_dpi: u32,
    /// Bind address for the review UI server.
    pub ui_bind: String,
    /// Bind address for the inference server.
    pub inference_bind: String,
    /// Bind address for the API server.
    pub api_bind: String,
    /// Local OCR engine settings.
    pub engine: EngineSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            raster_dpi: DEFAULT_RASTER_DPI,
            ui_bind: DEFAULT_UI_BIND.to_string(),
            inference_bind: DEFAULT_INFERENCE_BIND.to_string(),
            api_bind: DEFAULT_API_BIND.to_string(),
            engine: EngineSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the environment, falling back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut settings = Settings::default();

        if let Ok(value) = std::env::var("INVOCR_ENDPOINT_URL") {
            settings.endpoint_url = validate_endpoint_url(&value)?;
        }
        if let Ok(value) = std::env::var("INVOCR_TIMEOUT_SECS") {
            let secs: u64 = value
                .parse()
                .map_err(|_| anyhow::anyhow!("INVOCR_TIMEOUT_SECS is not a number: {}", value))?;
            settings.request_timeout = Duration::from_secs(secs);
        }
        if let Ok(value) = std::env::var("INVOCR_RASTER_DPI") {
            settings.raster_dpi = value
                .parse()
                .map_err(|_| anyhow::anyhow!("INVOCR_RASTER_DPI is not a number: {}", value))?;
        }
        if let Ok(value) = std::env::var("INVOCR_UI_BIND") {
            settings.ui_bind = value;
        }
        if let Ok(value) = std::env::var("INVOCR_INFERENCE_BIND") {
            settings.inference_bind = value;
        }
        if let Ok(value) = std::env::var("INVOCR_API_BIND") {
            settings.api_bind = value;
        }
        if let Ok(value) = std::env::var("INVOCR_ENGINE_BIN") {
            settings.engine.binary = value;
        }
        if let Ok(value) = std::env::var("INVOCR_ENGINE_DEVICE") {
            settings.engine.device = value;
        }
        if let Ok(value) = std::env::var("INVOCR_ENGINE_DTYPE") {
            settings.engine.dtype = value;
        }
        if let Ok(value) = std::env::var("INVOCR_ENGINE_MODEL") {
            settings.engine.model = value;
        }

        Ok(settings)
    }
}

/// Validate an endpoint base URL and strip any trailing slash.
pub fn validate_endpoint_url(value: &str) -> anyhow::Result<String> {
    let url = Url::parse(value)
        .map_err(|e| anyhow::anyhow!("invalid endpoint URL '{}': {}", value, e))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("endpoint URL must be http or https: {}", value);
    }
    Ok(value.trim_end_matches('/').to_string())
}
