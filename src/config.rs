use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application-level constants
pub const APP_NAME: &str = "Labsight";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default OCR language passed to Tesseract.
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Default Tesseract executable, resolved through PATH.
pub const DEFAULT_TESSERACT_COMMAND: &str = "tesseract";

/// Model identifier written into the interpretation prompt.
pub const DEFAULT_INTERPRETATION_MODEL: &str = "gpt-4o";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "labsight=info,labsight_lib=info"
}

/// Runtime configuration for the extraction pipeline.
///
/// Built once at process start and handed to `DocumentExtractor::from_config`.
/// Nothing in the pipeline reads environment variables on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Tesseract language code(s), e.g. "eng" or "eng+fra".
    pub ocr_language: String,
    /// Tesseract executable used by the command-line OCR engine.
    pub tesseract_command: String,
    /// Explicit tessdata directory. `None` lets Tesseract use its own default.
    pub tessdata_dir: Option<PathBuf>,
    /// Model identifier for the downstream interpretation request.
    pub interpretation_model: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            tesseract_command: DEFAULT_TESSERACT_COMMAND.to_string(),
            tessdata_dir: None,
            interpretation_model: DEFAULT_INTERPRETATION_MODEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_labsight() {
        assert_eq!(APP_NAME, "Labsight");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn default_config_uses_english_tesseract() {
        let config = PipelineConfig::default();
        assert_eq!(config.ocr_language, "eng");
        assert_eq!(config.tesseract_command, "tesseract");
        assert!(config.tessdata_dir.is_none());
        assert_eq!(config.interpretation_model, "gpt-4o");
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"ocr_language": "eng+fra"}"#).unwrap();
        assert_eq!(config.ocr_language, "eng+fra");
        assert_eq!(config.tesseract_command, "tesseract");
        assert_eq!(config.interpretation_model, "gpt-4o");
    }

    #[test]
    fn default_log_filter_targets_crate() {
        assert!(default_log_filter().contains("labsight_lib"));
    }
}
