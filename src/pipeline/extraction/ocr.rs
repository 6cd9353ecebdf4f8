use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::types::{OcrEngine, OcrError, OcrPageResult};
use crate::config::PipelineConfig;

/// Tesseract OCR through the `tesseract` command-line tool.
///
/// The image is streamed on stdin and the text read from stdout; nothing is
/// written to disk.
pub struct TesseractCli {
    command: String,
    language: String,
    tessdata_dir: Option<PathBuf>,
}

impl TesseractCli {
    pub fn new(command: &str, language: &str) -> Self {
        Self {
            command: command.to_string(),
            language: language.to_string(),
            tessdata_dir: None,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            command: config.tesseract_command.clone(),
            language: config.ocr_language.clone(),
            tessdata_dir: config.tessdata_dir.clone(),
        }
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.command);
        if let Some(ref dir) = self.tessdata_dir {
            cmd.arg("--tessdata-dir").arg(dir);
        }
        cmd.arg("stdin")
            .arg("stdout")
            .args(["-l", self.language.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl OcrEngine for TesseractCli {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<OcrPageResult, OcrError> {
        let mut child = match self.build_command().spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(OcrError::EngineUnavailable(format!(
                    "{} not found (install tesseract-ocr)",
                    self.command
                )))
            }
            Err(e) => return Err(OcrError::Io(e)),
        };

        if let Some(mut stdin) = child.stdin.take() {
            // A broken pipe means tesseract quit early; its exit status says why.
            if let Err(e) = stdin.write_all(image_bytes) {
                if e.kind() != ErrorKind::BrokenPipe {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(OcrError::Io(e));
                }
            }
        }

        let output = child.wait_with_output()?;
        if output.status.success() {
            Ok(OcrPageResult {
                text: String::from_utf8_lossy(&output.stdout).to_string(),
                confidence: None,
            })
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(OcrError::Processing(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )))
        }
    }
}

/// Bundled Tesseract OCR engine.
/// Only available when compiled with the `ocr` feature flag.
#[cfg(feature = "ocr")]
pub struct BundledTesseract {
    tessdata_dir: PathBuf,
    language: String,
}

#[cfg(feature = "ocr")]
impl BundledTesseract {
    /// Initialize with a tessdata directory.
    pub fn new(tessdata_dir: &std::path::Path, language: &str) -> Result<Self, OcrError> {
        let first_lang = language.split('+').next().unwrap_or("eng");
        let traineddata = tessdata_dir.join(format!("{first_lang}.traineddata"));
        if !traineddata.exists() {
            return Err(OcrError::EngineUnavailable(format!(
                "tessdata not found at {}",
                traineddata.display()
            )));
        }

        Ok(Self {
            tessdata_dir: tessdata_dir.to_path_buf(),
            language: language.to_string(),
        })
    }
}

#[cfg(feature = "ocr")]
impl OcrEngine for BundledTesseract {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<OcrPageResult, OcrError> {
        let tessdata_str = self
            .tessdata_dir
            .to_str()
            .ok_or_else(|| OcrError::EngineUnavailable("Invalid tessdata path".into()))?;

        let tess = tesseract::Tesseract::new(Some(tessdata_str), Some(&self.language))
            .map_err(|e| OcrError::EngineUnavailable(format!("{e:?}")))?;

        let mut tess = tess
            .set_image_from_mem(image_bytes)
            .map_err(|e| OcrError::Processing(format!("{e:?}")))?;

        let text = tess
            .get_text()
            .map_err(|e| OcrError::Processing(format!("{e:?}")))?;

        let confidence = tess.mean_text_conf().max(0) as f32 / 100.0;

        Ok(OcrPageResult {
            text,
            confidence: Some(confidence),
        })
    }
}

/// Mock OCR engine for unit testing without Tesseract.
pub struct MockOcrEngine {
    pub text: String,
    pub confidence: f32,
}

impl MockOcrEngine {
    pub fn new(text: &str, confidence: f32) -> Self {
        Self {
            text: text.to_string(),
            confidence,
        }
    }
}

impl OcrEngine for MockOcrEngine {
    fn ocr_image(&self, _image_bytes: &[u8]) -> Result<OcrPageResult, OcrError> {
        Ok(OcrPageResult {
            text: self.text.clone(),
            confidence: Some(self.confidence),
        })
    }
}
