//! Command-line entry point: read one lab report, print JSON.
//!
//! Once the input file has been read, stdout carries exactly one JSON
//! document: the extraction result (or its interpretation request with
//! `--prompt`) or an error body. If the file itself cannot be read, nothing is
//! printed on stdout and the error goes to stderr with a non-zero exit. Logs go
//! to stderr.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use crate::config::{
    PipelineConfig, DEFAULT_INTERPRETATION_MODEL, DEFAULT_OCR_LANGUAGE,
    DEFAULT_TESSERACT_COMMAND,
};
use crate::pipeline::extraction::{DocumentExtractor, ExtractionError, TextExtractor};
use crate::pipeline::import::{sanitize_filename, UploadedFile};
use crate::pipeline::prompt_templates::build_interpretation_prompt;

#[derive(Parser, Debug)]
#[command(name = "labsight")]
#[command(about = "Extract text and patient metadata from a lab report (.pdf, .txt, .jpg)")]
#[command(version)]
pub struct Cli {
    /// Lab report to read
    pub file: PathBuf,

    /// Name used for format detection instead of the file's own name
    #[arg(long)]
    pub filename: Option<String>,

    /// Tesseract language code(s), e.g. "eng+fra"
    #[arg(long, env = "LABSIGHT_OCR_LANGUAGE", default_value = DEFAULT_OCR_LANGUAGE)]
    pub ocr_language: String,

    /// Tesseract executable
    #[arg(long, env = "LABSIGHT_TESSERACT", default_value = DEFAULT_TESSERACT_COMMAND)]
    pub tesseract_command: String,

    /// Tesseract data directory
    #[arg(long, env = "LABSIGHT_TESSDATA_DIR")]
    pub tessdata_dir: Option<PathBuf>,

    /// Model id written into the interpretation request
    #[arg(long, env = "LABSIGHT_MODEL", default_value = DEFAULT_INTERPRETATION_MODEL)]
    pub model: String,

    /// Print the interpretation request instead of the extracted document
    #[arg(long)]
    pub prompt: bool,

    /// Pretty-print JSON
    #[arg(long)]
    pub pretty: bool,

    /// Log filter (overrides RUST_LOG)
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            ocr_language: self.ocr_language.clone(),
            tesseract_command: self.tesseract_command.clone(),
            tessdata_dir: self.tessdata_dir.clone(),
            interpretation_model: self.model.clone(),
        }
    }

    /// Name the pipeline sees: `--filename`, else the path's last component.
    pub fn upload_name(&self) -> String {
        match self.filename {
            Some(ref name) => sanitize_filename(name),
            None => sanitize_filename(&self.file.to_string_lossy()),
        }
    }
}

/// Structured error body printed on failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

impl From<&ExtractionError> for ErrorBody {
    fn from(err: &ExtractionError) -> Self {
        ErrorBody {
            error: ErrorDetail {
                code: err.code(),
                message: err.to_string(),
            },
        }
    }
}

/// Process exit status for each failure kind.
pub fn exit_status(err: &ExtractionError) -> u8 {
    match err {
        ExtractionError::UnsupportedFormat { .. } => 2,
        ExtractionError::UnreadableFile { .. } => 3,
        ExtractionError::NoReadableText => 4,
        ExtractionError::OcrUnavailable(_) => 5,
    }
}

/// Rendered command result.
#[derive(Debug)]
pub struct CliOutput {
    pub body: String,
    pub status: u8,
}

/// Read the file named on the command line and run it through `extractor`.
pub fn process(cli: &Cli, extractor: &dyn TextExtractor) -> anyhow::Result<CliOutput> {
    let config = cli.pipeline_config();
    let bytes = std::fs::read(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    let upload = UploadedFile::new(cli.upload_name(), bytes);

    match extractor.extract(&upload) {
        Ok(doc) => {
            let body = if cli.prompt {
                let prompt = build_interpretation_prompt(&doc, &config.interpretation_model);
                to_json(&prompt, cli.pretty)?
            } else {
                to_json(&doc, cli.pretty)?
            };
            Ok(CliOutput { body, status: 0 })
        }
        Err(err) => {
            tracing::error!(code = err.code(), error = %err, "Extraction failed");
            Ok(CliOutput {
                body: to_json(&ErrorBody::from(&err), cli.pretty)?,
                status: exit_status(&err),
            })
        }
    }
}

/// Build the production extractor from CLI flags and process the file.
pub fn run(cli: &Cli) -> anyhow::Result<u8> {
    let config = cli.pipeline_config();
    tracing::debug!(?config, "Pipeline configuration");

    let extractor = DocumentExtractor::from_config(&config);
    let output = process(cli, &extractor)?;
    println!("{}", output.body);
    Ok(output.status)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
