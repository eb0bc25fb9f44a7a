//! Input manager for reading resume files and staging uploads

use crate::config::InputConfig;
use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::DocumentFormat;
use crate::processing::document::{ExtractedText, ResumeDocument};
use log::info;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct InputManager {
    cache: HashMap<PathBuf, ExtractedText>,
    enable_cache: bool,
    staging_dir: Option<PathBuf>,
}

/// An uploaded document written to a temporary file.
///
/// The file is removed when this value is dropped, whichever way the
/// surrounding analysis exits.
pub struct StagedUpload {
    file: NamedTempFile,
    format: DocumentFormat,
}

impl StagedUpload {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
            staging_dir: None,
        }
    }

    pub fn from_config(config: &InputConfig) -> Self {
        let manager = Self::new().with_cache(config.enable_cache);
        match &config.staging_dir {
            Some(dir) => manager.with_staging_dir(dir),
            None => manager,
        }
    }

    /// Stage uploads in `dir` instead of the system temp dir.
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Load a resume file from disk without extracting it.
    pub fn load_document(&self, path: &Path) -> Result<ResumeDocument> {
        if !path.exists() {
            return Err(ResumeAnalyzerError::InvalidInput(
                format!("File does not exist: {}", path.display())
            ));
        }

        let format = DocumentFormat::from_path(path)?;
        let bytes = std::fs::read(path)?;
        Ok(ResumeDocument::new(bytes, format))
    }

    pub fn extract_file(&mut self, path: &Path) -> Result<ExtractedText> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        let document = self.load_document(path)?;
        info!("Extracting text from {}: {}", document.format(), path.display());
        let text = document.extract()?;

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    /// Write uploaded bytes to a temp file that keeps the upload's extension.
    pub fn stage_upload(&self, bytes: &[u8], file_name: &str) -> Result<StagedUpload> {
        let format = DocumentFormat::from_path(Path::new(file_name))?;

        let suffix = format!(".{}", format.extension());
        let mut builder = tempfile::Builder::new();
        builder.prefix("resume-upload-").suffix(&suffix);
        let mut file = match &self.staging_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(bytes)?;
        file.flush()?;

        info!("Staged upload '{}' at {}", file_name, file.path().display());
        Ok(StagedUpload { file, format })
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
