use crate::error::{DropzoneError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CAPTION: &str = "Arrastra y suelta el archivo aquí";
pub const DEFAULT_BUTTON_TEXT: &str = "Buscar Archivo";
pub const DEFAULT_READ_ERROR_MESSAGE: &str = "Ha ocurrido un error al leer el archivo";
pub const DEFAULT_AUTO_HIDE_MS: u64 = 2000;
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Caller-facing parameters of the drop surface. Missing keys fall back to defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DropzoneConfig {
    pub dropzone_caption: String,
    pub dropzone_button_text: String,
    pub read_error_message: String,
    /// How long a read-error notice stays visible.
    pub auto_hide_ms: u64,
    /// Bytes handed to the hasher per read.
    pub chunk_size: usize,
    /// Emit `None` instead of a descriptor when the read ended in an error.
    pub reject_on_read_error: bool,
}

impl Default for DropzoneConfig {
    fn default() -> Self {
        Self {
            dropzone_caption: DEFAULT_CAPTION.to_string(),
            dropzone_button_text: DEFAULT_BUTTON_TEXT.to_string(),
            read_error_message: DEFAULT_READ_ERROR_MESSAGE.to_string(),
            auto_hide_ms: DEFAULT_AUTO_HIDE_MS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            reject_on_read_error: false,
        }
    }
}

impl DropzoneConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_json(&bytes)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let cfg: Self = serde_json::from_slice(bytes)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(DropzoneError::Config("chunkSize must be > 0".into()));
        }
        if self.auto_hide_ms == 0 {
            return Err(DropzoneError::Config("autoHideMs must be > 0".into()));
        }
        Ok(())
    }

    pub fn auto_hide(&self) -> Duration {
        Duration::from_millis(self.auto_hide_ms)
    }
}
