use crate::error::{DropzoneError, Result};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use time::OffsetDateTime;
use time::macros::format_description;

pub const ACCEPTED_EXTENSIONS: [&str; 4] = [".json", ".csv", ".xls", ".docx"];
/// Value of the input's `accept` attribute.
pub const ACCEPT_ATTR: &str = ".json,.csv,.xls,.docx";

/// A file the surface has accepted for reading.
#[derive(Clone, Debug)]
pub struct DroppedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl DroppedFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let md = std::fs::metadata(path)?;
        if !md.is_file() {
            return Err(DropzoneError::Rejected(format!(
                "{} is not a regular file",
                path.display()
            )));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: md.len(),
            modified: md.modified().ok(),
        })
    }

    pub fn last_modified_date(&self) -> String {
        format_last_modified(self.modified)
    }
}

/// Render an mtime the way a browser prints a `Date` (UTC).
pub fn format_last_modified(t: Option<SystemTime>) -> String {
    let fmt = format_description!(
        "[weekday repr:short] [month repr:short] [day] [year] [hour]:[minute]:[second] GMT+0000 (Coordinated Universal Time)"
    );
    t.and_then(|t| OffsetDateTime::from(t).format(fmt).ok())
        .unwrap_or_else(|| "Invalid Date".to_string())
}

pub fn is_accepted(name: &str) -> bool {
    let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str()) else {
        return false;
    };
    ACCEPTED_EXTENSIONS
        .iter()
        .any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

/// Single-file selection: exactly one path with an accepted extension.
pub fn select(paths: &[PathBuf]) -> Result<DroppedFile> {
    let path = match paths {
        [] => return Err(DropzoneError::Rejected("no file dropped".into())),
        [one] => one,
        _ => {
            return Err(DropzoneError::Rejected(format!(
                "only one file may be dropped at a time (got {})",
                paths.len()
            )));
        }
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if !is_accepted(&name) {
        return Err(DropzoneError::Rejected(format!(
            "{name}: extension not in {ACCEPT_ATTR}"
        )));
    }
    DroppedFile::from_path(path)
}

/// Click on the hidden file input.
#[derive(Debug, Default)]
pub struct InputClick {
    default_prevented: bool,
}

impl InputClick {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub fn handle_input_click(click: &mut InputClick) {
    click.prevent_default();
}
