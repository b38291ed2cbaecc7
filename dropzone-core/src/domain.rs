// dropzone_core/src/domain.rs
use serde::{Deserialize, Serialize};

const MIB: f64 = 1024.0 * 1024.0;

/// Result handed to the caller once a dropped file has been hashed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub filename: String,
    /// Size in MiB with two decimals, e.g. `"2.00 MB"`.
    pub filesize: String,
    pub last_modified_date: String,
    /// Lowercase hex SHA-256 of the file content.
    pub filehash: String,
}

pub fn format_filesize(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / MIB)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub content: String,
    pub severity: Option<Severity>,
}

impl NotificationMessage {
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            severity: Some(Severity::Error),
        }
    }
}

/// What the surface should render right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View<'a> {
    /// Idle drop target (progress is still zero).
    Prompt {
        caption: &'a str,
        button_text: &'a str,
        accept: &'static str,
    },
    /// Determinate progress bar.
    Progress(u8),
}
