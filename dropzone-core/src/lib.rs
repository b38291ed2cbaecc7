#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
pub mod dropzone;
pub mod error;
pub mod notice;
pub mod progress;
pub mod surface;

pub mod hash;

pub mod read {
    pub mod stream;
    pub mod task;

    pub use stream::{ReadEvent, ReadSink, read_file, read_stream};
    pub use task::{Generation, READ_QUEUE_DEPTH, ReadMessage, Tagged, spawn_read};
}

// Re-exports: stable API surface
pub use config::DropzoneConfig;
pub use domain::{FileDescriptor, NotificationMessage, Severity, View};
pub use dropzone::{DropState, Dropzone};
pub use error::{DropzoneError, Result};
pub use hash::{HashAccumulator, Sha256Digest, StreamingDigest};
