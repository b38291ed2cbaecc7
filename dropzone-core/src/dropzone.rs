use crate::config::DropzoneConfig;
use crate::domain::{FileDescriptor, NotificationMessage, View, format_filesize};
use crate::error::{DropzoneError, Result};
use crate::hash::{HashAccumulator, Sha256Digest, StreamingDigest};
use crate::notice::Snackbar;
use crate::progress::ProgressReporter;
use crate::read::{
    Generation, READ_QUEUE_DEPTH, ReadEvent, ReadMessage, ReadSink, Tagged, read_file, spawn_read,
};
use crate::surface::{self, ACCEPT_ATTR, DroppedFile, InputClick};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::sync::mpsc::channel;

pub type FileChangeFn = Box<dyn FnMut(Option<FileDescriptor>) + Send>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropState {
    Idle,
    Reading,
    Accepted,
    Rejected,
}

struct ActiveDrop<D: StreamingDigest> {
    generation: Generation,
    file: DroppedFile,
    hasher: HashAccumulator<D>,
}

/// Drop target that hashes the dropped file and reports back through
/// `file_change` / `progress_change`.
pub struct Dropzone<D: StreamingDigest = Sha256Digest> {
    config: DropzoneConfig,
    file_change: FileChangeFn,
    progress: ProgressReporter,
    snackbar: Snackbar,
    generation: Generation,
    active: Option<ActiveDrop<D>>,
    state: DropState,
}

impl Dropzone {
    pub fn new(
        config: DropzoneConfig,
        file_change: impl FnMut(Option<FileDescriptor>) + Send + 'static,
        progress_change: impl FnMut(u8) + Send + 'static,
    ) -> Self {
        Self::with_digest(config, file_change, progress_change)
    }
}

impl<D: StreamingDigest> Dropzone<D> {
    pub fn with_digest(
        config: DropzoneConfig,
        file_change: impl FnMut(Option<FileDescriptor>) + Send + 'static,
        progress_change: impl FnMut(u8) + Send + 'static,
    ) -> Self {
        let snackbar = Snackbar::new(config.auto_hide());
        Self {
            config,
            file_change: Box::new(file_change),
            progress: ProgressReporter::new(progress_change),
            snackbar,
            generation: Generation::default(),
            active: None,
            state: DropState::Idle,
        }
    }

    pub fn config(&self) -> &DropzoneConfig {
        &self.config
    }

    pub fn state(&self) -> DropState {
        self.state
    }

    pub fn progress(&self) -> u8 {
        self.progress.current()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn view(&self) -> View<'_> {
        match self.progress.current() {
            0 => View::Prompt {
                caption: &self.config.dropzone_caption,
                button_text: &self.config.dropzone_button_text,
                accept: ACCEPT_ATTR,
            },
            p => View::Progress(p),
        }
    }

    pub fn notice(&self) -> Option<&NotificationMessage> {
        self.notice_at(Instant::now())
    }

    pub fn notice_at(&self, now: Instant) -> Option<&NotificationMessage> {
        self.snackbar.visible(now)
    }

    /// Drive the auto-hide timer; returns true when the notice just closed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.snackbar.tick(now)
    }

    pub fn dismiss_notice(&mut self) {
        self.snackbar.close();
    }

    pub fn handle_input_click(&self, click: &mut InputClick) {
        surface::handle_input_click(click);
    }

    /// Accept a drop and start a new generation. Any read still in flight
    /// for an earlier generation is ignored from here on.
    pub fn drop_files(&mut self, paths: &[PathBuf]) -> Result<Generation> {
        let file = surface::select(paths)?;
        self.generation = self.generation.next();
        tracing::debug!(
            generation = self.generation.0,
            file = %file.name,
            size = file.size,
            "drop accepted"
        );
        self.active = Some(ActiveDrop {
            generation: self.generation,
            file,
            hasher: HashAccumulator::new(),
        });
        self.progress.reset();
        self.state = DropState::Reading;
        Ok(self.generation)
    }

    /// Feed one reader message. Messages for other generations are dropped.
    pub fn dispatch(&mut self, generation: Generation, message: ReadMessage) {
        let current = match &self.active {
            Some(a) if a.generation == generation => a.generation,
            _ => {
                tracing::debug!(generation = generation.0, "ignoring stale read event");
                return;
            }
        };
        match message {
            ReadMessage::Progress(p) => {
                self.progress.report(p);
            }
            ReadMessage::Event(ReadEvent::Chunk(chunk)) => {
                if let Some(a) = self.active.as_mut() {
                    a.hasher.update(&chunk);
                }
            }
            ReadMessage::Event(ReadEvent::Done) => self.complete(current, None),
            ReadMessage::Event(ReadEvent::Failed(e)) => self.complete(current, Some(e)),
        }
    }

    fn complete(&mut self, generation: Generation, error: Option<std::io::Error>) {
        let Some(active) = self.active.take() else {
            return;
        };
        debug_assert_eq!(active.generation, generation);
        let bytes = active.hasher.bytes();
        let Some(filehash) = active.hasher.finalize() else {
            self.state = DropState::Rejected;
            (self.file_change)(None);
            return;
        };

        if let Some(e) = &error {
            tracing::warn!(file = %active.file.name, bytes, error = %e, "read ended with error");
            self.snackbar.show(
                NotificationMessage::error(self.config.read_error_message.clone()),
                Instant::now(),
            );
            if self.config.reject_on_read_error {
                self.state = DropState::Rejected;
                (self.file_change)(None);
                return;
            }
        }

        let descriptor = FileDescriptor {
            filesize: format_filesize(active.file.size),
            last_modified_date: active.file.last_modified_date(),
            filename: active.file.name,
            filehash,
        };
        tracing::info!(
            file = %descriptor.filename,
            hash = %descriptor.filehash,
            bytes,
            "file hashed"
        );
        self.state = DropState::Accepted;
        (self.file_change)(Some(descriptor));
    }

    /// Drop `path` and read it on the calling thread.
    pub fn process_path(&mut self, path: &Path) -> Result<()> {
        let generation = self.drop_files(&[path.to_path_buf()])?;
        let chunk_size = self.config.chunk_size;
        let mut sink = DispatchSink {
            dropzone: self,
            generation,
        };
        read_file(path, chunk_size, &mut sink);
        Ok(())
    }

    /// Drop `paths`, read the file on the blocking pool and pump its events
    /// until the read completes.
    pub async fn process(&mut self, paths: &[PathBuf]) -> Result<()> {
        let generation = self.drop_files(paths)?;
        let path = match &self.active {
            Some(a) => a.file.path.clone(),
            None => return Ok(()),
        };
        let (tx, mut rx) = channel::<Tagged>(READ_QUEUE_DEPTH);
        let handle = spawn_read(path, self.config.chunk_size, generation, tx);
        while let Some(Tagged {
            generation,
            message,
        }) = rx.recv().await
        {
            self.dispatch(generation, message);
        }
        handle
            .await
            .map_err(|e| DropzoneError::Io(std::io::Error::other(e)))
    }
}

struct DispatchSink<'a, D: StreamingDigest> {
    dropzone: &'a mut Dropzone<D>,
    generation: Generation,
}

impl<D: StreamingDigest> ReadSink for DispatchSink<'_, D> {
    fn on_chunk(&mut self, event: ReadEvent) {
        self.dropzone
            .dispatch(self.generation, ReadMessage::Event(event));
    }
    fn on_progress(&mut self, percent: f64) {
        self.dropzone
            .dispatch(self.generation, ReadMessage::Progress(percent));
    }
}
