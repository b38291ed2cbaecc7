use super::stream::{ReadEvent, ReadSink, read_file};
use std::path::PathBuf;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

/// Messages the reader may queue ahead of the consumer.
pub const READ_QUEUE_DEPTH: usize = 16;

/// Identifies one drop; events from older generations are stale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

#[derive(Debug)]
pub enum ReadMessage {
    Event(ReadEvent),
    Progress(f64),
}

#[derive(Debug)]
pub struct Tagged {
    pub generation: Generation,
    pub message: ReadMessage,
}

struct ChannelSink {
    generation: Generation,
    tx: Sender<Tagged>,
}

impl ChannelSink {
    fn send(&self, message: ReadMessage) {
        // blocks while the queue is full; receiver gone means the drop was abandoned
        let _ = self.tx.blocking_send(Tagged {
            generation: self.generation,
            message,
        });
    }
}

impl ReadSink for ChannelSink {
    fn on_chunk(&mut self, event: ReadEvent) {
        self.send(ReadMessage::Event(event));
    }
    fn on_progress(&mut self, percent: f64) {
        self.send(ReadMessage::Progress(percent));
    }
}

/// Read `path` on the blocking pool, forwarding tagged events to `tx`.
/// The reader stalls whenever `tx` is at capacity.
pub fn spawn_read(
    path: PathBuf,
    chunk_size: usize,
    generation: Generation,
    tx: Sender<Tagged>,
) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        let mut sink = ChannelSink { generation, tx };
        read_file(&path, chunk_size, &mut sink);
    })
}
