use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Chunk or completion sentinel produced by the reader.
#[derive(Debug)]
pub enum ReadEvent {
    Chunk(Vec<u8>),
    Done,
    Failed(std::io::Error),
}

impl ReadEvent {
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, ReadEvent::Chunk(_))
    }
}

/// Receiver side of `read(file, on_chunk_or_done, on_progress)`.
pub trait ReadSink {
    fn on_chunk(&mut self, event: ReadEvent);
    fn on_progress(&mut self, percent: f64);
}

/// Adapts a pair of closures into a [`ReadSink`].
pub struct FnSink<C, P> {
    pub on_chunk: C,
    pub on_progress: P,
}

impl<C, P> ReadSink for FnSink<C, P>
where
    C: FnMut(ReadEvent),
    P: FnMut(f64),
{
    fn on_chunk(&mut self, event: ReadEvent) {
        (self.on_chunk)(event)
    }
    fn on_progress(&mut self, percent: f64) {
        (self.on_progress)(percent)
    }
}

fn percent(done: u64, total: u64) -> f64 {
    if total == 0 {
        100.0
    } else {
        done as f64 * 100.0 / total as f64
    }
}

/// Stream `src` in `chunk_size` pieces. Every chunk is followed by a progress
/// tick; the stream always ends with exactly one `Done` or `Failed`.
pub fn read_stream<R: Read, S: ReadSink + ?Sized>(
    mut src: R,
    total: u64,
    chunk_size: usize,
    sink: &mut S,
) {
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut offset: u64 = 0;
    loop {
        match src.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                offset += n as u64;
                sink.on_chunk(ReadEvent::Chunk(buf[..n].to_vec()));
                sink.on_progress(percent(offset, total));
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(offset, error = %e, "read failed");
                sink.on_chunk(ReadEvent::Failed(e));
                return;
            }
        }
    }
    sink.on_chunk(ReadEvent::Done);
}

/// Open `path` and stream it; open/metadata failures arrive as `Failed`.
pub fn read_file<S: ReadSink + ?Sized>(path: &Path, chunk_size: usize, sink: &mut S) {
    let opened = File::open(path).and_then(|f| {
        let len = f.metadata()?.len();
        Ok((f, len))
    });
    match opened {
        Ok((f, len)) => {
            tracing::debug!(path = %path.display(), len, chunk_size, "reading file");
            read_stream(f, len, chunk_size, sink)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "open failed");
            sink.on_chunk(ReadEvent::Failed(e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        chunks: Vec<Vec<u8>>,
        progress: Vec<f64>,
        done: bool,
        failed: Option<std::io::Error>,
    }

    impl ReadSink for Recorder {
        fn on_chunk(&mut self, event: ReadEvent) {
            match event {
                ReadEvent::Chunk(c) => self.chunks.push(c),
                ReadEvent::Done => self.done = true,
                ReadEvent::Failed(e) => self.failed = Some(e),
            }
        }
        fn on_progress(&mut self, percent: f64) {
            self.progress.push(percent);
        }
    }

    /// Yields `data`, then fails.
    struct Flaky<'a> {
        data: &'a [u8],
    }

    impl Read for Flaky<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.data.is_empty() {
                return Err(std::io::Error::other("disk on fire"));
            }
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn chunks_then_progress_then_done() {
        let data = b"0123456789";
        let mut rec = Recorder::default();
        read_stream(&data[..], data.len() as u64, 4, &mut rec);
        assert_eq!(rec.chunks, vec![b"0123".to_vec(), b"4567".to_vec(), b"89".to_vec()]);
        assert_eq!(rec.progress, vec![40.0, 80.0, 100.0]);
        assert!(rec.done);
        assert!(rec.failed.is_none());
    }

    #[test]
    fn empty_source_completes_without_progress() {
        let mut rec = Recorder::default();
        read_stream(&b""[..], 0, 4, &mut rec);
        assert!(rec.chunks.is_empty());
        assert!(rec.progress.is_empty());
        assert!(rec.done);
    }

    #[test]
    fn error_is_the_completion_sentinel() {
        let mut rec = Recorder::default();
        read_stream(Flaky { data: b"abcdef" }, 12, 4, &mut rec);
        assert_eq!(rec.chunks.concat(), b"abcdef".to_vec());
        assert_eq!(rec.progress.last().copied(), Some(50.0));
        assert!(!rec.done);
        assert_eq!(rec.failed.unwrap().to_string(), "disk on fire");
    }

    #[test]
    fn missing_file_reports_failure() {
        let mut rec = Recorder::default();
        read_file(Path::new("/nonexistent/data.csv"), 16, &mut rec);
        assert!(rec.failed.is_some());
        assert!(!rec.done);
    }

    #[test]
    fn reads_a_file_through_closures() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("data.json");
        std::fs::write(&p, br#"{"a":1}"#).unwrap();

        let mut bytes = Vec::new();
        let mut ticks = Vec::new();
        let mut finished = false;
        let mut sink = FnSink {
            on_chunk: |ev: ReadEvent| match ev {
                ReadEvent::Chunk(c) => bytes.extend(c),
                ReadEvent::Done => finished = true,
                ReadEvent::Failed(e) => panic!("unexpected failure: {e}"),
            },
            on_progress: |p: f64| ticks.push(p),
        };
        read_file(&p, 3, &mut sink);
        drop(sink);
        assert_eq!(bytes, br#"{"a":1}"#.to_vec());
        assert_eq!(ticks.last().copied(), Some(100.0));
        assert!(finished);
    }

    #[test]
    fn sentinel_classification() {
        assert!(!ReadEvent::Chunk(vec![1]).is_sentinel());
        assert!(ReadEvent::Done.is_sentinel());
        assert!(ReadEvent::Failed(std::io::Error::other("x")).is_sentinel());
    }
}
