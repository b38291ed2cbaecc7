use dropzone_core::read::{Generation, ReadEvent, ReadMessage, ReadSink, read_stream};
use dropzone_core::{DropState, Dropzone, DropzoneConfig, FileDescriptor, Severity, View};
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

type Results = Arc<Mutex<Vec<Option<FileDescriptor>>>>;
type Ticks = Arc<Mutex<Vec<u8>>>;

fn dropzone(cfg: DropzoneConfig) -> (Dropzone, Results, Ticks) {
    let results: Results = Arc::default();
    let ticks: Ticks = Arc::default();
    let (r, t) = (results.clone(), ticks.clone());
    let dz = Dropzone::new(
        cfg,
        move |d| r.lock().unwrap().push(d),
        move |p| t.lock().unwrap().push(p),
    );
    (dz, results, ticks)
}

fn two_mib_csv() -> (tempfile::TempDir, PathBuf, Vec<u8>) {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("data.csv");
    let content: Vec<u8> = (0..2_097_152u32).map(|i| b"0123456789,\n"[(i % 12) as usize]).collect();
    std::fs::write(&p, &content).unwrap();
    (dir, p, content)
}

/// Collects reader output so it can be replayed into a dropzone.
struct Replay(Vec<ReadMessage>);

impl ReadSink for Replay {
    fn on_chunk(&mut self, event: ReadEvent) {
        self.0.push(ReadMessage::Event(event));
    }
    fn on_progress(&mut self, percent: f64) {
        self.0.push(ReadMessage::Progress(percent));
    }
}

/// Returns `data` and then an error instead of EOF.
struct FailsAtEnd(std::io::Cursor<Vec<u8>>);

impl Read for FailsAtEnd {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self.0.read(buf)? {
            0 => Err(std::io::Error::other("device went away")),
            n => Ok(n),
        }
    }
}

#[test]
fn two_mib_csv_without_error() {
    let (_dir, p, content) = two_mib_csv();
    let (mut dz, results, ticks) = dropzone(DropzoneConfig::default());
    dz.process_path(&p).unwrap();

    let results = results.lock().unwrap();
    assert_eq!(results.len(), 1);
    let d = results[0].as_ref().unwrap();
    assert_eq!(d.filename, "data.csv");
    assert_eq!(d.filesize, "2.00 MB");
    assert_eq!(d.filehash, hex::encode(Sha256::digest(&content)));
    assert!(dz.notice().is_none());
    assert_eq!(dz.state(), DropState::Accepted);

    // 2 MiB / 64 KiB = 32 ticks, monotone, last one 100
    let ticks = ticks.lock().unwrap();
    assert_eq!(ticks.len(), 32);
    assert!(ticks.windows(2).all(|w| w[0] <= w[1]));
    assert!(ticks.iter().all(|&t| t <= 100));
    assert_eq!(ticks.last().copied(), Some(100));
}

#[test]
fn two_mib_csv_with_read_error_at_completion() {
    let (_dir, p, content) = two_mib_csv();
    let (mut dz, results, _) = dropzone(DropzoneConfig::default());
    let g = dz.drop_files(&[p]).unwrap();

    let mut replay = Replay(Vec::new());
    let total = content.len() as u64;
    read_stream(FailsAtEnd(std::io::Cursor::new(content.clone())), total, 64 * 1024, &mut replay);
    assert!(matches!(
        replay.0.last(),
        Some(ReadMessage::Event(ReadEvent::Failed(_)))
    ));
    for m in replay.0 {
        dz.dispatch(g, m);
    }

    let results = results.lock().unwrap();
    let d = results[0].as_ref().unwrap();
    assert_eq!(d.filesize, "2.00 MB");
    assert_eq!(d.filehash, hex::encode(Sha256::digest(&content)));

    let n = dz.notice().unwrap();
    assert_eq!(n.content, "Ha ocurrido un error al leer el archivo");
    assert_eq!(n.severity, Some(Severity::Error));
}

#[test]
fn progress_values_are_truncated_in_pipeline_order() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("data.json");
    std::fs::write(&p, vec![b' '; 3]).unwrap();
    let (mut dz, _, ticks) = dropzone(DropzoneConfig {
        chunk_size: 1,
        ..Default::default()
    });
    dz.process_path(&p).unwrap();
    // 33.3 / 66.6 / 100.0
    assert_eq!(*ticks.lock().unwrap(), vec![33, 66, 100]);
}

#[test]
fn view_switches_to_progress_and_back_to_prompt_on_new_drop() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("sheet.xls");
    std::fs::write(&p, b"xls").unwrap();
    let (mut dz, _, _) = dropzone(DropzoneConfig {
        dropzone_caption: "Drop it".into(),
        ..Default::default()
    });
    let g = dz.drop_files(&[p.clone()]).unwrap();
    dz.dispatch(g, ReadMessage::Progress(42.9));
    assert_eq!(dz.view(), View::Progress(42));

    let g2 = dz.drop_files(&[p]).unwrap();
    assert_eq!(g2, Generation(g.0 + 1));
    match dz.view() {
        View::Prompt { caption, .. } => assert_eq!(caption, "Drop it"),
        other => panic!("expected prompt, got {other:?}"),
    }
}

#[test]
fn empty_file_hashes_to_the_empty_digest() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("empty.json");
    std::fs::write(&p, b"").unwrap();
    let (mut dz, results, ticks) = dropzone(DropzoneConfig::default());
    dz.process_path(&p).unwrap();
    assert!(ticks.lock().unwrap().is_empty());
    assert_eq!(
        results.lock().unwrap()[0].as_ref().unwrap().filehash,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[tokio::test]
async fn latest_drop_wins_across_async_reads() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.csv");
    let b = dir.path().join("b.csv");
    std::fs::write(&a, b"first").unwrap();
    std::fs::write(&b, b"second").unwrap();

    let (mut dz, results, _) = dropzone(DropzoneConfig::default());
    // a drop whose read never gets pumped, then a second one that does
    let stale = dz.drop_files(&[a]).unwrap();
    dz.process(&[b]).await.unwrap();
    dz.dispatch(stale, ReadMessage::Event(ReadEvent::Done));

    let results = results.lock().unwrap();
    assert_eq!(results.len(), 1);
    let d = results[0].as_ref().unwrap();
    assert_eq!(d.filename, "b.csv");
    assert_eq!(d.filehash, hex::encode(Sha256::digest(b"second")));
}
