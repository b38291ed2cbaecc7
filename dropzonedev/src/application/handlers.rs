use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use dropzone_core::error::{DropzoneError, Result};
use dropzone_core::surface;
use dropzone_core::{Dropzone, DropzoneConfig, FileDescriptor};

use crate::presentation::cli::ConfigArgs;

fn config_from_args(args: ConfigArgs) -> Result<DropzoneConfig> {
    let mut cfg = match &args.config {
        Some(p) => DropzoneConfig::from_path(p)?,
        None => DropzoneConfig::default(),
    };
    if let Some(c) = args.caption {
        cfg.dropzone_caption = c;
    }
    if let Some(m) = args.error_message {
        cfg.read_error_message = m;
    }
    if let Some(n) = args.chunk_size {
        cfg.chunk_size = n;
    }
    if args.reject_on_read_error {
        cfg.reject_on_read_error = true;
    }
    cfg.validate()?;
    Ok(cfg)
}

pub async fn handle_hash(files: Vec<PathBuf>, args: ConfigArgs, quiet: bool) -> Result<()> {
    let cfg = config_from_args(args)?;
    let results: Arc<Mutex<Vec<Option<FileDescriptor>>>> = Arc::default();
    let sink = results.clone();
    let mut dz = Dropzone::new(
        cfg,
        move |d| {
            if let Ok(mut v) = sink.lock() {
                v.push(d);
            }
        },
        move |p| {
            if !quiet {
                eprint!("\r{p:>3}%");
                if p == 100 {
                    eprintln!();
                }
            }
        },
    );

    let mut out = std::io::stdout();
    let mut skipped = 0usize;
    for file in files {
        match dz.process(&[file.clone()]).await {
            Ok(()) => {}
            Err(DropzoneError::Rejected(reason)) => {
                tracing::warn!(file = %file.display(), %reason, "drop rejected");
                eprintln!("{}: rejected ({reason})", file.display());
                skipped += 1;
                continue;
            }
            Err(DropzoneError::Io(e)) => {
                tracing::warn!(file = %file.display(), error = %e, "drop unreadable");
                eprintln!("{}: unreadable ({e})", file.display());
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        }
        if let Some(n) = dz.notice() {
            eprintln!("{}: {}", file.display(), n.content);
            dz.dismiss_notice();
        }
        let last = results.lock().ok().and_then(|mut v| v.pop()).flatten();
        writeln!(out, "{}", serde_json::to_string(&last)?)?;
    }

    if skipped > 0 {
        return Err(DropzoneError::Rejected(format!("{skipped} file(s) not accepted")));
    }
    Ok(())
}

pub fn handle_accepts(file: PathBuf) -> Result<()> {
    match surface::select(&[file.clone()]) {
        Ok(f) => {
            println!("accepted: {} ({} bytes)", f.name, f.size);
            Ok(())
        }
        Err(DropzoneError::Rejected(reason)) => {
            println!("rejected: {reason}");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

pub fn handle_config(args: ConfigArgs) -> Result<()> {
    let cfg = config_from_args(args)?;
    println!("{}", serde_json::to_string_pretty(&cfg)?);
    Ok(())
}
