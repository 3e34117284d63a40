use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

use crate::config::LoggingConfig;

// -------- rotating writer for the file sink --------

#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl<'a> fmt::MakeWriter<'a> for RotWriter {
    type Writer = RotWriterHandle;
    fn make_writer(&'a self) -> Self::Writer {
        RotWriterHandle(self.0.clone())
    }
}

#[derive(Clone)]
struct RotWriterHandle(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotWriterHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.lock().unwrap().flush()
    }
}

/// Resolve a log file path against `base_dir` (home_dir).
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

fn create_rotating_writer(cfg: &LoggingConfig, log_path: &Path) -> std::io::Result<RotWriter> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let max_bytes = cfg.max_size_mb.unwrap_or(100) as usize * 1024 * 1024;
    let max_files = cfg.max_backups.unwrap_or(3);

    let rot = FileRotate::new(
        log_path,
        AppendTimestamp::default(FileLimit::MaxFiles(max_files)),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None, // file permissions (Unix only)
    );
    Ok(RotWriter(Arc::new(Mutex::new(rot))))
}

fn filter_for(level: &str) -> EnvFilter {
    let spec = match level.to_ascii_lowercase().as_str() {
        "off" | "none" => "off".to_string(),
        other => other.to_string(),
    };
    EnvFilter::new(spec)
}

/// Initialize the global tracing subscriber: console sink at the configured
/// level (RUST_LOG wins when set) plus an optional rotating file sink.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging(cfg: &LoggingConfig, base_dir: &Path) {
    let console_filter = std::env::var("RUST_LOG")
        .ok()
        .map(EnvFilter::new)
        .unwrap_or_else(|| filter_for(&cfg.console_level));

    let console = fmt::layer()
        .with_target(true)
        .with_filter(console_filter);

    let file_layer = cfg.file.as_deref().and_then(|file| {
        let path = resolve_log_path(file, base_dir);
        match create_rotating_writer(cfg, &path) {
            Ok(writer) => Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer)
                    .with_filter(filter_for(&cfg.file_level)),
            ),
            Err(e) => {
                eprintln!("failed to open log file {}: {e}", path.display());
                None
            }
        }
    });

    let _ = tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;

    #[test]
    fn relative_log_paths_resolve_against_base_dir() {
        let resolved = resolve_log_path("logs/app.log", Path::new("/srv/backoffice"));
        assert_eq!(resolved, PathBuf::from("/srv/backoffice/logs/app.log"));
        let absolute = resolve_log_path("/var/log/app.log", Path::new("/srv/backoffice"));
        assert_eq!(absolute, PathBuf::from("/var/log/app.log"));
    }

    #[test]
    fn init_is_idempotent() {
        let cfg = LoggingConfig::default();
        let dir = tempfile::tempdir().unwrap();
        init_logging(&cfg, dir.path());
        init_logging(&cfg, dir.path());
        tracing::info!("still alive");
    }
}
