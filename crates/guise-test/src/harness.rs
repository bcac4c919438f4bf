//! Test harness utilities.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Set up logging for tests.
///
/// Safe to call from every test; only the first call installs a subscriber.
///
/// ```rust,ignore
/// use guise_test::setup_test_logging;
///
/// #[test]
/// fn my_test() {
///     setup_test_logging("guise_perms=trace");
///     // ... test code
/// }
/// ```
pub fn setup_test_logging(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_test_writer()
        .try_init();
}

/// Shared buffer collecting formatted log output.
#[derive(Debug, Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Everything written so far.
    #[must_use]
    pub fn contents(&self) -> String {
        self.0
            .lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut guard) = self.0.lock() {
            guard.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a thread-local subscriber and return its result together
/// with the log lines it produced.
///
/// ```rust,ignore
/// let (_, logs) = capture_logs("guise_perms=trace", || resolver.resolve(&grants, &scope));
/// assert!(logs.contains("discarding permission"));
/// ```
pub fn capture_logs<T>(filter: &str, f: impl FnOnce() -> T) -> (T, String) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(capture.clone())
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, capture.contents())
}

/// A temporary directory for config files, deleted on drop.
#[derive(Debug)]
pub struct TestConfigDir {
    /// The temporary directory.
    pub dir: TempDir,
}

impl TestConfigDir {
    /// Create a new empty directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        match TempDir::new() {
            Ok(dir) => Self { dir },
            Err(e) => panic!("failed to create temp dir: {e}"),
        }
    }

    /// Path of the directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `name` inside the directory and return its path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            panic!("failed to create {}: {e}", parent.display());
        }
        if let Err(e) = std::fs::write(&path, contents) {
            panic!("failed to write {}: {e}", path.display());
        }
        path
    }
}

impl Default for TestConfigDir {
    fn default() -> Self {
        Self::new()
    }
}
