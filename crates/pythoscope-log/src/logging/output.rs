use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Failure to open a file-backed output.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("cannot open log file {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Shared handle to a writable sink.
///
/// Clones refer to the same sink; [`Output::same`] compares by identity.
#[derive(Clone)]
pub struct Output {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
    label: Arc<str>,
}

impl Output {
    /// Wraps an arbitrary writer.
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self::named("custom", writer)
    }

    /// Wraps a writer with a label shown by `Debug`.
    pub fn named<W: Write + Send + 'static>(label: impl Into<String>, writer: W) -> Self {
        let label: String = label.into();
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
            label: Arc::from(label),
        }
    }

    /// Process standard error; the default sink.
    pub fn stderr() -> Self {
        Self::named("stderr", io::stderr())
    }

    pub fn stdout() -> Self {
        Self::named("stdout", io::stdout())
    }

    /// Appends to `path`, creating the file if needed.
    pub fn file(path: impl AsRef<Path>) -> Result<Self, OutputError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| OutputError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::named(path.display().to_string(), file))
    }

    /// Whether both handles refer to the same sink.
    pub fn same(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.writer, &b.writer)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Writes `line` plus a newline as one unit, then flushes.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut w = self.lock();
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
        w.flush()
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        // A panic mid-write leaves a usable sink; keep logging.
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::stderr()
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Output").field(&self.label).finish()
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flush()
    }
}

/// In-memory sink whose contents can be read back.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// An [`Output`] writing into this buffer.
    pub fn output(&self) -> Output {
        Output::named("buffer", self.clone())
    }

    /// Everything written so far, decoded lossily.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Returns the contents and empties the buffer.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
