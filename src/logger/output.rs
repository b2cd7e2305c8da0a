//! Log output targets

use super::error::{WriteError, WriteResult};
use super::host::{NoticeOutcome, UiHost};
use super::target::{ContainerRef, Target, TargetKind};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

/// Log output trait
pub trait LogOutput: Send + Sync {
    /// Write one formatted record
    fn write(&self, record: &str) -> WriteResult<()>;

    /// Flush buffered output
    fn flush(&self) -> WriteResult<()>;

    /// Get the target kind this output serves
    fn kind(&self) -> TargetKind;
}

/// Output for an unset target
#[derive(Debug, Default)]
pub struct NullOutput;

impl LogOutput for NullOutput {
    fn write(&self, _record: &str) -> WriteResult<()> {
        Ok(())
    }

    fn flush(&self) -> WriteResult<()> {
        Ok(())
    }

    fn kind(&self) -> TargetKind {
        TargetKind::None
    }
}

/// Console output, stdout unless another writer is supplied.
///
/// Each record is followed by a line terminator. Write errors are ignored.
pub struct ConsoleOutput {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleOutput {
    /// Create a console output on stdout
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a console output on any writer
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl LogOutput for ConsoleOutput {
    fn write(&self, record: &str) -> WriteResult<()> {
        let mut line = String::with_capacity(record.len() + 1);
        line.push_str(record);
        line.push('\n');

        // One write per record so concurrent lines never interleave
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writer.write_all(line.as_bytes());
        Ok(())
    }

    fn flush(&self) -> WriteResult<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writer.flush();
        Ok(())
    }

    fn kind(&self) -> TargetKind {
        TargetKind::Console
    }
}

/// Append-to-file output.
///
/// The file is opened for every record and closed again before `write`
/// returns; the write lock keeps records from concurrent callers whole.
#[derive(Debug)]
pub struct FileOutput {
    /// Target file
    path: PathBuf,

    /// Serializes writers
    write_lock: Mutex<()>,
}

impl FileOutput {
    /// Create a file output
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Target file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogOutput for FileOutput {
    fn write(&self, record: &str) -> WriteResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| WriteError::OpenFailed {
                path: self.path.clone(),
                source: e,
            })?;

        file.write_all(record.as_bytes())?;

        // Close is best-effort; the handle is released when `file` drops
        if let Err(e) = file.flush() {
            debug!(path = %self.path.display(), error = %e, "Log file flush failed");
        }

        Ok(())
    }

    fn flush(&self) -> WriteResult<()> {
        Ok(())
    }

    fn kind(&self) -> TargetKind {
        TargetKind::File
    }
}

/// Output appending to a host UI container
pub struct ContainerOutput {
    /// Resolved container
    container: ContainerRef,

    /// Host owning the container
    host: Option<Arc<dyn UiHost>>,
}

impl ContainerOutput {
    /// Create a container output
    pub fn new(container: ContainerRef, host: Option<Arc<dyn UiHost>>) -> Self {
        Self { container, host }
    }

    fn missing(&self) -> WriteError {
        WriteError::TargetMissing {
            container: self.container.canonical(),
        }
    }
}

impl LogOutput for ContainerOutput {
    fn write(&self, record: &str) -> WriteResult<()> {
        let host = self.host.as_ref().ok_or_else(|| self.missing())?;

        if host.append_to_container(&self.container, record) {
            Ok(())
        } else {
            Err(self.missing())
        }
    }

    fn flush(&self) -> WriteResult<()> {
        Ok(())
    }

    fn kind(&self) -> TargetKind {
        TargetKind::UiContainer
    }
}

impl std::fmt::Debug for ConsoleOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleOutput").finish_non_exhaustive()
    }
}

impl std::fmt::Debug for ContainerOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerOutput")
            .field("container", &self.container)
            .field("has_host", &self.host.is_some())
            .finish()
    }
}

/// Output presenting each record as a modal notice.
///
/// Blocks the caller until the notice is dismissed or the timeout elapses.
pub struct DialogOutput {
    /// Host presenting the notice
    host: Option<Arc<dyn UiHost>>,

    /// Longest time a notice may block the caller
    timeout: Option<Duration>,
}

impl DialogOutput {
    /// Create a dialog output
    pub fn new(host: Option<Arc<dyn UiHost>>, timeout: Option<Duration>) -> Self {
        Self { host, timeout }
    }
}

impl LogOutput for DialogOutput {
    fn write(&self, record: &str) -> WriteResult<()> {
        match &self.host {
            Some(host) => {
                if host.show_notice(record, self.timeout) == NoticeOutcome::TimedOut {
                    debug!("Log notice timed out before dismissal");
                }
            },
            None => {
                // Headless: nothing can block, so the notice goes to stderr
                let stderr = io::stderr();
                let mut handle = stderr.lock();
                let _ = writeln!(handle, "{record}");
            },
        }
        Ok(())
    }

    fn flush(&self) -> WriteResult<()> {
        let _ = io::stderr().flush();
        Ok(())
    }

    fn kind(&self) -> TargetKind {
        TargetKind::Dialog
    }
}

impl std::fmt::Debug for DialogOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogOutput")
            .field("has_host", &self.host.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Create the output for a target
pub fn create_output(
    target: &Target,
    host: Option<Arc<dyn UiHost>>,
    dialog_timeout: Option<Duration>,
) -> Arc<dyn LogOutput> {
    match target {
        Target::None => Arc::new(NullOutput),
        Target::Console => Arc::new(ConsoleOutput::new()),
        Target::File(path) => Arc::new(FileOutput::new(path.clone())),
        Target::UiContainer(container) => Arc::new(ContainerOutput::new(container.clone(), host)),
        Target::Dialog => Arc::new(DialogOutput::new(host, dialog_timeout)),
    }
}
