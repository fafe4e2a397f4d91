use faery_core::EmitterError;
use std::path::{Path, PathBuf};

/// Where finished documents go.
#[derive(Debug)]
enum Target {
    Disk,
    Memory(Vec<(PathBuf, String)>),
}

/// Text of one document at a time, flushed when the document ends.
///
/// Nothing reaches disk until `finish`, so an aborted document leaves no
/// partial file behind.
#[derive(Debug)]
pub struct DocumentSink {
    open: Option<(PathBuf, String)>,
    target: Target,
}

impl DocumentSink {
    #[must_use]
    pub fn on_disk() -> Self {
        Self {
            open: None,
            target: Target::Disk,
        }
    }

    /// Keeps finished documents in memory instead of writing them.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            open: None,
            target: Target::Memory(Vec::new()),
        }
    }

    pub fn begin(&mut self, path: &Path) -> Result<(), EmitterError> {
        if let Some((current, _)) = &self.open {
            return Err(EmitterError::DocumentAlreadyOpen(
                current.display().to_string(),
            ));
        }
        self.open = Some((path.to_path_buf(), String::new()));
        Ok(())
    }

    pub fn push_line(&mut self, line: &str) -> Result<(), EmitterError> {
        let (_, text) = self.open.as_mut().ok_or(EmitterError::NoOpenDocument)?;
        text.push_str(line);
        text.push('\n');
        Ok(())
    }

    pub fn finish(&mut self) -> Result<PathBuf, EmitterError> {
        let (path, text) = self.open.take().ok_or(EmitterError::NoOpenDocument)?;
        match &mut self.target {
            Target::Disk => std::fs::write(&path, text)?,
            Target::Memory(done) => done.push((path.clone(), text)),
        }
        tracing::debug!(path = %path.display(), "Document written");
        Ok(path)
    }

    /// Discards the open document. Nothing is written, in memory or on disk.
    pub fn abort(&mut self) -> Result<(), EmitterError> {
        let (path, text) = self.open.take().ok_or(EmitterError::NoOpenDocument)?;
        tracing::debug!(
            path = %path.display(),
            bytes = text.len(),
            "Document discarded"
        );
        Ok(())
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Finished in-memory documents; empty for disk sinks.
    #[must_use]
    pub fn documents(&self) -> &[(PathBuf, String)] {
        match &self.target {
            Target::Disk => &[],
            Target::Memory(done) => done,
        }
    }
}

/// Formats a float the way both document formats expect.
pub(crate) fn num(v: f64) -> String {
    let s = format!("{v:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

pub(crate) fn triple(v: [f64; 3]) -> String {
    format!("{} {} {}", num(v[0]), num(v[1]), num(v[2]))
}
