//! Flat-file note store.
//!
//! The whole file is the data set: one note per line, no header. Every
//! mutation reads the file, rewrites it in full, and holds a process-local
//! lock while doing so. Separate processes sharing the file can still race.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use super::error::{NoteError, NoteResult};

/// Returned by read operations when the file holds no notes.
pub const NO_NOTES: &str = "No notes yet.";

/// Returned by the summary prompt when the file holds no notes.
pub const NO_NOTES_PROMPT: &str = "There are no notes yet.";

/// Default backing file, relative to the working directory.
pub const DEFAULT_NOTES_FILE: &str = "notes.txt";

pub struct NoteStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl NoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing file empty if it does not exist yet.
    pub fn ensure_file(&self) -> NoteResult<()> {
        if !self.path.exists() {
            fs::write(&self.path, "").map_err(|e| self.io_error(e))?;
        }
        Ok(())
    }

    /// Append `note` as a new line.
    pub fn add(&self, note: &str) -> NoteResult<String> {
        let _guard = self.guard();
        self.ensure_file()?;

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        writeln!(file, "{note}").map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), "note appended");
        Ok(format!("Note added: {note}"))
    }

    /// Remove every line whose trimmed text equals trimmed `note`.
    ///
    /// The confirmation is returned whether or not anything matched.
    pub fn delete(&self, note: &str) -> NoteResult<String> {
        let _guard = self.guard();
        let target = note.trim();

        let content = self.read_content()?;
        let kept: Vec<&str> = content
            .lines()
            .filter(|line| line.trim() != target)
            .collect();
        self.write_lines(&kept)?;

        Ok(format!("Note deleted: {note}"))
    }

    /// Replace every line whose trimmed text equals trimmed `old` with `new`,
    /// keeping its position.
    pub fn modify(&self, old: &str, new: &str) -> NoteResult<String> {
        let _guard = self.guard();
        let target = old.trim();

        let content = self.read_content()?;
        let updated: Vec<&str> = content
            .lines()
            .map(|line| if line.trim() == target { new } else { line })
            .collect();
        self.write_lines(&updated)?;

        Ok(format!("Note modified: {old} -> {new}"))
    }

    /// The raw file content, or [`NO_NOTES`] when there is nothing to show.
    pub fn read_all(&self) -> NoteResult<String> {
        let content = self.read_content()?;
        if content.trim().is_empty() {
            Ok(NO_NOTES.to_string())
        } else {
            Ok(content)
        }
    }

    /// Read-only view served as the `notes://latest` resource.
    pub fn latest_view(&self) -> NoteResult<String> {
        let content = self.read_content()?;
        if content.trim().is_empty() {
            Ok(NO_NOTES.to_string())
        } else {
            Ok(format!("Latest notes:\n{content}"))
        }
    }

    /// Text for the summary prompt, embedding every current note verbatim.
    pub fn summary_prompt(&self) -> NoteResult<String> {
        let content = self.read_content()?;
        if content.trim().is_empty() {
            Ok(NO_NOTES_PROMPT.to_string())
        } else {
            Ok(format!("Summarize the current notes:\n\n{content}"))
        }
    }

    fn read_content(&self) -> NoteResult<String> {
        self.ensure_file()?;
        fs::read_to_string(&self.path).map_err(|e| self.io_error(e))
    }

    fn write_lines(&self, lines: &[&str]) -> NoteResult<()> {
        let mut content = String::new();
        for line in lines {
            content.push_str(line);
            content.push('\n');
        }
        fs::write(&self.path, content).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), lines = lines.len(), "notes file rewritten");
        Ok(())
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // `()` cannot be left inconsistent by a panicking holder.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn io_error(&self, source: std::io::Error) -> NoteError {
        NoteError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
