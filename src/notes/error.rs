//! Note store error types.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum NoteError {
    #[error("Failed to access notes file {path}: {source}")]
    #[diagnostic(code(supanotes::notes::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type NoteResult<T> = Result<T, NoteError>;
