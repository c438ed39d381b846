//! Editor error taxonomy.
//!
//! Four kinds of failure reach the editor loop:
//!
//! - user-input errors ([`EmptyFilename`](EditorError::EmptyFilename)),
//!   reported on the message bar;
//! - file I/O failures ([`Io`](EditorError::Io)), also reported;
//! - prompt cancellation ([`PromptCancelled`](EditorError::PromptCancelled)),
//!   an expected outcome the caller uses to roll back instead of commit;
//! - fatal terminal failures (input closed, read or write errors), which
//!   end the session.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("prompt cancelled")]
    PromptCancelled,

    #[error("No filename given")]
    EmptyFilename,

    #[error("input closed")]
    InputClosed,

    #[error("read key failed")]
    Input(#[source] io::Error),

    #[error("write frame failed")]
    Output(#[source] io::Error),
}

impl EditorError {
    /// Should this error end the session?
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::InputClosed | Self::Input(_) | Self::Output(_))
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = EditorError> = std::result::Result<T, E>;
