//! Error taxonomy for opening a folder.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single launch request.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The activity manager refused the request (no handler, permission...).
    #[error("{0}")]
    Rejected(String),
    #[error("{program} exited with status {status}: {stderr}")]
    Exit {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Outcome reported to the caller when a folder could not be opened.
///
/// The `Display` text is the message handed back across the boundary.
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("文件夹不存在")]
    NotFound,
    #[error("cannot express {} as a file URI", .path.display())]
    InvalidPath { path: PathBuf },
    /// A launch failure that no later strategy can absorb.
    #[error(transparent)]
    Launch(#[from] LaunchError),
    /// Every strategy in the chain failed and each one was suppressible.
    #[error("无法打开文件管理器")]
    Exhausted,
    #[error("open task ended without a result")]
    Dropped,
}
