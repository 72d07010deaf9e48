//! Background open jobs with a single-shot completion.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::oneshot;

use crate::core::{
    context::LaunchContext,
    error::OpenError,
    opener::{FolderOpener, Launcher, OpenResult},
};

/// Run the open on a worker thread.  The receiver yields exactly one result.
pub fn spawn_open_folder<L>(
    opener: Arc<FolderOpener<L>>,
    ctx: LaunchContext,
    path: PathBuf,
) -> oneshot::Receiver<OpenResult>
where
    L: Launcher + Send + Sync + 'static,
{
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        let result = OpenResult::from(opener.open_folder(&ctx, &path));
        let _ = tx.send(result);
    });
    rx
}

/// Spawn the job and wait for its result.
pub async fn open_folder<L>(
    opener: Arc<FolderOpener<L>>,
    ctx: LaunchContext,
    path: PathBuf,
) -> OpenResult
where
    L: Launcher + Send + Sync + 'static,
{
    spawn_open_folder(opener, ctx, path)
        .await
        .unwrap_or_else(|_| OpenResult::Failure(OpenError::Dropped.to_string()))
}
