//! Open a folder by walking the strategy chain until one launch sticks.

use std::path::Path;

use tracing::{debug, info};
use url::Url;

use super::context::LaunchContext;
use super::error::{LaunchError, OpenError};
use super::intent::Intent;
use super::strategy::Strategy;

/// Something that can hand an [`Intent`] to the system.
pub trait Launcher {
    fn start_activity(&self, intent: &Intent) -> Result<(), LaunchError>;
}

/// Final outcome of one open request.  Produced exactly once per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenResult {
    Success,
    Failure(String),
}

impl From<Result<Strategy, OpenError>> for OpenResult {
    fn from(result: Result<Strategy, OpenError>) -> Self {
        match result {
            Ok(_) => OpenResult::Success,
            Err(err) => OpenResult::Failure(err.to_string()),
        }
    }
}

pub struct FolderOpener<L> {
    launcher: L,
    chain: Vec<Strategy>,
}

impl<L: Launcher> FolderOpener<L> {
    /// Opener using the default chain ([`Strategy::ALL`]).
    pub fn new(launcher: L) -> Self {
        Self {
            launcher,
            chain: Strategy::ALL.to_vec(),
        }
    }

    /// Replace the chain with `chain`, tried front to back.
    pub fn with_chain(mut self, chain: Vec<Strategy>) -> Self {
        self.chain = chain;
        self
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Ask the system to display `path`.
    ///
    /// Returns the strategy whose launch request was accepted.  Acceptance
    /// only means the request was issued; what the user does afterwards is
    /// not observed.
    pub fn open_folder(&self, ctx: &LaunchContext, path: &Path) -> Result<Strategy, OpenError> {
        if !path.exists() {
            debug!(path = %path.display(), "folder does not exist");
            return Err(OpenError::NotFound);
        }
        let uri = folder_uri(path)?;

        let last = self.chain.len().saturating_sub(1);
        for (i, &strategy) in self.chain.iter().enumerate() {
            let intent = strategy.build(&uri, ctx);
            match self.launcher.start_activity(&intent) {
                Ok(()) => {
                    info!(strategy = strategy.label(), %uri, "folder open requested");
                    return Ok(strategy);
                }
                // A terminal strategy only ends the attempt from the end of the chain.
                Err(err) if strategy.falls_through() || i < last => {
                    debug!(strategy = strategy.label(), error = %err, "launch failed, trying next");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(OpenError::Exhausted)
    }
}

/// `file://` URI for `path`, made absolute against the working directory.
fn folder_uri(path: &Path) -> Result<Url, OpenError> {
    let invalid = || OpenError::InvalidPath {
        path: path.to_path_buf(),
    };
    let absolute = std::path::absolute(path).map_err(|_| invalid())?;
    Url::from_file_path(&absolute).map_err(|()| invalid())
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Launcher whose n-th call fails with `script[n]` when that entry is
    /// `Some`.  Calls beyond the script succeed.
    pub struct ScriptedLauncher {
        script: Vec<Option<&'static str>>,
        pub calls: Mutex<Vec<Intent>>,
    }

    impl ScriptedLauncher {
        pub fn new(script: Vec<Option<&'static str>>) -> Self {
            Self {
                script,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn accepting() -> Self {
            Self::new(Vec::new())
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Launcher for ScriptedLauncher {
        fn start_activity(&self, intent: &Intent) -> Result<(), LaunchError> {
            let mut calls = self.calls.lock().unwrap();
            let index = calls.len();
            calls.push(intent.clone());
            match self.script.get(index).copied().flatten() {
                Some(msg) => Err(LaunchError::Rejected(msg.to_string())),
                None => Ok(()),
            }
        }
    }
}
