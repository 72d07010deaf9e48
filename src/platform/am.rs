//! Launch requests issued through the device's `am start` command.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::core::error::LaunchError;
use crate::core::intent::{ExtraValue, Intent};
use crate::core::opener::Launcher;

pub const DEFAULT_AM_PATH: &str = "/system/bin/am";

/// Render `intent` as `am start` arguments.
///
/// `am` has no syntax for a nested chooser target, so a chooser is rendered
/// as its target with both flag sets merged.  When several apps can handle
/// the target the system shows its own resolver dialog instead.
pub fn am_start_args(intent: &Intent) -> Vec<String> {
    let (intent, flags) = match intent.target.as_deref() {
        Some(target) if intent.is_chooser() => (target, target.flags | intent.flags),
        _ => (intent, intent.flags),
    };

    let mut args = vec!["start".to_string(), "-a".to_string(), intent.action.clone()];
    if let Some(data) = &intent.data {
        args.push("-d".into());
        args.push(data.to_string());
    }
    if let Some(mime) = &intent.mime_type {
        args.push("-t".into());
        args.push(mime.clone());
    }
    for category in &intent.categories {
        args.push("-c".into());
        args.push(category.clone());
    }
    if let Some(component) = &intent.component {
        args.push("-n".into());
        args.push(component.flatten_to_short_string());
    }
    if flags != 0 {
        args.push("-f".into());
        args.push(format!("{flags:#010x}"));
    }
    for (key, value) in &intent.extras {
        let (switch, value) = match value {
            ExtraValue::Uri(uri) => ("--eu", uri.to_string()),
            ExtraValue::Str(s) => ("--es", s.clone()),
        };
        args.push(switch.into());
        args.push(key.clone());
        args.push(value);
    }
    args
}

/// `am` reports unresolvable intents on stdout and still exits 0, so the
/// output has to be inspected.
fn find_rejection(stdout: &str, stderr: &str) -> Option<String> {
    stdout
        .lines()
        .chain(stderr.lines())
        .map(str::trim)
        .find(|line| is_rejection_line(line))
        .map(str::to_string)
}

/// `Starting:`/`Warning:` lines echo the intent, folder URI included, so only
/// lines that lead with an error marker or an exception class count.
fn is_rejection_line(line: &str) -> bool {
    if line.starts_with("Starting:") || line.starts_with("Warning:") {
        return false;
    }
    if line.starts_with("Error")
        || line.starts_with("Exception occurred")
        || line.starts_with("Security exception")
    {
        return true;
    }
    let head = line.split(':').next().unwrap_or_default();
    head.ends_with("Exception") && head.contains('.') && !head.contains(char::is_whitespace)
}

pub struct ActivityManagerLauncher {
    program: PathBuf,
}

impl ActivityManagerLauncher {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Launcher for ActivityManagerLauncher {
    fn start_activity(&self, intent: &Intent) -> Result<(), LaunchError> {
        let program = self.program.display().to_string();
        let args = am_start_args(intent);
        if intent.is_chooser() {
            debug!(title = ?intent.title(), "chooser sent as its target");
        }
        debug!(%program, ?args, "starting activity");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| LaunchError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if let Some(line) = find_rejection(&stdout, &stderr) {
            return Err(LaunchError::Rejected(line));
        }
        if !output.status.success() {
            return Err(LaunchError::Exit {
                program,
                status: output
                    .status
                    .code()
                    .map_or_else(|| "signal".to_string(), |c| c.to_string()),
                stderr: stderr.trim().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::core::context::LaunchContext;
    use crate::core::strategy::Strategy;

    fn folder() -> Url {
        Url::parse("file:///storage/emulated/0/Download").unwrap()
    }

    #[test]
    fn view_folder_renders_data_type_and_flags() {
        let intent = Strategy::ViewFolder.build(&folder(), &LaunchContext::new(Some(29)));
        assert_eq!(
            am_start_args(&intent),
            [
                "start",
                "-a",
                "android.intent.action.VIEW",
                "-d",
                "file:///storage/emulated/0/Download",
                "-t",
                "resource/folder",
                "-f",
                "0x10000001",
            ]
        );
    }

    #[test]
    fn documents_ui_renders_component_and_uri_extra() {
        let intent = Strategy::DocumentsUi.build(&folder(), &LaunchContext::default());
        let args = am_start_args(&intent);
        let n = args.iter().position(|a| a == "-n").unwrap();
        assert_eq!(args[n + 1], "com.android.documentsui/.files.FilesActivity");
        assert_eq!(
            args[args.len() - 3..],
            [
                "--eu",
                "android.provider.extra.INITIAL_URI",
                "file:///storage/emulated/0/Download",
            ]
        );
    }

    #[test]
    fn chooser_renders_its_target() {
        let intent = Strategy::ContentChooser.build(&folder(), &LaunchContext::default());
        assert_eq!(
            am_start_args(&intent),
            [
                "start",
                "-a",
                "android.intent.action.GET_CONTENT",
                "-t",
                "*/*",
                "-c",
                "android.intent.category.OPENABLE",
                "-f",
                "0x10000000",
            ]
        );
    }

    #[test]
    fn detects_unresolved_intent_output() {
        let stdout = "Starting: Intent { act=android.intent.action.VIEW }\n\
                      Error: Activity not started, unable to resolve Intent { act=android.intent.action.VIEW }\n";
        let line = find_rejection(stdout, "").unwrap();
        assert!(line.starts_with("Error: Activity not started"));

        let denied = "java.lang.SecurityException: Permission Denial: starting Intent";
        assert!(find_rejection("", denied).is_some());

        assert_eq!(find_rejection("Starting: Intent { act=... }\n", ""), None);
    }

    #[test]
    fn exception_names_in_the_echoed_uri_are_not_rejections() {
        let stdout = "Starting: Intent { act=android.intent.action.VIEW \
                      dat=file:///sdcard/NullPointerException typ=resource/folder }\n\
                      Warning: Activity not started, intent has been delivered to currently running top-most instance.\n";
        assert_eq!(find_rejection(stdout, ""), None);

        assert!(find_rejection("Exception occurred while executing 'start':", "").is_some());
        assert!(find_rejection("", "Security exception: Permission Denial").is_some());
        assert!(find_rejection("android.content.ActivityNotFoundException: No Activity", "").is_some());
    }

    /// Write an executable `sh` script standing in for `am`.  Each run
    /// appends its arguments to `calls.log` next to the script.
    #[cfg(unix)]
    fn fake_am(dir: &std::path::Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("am");
        let log = dir.join("calls.log");
        let script = format!("#!/bin/sh\necho \"$@\" >> '{}'\n{body}\n", log.display());
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    fn logged_calls(dir: &std::path::Path) -> Vec<String> {
        std::fs::read_to_string(dir.join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[cfg(unix)]
    #[test]
    fn clean_exit_is_accepted() {
        let tmp = tempfile::tempdir().unwrap();
        let am = fake_am(tmp.path(), "echo \"Starting: Intent { act=$3 }\"");
        let launcher = ActivityManagerLauncher::new(am);
        let intent = Strategy::ViewFolder.build(&folder(), &LaunchContext::default());
        launcher.start_activity(&intent).unwrap();

        let calls = logged_calls(tmp.path());
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("start -a android.intent.action.VIEW"));
    }

    #[cfg(unix)]
    #[test]
    fn error_output_with_zero_exit_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let am = fake_am(
            tmp.path(),
            "echo 'Starting: Intent { act=android.intent.action.VIEW }'\n\
             echo 'Error: Activity not started, unable to resolve Intent'\n\
             exit 0",
        );
        let launcher = ActivityManagerLauncher::new(am);
        let intent = Strategy::ViewFolder.build(&folder(), &LaunchContext::default());
        let err = launcher.start_activity(&intent).unwrap_err();
        assert!(matches!(err, LaunchError::Rejected(_)));
        assert_eq!(
            err.to_string(),
            "Error: Activity not started, unable to resolve Intent"
        );
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_an_exit_error() {
        let tmp = tempfile::tempdir().unwrap();
        let am = fake_am(tmp.path(), "echo 'service not running' >&2\nexit 3");
        let launcher = ActivityManagerLauncher::new(am);
        let intent = Strategy::DocumentsUi.build(&folder(), &LaunchContext::default());
        match launcher.start_activity(&intent).unwrap_err() {
            LaunchError::Exit { status, stderr, .. } => {
                assert_eq!(status, "3");
                assert_eq!(stderr, "service not running");
            }
            other => panic!("expected exit error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn folder_named_like_an_exception_opens_once() {
        use crate::core::opener::FolderOpener;

        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("NullPointerException");
        std::fs::create_dir(&dir).unwrap();
        let bin = tempfile::tempdir().unwrap();
        let am = fake_am(
            bin.path(),
            "echo \"Starting: Intent { act=$3 dat=$5 }\"\nexit 0",
        );

        let opener = FolderOpener::new(ActivityManagerLauncher::new(am));
        let chosen = opener.open_folder(&LaunchContext::default(), &dir).unwrap();
        assert_eq!(chosen, Strategy::ViewFolder);
        assert_eq!(logged_calls(bin.path()).len(), 1);
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let launcher = ActivityManagerLauncher::new("/definitely/not/here/am");
        let intent = Strategy::ViewFolder.build(&folder(), &LaunchContext::default());
        let err = launcher.start_activity(&intent).unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
        assert!(err.to_string().contains("/definitely/not/here/am"));
    }
}
