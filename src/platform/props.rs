//! Device property lookups.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

pub const DEFAULT_GETPROP_PATH: &str = "/system/bin/getprop";

const SDK_PROPERTY: &str = "ro.build.version.sdk";

/// API level of the running device, or `None` when `getprop` is unavailable
/// (e.g. when run off-device) or prints something unexpected.
pub fn detect_sdk_int(getprop: &Path) -> Option<u32> {
    let output = match Command::new(getprop)
        .arg(SDK_PROPERTY)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
    {
        Ok(o) if o.status.success() => o,
        Ok(o) => {
            debug!(status = ?o.status, "getprop failed");
            return None;
        }
        Err(err) => {
            debug!(error = %err, getprop = %getprop.display(), "getprop unavailable");
            return None;
        }
    };
    parse_sdk(&String::from_utf8_lossy(&output.stdout))
}

fn parse_sdk(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}
