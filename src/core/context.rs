//! Platform facts every launch needs, passed explicitly into each call.

/// Android 7.0 (Nougat), the first release that accepts URI grant flags on
/// `file://` view requests.
pub const SDK_NOUGAT: u32 = 24;

pub const DEFAULT_CHOOSER_TITLE: &str = "打开文件管理器";

#[derive(Debug, Clone)]
pub struct LaunchContext {
    /// `ro.build.version.sdk` of the device, if known.
    pub sdk_int: Option<u32>,
    /// Title shown on the last-resort chooser dialog.
    pub chooser_title: String,
}

impl LaunchContext {
    pub fn new(sdk_int: Option<u32>) -> Self {
        Self {
            sdk_int,
            chooser_title: DEFAULT_CHOOSER_TITLE.to_string(),
        }
    }

    /// Unknown versions are treated as pre-Nougat.
    pub fn at_least(&self, level: u32) -> bool {
        self.sdk_int.is_some_and(|sdk| sdk >= level)
    }
}

impl Default for LaunchContext {
    fn default() -> Self {
        Self::new(None)
    }
}
