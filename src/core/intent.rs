//! Typed launch requests modelled on Android's `Intent`.
//!
//! An [`Intent`] only describes *what* to start.  Issuing it is the job of a
//! [`Launcher`](super::opener::Launcher).

use std::fmt;

use url::Url;

// ───────────────────────────────────────── platform constants ─

pub const ACTION_VIEW: &str = "android.intent.action.VIEW";
pub const ACTION_GET_CONTENT: &str = "android.intent.action.GET_CONTENT";
pub const ACTION_CHOOSER: &str = "android.intent.action.CHOOSER";

pub const CATEGORY_OPENABLE: &str = "android.intent.category.OPENABLE";

pub const EXTRA_INITIAL_URI: &str = "android.provider.extra.INITIAL_URI";
pub const EXTRA_TITLE: &str = "android.intent.extra.TITLE";

pub const FLAG_GRANT_READ_URI_PERMISSION: u32 = 0x0000_0001;
pub const FLAG_ACTIVITY_NEW_TASK: u32 = 0x1000_0000;

/// MIME type file managers register for directory views.
pub const MIME_FOLDER: &str = "resource/folder";
pub const MIME_ANY: &str = "*/*";

// ───────────────────────────────────────── component ─────────

/// Fully-qualified activity identity (`package` + `class`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentName {
    pub package: String,
    pub class: String,
}

impl ComponentName {
    pub fn new(package: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class: class.into(),
        }
    }

    /// `package/.Class` when the class lives inside the package, otherwise
    /// `package/fully.qualified.Class`.
    pub fn flatten_to_short_string(&self) -> String {
        match self.class.strip_prefix(&self.package) {
            Some(rest) if rest.starts_with('.') => format!("{}/{}", self.package, rest),
            _ => format!("{}/{}", self.package, self.class),
        }
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flatten_to_short_string())
    }
}

// ───────────────────────────────────────── extras ────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraValue {
    Uri(Url),
    Str(String),
}

// ───────────────────────────────────────── intent ────────────

/// A single request to start an activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub action: String,
    pub data: Option<Url>,
    pub mime_type: Option<String>,
    pub categories: Vec<String>,
    pub flags: u32,
    pub component: Option<ComponentName>,
    pub extras: Vec<(String, ExtraValue)>,
    /// Set only on chooser intents: the request the user picks a handler for.
    pub target: Option<Box<Intent>>,
}

impl Intent {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            data: None,
            mime_type: None,
            categories: Vec::new(),
            flags: 0,
            component: None,
            extras: Vec::new(),
            target: None,
        }
    }

    /// Wrap `target` in a system chooser dialog titled `title`.
    pub fn create_chooser(target: Intent, title: impl Into<String>) -> Self {
        let mut chooser = Intent::new(ACTION_CHOOSER);
        chooser
            .extras
            .push((EXTRA_TITLE.to_string(), ExtraValue::Str(title.into())));
        chooser.target = Some(Box::new(target));
        chooser
    }

    pub fn with_data_and_type(mut self, data: Url, mime_type: impl Into<String>) -> Self {
        self.data = Some(data);
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_component(mut self, component: ComponentName) -> Self {
        self.component = Some(component);
        self
    }

    pub fn add_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    pub fn add_flags(mut self, flags: u32) -> Self {
        self.flags |= flags;
        self
    }

    pub fn put_extra(mut self, key: impl Into<String>, value: ExtraValue) -> Self {
        self.extras.push((key.into(), value));
        self
    }

    pub fn is_chooser(&self) -> bool {
        self.action == ACTION_CHOOSER && self.target.is_some()
    }

    /// Chooser title, if this is a chooser intent.
    pub fn title(&self) -> Option<&str> {
        self.extras.iter().find_map(|(k, v)| match v {
            ExtraValue::Str(s) if k == EXTRA_TITLE => Some(s.as_str()),
            _ => None,
        })
    }
}
