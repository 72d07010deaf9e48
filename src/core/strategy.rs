//! The ways we know of asking the system to show a folder, in priority order.

use url::Url;

use super::context::{LaunchContext, SDK_NOUGAT};
use super::intent::{
    ComponentName, ExtraValue, Intent, ACTION_GET_CONTENT, ACTION_VIEW, CATEGORY_OPENABLE,
    EXTRA_INITIAL_URI, FLAG_ACTIVITY_NEW_TASK, FLAG_GRANT_READ_URI_PERMISSION, MIME_ANY,
    MIME_FOLDER,
};

pub const DOCUMENTS_UI_PACKAGE: &str = "com.android.documentsui";
pub const DOCUMENTS_UI_FILES_ACTIVITY: &str = "com.android.documentsui.files.FilesActivity";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `ACTION_VIEW` on the folder URI with the folder MIME type; any
    /// installed file manager may answer.
    ViewFolder,
    /// The platform's built-in documents browser, started explicitly.
    DocumentsUi,
    /// `GET_CONTENT` behind a chooser.  Resolves on practically every device.
    ContentChooser,
}

impl Strategy {
    /// Default chain, tried front to back.
    pub const ALL: &[Strategy] = &[
        Strategy::ViewFolder,
        Strategy::DocumentsUi,
        Strategy::ContentChooser,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Strategy::ViewFolder => "view-folder",
            Strategy::DocumentsUi => "documents-ui",
            Strategy::ContentChooser => "content-chooser",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.label() == label)
    }

    /// Whether a failed launch falls through to the next strategy.  The
    /// chooser is the last resort, so when it ends the chain its failure
    /// ends the attempt.
    pub fn falls_through(self) -> bool {
        !matches!(self, Strategy::ContentChooser)
    }

    /// Build the launch request for `folder`.
    pub fn build(self, folder: &Url, ctx: &LaunchContext) -> Intent {
        match self {
            Strategy::ViewFolder => {
                let mut intent = Intent::new(ACTION_VIEW)
                    .with_data_and_type(folder.clone(), MIME_FOLDER)
                    .add_flags(FLAG_ACTIVITY_NEW_TASK);
                if ctx.at_least(SDK_NOUGAT) {
                    intent = intent.add_flags(FLAG_GRANT_READ_URI_PERMISSION);
                }
                intent
            }
            Strategy::DocumentsUi => Intent::new(ACTION_VIEW)
                .with_component(ComponentName::new(
                    DOCUMENTS_UI_PACKAGE,
                    DOCUMENTS_UI_FILES_ACTIVITY,
                ))
                .put_extra(EXTRA_INITIAL_URI, ExtraValue::Uri(folder.clone()))
                .add_flags(FLAG_ACTIVITY_NEW_TASK),
            Strategy::ContentChooser => {
                let target = Intent::new(ACTION_GET_CONTENT)
                    .with_type(MIME_ANY)
                    .add_category(CATEGORY_OPENABLE)
                    .add_flags(FLAG_ACTIVITY_NEW_TASK);
                Intent::create_chooser(target, ctx.chooser_title.clone())
                    .add_flags(FLAG_ACTIVITY_NEW_TASK)
            }
        }
    }
}
