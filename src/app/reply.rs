//! What the caller receives: `true`, or a rejection with a code and message.

use serde::Serialize;

use crate::core::opener::OpenResult;

pub const ERROR_CODE: &str = "ERROR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeReply {
    Resolved(bool),
    Rejected { code: &'static str, message: String },
}

impl BridgeReply {
    pub fn is_resolved(&self) -> bool {
        matches!(self, BridgeReply::Resolved(_))
    }
}

impl From<OpenResult> for BridgeReply {
    fn from(result: OpenResult) -> Self {
        match result {
            OpenResult::Success => BridgeReply::Resolved(true),
            OpenResult::Failure(message) => BridgeReply::Rejected {
                code: ERROR_CODE,
                message,
            },
        }
    }
}
