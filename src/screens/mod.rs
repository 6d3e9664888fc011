//! Record Screens
//!
//! Role-gated state machines behind the Student Profile, Result Sheet and
//! Enquiry screens. They hold form state and talk to a [`RecordsApi`]; the
//! browser and the CLI only render them.
//!
//! Like the session store, each remote action is split into a synchronous
//! `begin_*`/`prepare_*` step and a `finish_*` step so a UI can run the
//! request between them. Nothing cancels a superseded request: whichever
//! response is applied last wins.
//!
//! [`RecordsApi`]: crate::api::RecordsApi

pub mod enquiry;
pub mod profile;
pub mod result;

pub use enquiry::EnquiryScreen;
pub use profile::ProfileScreen;
pub use result::{InfoField, ResultForm, ResultMode, ResultScreen, ResultSubmission, SubjectColumn, SubjectRow};

/// Kind of a blocking notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// Blocking notification produced by a save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

/// Placeholder for empty read-only cells
pub(crate) fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}
