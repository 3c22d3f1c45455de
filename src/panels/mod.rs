//! Per-role panel controllers. Every mutation follows the same protocol:
//! validate against the snapshot, call the resource client, reload the full
//! snapshot on success, recompute derived state. Failed mutations never touch
//! the snapshot, and the submitting flag is cleared on every path.

pub mod admin;
pub mod login;
pub mod prereq;
pub mod professor;
pub mod settings;
pub mod student;

pub use admin::CoursePanel;
pub use login::LoginFlow;
pub use prereq::PrerequisitePanel;
pub use professor::ProfessorPanel;
pub use settings::SettingsPanel;
pub use student::StudentPanel;

use crate::error::{ApiError, FieldError};

/// Lifecycle of an editable form (e.g. the course modal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Closed,
    Open {
        /// `Some(id)` in edit mode, `None` in add mode.
        editing: Option<i64>,
        errors: Vec<FieldError>,
    },
    Submitting,
}

impl FormState {
    pub fn open_add() -> Self {
        FormState::Open {
            editing: None,
            errors: Vec::new(),
        }
    }

    pub fn open_edit(id: i64) -> Self {
        FormState::Open {
            editing: Some(id),
            errors: Vec::new(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, FormState::Submitting)
    }
}

/// What happened to a submitted action, short of a transport/server error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Accepted by the backend; the snapshot has been reloaded.
    Saved,
    /// Field-level validation failed; nothing was sent.
    Invalid(Vec<FieldError>),
    /// A business rule (or a backend conflict) rejected it; nothing changed.
    Rejected(String),
    /// The same logical action is already in flight; ignored.
    Blocked,
}

/// Friendlier copy for an opaque backend conflict, keyed on the machine
/// status only. Returns `None` for everything that is not a 409.
pub fn conflict_copy(err: &ApiError, fallback: &str) -> Option<String> {
    if err.is_conflict() {
        Some(format!("{fallback} ({err})"))
    } else {
        None
    }
}
