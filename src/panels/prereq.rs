use std::sync::Arc;

use crate::api::AdminApi;
use crate::error::ApiError;
use crate::models::{Course, PrerequisiteDraft};
use crate::state::{LoadGate, LoadPlan, Snapshot, load_admin};
use crate::validate;

use super::SubmitOutcome;

/// One row of the prerequisites table, foreign keys resolved to names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerequisiteRow {
    pub id: i64,
    pub target: String,
    pub prerequisite: String,
}

/// Admin prerequisites panel: directed edges between catalog courses.
pub struct PrerequisitePanel<A: AdminApi + ?Sized> {
    api: Arc<A>,
    snapshot: Snapshot,
    submitting: bool,
    gate: LoadGate,
}

impl<A: AdminApi + ?Sized> PrerequisitePanel<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            snapshot: Snapshot::default(),
            submitting: false,
            gate: LoadGate::default(),
        }
    }

    pub async fn load(&mut self) -> Result<(), ApiError> {
        let token = self.gate.begin();
        let plan = LoadPlan {
            prerequisites: true,
            ..LoadPlan::default()
        };
        let snapshot = load_admin(self.api.as_ref(), plan).await?;
        if self.gate.is_current(token) {
            self.snapshot = snapshot;
        }
        Ok(())
    }

    /// Courses for the target/prerequisite dropdowns.
    pub fn course_options(&self) -> &[Course] {
        &self.snapshot.courses
    }

    pub fn rows(&self) -> Vec<PrerequisiteRow> {
        self.snapshot
            .prerequisites
            .iter()
            .map(|p| PrerequisiteRow {
                id: p.id,
                target: self.snapshot.course_name(p.target_course_id),
                prerequisite: self.snapshot.course_name(p.prerequisite_course_id),
            })
            .collect()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Add an edge. Self-referential and duplicate edges are rejected against
    /// the snapshot before any request is issued.
    pub async fn add(&mut self, draft: PrerequisiteDraft) -> Result<SubmitOutcome, ApiError> {
        if self.submitting {
            return Ok(SubmitOutcome::Blocked);
        }
        if let Err(message) = validate::check_prerequisite(&draft, &self.snapshot.prerequisites) {
            return Ok(SubmitOutcome::Rejected(message));
        }

        self.submitting = true;
        let result = async {
            self.api.add_prerequisite(&draft).await?;
            self.load().await
        }
        .await;
        self.submitting = false;

        result.map(|()| SubmitOutcome::Saved)
    }

    pub fn delete_prompt(&self, id: i64) -> Option<String> {
        let edge = self.snapshot.prerequisites.iter().find(|p| p.id == id)?;
        Some(format!(
            "Remove \"{}\" as a prerequisite of \"{}\"?",
            self.snapshot.course_name(edge.prerequisite_course_id),
            self.snapshot.course_name(edge.target_course_id)
        ))
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), ApiError> {
        self.api.delete_prerequisite(id).await?;
        self.load().await
    }
}
