use std::sync::Arc;

use tracing::info;

use crate::api::AdminApi;
use crate::error::ApiError;
use crate::models::{Course, CourseDraft};
use crate::session::{self, SharedSession};
use crate::state::{CourseFilter, LoadGate, LoadPlan, Snapshot, Summary, load_admin};
use crate::validate;

use super::{FormState, SubmitOutcome};

/// Admin course-management panel: catalog table with search and dropdown
/// filters, summary cards, and an add/edit modal.
pub struct CoursePanel<A: AdminApi + ?Sized> {
    api: Arc<A>,
    session: SharedSession,
    plan: LoadPlan,
    snapshot: Snapshot,
    filter: CourseFilter,
    form: FormState,
    gate: LoadGate,
}

impl<A: AdminApi + ?Sized> CoursePanel<A> {
    pub fn new(api: Arc<A>, session: SharedSession, plan: LoadPlan) -> Self {
        Self {
            api,
            session,
            plan,
            snapshot: Snapshot::default(),
            filter: CourseFilter::default(),
            form: FormState::Closed,
            gate: LoadGate::default(),
        }
    }

    /// Fetch all planned collections and replace the snapshot wholesale.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        let token = self.begin_load();
        let snapshot = load_admin(self.api.as_ref(), self.plan).await?;
        self.commit(token, snapshot);
        Ok(())
    }

    /// Take a load token; see [`commit`](Self::commit).
    pub fn begin_load(&mut self) -> u64 {
        self.gate.begin()
    }

    /// Install a loaded snapshot unless a newer load has started since the
    /// token was taken. Returns whether the snapshot was installed.
    pub fn commit(&mut self, token: u64, snapshot: Snapshot) -> bool {
        if !self.gate.is_current(token) {
            info!("discarding stale snapshot (newer load in flight)");
            return false;
        }
        self.snapshot = snapshot;
        true
    }

    /// Invalidate in-flight loads, e.g. when the view is torn down.
    pub fn teardown(&mut self) {
        self.gate.invalidate();
    }

    // --- derived read state ------------------------------------------------

    pub fn courses(&self) -> Vec<Course> {
        self.filter.apply(&self.snapshot.courses)
    }

    pub fn summary(&self) -> Summary {
        self.snapshot.summary()
    }

    pub fn departments(&self) -> Vec<String> {
        self.snapshot.departments()
    }

    pub fn semesters(&self) -> Vec<String> {
        self.snapshot.semesters()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    // --- filters -----------------------------------------------------------

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filter.search = query.into();
    }

    pub fn set_department_filter(&mut self, department: Option<String>) {
        self.filter.department = department;
    }

    pub fn set_semester_filter(&mut self, semester: Option<String>) {
        self.filter.semester = semester;
    }

    // --- form lifecycle ----------------------------------------------------

    pub fn open_add(&mut self) {
        if !self.form.is_submitting() {
            self.form = FormState::open_add();
        }
    }

    /// Open the edit modal for an existing course; no-op for unknown ids.
    pub fn open_edit(&mut self, id: i64) -> bool {
        if self.form.is_submitting() || self.snapshot.course(id).is_none() {
            return false;
        }
        self.form = FormState::open_edit(id);
        true
    }

    pub fn close_form(&mut self) {
        if !self.form.is_submitting() {
            self.form = FormState::Closed;
        }
    }

    /// Submit the open form. Validation failures keep the form open with
    /// field errors; transport/server errors reopen the form and propagate.
    pub async fn submit(&mut self, draft: CourseDraft) -> Result<SubmitOutcome, ApiError> {
        let editing = match &self.form {
            FormState::Submitting => return Ok(SubmitOutcome::Blocked),
            FormState::Closed => return Ok(SubmitOutcome::Blocked),
            FormState::Open { editing, .. } => *editing,
        };

        let errors = validate::validate_course(&draft, &self.snapshot.courses, editing);
        if !errors.is_empty() {
            self.form = FormState::Open {
                editing,
                errors: errors.clone(),
            };
            return Ok(SubmitOutcome::Invalid(errors));
        }

        self.form = FormState::Submitting;
        let result = async {
            match editing {
                Some(id) => {
                    self.api.update_course(id, &draft).await?;
                }
                None => {
                    self.api.add_course(&draft).await?;
                }
            }
            self.load().await
        }
        .await;

        match result {
            Ok(()) => {
                self.form = FormState::Closed;
                Ok(SubmitOutcome::Saved)
            }
            Err(err) => {
                // guaranteed cleanup: never leave the form stuck submitting
                self.form = FormState::Open {
                    editing,
                    errors: Vec::new(),
                };
                Err(err)
            }
        }
    }

    /// Confirmation copy for deleting a course; `None` for unknown ids.
    pub fn delete_prompt(&self, id: i64) -> Option<String> {
        let course = self.snapshot.course(id)?;
        Some(format!(
            "Delete course \"{}\" ({})? This cannot be undone.",
            course.name, course.code
        ))
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), ApiError> {
        self.api.delete_course(id).await?;
        self.load().await
    }

    // --- navigation --------------------------------------------------------

    pub fn set_active_tab(&self, tab: impl Into<String>) {
        session::write(&self.session).set_active_tab(tab);
    }

    pub fn active_tab(&self) -> String {
        session::read(&self.session).active_tab().to_string()
    }
}
