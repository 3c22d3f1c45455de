use std::sync::Arc;

use crate::api::StudentPanelApi;
use crate::error::ApiError;
use crate::models::{Course, Enrollment, WeeklySchedule};
use crate::state::{CourseFilter, LoadGate, LoadPlan, SearchScope, Snapshot, load_student};
use crate::validate;

use super::{SubmitOutcome, conflict_copy};

/// Student panel: term-scoped catalog, enrollments with the unit cap/floor
/// guards, and the weekly schedule.
pub struct StudentPanel<A: StudentPanelApi + ?Sized> {
    api: Arc<A>,
    current_term: String,
    snapshot: Snapshot,
    filter: CourseFilter,
    /// Course id of the enroll/drop currently in flight. Blocks re-entrant
    /// submission of the same action; unrelated actions are not serialized.
    enrolling: Option<i64>,
    dropping: Option<i64>,
    gate: LoadGate,
}

impl<A: StudentPanelApi + ?Sized> StudentPanel<A> {
    pub fn new(api: Arc<A>, current_term: impl Into<String>) -> Self {
        Self {
            api,
            current_term: current_term.into(),
            snapshot: Snapshot::default(),
            filter: CourseFilter {
                scope: SearchScope::CodeName,
                ..CourseFilter::default()
            },
            enrolling: None,
            dropping: None,
            gate: LoadGate::default(),
        }
    }

    pub async fn load(&mut self) -> Result<(), ApiError> {
        let token = self.gate.begin();
        let snapshot = load_student(self.api.as_ref(), LoadPlan::full()).await?;
        if self.gate.is_current(token) {
            self.snapshot = snapshot;
        }
        Ok(())
    }

    pub fn teardown(&mut self) {
        self.gate.invalidate();
    }

    // --- derived read state ------------------------------------------------

    /// Catalog restricted to the current term, then the active search filter.
    pub fn catalog(&self) -> Vec<Course> {
        let term_courses: Vec<Course> = self
            .snapshot
            .courses
            .iter()
            .filter(|c| c.semester == self.current_term)
            .cloned()
            .collect();
        self.filter.apply(&term_courses)
    }

    pub fn enrollments(&self) -> &[Enrollment] {
        &self.snapshot.enrollments
    }

    pub fn total_units(&self) -> u32 {
        self.snapshot.total_enrolled_units()
    }

    pub fn course_prerequisites(&self, course_id: i64) -> Vec<&Course> {
        self.snapshot.prerequisites_of(course_id)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filter.search = query.into();
    }

    pub fn set_search_scope(&mut self, scope: SearchScope) {
        self.filter.scope = scope;
    }

    // --- mutations ---------------------------------------------------------

    /// Enroll in a catalog course. Rejected locally when the unit cap would
    /// be exceeded; backend 409s surface as an opaque-conflict message.
    pub async fn enroll(&mut self, course_id: i64) -> Result<SubmitOutcome, ApiError> {
        if self.enrolling == Some(course_id) {
            return Ok(SubmitOutcome::Blocked);
        }
        let Some(course) = self.snapshot.course(course_id) else {
            return Ok(SubmitOutcome::Rejected("Unknown course.".to_string()));
        };
        if let Err(message) = validate::check_unit_cap(
            self.total_units(),
            course.units,
            &self.snapshot.unit_config,
        ) {
            return Ok(SubmitOutcome::Rejected(message));
        }

        self.enrolling = Some(course_id);
        let result = async {
            self.api.enroll(course_id).await?;
            self.load().await
        }
        .await;
        self.enrolling = None;

        match result {
            Ok(()) => Ok(SubmitOutcome::Saved),
            Err(err) => match conflict_copy(&err, "Enrollment was rejected by the registrar") {
                Some(copy) => Ok(SubmitOutcome::Rejected(copy)),
                None => Err(err),
            },
        }
    }

    /// Drop an enrolled course. Rejected locally when the total would fall
    /// below the unit floor.
    pub async fn drop_course(&mut self, course_id: i64) -> Result<SubmitOutcome, ApiError> {
        if self.dropping == Some(course_id) {
            return Ok(SubmitOutcome::Blocked);
        }
        let units = match self.snapshot.course(course_id) {
            Some(course) => course.units,
            None => self
                .snapshot
                .enrollments
                .iter()
                .find(|e| e.course_id == course_id)
                .map(Enrollment::units)
                .unwrap_or(0),
        };
        if let Err(message) = validate::check_unit_floor(
            self.total_units(),
            units,
            &self.snapshot.unit_config,
        ) {
            return Ok(SubmitOutcome::Rejected(message));
        }

        self.dropping = Some(course_id);
        let result = async {
            self.api.drop_course(course_id).await?;
            self.load().await
        }
        .await;
        self.dropping = None;

        match result {
            Ok(()) => Ok(SubmitOutcome::Saved),
            Err(err) => match conflict_copy(&err, "Drop was rejected by the registrar") {
                Some(copy) => Ok(SubmitOutcome::Rejected(copy)),
                None => Err(err),
            },
        }
    }

    pub async fn schedule(&self) -> Result<WeeklySchedule, ApiError> {
        self.api.schedule().await
    }
}
