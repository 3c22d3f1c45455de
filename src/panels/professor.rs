use std::sync::Arc;

use crate::api::ProfessorApi;
use crate::error::ApiError;
use crate::models::{Course, RosterStudent};

use super::{SubmitOutcome, conflict_copy};

/// Professor panel: own courses and the per-course student roster.
pub struct ProfessorPanel<A: ProfessorApi + ?Sized> {
    api: Arc<A>,
    courses: Vec<Course>,
    /// Roster of the course currently being managed, if any.
    roster: Option<(i64, Vec<RosterStudent>)>,
    removing: Option<i64>,
}

impl<A: ProfessorApi + ?Sized> ProfessorPanel<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            courses: Vec::new(),
            roster: None,
            removing: None,
        }
    }

    pub async fn load(&mut self) -> Result<(), ApiError> {
        self.courses = self.api.my_courses().await?;
        Ok(())
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn roster(&self) -> Option<(&Course, &[RosterStudent])> {
        let (course_id, students) = self.roster.as_ref()?;
        let course = self.courses.iter().find(|c| c.id == *course_id)?;
        Some((course, students.as_slice()))
    }

    /// Fetch and hold the roster for one of the professor's courses.
    pub async fn open_roster(&mut self, course_id: i64) -> Result<(), ApiError> {
        let students = self.api.course_students(course_id).await?;
        self.roster = Some((course_id, students));
        Ok(())
    }

    pub fn close_roster(&mut self) {
        self.roster = None;
    }

    /// Remove a student from the open roster, then refetch just that roster.
    /// The backend answers 409 when removal is locked for the in-progress
    /// term; that surfaces as a rejection message rather than an error.
    pub async fn remove_student(&mut self, student_id: i64) -> Result<SubmitOutcome, ApiError> {
        let Some(course_id) = self.roster.as_ref().map(|(id, _)| *id) else {
            return Ok(SubmitOutcome::Blocked);
        };
        if self.removing == Some(student_id) {
            return Ok(SubmitOutcome::Blocked);
        }

        self.removing = Some(student_id);
        let result = async {
            self.api.remove_student(course_id, student_id).await?;
            self.open_roster(course_id).await
        }
        .await;
        self.removing = None;

        match result {
            Ok(()) => Ok(SubmitOutcome::Saved),
            Err(err) => {
                match conflict_copy(&err, "Students cannot be removed during the current term") {
                    Some(copy) => Ok(SubmitOutcome::Rejected(copy)),
                    None => Err(err),
                }
            }
        }
    }
}
