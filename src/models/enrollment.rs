use serde::{Deserialize, Serialize};

use super::Course;

/// One student-course membership for a term, with the course snapshot the
/// backend embeds for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub term: String,
    #[serde(default)]
    pub course: Option<Course>,
}

impl Enrollment {
    /// Unit weight of this enrollment, 0 when the course snapshot is absent
    /// and cannot be resolved elsewhere.
    pub fn units(&self) -> u32 {
        self.course.as_ref().map(|c| c.units).unwrap_or(0)
    }
}
