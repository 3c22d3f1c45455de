use serde::{Deserialize, Serialize};

/// Directed edge: taking `target_course_id` requires having passed
/// `prerequisite_course_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prerequisite {
    pub id: i64,
    pub target_course_id: i64,
    pub prerequisite_course_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrerequisiteDraft {
    pub target_course_id: i64,
    pub prerequisite_course_id: i64,
}

impl PrerequisiteDraft {
    pub fn is_self_edge(&self) -> bool {
        self.target_course_id == self.prerequisite_course_id
    }

    pub fn duplicates(&self, existing: &[Prerequisite]) -> bool {
        existing.iter().any(|p| {
            p.target_course_id == self.target_course_id
                && p.prerequisite_course_id == self.prerequisite_course_id
        })
    }
}
