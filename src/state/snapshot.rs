use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::api::{AdminApi, StudentPanelApi};
use crate::error::ApiError;
use crate::models::{Course, Enrollment, Prerequisite, UnitConfig};

/// Which optional collections a panel wants loaded alongside the courses.
/// One parameterized loader instead of one hand-rolled load routine per panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadPlan {
    pub prerequisites: bool,
    pub enrollments: bool,
    pub unit_config: bool,
}

impl LoadPlan {
    pub fn full() -> Self {
        Self {
            prerequisites: true,
            enrollments: true,
            unit_config: true,
        }
    }

    pub fn courses_only() -> Self {
        Self::default()
    }
}

/// The last successfully fetched copy of the resource collections. Replaced
/// wholesale on every load; mutations never patch it in place.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub courses: Vec<Course>,
    pub prerequisites: Vec<Prerequisite>,
    pub enrollments: Vec<Enrollment>,
    pub unit_config: UnitConfig,
    course_index: HashMap<i64, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_courses: usize,
    pub total_capacity: u32,
    pub total_enrolled: u32,
}

impl Snapshot {
    pub fn assemble(
        courses: Vec<Course>,
        prerequisites: Vec<Prerequisite>,
        enrollments: Vec<Enrollment>,
        unit_config: UnitConfig,
    ) -> Self {
        let course_index = courses
            .iter()
            .enumerate()
            .map(|(pos, c)| (c.id, pos))
            .collect();
        Self {
            courses,
            prerequisites,
            enrollments,
            unit_config,
            course_index,
        }
    }

    /// Resolve a course by id without a linear scan.
    pub fn course(&self, id: i64) -> Option<&Course> {
        self.course_index.get(&id).map(|&pos| &self.courses[pos])
    }

    /// Course name for display, falling back to the raw id when the foreign
    /// key no longer resolves.
    pub fn course_name(&self, id: i64) -> String {
        self.course(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("ID {id}"))
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total_courses: self.courses.len(),
            total_capacity: self.courses.iter().map(|c| c.capacity).sum(),
            total_enrolled: self.courses.iter().map(|c| c.enrolled).sum(),
        }
    }

    /// Distinct departments, for the filter dropdown.
    pub fn departments(&self) -> Vec<String> {
        let mut distinct: Vec<String> = Vec::new();
        for course in &self.courses {
            if !course.department.is_empty() && !distinct.contains(&course.department) {
                distinct.push(course.department.clone());
            }
        }
        distinct
    }

    /// Distinct semesters, sorted, for the filter dropdown.
    pub fn semesters(&self) -> Vec<String> {
        let mut distinct: Vec<String> = Vec::new();
        for course in &self.courses {
            if !course.semester.is_empty() && !distinct.contains(&course.semester) {
                distinct.push(course.semester.clone());
            }
        }
        distinct.sort();
        distinct
    }

    /// Total units across the student's active enrollments, resolving the
    /// course through the catalog when the embedded snapshot is missing.
    pub fn total_enrolled_units(&self) -> u32 {
        self.enrollments
            .iter()
            .map(|e| match &e.course {
                Some(course) => course.units,
                None => self.course(e.course_id).map(|c| c.units).unwrap_or(0),
            })
            .sum()
    }

    /// Prerequisite courses of `course_id`, resolved against the catalog.
    pub fn prerequisites_of(&self, course_id: i64) -> Vec<&Course> {
        self.prerequisites
            .iter()
            .filter(|p| p.target_course_id == course_id)
            .filter_map(|p| self.course(p.prerequisite_course_id))
            .collect()
    }
}

/// Load the admin collections concurrently. Courses failing is a hard error;
/// every optional collection degrades independently so one unavailable
/// resource does not blank the whole panel.
pub async fn load_admin<A: AdminApi + ?Sized>(
    api: &A,
    plan: LoadPlan,
) -> Result<Snapshot, ApiError> {
    let (courses, prerequisites, unit_config) = tokio::join!(
        api.list_courses(),
        fetch_if(plan.prerequisites, api.list_prerequisites()),
        fetch_if(plan.unit_config, api.unit_config()),
    );

    let courses = courses?;
    let prerequisites = degrade("prerequisites", prerequisites).unwrap_or_default();
    let unit_config = degrade("settings", unit_config).unwrap_or_default();

    Ok(Snapshot::assemble(
        courses,
        prerequisites,
        Vec::new(),
        unit_config,
    ))
}

/// Student variant: catalog via the student endpoints, plus enrollments.
pub async fn load_student<A: StudentPanelApi + ?Sized>(
    api: &A,
    plan: LoadPlan,
) -> Result<Snapshot, ApiError> {
    let (courses, prerequisites, enrollments, unit_config) = tokio::join!(
        api.catalog(),
        fetch_if(plan.prerequisites, api.list_prerequisites()),
        fetch_if(plan.enrollments, api.my_enrollments()),
        fetch_if(plan.unit_config, api.unit_config()),
    );

    let courses = courses?;
    let prerequisites = degrade("prerequisites", prerequisites).unwrap_or_default();
    let enrollments = degrade("enrollments", enrollments).unwrap_or_default();
    let unit_config = degrade("settings", unit_config).unwrap_or_default();

    Ok(Snapshot::assemble(
        courses,
        prerequisites,
        enrollments,
        unit_config,
    ))
}

async fn fetch_if<T>(
    wanted: bool,
    fut: impl Future<Output = Result<T, ApiError>>,
) -> Option<Result<T, ApiError>> {
    if wanted { Some(fut.await) } else { None }
}

/// Collapse an optional fetch result, logging and discarding the failure so
/// the caller falls back to the collection's default.
fn degrade<T>(resource: &str, outcome: Option<Result<T, ApiError>>) -> Option<T> {
    match outcome {
        Some(Ok(value)) => Some(value),
        Some(Err(err)) => {
            warn!(resource, %err, "collection fetch failed; degrading to default");
            None
        }
        None => None,
    }
}
