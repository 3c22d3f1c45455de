//! In-memory implementation of the resource-client traits.
//!
//! Stands in for the backend during development and tests: records live in a
//! mutex-guarded store, mutating calls apply the same rejection rules the
//! backend enforces (duplicate edges, duplicate enrollment, capacity), and
//! per-operation call counters let tests prove that a locally rejected
//! submission never reached the network.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveTime;

use crate::error::ApiError;
use crate::models::{
    Course, CourseDraft, DayOfWeek, Enrollment, LoginResponse, Prerequisite, PrerequisiteDraft,
    Role, RosterStudent, UnitConfig, User, WeeklySchedule,
};

use super::{AuthApi, CourseApi, PrerequisiteApi, ProfessorApi, SettingsApi, StudentApi};

#[derive(Debug, Default, Clone, Copy)]
pub struct CallCounts {
    pub add_course: usize,
    pub update_course: usize,
    pub delete_course: usize,
    pub add_prerequisite: usize,
    pub delete_prerequisite: usize,
    pub enroll: usize,
    pub drop_course: usize,
    pub remove_student: usize,
}

/// Which collections should fail to fetch, for exercising degraded loads.
#[derive(Debug, Default, Clone, Copy)]
pub struct FaultFlags {
    pub courses: bool,
    pub prerequisites: bool,
    pub settings: bool,
    pub enrollments: bool,
}

#[derive(Default)]
struct Store {
    courses: Vec<Course>,
    prerequisites: Vec<Prerequisite>,
    enrollments: Vec<Enrollment>,
    unit_config: UnitConfig,
    roster: Vec<RosterStudent>,
    calls: CallCounts,
    faults: FaultFlags,
}

pub struct MockApi {
    store: Mutex<Store>,
}

fn conflict(message: &str) -> ApiError {
    ApiError::Status {
        status: 409,
        message: message.to_string(),
    }
}

fn not_found(message: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        message: message.to_string(),
    }
}

fn fetch_failed(resource: &str) -> ApiError {
    ApiError::Network(format!("mock fault: {resource} unavailable"))
}

impl MockApi {
    fn lock(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store::default()),
        }
    }

    /// The fixture catalog the original development mode shipped with.
    pub fn seeded() -> Self {
        let api = Self::new();
        {
            let mut store = api.lock();
            store.courses = fixture_courses();
            store.prerequisites = vec![
                Prerequisite {
                    id: 1,
                    target_course_id: 2,
                    prerequisite_course_id: 1,
                },
                Prerequisite {
                    id: 2,
                    target_course_id: 4,
                    prerequisite_course_id: 3,
                },
            ];
            store.roster = vec![
                RosterStudent {
                    student_id: 101,
                    student_number: "40012345".to_string(),
                    full_name: "Sara Mohammadi".to_string(),
                    email: Some("sara@example.edu".to_string()),
                },
                RosterStudent {
                    student_id: 102,
                    student_number: "40012346".to_string(),
                    full_name: "Omid Karimi".to_string(),
                    email: None,
                },
            ];
        }
        api
    }

    pub fn calls(&self) -> CallCounts {
        self.lock().calls
    }

    pub fn set_faults(&self, faults: FaultFlags) {
        self.lock().faults = faults;
    }

    pub fn set_unit_config(&self, config: UnitConfig) {
        self.lock().unit_config = config;
    }

    pub fn push_course(&self, course: Course) {
        self.lock().courses.push(course);
    }

    /// Enroll the mock student directly, bypassing backend checks; for
    /// seeding test scenarios.
    pub fn seed_enrollment(&self, course_id: i64) {
        let mut store = self.lock();
        let course = store.courses.iter().find(|c| c.id == course_id).cloned();
        let id = store.enrollments.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let term = course
            .as_ref()
            .map(|c| c.semester.clone())
            .unwrap_or_default();
        store.enrollments.push(Enrollment {
            id,
            student_id: 101,
            course_id,
            term,
            course,
        });
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CourseApi for MockApi {
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        let store = self.lock();
        if store.faults.courses {
            return Err(fetch_failed("courses"));
        }
        Ok(store.courses.clone())
    }

    async fn add_course(&self, draft: &CourseDraft) -> Result<Course, ApiError> {
        let mut store = self.lock();
        store.calls.add_course += 1;
        let id = store.courses.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let course = course_from_draft(id, 0, draft);
        store.courses.push(course.clone());
        Ok(course)
    }

    async fn update_course(&self, id: i64, draft: &CourseDraft) -> Result<Course, ApiError> {
        let mut store = self.lock();
        store.calls.update_course += 1;
        let Some(existing) = store.courses.iter_mut().find(|c| c.id == id) else {
            return Err(not_found("course not found"));
        };
        *existing = course_from_draft(id, existing.enrolled, draft);
        Ok(existing.clone())
    }

    async fn delete_course(&self, id: i64) -> Result<(), ApiError> {
        let mut store = self.lock();
        store.calls.delete_course += 1;
        let before = store.courses.len();
        store.courses.retain(|c| c.id != id);
        if store.courses.len() == before {
            return Err(not_found("course not found"));
        }
        Ok(())
    }
}

#[async_trait]
impl PrerequisiteApi for MockApi {
    async fn list_prerequisites(&self) -> Result<Vec<Prerequisite>, ApiError> {
        let store = self.lock();
        if store.faults.prerequisites {
            return Err(fetch_failed("prerequisites"));
        }
        Ok(store.prerequisites.clone())
    }

    async fn add_prerequisite(&self, draft: &PrerequisiteDraft) -> Result<Prerequisite, ApiError> {
        let mut store = self.lock();
        store.calls.add_prerequisite += 1;
        if draft.is_self_edge() {
            return Err(conflict("a course cannot be its own prerequisite"));
        }
        if draft.duplicates(&store.prerequisites) {
            return Err(conflict("prerequisite already defined"));
        }
        let id = store.prerequisites.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let edge = Prerequisite {
            id,
            target_course_id: draft.target_course_id,
            prerequisite_course_id: draft.prerequisite_course_id,
        };
        store.prerequisites.push(edge.clone());
        Ok(edge)
    }

    async fn delete_prerequisite(&self, id: i64) -> Result<(), ApiError> {
        let mut store = self.lock();
        store.calls.delete_prerequisite += 1;
        store.prerequisites.retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait]
impl SettingsApi for MockApi {
    async fn unit_config(&self) -> Result<UnitConfig, ApiError> {
        let store = self.lock();
        if store.faults.settings {
            return Err(fetch_failed("settings"));
        }
        Ok(store.unit_config)
    }

    async fn save_unit_config(&self, config: &UnitConfig) -> Result<UnitConfig, ApiError> {
        let mut store = self.lock();
        store.unit_config = *config;
        Ok(*config)
    }
}

#[async_trait]
impl AuthApi for MockApi {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let user = match (username, password) {
            ("admin", "admin123") => User {
                username: "admin".to_string(),
                role: Role::Admin,
                id: None,
            },
            ("std1", "1234") => User {
                username: "std1".to_string(),
                role: Role::Student,
                id: Some(101),
            },
            ("prof1", "1234") => User {
                username: "prof1".to_string(),
                role: Role::Professor,
                id: Some(201),
            },
            _ => {
                return Err(ApiError::Status {
                    status: 401,
                    message: "invalid username or password".to_string(),
                });
            }
        };
        Ok(LoginResponse {
            access_token: format!("mock_token_{username}"),
            token_type: "bearer".to_string(),
            user,
        })
    }
}

#[async_trait]
impl StudentApi for MockApi {
    async fn catalog(&self) -> Result<Vec<Course>, ApiError> {
        self.list_courses().await
    }

    async fn my_enrollments(&self) -> Result<Vec<Enrollment>, ApiError> {
        let store = self.lock();
        if store.faults.enrollments {
            return Err(fetch_failed("enrollments"));
        }
        Ok(store.enrollments.clone())
    }

    async fn enroll(&self, course_id: i64) -> Result<(), ApiError> {
        let mut store = self.lock();
        store.calls.enroll += 1;
        let Some(course) = store.courses.iter().find(|c| c.id == course_id).cloned() else {
            return Err(not_found("course not found"));
        };
        if store.enrollments.iter().any(|e| e.course_id == course_id) {
            return Err(conflict("already enrolled in this course"));
        }
        if course.is_full() {
            return Err(conflict("course is full"));
        }
        let id = store.enrollments.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        store.enrollments.push(Enrollment {
            id,
            student_id: 101,
            course_id,
            term: course.semester.clone(),
            course: Some(course),
        });
        Ok(())
    }

    async fn drop_course(&self, course_id: i64) -> Result<(), ApiError> {
        let mut store = self.lock();
        store.calls.drop_course += 1;
        let before = store.enrollments.len();
        store.enrollments.retain(|e| e.course_id != course_id);
        if store.enrollments.len() == before {
            return Err(not_found("not enrolled in this course"));
        }
        Ok(())
    }

    async fn schedule(&self) -> Result<WeeklySchedule, ApiError> {
        let store = self.lock();
        let term = store
            .enrollments
            .first()
            .map(|e| e.term.clone())
            .unwrap_or_default();
        Ok(WeeklySchedule {
            term,
            days: Vec::new(),
        })
    }
}

#[async_trait]
impl ProfessorApi for MockApi {
    async fn my_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.list_courses().await
    }

    async fn course_students(&self, _course_id: i64) -> Result<Vec<RosterStudent>, ApiError> {
        let store = self.lock();
        Ok(store.roster.clone())
    }

    async fn remove_student(&self, _course_id: i64, student_id: i64) -> Result<(), ApiError> {
        let mut store = self.lock();
        store.calls.remove_student += 1;
        let before = store.roster.len();
        store.roster.retain(|s| s.student_id != student_id);
        if store.roster.len() == before {
            // The backend locks removals for the in-progress term with a 409.
            return Err(conflict("cannot remove student in the current term"));
        }
        Ok(())
    }
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid fixture time")
}

fn course_from_draft(id: i64, enrolled: u32, draft: &CourseDraft) -> Course {
    Course {
        id,
        code: draft.code.clone(),
        name: draft.name.clone(),
        units: draft.units,
        department: draft.department.clone(),
        semester: draft.semester.clone(),
        professor_name: draft.professor_name.clone(),
        day_of_week: draft.day_of_week,
        start_time: draft.start_time,
        end_time: draft.end_time,
        location: draft.location.clone(),
        capacity: draft.capacity,
        enrolled,
    }
}

fn fixture_courses() -> Vec<Course> {
    vec![
        Course {
            id: 1,
            code: "CS101".to_string(),
            name: "Intro to Computer Science".to_string(),
            units: 3,
            department: "Computer Science".to_string(),
            semester: "1403-1".to_string(),
            professor_name: "Dr. Rezaei".to_string(),
            day_of_week: DayOfWeek::Sat,
            start_time: time(8, 0),
            end_time: time(9, 30),
            location: "Room 101".to_string(),
            capacity: 40,
            enrolled: 35,
        },
        Course {
            id: 2,
            code: "CS102".to_string(),
            name: "Advanced Programming".to_string(),
            units: 3,
            department: "Computer Science".to_string(),
            semester: "1403-1".to_string(),
            professor_name: "Dr. Ahmadi".to_string(),
            day_of_week: DayOfWeek::Mon,
            start_time: time(10, 0),
            end_time: time(11, 30),
            location: "Computer Lab".to_string(),
            capacity: 30,
            enrolled: 28,
        },
        Course {
            id: 3,
            code: "MATH101".to_string(),
            name: "Calculus I".to_string(),
            units: 3,
            department: "Mathematics".to_string(),
            semester: "1403-1".to_string(),
            professor_name: "Dr. Maryami".to_string(),
            day_of_week: DayOfWeek::Sun,
            start_time: time(14, 0),
            end_time: time(16, 0),
            location: "Hall 1".to_string(),
            capacity: 50,
            enrolled: 12,
        },
        Course {
            id: 4,
            code: "PHYS101".to_string(),
            name: "Physics I".to_string(),
            units: 3,
            department: "Physics".to_string(),
            semester: "1403-1".to_string(),
            professor_name: "Dr. Kamali".to_string(),
            day_of_week: DayOfWeek::Wed,
            start_time: time(8, 0),
            end_time: time(10, 0),
            location: "Physics Lab".to_string(),
            capacity: 35,
            enrolled: 35,
        },
    ]
}
