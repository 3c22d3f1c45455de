pub mod envelope;
pub mod http;
pub mod mock;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{
    Course, CourseDraft, Enrollment, LoginResponse, Prerequisite, PrerequisiteDraft,
    RosterStudent, UnitConfig, WeeklySchedule,
};

pub use http::HttpApi;
pub use mock::MockApi;

/// Admin CRUD over the course catalog.
#[async_trait]
pub trait CourseApi: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError>;
    async fn add_course(&self, draft: &CourseDraft) -> Result<Course, ApiError>;
    async fn update_course(&self, id: i64, draft: &CourseDraft) -> Result<Course, ApiError>;
    async fn delete_course(&self, id: i64) -> Result<(), ApiError>;
}

#[async_trait]
pub trait PrerequisiteApi: Send + Sync {
    async fn list_prerequisites(&self) -> Result<Vec<Prerequisite>, ApiError>;
    async fn add_prerequisite(&self, draft: &PrerequisiteDraft) -> Result<Prerequisite, ApiError>;
    async fn delete_prerequisite(&self, id: i64) -> Result<(), ApiError>;
}

#[async_trait]
pub trait SettingsApi: Send + Sync {
    async fn unit_config(&self) -> Result<UnitConfig, ApiError>;
    async fn save_unit_config(&self, config: &UnitConfig) -> Result<UnitConfig, ApiError>;
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;
}

/// Student-facing catalog and enrollment operations.
#[async_trait]
pub trait StudentApi: Send + Sync {
    async fn catalog(&self) -> Result<Vec<Course>, ApiError>;
    async fn my_enrollments(&self) -> Result<Vec<Enrollment>, ApiError>;
    async fn enroll(&self, course_id: i64) -> Result<(), ApiError>;
    async fn drop_course(&self, course_id: i64) -> Result<(), ApiError>;
    async fn schedule(&self) -> Result<WeeklySchedule, ApiError>;
}

#[async_trait]
pub trait ProfessorApi: Send + Sync {
    async fn my_courses(&self) -> Result<Vec<Course>, ApiError>;
    async fn course_students(&self, course_id: i64) -> Result<Vec<RosterStudent>, ApiError>;
    async fn remove_student(&self, course_id: i64, student_id: i64) -> Result<(), ApiError>;
}

/// Everything the admin panel loads.
pub trait AdminApi: CourseApi + PrerequisiteApi + SettingsApi {}
impl<T: CourseApi + PrerequisiteApi + SettingsApi> AdminApi for T {}

/// Everything the student panel loads.
pub trait StudentPanelApi: StudentApi + PrerequisiteApi + SettingsApi {}
impl<T: StudentApi + PrerequisiteApi + SettingsApi> StudentPanelApi for T {}
