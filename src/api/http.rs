use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::PanelConfig;
use crate::error::ApiError;
use crate::models::{
    Course, CourseDraft, Enrollment, LoginResponse, Prerequisite, PrerequisiteDraft,
    RosterStudent, UnitConfig, WeeklySchedule,
};
use crate::session::{self, SharedSession};

use super::{AuthApi, CourseApi, PrerequisiteApi, ProfessorApi, SettingsApi, StudentApi, envelope};

/// Resource client over the real backend. One request path applies the
/// configured timeout, attaches the session's bearer token when present, and
/// normalizes error bodies into a single message.
pub struct HttpApi {
    client: Client,
    config: PanelConfig,
    session: SharedSession,
}

impl HttpApi {
    pub fn new(config: PanelConfig, session: SharedSession) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build http client: {e}")))?;
        Ok(Self {
            client,
            config,
            session,
        })
    }

    fn bearer(&self) -> Option<String> {
        // Token absence is not an error; some endpoints are public.
        session::read(&self.session).token().map(str::to_owned)
    }

    async fn request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!(%method, %url, "issuing request");

        let mut builder = self.client.request(method, &url);
        if let Some(token) = self.bearer() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: extract_error_message(status, &text),
            });
        }

        if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|e| ApiError::UnexpectedShape(format!("invalid json in response body: {e}")))
    }

    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request::<()>(Method::GET, path, None).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }
}

/// Compose the human-readable message for a non-2xx response, in priority
/// order: FastAPI `detail` (joining sub-errors), `message`, raw body text,
/// generic `HTTP <status>` fallback.
fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        match &value {
            Value::String(message) => return message.clone(),
            Value::Object(map) => {
                match map.get("detail") {
                    Some(Value::String(detail)) => return detail.clone(),
                    Some(Value::Array(parts)) => {
                        let joined = parts
                            .iter()
                            .map(|part| {
                                part.get("msg")
                                    .or_else(|| part.get("message"))
                                    .and_then(Value::as_str)
                                    .map(str::to_owned)
                                    .unwrap_or_else(|| part.to_string())
                            })
                            .collect::<Vec<_>>()
                            .join(", ");
                        if !joined.is_empty() {
                            return joined;
                        }
                    }
                    _ => {}
                }
                if let Some(Value::String(message)) = map.get("message") {
                    return message.clone();
                }
            }
            _ => {}
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    format!("HTTP {}", status.as_u16())
}

#[async_trait]
impl CourseApi for HttpApi {
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        let value = self.get("/api/courses").await?;
        envelope::records(value, "courses")
    }

    async fn add_course(&self, draft: &CourseDraft) -> Result<Course, ApiError> {
        let value = self.request(Method::POST, "/api/courses", Some(draft)).await?;
        envelope::record(value, "course")
    }

    async fn update_course(&self, id: i64, draft: &CourseDraft) -> Result<Course, ApiError> {
        let value = self
            .request(Method::PUT, &format!("/api/courses/{id}"), Some(draft))
            .await?;
        envelope::record(value, "course")
    }

    async fn delete_course(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/courses/{id}")).await
    }
}

#[async_trait]
impl PrerequisiteApi for HttpApi {
    async fn list_prerequisites(&self) -> Result<Vec<Prerequisite>, ApiError> {
        let value = self.get("/api/prerequisites").await?;
        envelope::records(value, "prerequisites")
    }

    async fn add_prerequisite(&self, draft: &PrerequisiteDraft) -> Result<Prerequisite, ApiError> {
        let value = self
            .request(Method::POST, "/api/prerequisites", Some(draft))
            .await?;
        envelope::record(value, "prerequisite")
    }

    async fn delete_prerequisite(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/prerequisites/{id}")).await
    }
}

#[async_trait]
impl SettingsApi for HttpApi {
    async fn unit_config(&self) -> Result<UnitConfig, ApiError> {
        let value = self.get("/api/settings/units").await?;
        if value.is_null() {
            // Backend has no stored policy yet.
            return Ok(UnitConfig::default());
        }
        envelope::record(value, "settings")
    }

    async fn save_unit_config(&self, config: &UnitConfig) -> Result<UnitConfig, ApiError> {
        let value = self
            .request(Method::PUT, "/api/settings/units", Some(config))
            .await?;
        envelope::record(value, "settings")
    }
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = serde_json::json!({ "username": username, "password": password });
        let value = self.request(Method::POST, "/auth/login", Some(&body)).await?;
        envelope::record(value, "login")
    }
}

#[async_trait]
impl StudentApi for HttpApi {
    async fn catalog(&self) -> Result<Vec<Course>, ApiError> {
        let value = self.get("/api/student/courses").await?;
        envelope::records(value, "courses")
    }

    async fn my_enrollments(&self) -> Result<Vec<Enrollment>, ApiError> {
        let value = self.get("/api/student/enrollments").await?;
        envelope::records(value, "enrollments")
    }

    async fn enroll(&self, course_id: i64) -> Result<(), ApiError> {
        let body = serde_json::json!({ "course_id": course_id });
        self.request(Method::POST, "/api/student/enrollments", Some(&body))
            .await?;
        Ok(())
    }

    async fn drop_course(&self, course_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/student/enrollments/{course_id}"))
            .await
    }

    async fn schedule(&self) -> Result<WeeklySchedule, ApiError> {
        let value = self.get("/api/student/schedule").await?;
        envelope::record(value, "schedule")
    }
}

#[async_trait]
impl ProfessorApi for HttpApi {
    async fn my_courses(&self) -> Result<Vec<Course>, ApiError> {
        let value = self.get("/api/professor/courses").await?;
        envelope::records(value, "courses")
    }

    async fn course_students(&self, course_id: i64) -> Result<Vec<RosterStudent>, ApiError> {
        let value = self
            .get(&format!("/api/professor/courses/{course_id}/students"))
            .await?;
        envelope::records(value, "students")
    }

    async fn remove_student(&self, course_id: i64, student_id: i64) -> Result<(), ApiError> {
        self.delete(&format!(
            "/api/professor/courses/{course_id}/students/{student_id}"
        ))
        .await
    }
}
