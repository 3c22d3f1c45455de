//! Pure, side-effect-free validation. Safe to call on every keystroke as well
//! as on submit; uniqueness checks take the current snapshot and the id being
//! edited so a record never collides with itself.

use crate::error::FieldError;
use crate::models::{Course, CourseDraft, Prerequisite, PrerequisiteDraft, UnitConfig};

const MIN_CODE_LEN: usize = 2;
const MIN_NAME_LEN: usize = 3;
const MIN_DEPARTMENT_LEN: usize = 2;
const MIN_SEMESTER_LEN: usize = 3;
const UNIT_RANGE: std::ops::RangeInclusive<u32> = 1..=4;
const MAX_CAPACITY: u32 = 1000;

pub fn validate_course(
    draft: &CourseDraft,
    existing: &[Course],
    editing_id: Option<i64>,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if draft.code.is_empty() {
        errors.push(FieldError::new("course-code", "Course code is required."));
    } else if draft.code.len() < MIN_CODE_LEN {
        errors.push(FieldError::new(
            "course-code",
            "Course code must be at least 2 characters.",
        ));
    } else if !draft.code.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push(FieldError::new(
            "course-code",
            "Course code may only contain letters and digits.",
        ));
    } else if duplicate_code(&draft.code, existing, editing_id) {
        errors.push(FieldError::new(
            "course-code",
            format!("Course code \"{}\" is already in use.", draft.code),
        ));
    }

    if draft.name.is_empty() {
        errors.push(FieldError::new("course-name", "Course name is required."));
    } else if draft.name.len() < MIN_NAME_LEN {
        errors.push(FieldError::new(
            "course-name",
            "Course name must be at least 3 characters.",
        ));
    }

    if !UNIT_RANGE.contains(&draft.units) {
        errors.push(FieldError::new(
            "course-units",
            "Units must be between 1 and 4.",
        ));
    }

    if draft.department.is_empty() {
        errors.push(FieldError::new(
            "course-department",
            "Department is required.",
        ));
    } else if draft.department.len() < MIN_DEPARTMENT_LEN {
        errors.push(FieldError::new(
            "course-department",
            "Department must be at least 2 characters.",
        ));
    }

    if draft.semester.is_empty() {
        errors.push(FieldError::new("course-semester", "Semester is required."));
    } else if draft.semester.len() < MIN_SEMESTER_LEN {
        errors.push(FieldError::new(
            "course-semester",
            "Semester format is invalid. Example: 1403-1",
        ));
    }

    if draft.capacity == 0 {
        errors.push(FieldError::new(
            "course-capacity",
            "Capacity must be greater than 0.",
        ));
    } else if draft.capacity > MAX_CAPACITY {
        errors.push(FieldError::new(
            "course-capacity",
            "Capacity cannot exceed 1000.",
        ));
    }

    errors
}

fn duplicate_code(code: &str, existing: &[Course], editing_id: Option<i64>) -> bool {
    existing.iter().any(|course| {
        course.code.eq_ignore_ascii_case(code) && Some(course.id) != editing_id
    })
}

pub fn validate_unit_config(config: &UnitConfig) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if config.min_units == 0 {
        errors.push(FieldError::new(
            "min-units",
            "Minimum units must be a positive integer.",
        ));
    }
    if config.max_units == 0 {
        errors.push(FieldError::new(
            "max-units",
            "Maximum units must be a positive integer.",
        ));
    }
    if config.min_units > 0 && config.max_units > 0 && config.min_units >= config.max_units {
        errors.push(FieldError::new(
            "max-units",
            "Maximum units must be greater than minimum units.",
        ));
    }

    errors
}

pub fn validate_login(username: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if username.trim().is_empty() {
        errors.push(FieldError::new("username", "Username is required."));
    }
    if password.is_empty() {
        errors.push(FieldError::new("password", "Password is required."));
    }
    errors
}

/// Advisory unit-cap check before an enroll request. The backend remains the
/// source of truth and may still reject for reasons the client cannot see.
pub fn check_unit_cap(
    current_total: u32,
    course_units: u32,
    config: &UnitConfig,
) -> Result<(), String> {
    if current_total + course_units > config.max_units {
        Err(format!(
            "Enrolling would exceed the {} unit maximum (currently {} units).",
            config.max_units, current_total
        ))
    } else {
        Ok(())
    }
}

/// Advisory unit-floor check before a drop request; boundary inclusive.
pub fn check_unit_floor(
    current_total: u32,
    course_units: u32,
    config: &UnitConfig,
) -> Result<(), String> {
    if i64::from(current_total) - i64::from(course_units) < i64::from(config.min_units) {
        Err(format!(
            "Dropping would fall below the {} unit minimum (currently {} units).",
            config.min_units, current_total
        ))
    } else {
        Ok(())
    }
}

/// Self-edge and duplicate-pair rejection, applied before any network call.
/// The backend's check stays authoritative.
pub fn check_prerequisite(
    draft: &PrerequisiteDraft,
    existing: &[Prerequisite],
) -> Result<(), String> {
    if draft.is_self_edge() {
        return Err("Target and prerequisite course cannot be the same.".to_string());
    }
    if draft.duplicates(existing) {
        return Err("This prerequisite is already defined.".to_string());
    }
    Ok(())
}
