use crate::models::Course;

/// Which text fields the substring search runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// Admin table search: code, name, or department.
    #[default]
    CodeNameDepartment,
    /// Student catalog "course mix": code or name.
    CodeName,
    Department,
    Semester,
    ProfessorName,
    Location,
}

/// Pure filter over a course snapshot: case-insensitive substring search plus
/// exact-match dropdowns. Linear scan; fine at tens-to-hundreds of records.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub search: String,
    pub scope: SearchScope,
    pub department: Option<String>,
    pub semester: Option<String>,
}

impl CourseFilter {
    pub fn apply(&self, courses: &[Course]) -> Vec<Course> {
        let query = self.search.trim().to_lowercase();

        courses
            .iter()
            .filter(|c| query.is_empty() || self.matches_search(c, &query))
            .filter(|c| {
                self.department
                    .as_ref()
                    .is_none_or(|dept| &c.department == dept)
            })
            .filter(|c| self.semester.as_ref().is_none_or(|sem| &c.semester == sem))
            .cloned()
            .collect()
    }

    fn matches_search(&self, course: &Course, query: &str) -> bool {
        let hit = |field: &str| field.to_lowercase().contains(query);
        match self.scope {
            SearchScope::CodeNameDepartment => {
                hit(&course.code) || hit(&course.name) || hit(&course.department)
            }
            SearchScope::CodeName => hit(&course.code) || hit(&course.name),
            SearchScope::Department => hit(&course.department),
            SearchScope::Semester => hit(&course.semester),
            SearchScope::ProfessorName => hit(&course.professor_name),
            SearchScope::Location => hit(&course.location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayOfWeek;
    use chrono::NaiveTime;

    fn course(id: i64, code: &str, name: &str, department: &str, semester: &str) -> Course {
        Course {
            id,
            code: code.to_string(),
            name: name.to_string(),
            units: 3,
            department: department.to_string(),
            semester: semester.to_string(),
            professor_name: "Dr. Test".to_string(),
            day_of_week: DayOfWeek::Sat,
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            location: "Room 1".to_string(),
            capacity: 40,
            enrolled: 35,
        }
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let courses = vec![course(1, "CS101", "Intro", "Computer Science", "1403-1")];

        let filter = CourseFilter {
            search: "cs1".to_string(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&courses).len(), 1);

        let filter = CourseFilter {
            search: "chem".to_string(),
            ..Default::default()
        };
        assert!(filter.apply(&courses).is_empty());
    }

    #[test]
    fn absent_department_filters_to_empty() {
        let courses = vec![
            course(1, "CS101", "Intro", "Computer Science", "1403-1"),
            course(2, "MATH101", "Calculus I", "Mathematics", "1403-1"),
        ];

        let filter = CourseFilter {
            department: Some("Chemistry".to_string()),
            ..Default::default()
        };
        assert!(filter.apply(&courses).is_empty());

        let filter = CourseFilter {
            department: Some("Mathematics".to_string()),
            ..Default::default()
        };
        let matched = filter.apply(&courses);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].code, "MATH101");
    }

    #[test]
    fn scoped_search_checks_only_the_named_field() {
        let courses = vec![
            course(1, "CS101", "Intro", "Computer Science", "1403-1"),
            course(2, "MATH101", "Calculus I", "Mathematics", "1403-2"),
        ];

        let filter = CourseFilter {
            search: "math".to_string(),
            scope: SearchScope::Department,
            ..Default::default()
        };
        let matched = filter.apply(&courses);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, 2);

        // "math" appears in course 2's code too, but a semester-scoped search
        // must not look at it
        let filter = CourseFilter {
            search: "math".to_string(),
            scope: SearchScope::Semester,
            ..Default::default()
        };
        assert!(filter.apply(&courses).is_empty());
    }

    #[test]
    fn filters_never_mutate_the_input() {
        let courses = vec![course(1, "CS101", "Intro", "Computer Science", "1403-1")];
        let filter = CourseFilter {
            search: "nothing".to_string(),
            ..Default::default()
        };
        let _ = filter.apply(&courses);
        assert_eq!(courses.len(), 1);
    }
}
