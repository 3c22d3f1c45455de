pub mod course;
pub mod enrollment;
pub mod prerequisite;
pub mod schedule;
pub mod settings;
pub mod user;

pub use course::{Course, CourseDraft, DayOfWeek};
pub use enrollment::Enrollment;
pub use prerequisite::{Prerequisite, PrerequisiteDraft};
pub use schedule::{ScheduleBlock, ScheduleDay, WeeklySchedule};
pub use settings::UnitConfig;
pub use user::{LoginResponse, Role, RosterStudent, User};
