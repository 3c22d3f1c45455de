use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::course::hhmm;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleBlock {
    pub course_id: i64,
    pub code: String,
    pub name: String,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub location: String,
    pub professor_name: String,
    pub units: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub day_of_week: String,
    pub blocks: Vec<ScheduleBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub term: String,
    pub days: Vec<ScheduleDay>,
}
