use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Seven-value weekday enum, wire format "SAT".."FRI".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Sat,
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub units: u32,
    pub department: String,
    pub semester: String,
    pub professor_name: String,
    pub day_of_week: DayOfWeek,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub location: String,
    pub capacity: u32,
    /// Derived count maintained by the backend; expected <= capacity but not
    /// enforced locally.
    #[serde(default)]
    pub enrolled: u32,
}

impl Course {
    pub fn is_full(&self) -> bool {
        self.enrolled >= self.capacity
    }
}

/// Form payload for create/update; the backend assigns `id` and `enrolled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDraft {
    pub code: String,
    pub name: String,
    pub units: u32,
    pub department: String,
    pub semester: String,
    pub professor_name: String,
    pub day_of_week: DayOfWeek,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub location: String,
    pub capacity: u32,
}

/// "HH:MM" on the wire; accepts "HH:MM:SS" too since some backends include
/// seconds on read models.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|_| de::Error::custom(format!("invalid HH:MM time: {raw}")))
    }
}
