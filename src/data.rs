use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::placement::PlacementStrategy;

pub type RoomId = String;
pub type SubjectCode = String;

/// Seats assumed for a hall whose capacity was never filled in.
pub const DEFAULT_ROOM_CAPACITY: i32 = 24;

/// An examinee. `regno` is kept as imported; see [`normalize_regno`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(deserialize_with = "regno_text_or_number")]
    pub regno: String,
    pub dept: String,
    pub subject_code: SubjectCode,
}

/// Represents a physical room with a given capacity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_id: RoomId,
    #[serde(default = "default_capacity")]
    pub capacity: i32,
}

fn default_capacity() -> i32 {
    DEFAULT_ROOM_CAPACITY
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invigilator {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dept: Option<String>,
}

/// The complete input for one allocation run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationInput {
    pub students: Vec<Student>,
    pub rooms: Vec<Room>,
    pub invigilators: Vec<Invigilator>,
    pub exam_date: String,
    pub session: String,
    /// Restricts the run to students sitting one of these subjects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_codes: Option<Vec<SubjectCode>>,
    #[serde(default)]
    pub strategy: PlacementStrategy,
}

/// A single seat handed to one student.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAssignment {
    pub room_id: RoomId,
    pub seat_label: String,
    pub regno: String,
    pub dept: String,
    pub subject_code: SubjectCode,
    pub invigilator: String,
    pub exam_date: String,
    pub session: String,
}

/// A student left over once every room was filled.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnseatedStudent {
    pub regno: String,
    pub dept: String,
    pub subject_code: SubjectCode,
}

/// A seat that had to be filled without a department-safe candidate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintViolation {
    pub room_id: RoomId,
    pub seat_label: String,
    pub regno: String,
    pub dept: String,
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Department Adjacency] {} at {}/{} sits next to another {} student",
            self.regno, self.room_id, self.seat_label, self.dept
        )
    }
}

/// The final output of the allocation engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationOutput {
    pub assignments: Vec<SeatAssignment>,
    pub unseated: Vec<UnseatedStudent>,
    pub constraint_violations: Vec<ConstraintViolation>,
    pub seated_count: usize,
    pub unseated_count: usize,
}

/// Strips surrounding whitespace and the trailing ".0" that spreadsheet
/// imports leave on numeric registration numbers.
pub fn normalize_regno(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_suffix(".0").unwrap_or(trimmed).to_string()
}

fn regno_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRegno {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawRegno::deserialize(deserializer)? {
        RawRegno::Text(text) => text,
        RawRegno::Number(number) => number.to_string(),
    })
}
