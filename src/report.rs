//! Read-only views over a finished allocation, shaped for the seating sheets
//! handed out on exam day.

use crate::data::{RoomId, SeatAssignment, SubjectCode};
use crate::labels::{COLUMNS, parse_seat_label};
use itertools::Itertools;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRoll {
    pub subject_code: SubjectCode,
    pub regnos: Vec<String>,
}

/// Who sits which subject in one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HallSummary {
    pub room_id: RoomId,
    pub subjects: Vec<SubjectRoll>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatCell {
    pub seat_label: String,
    pub regno: String,
    pub dept: String,
}

/// Seat grid of one room, `COLUMNS` cells per row, empty seats as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomLayout {
    pub room_id: RoomId,
    pub invigilator: String,
    pub exam_date: String,
    pub session: String,
    pub rows: Vec<Vec<Option<SeatCell>>>,
}

/// Groups assignments by room, then subject, with sorted registration numbers.
pub fn hall_summaries(assignments: &[SeatAssignment]) -> Vec<HallSummary> {
    assignments
        .iter()
        .sorted_by(|a, b| {
            (&a.room_id, &a.subject_code, &a.regno).cmp(&(&b.room_id, &b.subject_code, &b.regno))
        })
        .chunk_by(|a| a.room_id.clone())
        .into_iter()
        .map(|(room_id, seats)| {
            let subjects: Vec<SubjectRoll> = seats
                .chunk_by(|a| a.subject_code.clone())
                .into_iter()
                .map(|(subject_code, group)| SubjectRoll {
                    subject_code,
                    regnos: group.map(|a| a.regno.clone()).collect(),
                })
                .collect();
            let total = subjects.iter().map(|s| s.regnos.len()).sum();
            HallSummary {
                room_id,
                subjects,
                total,
            }
        })
        .collect()
}

/// Lays each room's assignments out on its seat grid, rooms in the order
/// they first appear. Records with an unreadable seat label are left out.
pub fn room_layouts(assignments: &[SeatAssignment]) -> Vec<RoomLayout> {
    let rooms: Vec<&RoomId> = assignments.iter().map(|a| &a.room_id).unique().collect();
    let by_room = assignments
        .iter()
        .map(|a| (&a.room_id, a))
        .into_group_map();

    rooms
        .into_iter()
        .filter_map(|room_id| {
            let seats = by_room.get(room_id)?;
            let first = seats.first()?;
            let placed: Vec<((usize, usize), &SeatAssignment)> = seats
                .iter()
                .filter_map(|a| parse_seat_label(&a.seat_label).map(|pos| (pos, *a)))
                .collect();
            let row_count = placed.iter().map(|((row, _), _)| row + 1).max().unwrap_or(0);

            let mut rows: Vec<Vec<Option<SeatCell>>> = vec![vec![None; COLUMNS]; row_count];
            for ((row, col), a) in placed {
                rows[row][col] = Some(SeatCell {
                    seat_label: a.seat_label.clone(),
                    regno: a.regno.clone(),
                    dept: a.dept.clone(),
                });
            }

            Some(RoomLayout {
                room_id: room_id.clone(),
                invigilator: first.invigilator.clone(),
                exam_date: first.exam_date.clone(),
                session: first.session.clone(),
                rows,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(room: &str, label: &str, regno: &str, subject: &str) -> SeatAssignment {
        SeatAssignment {
            room_id: room.to_string(),
            seat_label: label.to_string(),
            regno: regno.to_string(),
            dept: "CSE".to_string(),
            subject_code: subject.to_string(),
            invigilator: format!("Inv-{room}"),
            exam_date: "2025-11-20".to_string(),
            session: "AN".to_string(),
        }
    }

    #[test]
    fn test_hall_summaries_group_and_sort() {
        let records = vec![
            seat("H2", "A1", "300", "MA101"),
            seat("H1", "A1", "102", "PH101"),
            seat("H1", "B1", "101", "MA101"),
            seat("H1", "C1", "100", "PH101"),
        ];
        let summary = hall_summaries(&records);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].room_id, "H1");
        assert_eq!(summary[0].total, 3);
        assert_eq!(
            summary[0].subjects,
            vec![
                SubjectRoll {
                    subject_code: "MA101".to_string(),
                    regnos: vec!["101".to_string()],
                },
                SubjectRoll {
                    subject_code: "PH101".to_string(),
                    regnos: vec!["100".to_string(), "102".to_string()],
                },
            ]
        );
        assert_eq!(summary[1].room_id, "H2");
        assert_eq!(summary[1].total, 1);
    }

    #[test]
    fn test_room_layouts_place_cells_by_label() {
        let records = vec![
            seat("H2", "A1", "1", "MA101"),
            seat("H2", "B1", "2", "MA101"),
            seat("H2", "D2", "3", "MA101"),
            seat("H1", "A1", "4", "MA101"),
        ];
        let layouts = room_layouts(&records);

        assert_eq!(layouts.len(), 2);
        let h2 = &layouts[0];
        assert_eq!(h2.room_id, "H2");
        assert_eq!(h2.invigilator, "Inv-H2");
        assert_eq!(h2.session, "AN");
        assert_eq!(h2.rows.len(), 2);
        assert_eq!(h2.rows[0][1].as_ref().map(|c| c.regno.as_str()), Some("2"));
        assert!(h2.rows[0][2].is_none());
        assert!(h2.rows[1][0].is_none());
        assert_eq!(h2.rows[1][3].as_ref().map(|c| c.seat_label.as_str()), Some("D2"));

        assert_eq!(layouts[1].room_id, "H1");
        assert_eq!(layouts[1].rows.len(), 1);
    }

    #[test]
    fn test_room_layouts_skip_bad_labels() {
        let records = vec![seat("H1", "A1", "1", "MA101"), seat("H1", "Z9", "2", "MA101")];
        let layouts = room_layouts(&records);
        assert_eq!(layouts[0].rows.len(), 1);
        assert_eq!(layouts[0].rows[0].iter().flatten().count(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(hall_summaries(&[]).is_empty());
        assert!(room_layouts(&[]).is_empty());
    }
}
