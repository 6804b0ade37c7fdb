use crate::data::{AllocationInput, AllocationOutput, SeatAssignment, normalize_regno};
use crate::error::{ApiError, InputError};
use crate::solver;
use log::info;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};

/// Latest preview plus the confirmed allocation, indexed by regno.
#[derive(Debug, Default)]
pub struct AllocationStore {
    // Serializes generate runs so two of them never race over the preview.
    run_lock: Mutex<()>,
    preview: RwLock<Option<AllocationOutput>>,
    confirmed: RwLock<Confirmed>,
}

#[derive(Debug, Default)]
struct Confirmed {
    assignments: Vec<SeatAssignment>,
    by_regno: HashMap<String, usize>,
}

impl AllocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the engine and keeps the result as the current preview.
    pub fn generate(&self, input: &AllocationInput) -> Result<AllocationOutput, InputError> {
        let _run = self.run_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let output = solver::solve(input)?;
        *self.preview.write().unwrap_or_else(PoisonError::into_inner) = Some(output.clone());
        Ok(output)
    }

    pub fn preview(&self) -> Result<AllocationOutput, ApiError> {
        self.preview
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ApiError::NoPreview)
    }

    /// Replaces the confirmed allocation with the current preview.
    pub fn confirm(&self) -> Result<usize, ApiError> {
        let preview = self.preview()?;
        let by_regno = preview
            .assignments
            .iter()
            .enumerate()
            .map(|(i, a)| (normalize_regno(&a.regno), i))
            .collect();

        let mut confirmed = self.confirmed.write().unwrap_or_else(PoisonError::into_inner);
        *confirmed = Confirmed {
            assignments: preview.assignments,
            by_regno,
        };
        info!("Confirmed {} seat assignments", confirmed.assignments.len());
        Ok(confirmed.assignments.len())
    }

    pub fn confirmed(&self) -> Result<Vec<SeatAssignment>, ApiError> {
        let confirmed = self.confirmed.read().unwrap_or_else(PoisonError::into_inner);
        if confirmed.assignments.is_empty() {
            return Err(ApiError::NoConfirmedAllocation);
        }
        Ok(confirmed.assignments.clone())
    }

    /// Confirmed seat of one student. The query is normalized the same way
    /// stored registration numbers are.
    pub fn lookup(&self, regno: &str) -> Result<SeatAssignment, ApiError> {
        let key = normalize_regno(regno);
        let confirmed = self.confirmed.read().unwrap_or_else(PoisonError::into_inner);
        confirmed
            .by_regno
            .get(&key)
            .and_then(|&i| confirmed.assignments.get(i))
            .cloned()
            .ok_or(ApiError::NotAllocated(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Invigilator, Room, Student};
    use crate::placement::PlacementStrategy;

    fn input(regnos: &[&str]) -> AllocationInput {
        AllocationInput {
            students: regnos
                .iter()
                .map(|r| Student {
                    regno: r.to_string(),
                    dept: "CSE".to_string(),
                    subject_code: "CS101".to_string(),
                })
                .collect(),
            rooms: vec![Room {
                room_id: "H1".to_string(),
                capacity: 24,
            }],
            invigilators: vec![Invigilator {
                name: "Dr. A".to_string(),
                dept: None,
            }],
            exam_date: "2025-11-20".to_string(),
            session: "FN".to_string(),
            subject_codes: None,
            strategy: PlacementStrategy::ZigZagDeptSafe,
        }
    }

    #[test]
    fn test_nothing_before_generate() {
        let store = AllocationStore::new();
        assert_eq!(store.preview().unwrap_err(), ApiError::NoPreview);
        assert_eq!(store.confirm().unwrap_err(), ApiError::NoPreview);
        assert_eq!(store.confirmed().unwrap_err(), ApiError::NoConfirmedAllocation);
    }

    #[test]
    fn test_lookup_matches_normalized_regno() {
        let store = AllocationStore::new();
        store.generate(&input(&["12345.0", "12346"])).unwrap();
        assert_eq!(
            store.lookup("12345").unwrap_err(),
            ApiError::NotAllocated("12345".to_string())
        );

        assert_eq!(store.confirm().unwrap(), 2);
        let seat = store.lookup("12345").unwrap();
        assert_eq!(seat.regno, "12345");
        assert_eq!(seat.seat_label, "A1");
        assert_eq!(store.lookup(" 12345.0 ").unwrap(), seat);
    }

    #[test]
    fn test_confirm_supersedes_previous_run() {
        let store = AllocationStore::new();
        store.generate(&input(&["1", "2"])).unwrap();
        store.confirm().unwrap();
        store.generate(&input(&["3"])).unwrap();
        assert!(store.lookup("1").is_ok());

        store.confirm().unwrap();
        assert!(store.lookup("1").is_err());
        assert_eq!(store.lookup("3").unwrap().seat_label, "A1");
        assert_eq!(store.confirmed().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_generate_keeps_previous_preview() {
        let store = AllocationStore::new();
        store.generate(&input(&["1"])).unwrap();
        let mut bad = input(&["2"]);
        bad.rooms.clear();
        assert_eq!(store.generate(&bad).unwrap_err(), InputError::NoRooms);
        assert_eq!(store.preview().unwrap().assignments[0].regno, "1");
    }
}
