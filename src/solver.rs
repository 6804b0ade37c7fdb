use crate::data::{
    AllocationInput, AllocationOutput, ConstraintViolation, Room, SeatAssignment, Student,
    UnseatedStudent, normalize_regno,
};
use crate::error::InputError;
use crate::invigilator::InvigilatorRoster;
use crate::labels::seat_label;
use crate::partition::SubjectQueues;
use crate::placement::PlacementStrategy;
use itertools::Itertools;
use log::{debug, info, trace, warn};
use std::time::Instant;

/// Per-run bookkeeping threaded through the room loop.
struct AllocationContext<'a> {
    exam_date: &'a str,
    session: &'a str,
    strategy: PlacementStrategy,
    invigilators: InvigilatorRoster<'a>,
    assignments: Vec<SeatAssignment>,
    violations: Vec<ConstraintViolation>,
}

impl AllocationContext<'_> {
    /// Seats `batch` in `room` and commits the whole room at once.
    fn seat_room(&mut self, room: &Room, batch: Vec<Student>) {
        let invigilator = self.invigilators.bind(&room.room_id);
        let mut seated = Vec::with_capacity(batch.len());
        let mut forced = Vec::new();

        for seat in self.strategy.arrange(batch) {
            let label = seat_label(seat.row, seat.col);
            let regno = normalize_regno(&seat.student.regno);
            if seat.forced {
                let violation = ConstraintViolation {
                    room_id: room.room_id.clone(),
                    seat_label: label.clone(),
                    regno: regno.clone(),
                    dept: seat.student.dept.clone(),
                };
                trace!("{violation}");
                forced.push(violation);
            }
            seated.push(SeatAssignment {
                room_id: room.room_id.clone(),
                seat_label: label,
                regno,
                dept: seat.student.dept,
                subject_code: seat.student.subject_code,
                invigilator: invigilator.to_string(),
                exam_date: self.exam_date.to_string(),
                session: self.session.to_string(),
            });
        }

        debug!(
            "Room {} seated {} students under {} ({} forced seats)",
            room.room_id,
            seated.len(),
            invigilator,
            forced.len()
        );
        self.assignments.append(&mut seated);
        self.violations.append(&mut forced);
    }
}

/// Allocates seats for every selected student, room by room.
pub fn solve(input: &AllocationInput) -> Result<AllocationOutput, InputError> {
    let start_time = Instant::now();

    if input.exam_date.trim().is_empty() {
        return Err(InputError::MissingField("examDate"));
    }
    if input.session.trim().is_empty() {
        return Err(InputError::MissingField("session"));
    }
    if input.rooms.is_empty() {
        return Err(InputError::NoRooms);
    }
    if let Some(room) = input.rooms.iter().duplicates_by(|r| r.room_id.clone()).next() {
        return Err(InputError::DuplicateRoom(room.room_id.clone()));
    }

    let students = select_students(input);
    if students.is_empty() {
        return Err(InputError::NoStudents);
    }

    let mut ctx = AllocationContext {
        exam_date: &input.exam_date,
        session: &input.session,
        strategy: input.strategy,
        invigilators: InvigilatorRoster::new(&input.invigilators)?,
        assignments: Vec::with_capacity(students.len()),
        violations: Vec::new(),
    };

    let mut queues = SubjectQueues::partition(&students);
    info!(
        "Allocating {} students across subjects [{}] into {} rooms ({:?})...",
        students.len(),
        queues.iter().map(|q| q.subject_code()).join(", "),
        input.rooms.len(),
        input.strategy
    );

    for room in &input.rooms {
        if queues.active().is_empty() {
            break;
        }
        if room.capacity <= 0 {
            debug!("Skipping room {} with capacity {}", room.room_id, room.capacity);
            continue;
        }

        let batch = draw_room_batch(&mut queues, room.capacity as usize);
        trace!(
            "Drew {} students for room {}: {:?}",
            batch.len(),
            room.room_id,
            batch.iter().map(|s| s.subject_code.as_str()).collect::<Vec<_>>()
        );
        if batch.is_empty() {
            continue;
        }
        ctx.seat_room(room, batch);
    }

    let unseated: Vec<UnseatedStudent> = queues
        .drain_all()
        .into_iter()
        .map(|s| UnseatedStudent {
            regno: normalize_regno(&s.regno),
            dept: s.dept,
            subject_code: s.subject_code,
        })
        .collect();
    if !unseated.is_empty() {
        warn!(
            "Room capacity exhausted: {} of {} students left unseated",
            unseated.len(),
            students.len()
        );
    }

    let duration = start_time.elapsed();
    info!(
        "Allocation finished in {:.2?}: {} seated, {} unseated, {} forced seats",
        duration,
        ctx.assignments.len(),
        unseated.len(),
        ctx.violations.len()
    );

    Ok(AllocationOutput {
        seated_count: ctx.assignments.len(),
        unseated_count: unseated.len(),
        assignments: ctx.assignments,
        unseated,
        constraint_violations: ctx.violations,
    })
}

/// Roster restricted to the requested subjects, in roster order.
fn select_students(input: &AllocationInput) -> Vec<Student> {
    match &input.subject_codes {
        Some(codes) => input
            .students
            .iter()
            .filter(|s| codes.iter().any(|c| c.trim() == s.subject_code))
            .cloned()
            .collect(),
        None => input.students.clone(),
    }
}

/// Draws up to `capacity` students for one room.
///
/// A lone remaining subject is drained straight into the room. With two or
/// more subjects every one of them is seeded with a single seat, then what is
/// left of the room is split evenly, the earlier subjects taking the
/// remainder. Subjects that run dry early leave seats behind, so the pass
/// repeats until the room is full or the queues are empty.
fn draw_room_batch(queues: &mut SubjectQueues, capacity: usize) -> Vec<Student> {
    let mut batch = Vec::with_capacity(capacity.min(queues.total_remaining()));
    let mut remaining = capacity;

    while remaining > 0 {
        let active = queues.active();
        match active.len() {
            0 => break,
            1 => {
                remaining -= queues.queue_mut(active[0]).drain_into(remaining, &mut batch);
                break;
            }
            _ => {}
        }

        for &i in &active {
            if remaining == 0 {
                break;
            }
            remaining -= queues.queue_mut(i).drain_into(1, &mut batch);
        }

        let active = queues.active();
        if active.is_empty() || remaining == 0 {
            continue;
        }
        let base = remaining / active.len();
        let extra = remaining % active.len();
        for (k, &i) in active.iter().enumerate() {
            let quota = if k < extra { base + 1 } else { base };
            remaining -= queues
                .queue_mut(i)
                .drain_into(quota.min(remaining), &mut batch);
        }
    }

    batch
}
