use crate::data::{Student, SubjectCode};
use std::collections::HashMap;

/// FIFO queue of the students sitting one subject.
///
/// Dequeuing advances a cursor over the roster slice instead of shifting the
/// backing vector.
#[derive(Debug, Clone)]
pub struct SubjectQueue {
    subject_code: SubjectCode,
    students: Vec<Student>,
    cursor: usize,
}

impl SubjectQueue {
    fn new(subject_code: SubjectCode) -> Self {
        Self {
            subject_code,
            students: Vec::new(),
            cursor: 0,
        }
    }

    #[inline]
    pub fn subject_code(&self) -> &str {
        &self.subject_code
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.students.len() - self.cursor
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn pop_front(&mut self) -> Option<Student> {
        let student = self.students.get_mut(self.cursor).map(std::mem::take)?;
        self.cursor += 1;
        Some(student)
    }

    /// Moves up to `n` students off the front of the queue into `out`.
    pub fn drain_into(&mut self, n: usize, out: &mut Vec<Student>) -> usize {
        let take = n.min(self.remaining());
        for _ in 0..take {
            if let Some(student) = self.pop_front() {
                out.push(student);
            }
        }
        take
    }
}

/// Per-subject queues in the order each subject first appears in the roster.
#[derive(Debug, Clone, Default)]
pub struct SubjectQueues {
    queues: Vec<SubjectQueue>,
}

impl SubjectQueues {
    /// Groups `students` by subject code, keeping roster order inside each queue.
    pub fn partition(students: &[Student]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut queues: Vec<SubjectQueue> = Vec::new();

        for student in students {
            let slot = *index.entry(student.subject_code.as_str()).or_insert_with(|| {
                queues.push(SubjectQueue::new(student.subject_code.clone()));
                queues.len() - 1
            });
            queues[slot].students.push(student.clone());
        }

        Self { queues }
    }

    /// Indices of the non-empty queues, in first-seen order.
    pub fn active(&self) -> Vec<usize> {
        self.queues
            .iter()
            .enumerate()
            .filter(|(_, q)| !q.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    #[inline]
    pub fn queue_mut(&mut self, index: usize) -> &mut SubjectQueue {
        &mut self.queues[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubjectQueue> {
        self.queues.iter()
    }

    pub fn total_remaining(&self) -> usize {
        self.queues.iter().map(SubjectQueue::remaining).sum()
    }

    /// Empties every queue, returning what was left in queue order.
    pub fn drain_all(&mut self) -> Vec<Student> {
        let mut rest = Vec::with_capacity(self.total_remaining());
        for queue in &mut self.queues {
            let n = queue.remaining();
            queue.drain_into(n, &mut rest);
        }
        rest
    }
}
