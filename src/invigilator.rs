use crate::data::{Invigilator, RoomId};
use crate::error::InputError;
use std::collections::HashMap;

/// Binds one invigilator to each room, round-robin in the order rooms are
/// first touched. Lives for a single run.
#[derive(Debug)]
pub struct InvigilatorRoster<'a> {
    invigilators: &'a [Invigilator],
    bindings: HashMap<RoomId, &'a str>,
    next: usize,
}

impl<'a> InvigilatorRoster<'a> {
    pub fn new(invigilators: &'a [Invigilator]) -> Result<Self, InputError> {
        if invigilators.is_empty() {
            return Err(InputError::NoInvigilators);
        }
        Ok(Self {
            invigilators,
            bindings: HashMap::new(),
            next: 0,
        })
    }

    /// Invigilator for `room_id`, binding the next one in line on first use.
    pub fn bind(&mut self, room_id: &str) -> &'a str {
        if let Some(&name) = self.bindings.get(room_id) {
            return name;
        }
        let name = self.invigilators[self.next % self.invigilators.len()].name.as_str();
        self.next += 1;
        self.bindings.insert(room_id.to_string(), name);
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(names: &[&str]) -> Vec<Invigilator> {
        names
            .iter()
            .map(|n| Invigilator {
                name: n.to_string(),
                dept: None,
            })
            .collect()
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let err = InvigilatorRoster::new(&[]).unwrap_err();
        assert_eq!(err, InputError::NoInvigilators);
    }

    #[test]
    fn test_round_robin_wraps() {
        let invs = staff(&["X", "Y"]);
        let mut roster = InvigilatorRoster::new(&invs).unwrap();
        assert_eq!(roster.bind("H1"), "X");
        assert_eq!(roster.bind("H2"), "Y");
        assert_eq!(roster.bind("H3"), "X");
    }

    #[test]
    fn test_binding_is_stable_per_room() {
        let invs = staff(&["X", "Y", "Z"]);
        let mut roster = InvigilatorRoster::new(&invs).unwrap();
        assert_eq!(roster.bind("H1"), "X");
        assert_eq!(roster.bind("H1"), "X");
        assert_eq!(roster.bind("H2"), "Y");
        assert_eq!(roster.bind("H1"), "X");
    }
}
