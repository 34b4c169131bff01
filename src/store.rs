use crate::data::{Branch, RollNo, SeatAssignment, SeatNo, Student};
use serde::Serialize;

/// A stored assignment as returned by the single-roll lookup, with the seat
/// number rendered the way hall tickets print it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub roll_no: RollNo,
    pub block: String,
    pub room: String,
    pub seat_no: String,
    pub branch: Branch,
    pub subject: String,
}

/// One roster student joined with their stored assignment, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchRosterEntry {
    pub roll_no: RollNo,
    pub branch: Branch,
    pub block: Option<String>,
    pub room: Option<String>,
    pub seat_no: Option<SeatNo>,
    pub subject: Option<String>,
}

/// In-memory stand-in for the seating store. A published plan replaces the
/// previous one wholesale; there is no incremental update path.
#[derive(Debug, Default)]
pub struct SeatingStore {
    assignments: Vec<SeatAssignment>,
}

impl SeatingStore {
    /// Delete-all then insert-all. A failed batch never reaches this point,
    /// so the previous plan survives any error upstream.
    pub fn replace_all(&mut self, assignments: Vec<SeatAssignment>) {
        self.assignments = assignments;
    }

    /// Every stored assignment, sorted by block, room and seat number.
    pub fn all(&self) -> Vec<SeatAssignment> {
        let mut listing = self.assignments.clone();
        listing.sort_by(|a, b| (&a.block, &a.room, a.seat_no).cmp(&(&b.block, &b.room, b.seat_no)));
        listing
    }

    /// Looks up one roll code, trimmed and case-insensitive.
    pub fn find_by_roll(&self, roll_no: &str) -> Option<SeatView> {
        let needle = roll_no.trim();
        self.assignments
            .iter()
            .find(|a| a.roll_no.eq_ignore_ascii_case(needle))
            .map(|a| SeatView {
                roll_no: a.roll_no.clone(),
                block: a.block.clone(),
                room: a.room.clone(),
                seat_no: format!("{:02}", a.seat_no),
                branch: a.branch.clone(),
                subject: a.subject.clone(),
            })
    }

    /// The given students in roster order, each with their stored
    /// assignment when one exists.
    pub fn roster_view(&self, students: &[Student]) -> Vec<BranchRosterEntry> {
        students
            .iter()
            .map(|student| {
                let seating = self.assignments.iter().find(|a| a.roll_no == student.roll_no);
                BranchRosterEntry {
                    roll_no: student.roll_no.clone(),
                    branch: student.branch.clone(),
                    block: seating.map(|a| a.block.clone()),
                    room: seating.map(|a| a.room.clone()),
                    seat_no: seating.map(|a| a.seat_no),
                    subject: seating.map(|a| a.subject.clone()),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(roll_no: &str, block: &str, room: &str, seat_no: SeatNo) -> SeatAssignment {
        SeatAssignment {
            roll_no: roll_no.to_string(),
            block: block.to_string(),
            room: room.to_string(),
            seat_no,
            branch: "CSE".to_string(),
            subject: "DS".to_string(),
        }
    }

    #[test]
    fn replace_all_is_wholesale() {
        let mut store = SeatingStore::default();
        store.replace_all(vec![assignment("CSE-01", "A", "101", 1)]);
        store.replace_all(vec![assignment("CSE-02", "B", "201", 1)]);

        assert!(store.find_by_roll("CSE-01").is_none());
        assert!(store.find_by_roll("CSE-02").is_some());
        assert_eq!(store.all().len(), 1);
    }

    #[test]
    fn listing_is_sorted_by_block_room_and_seat() {
        let mut store = SeatingStore::default();
        store.replace_all(vec![
            assignment("S-03", "B", "101", 1),
            assignment("S-02", "A", "102", 2),
            assignment("S-01", "A", "102", 1),
            assignment("S-04", "A", "101", 5),
        ]);

        let rolls: Vec<String> = store.all().into_iter().map(|a| a.roll_no).collect();
        assert_eq!(rolls, ["S-04", "S-01", "S-02", "S-03"]);
    }

    #[test]
    fn lookup_is_trimmed_and_case_insensitive() {
        let mut store = SeatingStore::default();
        store.replace_all(vec![assignment("21cse042", "A", "101", 7)]);

        let view = store.find_by_roll("  21CSE042 ").unwrap();
        assert_eq!(view.roll_no, "21cse042");
        assert_eq!(view.room, "101");
        assert!(store.find_by_roll("21CSE043").is_none());
    }

    #[test]
    fn seat_numbers_render_zero_padded_to_two_digits() {
        let mut store = SeatingStore::default();
        store.replace_all(vec![
            assignment("S-01", "A", "101", 7),
            assignment("S-02", "A", "101", 12),
        ]);

        assert_eq!(store.find_by_roll("S-01").unwrap().seat_no, "07");
        assert_eq!(store.find_by_roll("S-02").unwrap().seat_no, "12");
    }

    #[test]
    fn roster_view_joins_assignments_where_present() {
        let mut store = SeatingStore::default();
        store.replace_all(vec![assignment("CSE-01", "A", "101", 3)]);

        let students = vec![
            Student {
                roll_no: "CSE-01".to_string(),
                branch: "CSE".to_string(),
            },
            Student {
                roll_no: "CSE-02".to_string(),
                branch: "CSE".to_string(),
            },
        ];
        let view = store.roster_view(&students);

        assert_eq!(view.len(), 2);
        assert_eq!(view[0].room.as_deref(), Some("101"));
        assert_eq!(view[0].seat_no, Some(3));
        assert!(view[1].room.is_none());
        assert!(view[1].seat_no.is_none());
    }
}
