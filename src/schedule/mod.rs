/// Schedule module managing the user's selected courses

mod color;

pub use color::{pick_color, COURSE_COLORS};

use crate::catalog::CourseOffering;
use rand::Rng;
use serde::Serialize;
use std::sync::Mutex;
use tracing::info;

/// A course the user has added to their schedule, tagged with the display
/// color assigned at add time. The offering is copied by value; removing it
/// from the schedule never touches the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledCourse {
    #[serde(flatten)]
    pub course: CourseOffering,
    pub color: String,
}

/// Result of an add attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The CRN is already on the schedule; the store holds at most one
    /// entry per CRN and the duplicate was not inserted.
    AlreadyScheduled,
}

/// Single source of truth for the user's selections, shared across views.
///
/// In-memory only: entries are created by `add`, destroyed by `remove`, and
/// the whole store resets on restart. The store itself enforces CRN
/// uniqueness rather than trusting callers to pre-check.
pub struct ScheduleStore {
    entries: Mutex<Vec<ScheduledCourse>>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Adds a course with a random palette color from `thread_rng`.
    pub fn add(&self, course: CourseOffering) -> AddOutcome {
        self.add_with_rng(course, &mut rand::thread_rng())
    }

    /// Adds a course, drawing its color from the supplied random source.
    /// Rejects a CRN that is already scheduled.
    pub fn add_with_rng<R: Rng>(&self, course: CourseOffering, rng: &mut R) -> AddOutcome {
        let mut entries = self.entries.lock().unwrap();
        if entries.iter().any(|c| c.course.crn == course.crn) {
            return AddOutcome::AlreadyScheduled;
        }

        let color = pick_color(rng).to_string();
        info!("Scheduled {} ({}) with color {}", course.full_code(), course.crn, color);
        entries.push(ScheduledCourse { course, color });
        AddOutcome::Added
    }

    /// Removes a course by CRN. Returns false if it was not scheduled.
    pub fn remove(&self, crn: &str) -> bool {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|c| c.course.crn != crn);
        let removed = entries.len() < before;
        if removed {
            info!("Removed {} from schedule", crn);
        }
        removed
    }

    /// Returns true if the CRN is currently scheduled.
    pub fn contains(&self, crn: &str) -> bool {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.course.crn == crn)
    }

    /// Snapshot of the scheduled courses, in insertion order.
    pub fn list(&self) -> Vec<ScheduledCourse> {
        self.entries.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn offering(crn: &str) -> CourseOffering {
        serde_json::from_value(serde_json::json!({
            "crn": crn,
            "subject": "CSC",
            "course": "120",
            "section": "A",
            "credits": 3,
            "title": "Intro to Programming",
            "capacity": 30,
            "actual": 10,
            "remaining": 20,
            "instructor": "Dr. Jane Smith",
            "status": "Open"
        }))
        .unwrap()
    }

    #[test]
    fn test_add_then_list() {
        let store = ScheduleStore::new();
        assert_eq!(store.add(offering("1")), AddOutcome::Added);
        assert_eq!(store.add(offering("2")), AddOutcome::Added);

        let listed = store.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].course.crn, "1");
        assert!(COURSE_COLORS.contains(&listed[0].color.as_str()));
    }

    #[test]
    fn test_duplicate_add_rejected() {
        let store = ScheduleStore::new();
        assert_eq!(store.add(offering("1")), AddOutcome::Added);
        assert_eq!(store.add(offering("1")), AddOutcome::AlreadyScheduled);
        assert_eq!(store.len(), 1);

        // One remove clears the single entry
        assert!(store.remove("1"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let store = ScheduleStore::new();
        store.add(offering("1"));
        assert!(!store.remove("999"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_color_assignment_uses_injected_rng() {
        let store = ScheduleStore::new();
        let mut rng = StdRng::seed_from_u64(3);
        let expected = {
            let mut probe = StdRng::seed_from_u64(3);
            pick_color(&mut probe).to_string()
        };

        store.add_with_rng(offering("1"), &mut rng);
        assert_eq!(store.list()[0].color, expected);
    }

    #[test]
    fn test_contains() {
        let store = ScheduleStore::new();
        store.add(offering("42"));
        assert!(store.contains("42"));
        assert!(!store.contains("43"));
    }
}
