/// Types for course catalog data
use serde::{Deserialize, Serialize};

/// A single (days, time) pair describing when a section convenes.
///
/// `days` is a compact day-code string such as "MWF"; `time` is a
/// "H:MM am - H:MM pm" range or a TBA sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingTime {
    pub days: String,
    pub time: String,
}

/// One course offering from the published class schedule.
///
/// Offerings are immutable once loaded; the CRN is the unique identifier.
/// Meeting times arrive in one of two shapes in the source JSON: a flat
/// `days`/`time` pair, or a `schedule` array for sections that meet in
/// multiple patterns (e.g. lecture MWF plus a lab on T). Use
/// [`CourseOffering::meetings`] to get a normalized view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseOffering {
    pub crn: String,
    pub subject: String,
    pub course: String,
    pub section: String,
    #[serde(default)]
    pub campus: String,
    pub credits: u32,
    pub title: String,
    #[serde(default)]
    pub days: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub schedule: Option<Vec<MeetingTime>>,
    pub capacity: i32,
    pub actual: i32,
    pub remaining: i32,
    #[serde(default)]
    pub waitlist_capacity: i32,
    #[serde(default)]
    pub waitlist_actual: i32,
    #[serde(default)]
    pub waitlist_remaining: i32,
    pub instructor: String,
    pub status: String,
}

impl CourseOffering {
    /// Returns all meeting times for this offering, normalizing the two
    /// source shapes into one list.
    pub fn meetings(&self) -> Vec<MeetingTime> {
        if let Some(schedule) = &self.schedule {
            return schedule.clone();
        }

        match (&self.days, &self.time) {
            (Some(days), Some(time)) => vec![MeetingTime {
                days: days.clone(),
                time: time.clone(),
            }],
            _ => Vec::new(),
        }
    }

    /// The concatenated subject + course number (e.g. "CSC120"), used for
    /// search matching and course-code sorting.
    pub fn course_code(&self) -> String {
        format!("{}{}", self.subject, self.course)
    }

    /// Full code including the section (e.g. "CSC120A").
    pub fn full_code(&self) -> String {
        format!("{}{}{}", self.subject, self.course, self.section)
    }
}

/// One published schedule file (a department's offerings for a semester).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleFile {
    pub semester: String,
    #[serde(default)]
    pub date_range: String,
    pub department: String,
    pub courses: Vec<CourseOffering>,
}
