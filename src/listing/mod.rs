//! Filter/sort engine for catalog and ratings list views.
//!
//! Pure functions over in-memory record lists: case-insensitive text search
//! across a record's designated fields, an exact-match category filter with
//! an "All" sentinel, stable single-key sorting, and a visible-count
//! pagination cursor. Nothing here mutates the input list, so every view can
//! recompute its slice on each state change.

use crate::catalog::CourseOffering;
use serde::Deserialize;
use std::cmp::Ordering;

/// How many more records a "load more" reveals.
pub const PAGE_SIZE: usize = 10;

/// Sort direction; `Desc` reverses the comparator output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Applies the direction to a comparator result.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Records that can be matched against a free-text query.
pub trait SearchFields {
    /// The fields the text filter may match on, as owned strings.
    fn search_fields(&self) -> Vec<String>;
}

impl SearchFields for CourseOffering {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.instructor.clone(),
            self.course_code(),
            self.crn.clone(),
        ]
    }
}

/// Case-insensitive substring match against any of the record's fields.
/// A blank or whitespace-only query matches everything.
pub fn matches_query<T: SearchFields>(record: &T, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Exact-match subject filter; `All` disables it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectFilter {
    All,
    Subject(String),
}

impl SubjectFilter {
    /// Builds a filter from an optional query parameter, treating a missing
    /// value or the literal "All" (any case) as the disabled sentinel.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None => SubjectFilter::All,
            Some(s) if s.trim().is_empty() || s.eq_ignore_ascii_case("all") => SubjectFilter::All,
            Some(s) => SubjectFilter::Subject(s.to_string()),
        }
    }

    pub fn matches(&self, course: &CourseOffering) -> bool {
        match self {
            SubjectFilter::All => true,
            SubjectFilter::Subject(subject) => course.subject == *subject,
        }
    }
}

/// Sort keys for course list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseSortKey {
    #[default]
    CourseCode,
    Title,
    Instructor,
    Credits,
    Remaining,
    Status,
}

impl CourseSortKey {
    /// Comparator for this key. Numeric keys compare numerically; textual
    /// keys compare case-folded.
    pub fn compare(&self, a: &CourseOffering, b: &CourseOffering) -> Ordering {
        match self {
            CourseSortKey::CourseCode => text_cmp(&a.full_code(), &b.full_code()),
            CourseSortKey::Title => text_cmp(&a.title, &b.title),
            CourseSortKey::Instructor => text_cmp(&a.instructor, &b.instructor),
            CourseSortKey::Credits => a.credits.cmp(&b.credits),
            CourseSortKey::Remaining => a.remaining.cmp(&b.remaining),
            CourseSortKey::Status => text_cmp(&a.status, &b.status),
        }
    }
}

fn text_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Filters courses by text query and subject, preserving input order.
pub fn filter_courses<'a>(
    courses: &'a [CourseOffering],
    query: &str,
    subject: &SubjectFilter,
) -> Vec<&'a CourseOffering> {
    courses
        .iter()
        .filter(|course| subject.matches(course) && matches_query(*course, query))
        .collect()
}

/// Stable sort by one key; ties keep their input relative order, so
/// re-sorting by the same key is idempotent.
pub fn sort_courses(courses: &mut [&CourseOffering], key: CourseSortKey, direction: SortDirection) {
    courses.sort_by(|a, b| direction.apply(key.compare(a, b)));
}

/// Monotonic visible-count cursor for incremental list loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    visible: usize,
    page_size: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            visible: page_size,
            page_size,
        }
    }

    /// Reveals another page, clamped to the list length. Requesting past the
    /// end is a no-op; returns whether the cursor moved.
    pub fn load_more(&mut self, total: usize) -> bool {
        if self.visible >= total {
            return false;
        }
        self.visible = (self.visible + self.page_size).min(total);
        true
    }

    /// Resets the cursor to one page, e.g. after the filter changes.
    pub fn reset(&mut self) {
        self.visible = self.page_size;
    }

    /// How many records are currently visible out of `total`.
    pub fn visible(&self, total: usize) -> usize {
        self.visible.min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.visible < total
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

/// One page of a filtered/sorted list plus a "more available" flag.
#[derive(Debug)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub more: bool,
}

/// Takes the first `visible` records of a derived list.
pub fn paginate<T>(items: &[T], visible: usize) -> Page<'_, T> {
    let end = visible.min(items.len());
    Page {
        items: &items[..end],
        more: end < items.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CourseOffering;

    fn course(crn: &str, subject: &str, title: &str, instructor: &str) -> CourseOffering {
        serde_json::from_value(serde_json::json!({
            "crn": crn,
            "subject": subject,
            "course": "120",
            "section": "A",
            "credits": 3,
            "title": title,
            "capacity": 30,
            "actual": 10,
            "remaining": 20,
            "instructor": instructor,
            "status": "Open"
        }))
        .unwrap()
    }

    fn sample_courses() -> Vec<CourseOffering> {
        vec![
            course("20001", "CSC", "Intro to Programming", "Dr. Jane SMITH"),
            course("20002", "CSC", "Data Structures", "Prof. Alan Jones"),
            course("20003", "ENGG", "Statics", "Dr. Maria Lopez"),
        ]
    }

    #[test]
    fn test_query_case_insensitive_across_fields() {
        let courses = sample_courses();
        let hits = filter_courses(&courses, "smith", &SubjectFilter::All);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].crn, "20001");

        // subject+number concatenation
        let hits = filter_courses(&courses, "csc120", &SubjectFilter::All);
        assert_eq!(hits.len(), 2);

        // raw CRN
        let hits = filter_courses(&courses, "20003", &SubjectFilter::All);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_blank_query_matches_everything() {
        let courses = sample_courses();
        assert_eq!(filter_courses(&courses, "", &SubjectFilter::All).len(), 3);
        assert_eq!(filter_courses(&courses, "   ", &SubjectFilter::All).len(), 3);
    }

    #[test]
    fn test_subject_filter_exact_match() {
        let courses = sample_courses();
        let filter = SubjectFilter::Subject("ENGG".to_string());
        let hits = filter_courses(&courses, "", &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].subject, "ENGG");
    }

    #[test]
    fn test_subject_filter_all_sentinel() {
        assert_eq!(SubjectFilter::from_param(None), SubjectFilter::All);
        assert_eq!(SubjectFilter::from_param(Some("All")), SubjectFilter::All);
        assert_eq!(SubjectFilter::from_param(Some("all")), SubjectFilter::All);
        assert_eq!(
            SubjectFilter::from_param(Some("CSC")),
            SubjectFilter::Subject("CSC".to_string())
        );
    }

    #[test]
    fn test_sort_by_title_descending() {
        let courses = sample_courses();
        let mut refs: Vec<&CourseOffering> = courses.iter().collect();
        sort_courses(&mut refs, CourseSortKey::Title, SortDirection::Desc);
        assert_eq!(refs[0].title, "Statics");
        assert_eq!(refs[2].title, "Data Structures");
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        // All three share credits=3, so sorting by credits must keep
        // input order, and re-sorting must not reshuffle.
        let courses = sample_courses();
        let mut refs: Vec<&CourseOffering> = courses.iter().collect();
        sort_courses(&mut refs, CourseSortKey::Credits, SortDirection::Asc);
        let first_pass: Vec<&str> = refs.iter().map(|c| c.crn.as_str()).collect();
        assert_eq!(first_pass, vec!["20001", "20002", "20003"]);

        sort_courses(&mut refs, CourseSortKey::Credits, SortDirection::Asc);
        let second_pass: Vec<&str> = refs.iter().map(|c| c.crn.as_str()).collect();
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_pager_load_more_clamps() {
        let mut pager = Pager::new(2);
        assert_eq!(pager.visible(5), 2);
        assert!(pager.load_more(5));
        assert_eq!(pager.visible(5), 4);
        assert!(pager.load_more(5));
        assert_eq!(pager.visible(5), 5);
    }

    #[test]
    fn test_pager_past_end_is_noop() {
        let mut pager = Pager::new(10);
        assert!(!pager.load_more(3));
        assert_eq!(pager.visible(3), 3);
        assert!(!pager.has_more(3));
    }

    #[test]
    fn test_paginate_reports_more() {
        let items: Vec<u32> = (0..25).collect();
        let page = paginate(&items, 10);
        assert_eq!(page.items.len(), 10);
        assert!(page.more);

        let page = paginate(&items, 30);
        assert_eq!(page.items.len(), 25);
        assert!(!page.more);
    }
}
