/// Types for professor ratings data
use crate::listing::{SearchFields, SortDirection};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::cmp::Ordering;

/// A professor summary as returned by a search.
#[derive(Debug, Clone, Serialize)]
pub struct Professor {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub avg_rating: f64,
    pub avg_difficulty: f64,
    pub num_ratings: i64,
    pub would_take_again_percent: f64,
}

impl SearchFields for Professor {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            format!("{} {}", self.first_name, self.last_name),
            self.department.clone(),
        ]
    }
}

/// One student rating of a professor.
#[derive(Debug, Clone, Serialize)]
pub struct Rating {
    pub id: String,
    /// Class the rating was left for ("N/A" when the provider omits it)
    pub class: String,
    pub comment: String,
    pub rating: f64,
    pub difficulty: f64,
    /// "Yes", "No", or "N/A"
    pub would_take_again: String,
    /// Raw provider timestamp, e.g. "2025-03-14 16:04:19 +0000 UTC"
    pub date: String,
    pub thumbs_up: i64,
    pub thumbs_down: i64,
}

impl Rating {
    /// Parses the provider's timestamp for date sorting. The trailing
    /// "+0000 UTC" suffix is stripped before parsing; an unparseable date
    /// yields `None` and sorts first.
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        let cleaned = self
            .date
            .split('+')
            .next()
            .unwrap_or(&self.date)
            .trim();
        NaiveDateTime::parse_from_str(cleaned, "%Y-%m-%d %H:%M:%S").ok()
    }
}

/// A professor profile together with their individual ratings.
#[derive(Debug, Clone, Serialize)]
pub struct ProfessorDetails {
    #[serde(flatten)]
    pub professor: Professor,
    pub ratings: Vec<Rating>,
}

impl ProfessorDetails {
    /// Distinct class names across the ratings, sorted, with "N/A" excluded.
    /// Used to populate the class filter.
    pub fn unique_classes(&self) -> Vec<String> {
        let mut classes: Vec<String> = self
            .ratings
            .iter()
            .map(|r| r.class.clone())
            .filter(|c| c != "N/A")
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();
        classes.sort();
        classes
    }
}

/// Sort keys for a professor's individual ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingSortKey {
    Rating,
    Difficulty,
    #[default]
    Date,
}

impl RatingSortKey {
    pub fn compare(&self, a: &Rating, b: &Rating) -> Ordering {
        match self {
            RatingSortKey::Rating => a.rating.partial_cmp(&b.rating).unwrap_or(Ordering::Equal),
            RatingSortKey::Difficulty => a
                .difficulty
                .partial_cmp(&b.difficulty)
                .unwrap_or(Ordering::Equal),
            RatingSortKey::Date => a.parsed_date().cmp(&b.parsed_date()),
        }
    }
}

/// Stable sort of ratings by one key.
pub fn sort_ratings(ratings: &mut [Rating], key: RatingSortKey, direction: SortDirection) {
    ratings.sort_by(|a, b| direction.apply(key.compare(a, b)));
}

/// Keeps only ratings left for the given class; `None` keeps everything
/// (the "All Classes" selection).
pub fn filter_ratings_by_class(ratings: &[Rating], class: Option<&str>) -> Vec<Rating> {
    match class {
        None => ratings.to_vec(),
        Some(class) => ratings.iter().filter(|r| r.class == class).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(id: &str, class: &str, score: f64, date: &str) -> Rating {
        Rating {
            id: id.to_string(),
            class: class.to_string(),
            comment: String::new(),
            rating: score,
            difficulty: 2.5,
            would_take_again: "Yes".to_string(),
            date: date.to_string(),
            thumbs_up: 0,
            thumbs_down: 0,
        }
    }

    #[test]
    fn test_parsed_date_strips_utc_suffix() {
        let r = rating("1", "CSC120", 4.0, "2025-03-14 16:04:19 +0000 UTC");
        let parsed = r.parsed_date().unwrap();
        assert_eq!(parsed.format("%Y-%m-%d").to_string(), "2025-03-14");
    }

    #[test]
    fn test_parsed_date_garbage_is_none() {
        let r = rating("1", "CSC120", 4.0, "last spring");
        assert!(r.parsed_date().is_none());
    }

    #[test]
    fn test_sort_by_date_descending() {
        let mut ratings = vec![
            rating("old", "A", 3.0, "2024-01-01 00:00:00 +0000 UTC"),
            rating("new", "A", 3.0, "2025-06-01 00:00:00 +0000 UTC"),
        ];
        sort_ratings(&mut ratings, RatingSortKey::Date, SortDirection::Desc);
        assert_eq!(ratings[0].id, "new");
    }

    #[test]
    fn test_filter_by_class() {
        let ratings = vec![
            rating("1", "CSC120", 4.0, ""),
            rating("2", "CSC190", 2.0, ""),
        ];
        assert_eq!(filter_ratings_by_class(&ratings, Some("CSC190")).len(), 1);
        assert_eq!(filter_ratings_by_class(&ratings, None).len(), 2);
    }

    #[test]
    fn test_professor_text_search_fields() {
        use crate::listing::matches_query;

        let prof = Professor {
            id: "p1".to_string(),
            first_name: "Jane".to_string(),
            last_name: "SMITH".to_string(),
            department: "Computer Science".to_string(),
            avg_rating: 4.2,
            avg_difficulty: 2.8,
            num_ratings: 3,
            would_take_again_percent: 90.0,
        };

        assert!(matches_query(&prof, "smith"));
        assert!(matches_query(&prof, "jane smith"));
        assert!(matches_query(&prof, "computer"));
        assert!(!matches_query(&prof, "biology"));
    }

    #[test]
    fn test_unique_classes_excludes_na() {
        let details = ProfessorDetails {
            professor: Professor {
                id: "p1".to_string(),
                first_name: "Jane".to_string(),
                last_name: "Smith".to_string(),
                department: "Computer Science".to_string(),
                avg_rating: 4.2,
                avg_difficulty: 2.8,
                num_ratings: 3,
                would_take_again_percent: 90.0,
            },
            ratings: vec![
                rating("1", "CSC120", 4.0, ""),
                rating("2", "CSC120", 5.0, ""),
                rating("3", "N/A", 3.0, ""),
            ],
        };
        assert_eq!(details.unique_classes(), vec!["CSC120"]);
    }
}
