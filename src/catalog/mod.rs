/// Catalog module for loading and indexing published course schedules

mod types;

pub use types::{CourseOffering, MeetingTime, ScheduleFile};

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Could not read a schedule file from disk
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A schedule file was not valid JSON (or did not match the expected shape)
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// No schedule files produced any offerings
    #[error("No course offerings loaded")]
    Empty,
}

/// Read-only store of all course offerings for the term.
///
/// Loaded once at startup from the published schedule JSON files and never
/// mutated afterwards. Lookups by CRN go through an index built at load time.
pub struct CatalogStore {
    courses: Vec<CourseOffering>,
    by_crn: HashMap<String, usize>,
    semester: String,
}

impl CatalogStore {
    /// Loads the catalog from one or more schedule JSON files.
    ///
    /// Offerings are kept in file order. A CRN that appears more than once
    /// is logged and skipped after the first occurrence, since the CRN is
    /// the unique identifier everything downstream keys on.
    pub fn load_from_files(paths: &[PathBuf]) -> Result<Self, CatalogError> {
        let mut courses: Vec<CourseOffering> = Vec::new();
        let mut by_crn: HashMap<String, usize> = HashMap::new();
        let mut semester = String::new();

        for path in paths {
            let file = Self::read_schedule_file(path)?;
            info!(
                "Loaded {} {} offerings from {}",
                file.courses.len(),
                file.department,
                path.display()
            );

            if semester.is_empty() {
                semester = file.semester.clone();
            }

            for course in file.courses {
                if by_crn.contains_key(&course.crn) {
                    warn!(
                        "Duplicate CRN {} ({}) in {}, keeping first occurrence",
                        course.crn,
                        course.full_code(),
                        path.display()
                    );
                    continue;
                }
                by_crn.insert(course.crn.clone(), courses.len());
                courses.push(course);
            }
        }

        if courses.is_empty() {
            return Err(CatalogError::Empty);
        }

        info!("Catalog ready: {} offerings for {}", courses.len(), semester);

        Ok(Self {
            courses,
            by_crn,
            semester,
        })
    }

    /// Loads every `.json` file in a directory, in sorted filename order.
    pub fn load_from_directory(dir: &Path) -> Result<Self, CatalogError> {
        let entries = fs::read_dir(dir).map_err(|source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect();
        paths.sort();

        Self::load_from_files(&paths)
    }

    fn read_schedule_file(path: &Path) -> Result<ScheduleFile, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds a store directly from already-parsed schedule files.
    /// Used by tests and by any caller that embeds the schedule data.
    pub fn from_schedule_files(files: Vec<ScheduleFile>) -> Self {
        let mut courses: Vec<CourseOffering> = Vec::new();
        let mut by_crn: HashMap<String, usize> = HashMap::new();
        let mut semester = String::new();

        for file in files {
            if semester.is_empty() {
                semester = file.semester.clone();
            }
            for course in file.courses {
                if by_crn.contains_key(&course.crn) {
                    warn!("Duplicate CRN {}, keeping first occurrence", course.crn);
                    continue;
                }
                by_crn.insert(course.crn.clone(), courses.len());
                courses.push(course);
            }
        }

        Self {
            courses,
            by_crn,
            semester,
        }
    }

    /// Looks up an offering by CRN.
    pub fn get(&self, crn: &str) -> Option<&CourseOffering> {
        self.by_crn.get(crn).map(|&idx| &self.courses[idx])
    }

    /// All offerings, in load order.
    pub fn all(&self) -> &[CourseOffering] {
        &self.courses
    }

    /// Distinct subject codes, sorted.
    pub fn subjects(&self) -> Vec<String> {
        let mut subjects: Vec<String> = self
            .courses
            .iter()
            .map(|c| c.subject.clone())
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();
        subjects.sort();
        subjects
    }

    /// The semester label from the source files (e.g. "Spring 2026").
    pub fn semester(&self) -> &str {
        &self.semester
    }

    /// Number of offerings in the catalog.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Returns true if the catalog holds no offerings.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
