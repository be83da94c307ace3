//! Time-layout engine for the weekly schedule grid.
//!
//! Converts a meeting's day-code string and wall-clock time range into the
//! weekdays it occupies and a pixel rectangle for an hour-gridded calendar.
//! The grid spans hour 6 through hour 23 (18 one-hour rows). Malformed or
//! TBA times decode to `None` and produce no block; they are never an error,
//! so one bad entry cannot keep a course's other meetings off the grid.

use crate::catalog::MeetingTime;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// First hour visible on the grid (6 AM).
pub const GRID_START_HOUR: u32 = 6;

/// Number of one-hour rows on the grid (6 AM through 11 PM).
pub const GRID_HOUR_COUNT: u32 = 18;

/// Row height for the full weekly view, in pixels.
pub const ROW_HEIGHT_FULL: f64 = 70.0;

/// Row height for the compact preview, in pixels.
pub const ROW_HEIGHT_PREVIEW: f64 = 40.0;

/// Width of the leading time-label column, in pixels.
pub const TIME_COLUMN_WIDTH: f64 = 60.0;

/// Minimum rendered block height so sub-hour or malformed spans stay tappable.
pub const MIN_BLOCK_HEIGHT: f64 = 24.0;

/// Day of the week occupied by a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Decodes a single day-code letter.
    ///
    /// The schedule uses `M T W R F S`; Sunday has no letter in this scheme
    /// and is never produced. Unknown characters yield `None`.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'M' => Some(Weekday::Monday),
            'T' => Some(Weekday::Tuesday),
            'W' => Some(Weekday::Wednesday),
            'R' => Some(Weekday::Thursday),
            'F' => Some(Weekday::Friday),
            'S' => Some(Weekday::Saturday),
            _ => None,
        }
    }

    /// Short display label ("Mon", "Tue", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Sun",
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
        }
    }
}

/// A wall-clock time in 24-hour form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

/// A decoded meeting time range. End is not validated against start; a
/// non-positive span flows through and gets clamped to the minimum height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSpan {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeSpan {
    /// Duration in fractional hours. May be zero or negative for
    /// malformed ranges.
    pub fn duration_hours(&self) -> f64 {
        f64::from(self.end.hour) - f64::from(self.start.hour)
            + (f64::from(self.end.minute) - f64::from(self.start.minute)) / 60.0
    }
}

/// Pixel rectangle for one course block on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlockGeometry {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// Grid measurements and day ordering for one view of the calendar.
#[derive(Debug, Clone)]
pub struct GridConfig {
    pub row_height: f64,
    pub column_width: f64,
    pub time_column_width: f64,
    pub day_order: Vec<Weekday>,
}

impl GridConfig {
    /// Full weekly view: Sun..Sat columns, 70px rows.
    pub fn full_week(column_width: f64) -> Self {
        Self {
            row_height: ROW_HEIGHT_FULL,
            column_width,
            time_column_width: TIME_COLUMN_WIDTH,
            day_order: vec![
                Weekday::Sunday,
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday,
                Weekday::Friday,
                Weekday::Saturday,
            ],
        }
    }

    /// Compact Mon..Sun preview with 40px rows.
    pub fn preview(column_width: f64) -> Self {
        Self {
            row_height: ROW_HEIGHT_PREVIEW,
            column_width,
            time_column_width: TIME_COLUMN_WIDTH,
            day_order: vec![
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday,
                Weekday::Friday,
                Weekday::Saturday,
                Weekday::Sunday,
            ],
        }
    }

    /// Column index of a weekday in this view, if it is shown at all.
    pub fn day_index(&self, day: Weekday) -> Option<usize> {
        self.day_order.iter().position(|&d| d == day)
    }
}

/// Sentinel the schedule feed uses for meetings without a fixed time.
const TBA_SENTINEL: &str = "TBA (To Be Announced)";

static TIME_RANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d{1,2}):(\d{2})\s*(am|pm)\s*-\s*(\d{1,2}):(\d{2})\s*(am|pm)\s*$")
        .unwrap()
});

/// Decodes a day-code string into the weekdays it denotes.
///
/// Unknown characters are silently skipped; an empty string yields an empty
/// list. Repeated letters produce repeated entries.
pub fn decode_days(days: &str) -> Vec<Weekday> {
    days.chars().filter_map(Weekday::from_code).collect()
}

/// Decodes a "H:MM am - H:MM pm" range into a 24-hour time span.
///
/// Returns `None` for an empty string, the TBA sentinel, or anything that
/// does not match the pattern. Callers render nothing for a `None`.
pub fn decode_time(time: &str) -> Option<TimeSpan> {
    let trimmed = time.trim();
    if trimmed.is_empty() || trimmed == TBA_SENTINEL {
        return None;
    }

    let caps = TIME_RANGE_REGEX.captures(trimmed)?;

    let start = clock_time(
        caps.get(1)?.as_str(),
        caps.get(2)?.as_str(),
        caps.get(3)?.as_str(),
    )?;
    let end = clock_time(
        caps.get(4)?.as_str(),
        caps.get(5)?.as_str(),
        caps.get(6)?.as_str(),
    )?;

    Some(TimeSpan { start, end })
}

/// Applies standard 12-hour conversion: 12am -> 0, 12pm -> 12,
/// 1-11pm -> +12, 1-11am unchanged.
fn clock_time(hour: &str, minute: &str, meridiem: &str) -> Option<ClockTime> {
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;

    let hour = match (hour, meridiem.to_ascii_lowercase().as_str()) {
        (12, "am") => 0,
        (12, "pm") => 12,
        (h, "pm") => h + 12,
        (h, _) => h,
    };

    Some(ClockTime { hour, minute })
}

/// Computes the pixel rectangle for a time span in one day column.
///
/// Returns `None` if the weekday is not shown in this view's day ordering.
pub fn block_geometry(span: &TimeSpan, day: Weekday, grid: &GridConfig) -> Option<BlockGeometry> {
    let day_index = grid.day_index(day)?;

    let start_offset_hours = f64::from(span.start.hour) - f64::from(GRID_START_HOUR)
        + f64::from(span.start.minute) / 60.0;
    let top = start_offset_hours * grid.row_height;
    let height = (span.duration_hours() * grid.row_height).max(MIN_BLOCK_HEIGHT);
    let left = grid.time_column_width + day_index as f64 * grid.column_width;

    Some(BlockGeometry {
        top,
        left,
        width: grid.column_width,
        height,
    })
}

/// A positioned block for one (meeting, weekday) pair.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedBlock {
    pub day: Weekday,
    pub span: TimeSpan,
    pub geometry: BlockGeometry,
}

/// Lays out one meeting, producing a block per occupied weekday.
///
/// TBA or malformed times yield no blocks; weekdays outside the view's day
/// ordering are skipped.
pub fn layout_meeting(meeting: &MeetingTime, grid: &GridConfig) -> Vec<PlacedBlock> {
    let Some(span) = decode_time(&meeting.time) else {
        return Vec::new();
    };

    decode_days(&meeting.days)
        .into_iter()
        .filter_map(|day| {
            block_geometry(&span, day, grid).map(|geometry| PlacedBlock {
                day,
                span,
                geometry,
            })
        })
        .collect()
}

/// Lays out all of a course's meetings. A malformed entry contributes no
/// blocks but does not suppress the valid ones.
pub fn layout_meetings(meetings: &[MeetingTime], grid: &GridConfig) -> Vec<PlacedBlock> {
    meetings
        .iter()
        .flat_map(|meeting| layout_meeting(meeting, grid))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridConfig {
        GridConfig::full_week(100.0)
    }

    #[test]
    fn test_decode_days_standard() {
        assert_eq!(
            decode_days("MWF"),
            vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]
        );
        assert_eq!(decode_days("TR"), vec![Weekday::Tuesday, Weekday::Thursday]);
        assert_eq!(decode_days("S"), vec![Weekday::Saturday]);
    }

    #[test]
    fn test_decode_days_skips_unknown() {
        assert_eq!(decode_days("MXW"), vec![Weekday::Monday, Weekday::Wednesday]);
        assert!(decode_days("xyz").is_empty());
        assert!(decode_days("").is_empty());
    }

    #[test]
    fn test_decode_days_repeats_repeated_letters() {
        assert_eq!(decode_days("MM"), vec![Weekday::Monday, Weekday::Monday]);
    }

    #[test]
    fn test_decode_time_tba_and_empty() {
        assert_eq!(decode_time("TBA (To Be Announced)"), None);
        assert_eq!(decode_time(""), None);
        assert_eq!(decode_time("   "), None);
    }

    #[test]
    fn test_decode_time_morning() {
        let span = decode_time("9:00 am - 10:15 am").unwrap();
        assert_eq!(span.start, ClockTime { hour: 9, minute: 0 });
        assert_eq!(span.end, ClockTime { hour: 10, minute: 15 });
    }

    #[test]
    fn test_decode_time_afternoon() {
        let span = decode_time("1:30 pm - 2:45 pm").unwrap();
        assert_eq!(span.start, ClockTime { hour: 13, minute: 30 });
        assert_eq!(span.end, ClockTime { hour: 14, minute: 45 });
    }

    #[test]
    fn test_decode_time_noon_stays_twelve() {
        let span = decode_time("12:00 pm - 1:00 pm").unwrap();
        assert_eq!(span.start, ClockTime { hour: 12, minute: 0 });
        assert_eq!(span.end, ClockTime { hour: 13, minute: 0 });
    }

    #[test]
    fn test_decode_time_midnight_maps_to_zero() {
        let span = decode_time("12:00 am - 1:00 am").unwrap();
        assert_eq!(span.start, ClockTime { hour: 0, minute: 0 });
        assert_eq!(span.end, ClockTime { hour: 1, minute: 0 });
    }

    #[test]
    fn test_decode_time_case_and_whitespace_tolerant() {
        let span = decode_time("  9:05 AM-10:00 Pm ").unwrap();
        assert_eq!(span.start, ClockTime { hour: 9, minute: 5 });
        assert_eq!(span.end, ClockTime { hour: 22, minute: 0 });
    }

    #[test]
    fn test_decode_time_rejects_garbage() {
        assert_eq!(decode_time("TBA"), None);
        assert_eq!(decode_time("9:00 - 10:15"), None);
        assert_eq!(decode_time("nine to ten"), None);
    }

    #[test]
    fn test_geometry_spec_example() {
        // start 9:00, end 10:30, grid start 6, row height 70
        let span = decode_time("9:00 am - 10:30 am").unwrap();
        let grid = GridConfig {
            row_height: 70.0,
            column_width: 100.0,
            time_column_width: 60.0,
            day_order: vec![Weekday::Monday, Weekday::Tuesday],
        };

        let block = block_geometry(&span, Weekday::Tuesday, &grid).unwrap();
        assert_eq!(block.top, 210.0);
        assert_eq!(block.height, 105.0);
        assert_eq!(block.left, 60.0 + 100.0);
        assert_eq!(block.width, 100.0);
    }

    #[test]
    fn test_geometry_clamps_to_minimum_height() {
        let span = TimeSpan {
            start: ClockTime { hour: 9, minute: 0 },
            end: ClockTime { hour: 9, minute: 0 },
        };
        let block = block_geometry(&span, Weekday::Monday, &grid()).unwrap();
        assert_eq!(block.height, MIN_BLOCK_HEIGHT);
    }

    #[test]
    fn test_geometry_skips_day_outside_view() {
        let span = decode_time("9:00 am - 10:00 am").unwrap();
        let weekdays_only = GridConfig {
            day_order: vec![
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday,
                Weekday::Friday,
            ],
            ..grid()
        };
        assert!(block_geometry(&span, Weekday::Saturday, &weekdays_only).is_none());
    }

    #[test]
    fn test_layout_meeting_one_block_per_day() {
        let meeting = MeetingTime {
            days: "MWF".to_string(),
            time: "9:00 am - 9:55 am".to_string(),
        };
        let blocks = layout_meeting(&meeting, &grid());
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].day, Weekday::Monday);
        assert_eq!(blocks[2].day, Weekday::Friday);
        // Same vertical placement in every column
        assert!(blocks
            .iter()
            .all(|b| b.geometry.top == blocks[0].geometry.top));
    }

    #[test]
    fn test_layout_meetings_bad_entry_does_not_poison_rest() {
        let meetings = vec![
            MeetingTime {
                days: "T".to_string(),
                time: "TBA (To Be Announced)".to_string(),
            },
            MeetingTime {
                days: "MW".to_string(),
                time: "1:30 pm - 2:45 pm".to_string(),
            },
        ];
        let blocks = layout_meetings(&meetings, &grid());
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_preview_grid_day_ordering() {
        let preview = GridConfig::preview(80.0);
        assert_eq!(preview.day_index(Weekday::Monday), Some(0));
        assert_eq!(preview.day_index(Weekday::Sunday), Some(6));
        assert_eq!(preview.row_height, ROW_HEIGHT_PREVIEW);
    }
}
