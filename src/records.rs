use std::collections::BTreeMap;

use serde::Serialize;

/// One laboratory session as published on a course timetable page.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRecord {
    pub class_number: String,
    pub section_code: String,
    /// Not every page variant publishes a status.
    pub status: Option<String>,
    /// `"<enrolled>/<capacity>"`, kept as published.
    pub enrolment: String,
    pub day_time: String,
    pub location: String,
    pub term_tag: String,
}

/// Result of one pass over a course timetable page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabTimetable {
    /// Sessions in the requested term, in page order. Never deduplicated.
    pub records: Vec<ClassRecord>,
    /// Class number to section for every laboratory session on the page,
    /// whatever its term. Handy for working out setups.
    pub sections: BTreeMap<String, String>,
}

impl LabTimetable {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
