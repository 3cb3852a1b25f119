mod class_scraper;
mod config;
mod course_validator;
mod errors;
mod export;
mod query;
mod ratelimit;
mod records;
mod requests;
mod schema;
mod scraping_context;
mod subject_validator;
mod text_manipulators;

pub mod cli;
pub mod jobs;

#[cfg(test)]
mod test_server;

pub use class_scraper::{ClassScraper, parse_lab_sessions};
pub use config::ScrapingConfig;
pub use course_validator::{CourseValidator, listed_courses};
pub use errors::{JobError, ScrapeError};
pub use export::{DEFAULT_OUTPUT, save_timetable_to_csv};
pub use query::{Campus, CourseCode, InvalidCourseCode, Query, Term};
pub use records::{ClassRecord, LabTimetable};
pub use requests::RequestClient;
pub use scraping_context::ScrapingContext;
pub use subject_validator::{SubjectValidator, subject_listed};
