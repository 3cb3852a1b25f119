use std::{fmt, str::FromStr, sync::LazyLock};

use chrono::{Datelike, Utc};
use clap::ValueEnum;
use regex::Regex;

static COURSE_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{4}[0-9]{4}$").expect("course code pattern is valid"));

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Course code {0:?} should be four capital letters followed by four digits")]
pub struct InvalidCourseCode(pub String);

/// A UNSW course code such as `COMP1511`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseCode(String);

impl CourseCode {
    /// The subject area, i.e. the leading four letters.
    pub fn subject(&self) -> &str {
        &self.0[..4]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CourseCode {
    type Err = InvalidCourseCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if COURSE_CODE_PATTERN.is_match(s) {
            Ok(CourseCode(s.to_string()))
        } else {
            Err(InvalidCourseCode(s.to_string()))
        }
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Term {
    #[value(name = "T1")]
    T1,
    #[value(name = "T2")]
    T2,
    #[value(name = "T3")]
    T3,
}

impl Term {
    pub fn as_str(self) -> &'static str {
        match self {
            Term::T1 => "T1",
            Term::T2 => "T2",
            Term::T3 => "T3",
        }
    }

    /// Whether a term token scraped from the page refers to this term.
    pub fn matches(self, token: &str) -> bool {
        self.as_str() == token
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Campus {
    #[value(name = "Kensington")]
    Kensington,
    #[value(name = "Paddington")]
    Paddington,
    #[value(name = "Canberra City", alias = "canberra-city")]
    CanberraCity,
    #[value(name = "Canberra ADFA", alias = "canberra-adfa")]
    CanberraAdfa,
}

impl Campus {
    /// Site code used for anchors and subject page names.
    pub fn code(self) -> &'static str {
        match self {
            Campus::Kensington => "KENS",
            Campus::Paddington => "COFA",
            Campus::CanberraCity => "CANC",
            Campus::CanberraAdfa => "ADFA",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Campus::Kensington => "Kensington",
            Campus::Paddington => "Paddington",
            Campus::CanberraCity => "Canberra City",
            Campus::CanberraAdfa => "Canberra ADFA",
        }
    }
}

impl fmt::Display for Campus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Everything one invocation asks for. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub course_code: CourseCode,
    pub term: Term,
    pub year: i32,
    pub campus: Campus,
}
