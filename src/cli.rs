use std::path::PathBuf;

use clap::Parser;

use crate::{
    export::DEFAULT_OUTPUT,
    query::{Campus, CourseCode, Query, Term, current_year},
};

/// Extracts the laboratory schedule of a course from the UNSW timetable,
/// along with the lab locations.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Course code to extract, e.g. COMP1511
    pub course_code: CourseCode,

    /// Term the schedule is needed for
    #[arg(value_enum)]
    pub term: Term,

    /// Timetable year, defaults to the current one
    #[arg(long, default_value_t = current_year())]
    pub year: i32,

    /// Campus offering to look at
    #[arg(long, value_enum, ignore_case = true, default_value_t = Campus::Kensington)]
    pub campus: Campus,

    /// Where to write the CSV
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

impl Args {
    pub fn query(&self) -> Query {
        Query {
            course_code: self.course_code.clone(),
            term: self.term,
            year: self.year,
            campus: self.campus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn parses_positionals_and_defaults() {
        let args = Args::try_parse_from(["labscraper", "COMP1511", "T2"]).unwrap();
        let query = args.query();

        assert_eq!(query.course_code.as_str(), "COMP1511");
        assert_eq!(query.term, Term::T2);
        assert_eq!(query.year, current_year());
        assert_eq!(query.campus, Campus::Kensington);
        assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn parses_options() {
        let args = Args::try_parse_from([
            "labscraper",
            "ZEIT1101",
            "T3",
            "--year",
            "2024",
            "--campus",
            "Canberra ADFA",
            "-o",
            "labs.csv",
        ])
        .unwrap();

        assert_eq!(args.year, 2024);
        assert_eq!(args.campus, Campus::CanberraAdfa);
        assert_eq!(args.output, PathBuf::from("labs.csv"));
    }

    #[test]
    fn rejects_bad_course_code() {
        let err = Args::try_parse_from(["labscraper", "comp1511", "T1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn rejects_unknown_term_and_campus() {
        let err = Args::try_parse_from(["labscraper", "COMP1511", "T4"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);

        let err = Args::try_parse_from(["labscraper", "COMP1511", "T1", "--campus", "Randwick"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }
}
