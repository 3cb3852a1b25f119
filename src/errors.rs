use crate::query::Campus;

/// Failures while talking to, or reading, the timetable site.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected page layout: {0}")]
    Layout(String),
}

impl ScrapeError {
    pub fn layout(details: impl Into<String>) -> Self {
        ScrapeError::Layout(details.into())
    }
}

/// What a lab timetable job reports back to the user.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("Subject {subject} is not offered at {campus} campus")]
    SubjectNotOffered { subject: String, campus: Campus },
    #[error("Course {course_code} does not exist at {campus} campus")]
    CourseNotFound { course_code: String, campus: Campus },
    #[error("The timetable site is unavailable")]
    Unavailable(#[source] ScrapeError),
    #[error("Failed to save the timetable")]
    Export(#[source] anyhow::Error),
}

impl JobError {
    /// Usage errors share clap's exit code.
    pub fn exit_code(&self) -> u8 {
        match self {
            JobError::SubjectNotOffered { .. } | JobError::CourseNotFound { .. } => 2,
            JobError::Unavailable(_) | JobError::Export(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_are_distinct_from_outages() {
        let not_offered = JobError::SubjectNotOffered {
            subject: "ZZZZ".to_string(),
            campus: Campus::Paddington,
        };
        let outage = JobError::Unavailable(ScrapeError::layout("no body"));

        assert_eq!(not_offered.exit_code(), 2);
        assert_eq!(outage.exit_code(), 1);
        assert_eq!(
            not_offered.to_string(),
            "Subject ZZZZ is not offered at Paddington campus"
        );
    }

    #[test]
    fn course_not_found_message_names_course_and_campus() {
        let err = JobError::CourseNotFound {
            course_code: "COMP9999".to_string(),
            campus: Campus::CanberraAdfa,
        };
        assert_eq!(
            err.to_string(),
            "Course COMP9999 does not exist at Canberra ADFA campus"
        );
    }
}
