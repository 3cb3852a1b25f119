use std::path::Path;

use log::info;

use crate::{
    class_scraper::ClassScraper, course_validator::CourseValidator, errors::JobError,
    export::save_timetable_to_csv, query::Query, records::LabTimetable,
    scraping_context::ScrapingContext, subject_validator::SubjectValidator,
};

pub async fn run_subject_check_job(ctx: &ScrapingContext, query: &Query) -> Result<(), JobError> {
    let validator = SubjectValidator::new(ctx, query);
    match validator.subject_exists(&ctx.request_client).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(JobError::SubjectNotOffered {
            subject: query.course_code.subject().to_string(),
            campus: query.campus,
        }),
        Err(e) => Err(JobError::Unavailable(e)),
    }
}

pub async fn run_course_check_job(ctx: &ScrapingContext, query: &Query) -> Result<(), JobError> {
    let validator = CourseValidator::new(ctx, query);
    match validator.course_exists(&ctx.request_client).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(JobError::CourseNotFound {
            course_code: query.course_code.to_string(),
            campus: query.campus,
        }),
        Err(e) => Err(JobError::Unavailable(e)),
    }
}

pub async fn run_timetable_scraper_job(
    ctx: &ScrapingContext,
    query: &Query,
) -> Result<LabTimetable, JobError> {
    ClassScraper::new(ctx, query)
        .scrape(&ctx.request_client)
        .await
        .map_err(JobError::Unavailable)
}

/// Validators strictly before the timetable fetch; one request at a time.
/// Returns whether a file was written.
pub async fn run_lab_timetable_job(
    ctx: &ScrapingContext,
    query: &Query,
    output: &Path,
) -> Result<bool, JobError> {
    run_subject_check_job(ctx, query).await?;
    run_course_check_job(ctx, query).await?;

    let timetable = run_timetable_scraper_job(ctx, query).await?;
    if timetable.is_empty() {
        info!(
            "No laboratory sessions for {} in {} {}",
            query.course_code, query.term, query.year
        );
        return Ok(false);
    }

    info!(
        "Found {} laboratory sessions for {} in {} {}",
        timetable.records.len(),
        query.course_code,
        query.term,
        query.year
    );
    save_timetable_to_csv(&timetable.records, output).map_err(JobError::Export)
}
