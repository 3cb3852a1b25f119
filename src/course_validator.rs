use std::{collections::BTreeSet, sync::LazyLock};

use log::{info, warn};
use scraper::{Html, Selector};

use crate::{
    errors::ScrapeError,
    query::{Campus, CourseCode, Query},
    requests::RequestClient,
    scraping_context::ScrapingContext,
    text_manipulators::{extract_text, find_next, sel},
};

static CATEGORY_HEADING: LazyLock<Selector> =
    LazyLock::new(|| sel("td.classSearchSectionHeading"));
static ROW: LazyLock<Selector> = LazyLock::new(|| sel("tr"));
static TABLE: LazyLock<Selector> = LazyLock::new(|| sel("table"));
static LISTING_ROW: LazyLock<Selector> =
    LazyLock::new(|| sel("tr.rowHighlight, tr.rowLowlight"));
static CODE_LINK: LazyLock<Selector> = LazyLock::new(|| sel("a"));
static DATA: LazyLock<Selector> = LazyLock::new(|| sel("td.data"));

/// Checks a subject's class search page for one course.
#[derive(Debug)]
pub struct CourseValidator {
    pub url: String,
    pub course_code: CourseCode,
    pub campus: Campus,
}

impl CourseValidator {
    pub fn new(ctx: &ScrapingContext, query: &Query) -> Self {
        Self {
            url: ctx.scraping_config.subject_classes_url(
                query.year,
                query.course_code.subject(),
                query.campus,
            ),
            course_code: query.course_code.clone(),
            campus: query.campus,
        }
    }

    /// `Err` only for network failures, same as the subject check.
    pub async fn course_exists(&self, client: &RequestClient) -> Result<bool, ScrapeError> {
        info!("Checking if course {} exists at {}", self.course_code, self.campus);
        let html = client.fetch_url_body(&self.url).await?;
        match listed_courses(&html) {
            Ok(courses) => Ok(courses.contains(self.course_code.as_str())),
            Err(e) => {
                warn!("Could not read course list at {}: {e}", self.url);
                Ok(false)
            }
        }
    }
}

/// Every course code listed under any category (undergraduate, postgraduate,
/// research, ...) of a class search page.
pub fn listed_courses(html: &str) -> Result<BTreeSet<String>, ScrapeError> {
    let document = Html::parse_document(html);
    let mut courses = BTreeSet::new();

    for category in document.select(&CATEGORY_HEADING) {
        let Some(class_data) = find_next(&document, category, &ROW)
            .and_then(|row| row.select(&TABLE).next())
        else {
            continue;
        };
        for row in class_data.select(&LISTING_ROW) {
            let code = row
                .select(&DATA)
                .next()
                .and_then(|data| data.select(&CODE_LINK).next())
                .map(extract_text)
                .ok_or_else(|| ScrapeError::layout("course row without a code link"))?;
            courses.insert(code);
        }
    }
    Ok(courses)
}
