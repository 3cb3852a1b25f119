use std::sync::LazyLock;

use log::{info, warn};
use scraper::{Html, Selector};

use crate::{
    errors::ScrapeError,
    query::{Campus, Query},
    requests::RequestClient,
    scraping_context::ScrapingContext,
    text_manipulators::{extract_text, find_next, sel},
};

static ROW: LazyLock<Selector> = LazyLock::new(|| sel("tr"));
static LISTING_ROW: LazyLock<Selector> =
    LazyLock::new(|| sel("tr.rowHighlight, tr.rowLowlight"));
static DATA: LazyLock<Selector> = LazyLock::new(|| sel("td.data"));

/// Checks the subject directory for a subject area at a campus.
#[derive(Debug)]
pub struct SubjectValidator {
    pub url: String,
    pub subject: String,
    pub campus: Campus,
}

impl SubjectValidator {
    pub fn new(ctx: &ScrapingContext, query: &Query) -> Self {
        Self {
            url: ctx.scraping_config.subject_directory_url(query.year),
            subject: query.course_code.subject().to_string(),
            campus: query.campus,
        }
    }

    /// `Err` only for network failures. A page we can't make sense of counts
    /// as the subject not being offered.
    pub async fn subject_exists(&self, client: &RequestClient) -> Result<bool, ScrapeError> {
        info!("Checking if subject {} exists at {}", self.subject, self.campus);
        let html = client.fetch_url_body(&self.url).await?;
        match subject_listed(&html, &self.subject, self.campus) {
            Ok(listed) => Ok(listed),
            Err(e) => {
                warn!("Could not read subject list at {}: {e}", self.url);
                Ok(false)
            }
        }
    }
}

/// Subjects are listed in the first row following `<a name="CAMPUS_CODE">`.
pub fn subject_listed(html: &str, subject: &str, campus: Campus) -> Result<bool, ScrapeError> {
    let document = Html::parse_document(html);
    let anchor_selector = sel(&format!(r#"a[name="{}"]"#, campus.code()));

    let Some(anchor) = document.select(&anchor_selector).next() else {
        return Ok(false);
    };
    let Some(subject_data) = find_next(&document, anchor, &ROW) else {
        return Ok(false);
    };

    for row in subject_data.select(&LISTING_ROW) {
        let code = row
            .select(&DATA)
            .next()
            .map(extract_text)
            .ok_or_else(|| ScrapeError::layout("subject row without a data cell"))?;
        if code == subject {
            return Ok(true);
        }
    }
    Ok(false)
}
