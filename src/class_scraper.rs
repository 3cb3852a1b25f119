use std::sync::LazyLock;

use log::{debug, error, info, warn};
use scraper::{ElementRef, Html, Selector};

use crate::{
    errors::ScrapeError,
    query::{Query, Term},
    records::{ClassRecord, LabTimetable},
    requests::RequestClient,
    schema::{Field, LAB_SESSION_RULES, apply_rules},
    scraping_context::ScrapingContext,
    text_manipulators::{first_word, sel},
};

static FORM_BODY: LazyLock<Selector> = LazyLock::new(|| sel("td.formBody"));
static MEETING_BODY: LazyLock<Selector> =
    LazyLock::new(|| sel(r#"td.formBody[colspan="6"]"#));
static DATA: LazyLock<Selector> = LazyLock::new(|| sel("td.data"));

const LABORATORY: &str = "Laboratory";

/// Scrapes the laboratory sessions of one course for one term.
#[derive(Debug)]
pub struct ClassScraper {
    pub url: String,
    pub term: Term,
}

impl ClassScraper {
    pub fn new(ctx: &ScrapingContext, query: &Query) -> Self {
        Self {
            url: ctx
                .scraping_config
                .course_timetable_url(query.year, &query.course_code),
            term: query.term,
        }
    }

    /// Only network failures are returned as errors; anything odd about the
    /// page itself just means fewer (or no) records.
    pub async fn scrape(&self, client: &RequestClient) -> Result<LabTimetable, ScrapeError> {
        info!("Fetching timetable data from {}", self.url);
        let html = client.fetch_url_body(&self.url).await?;
        let timetable = parse_lab_sessions(&html, self.term);
        debug!("Laboratory sections by class: {:?}", timetable.sections);
        Ok(timetable)
    }
}

/// Extracts every laboratory session of `term` from a course timetable page.
pub fn parse_lab_sessions(html: &str, term: Term) -> LabTimetable {
    let document = Html::parse_document(html);
    let mut timetable = LabTimetable::default();

    let mut form_bodies = document.select(&FORM_BODY).peekable();
    if form_bodies.peek().is_none() {
        warn!("No timetable data found.");
        return timetable;
    }

    for cell in form_bodies {
        let Some(meeting) = lab_meeting_cell(cell) else {
            continue;
        };
        let record = match extract_class_details(cell, meeting) {
            Ok(record) => record,
            Err(e) => {
                error!("Error parsing class details: {e}");
                continue;
            }
        };

        timetable
            .sections
            .insert(record.class_number.clone(), record.section_code.clone());
        if term.matches(&record.term_tag) {
            timetable.records.push(record);
        }
    }

    timetable
}

/// A session block is a laboratory when it has exactly one meeting cell and
/// some data cell reads `Laboratory`. Returns that meeting cell.
fn lab_meeting_cell(cell: ElementRef) -> Option<ElementRef> {
    let mut meetings = cell.select(&MEETING_BODY);
    let meeting = meetings.next()?;
    if meetings.next().is_some() {
        return None;
    }

    let is_lab = cell
        .select(&DATA)
        .any(|data| data.text().collect::<String>() == LABORATORY);
    is_lab.then_some(meeting)
}

fn extract_class_details(
    cell: ElementRef,
    meeting: ElementRef,
) -> Result<ClassRecord, ScrapeError> {
    let mut extracted = apply_rules(LAB_SESSION_RULES, cell, meeting)?;

    let term_text = extracted.take(Field::Term);
    let term_tag = first_word(&term_text)
        .ok_or_else(|| ScrapeError::layout("empty teaching period cell"))?
        .to_string();

    let day = extracted.take(Field::Day);
    let time = extracted.take(Field::Time);

    Ok(ClassRecord {
        class_number: extracted.take(Field::ClassNumber),
        section_code: extracted.take(Field::Section),
        status: extracted.take_optional(Field::Status),
        enrolment: extracted.take(Field::Enrolment),
        day_time: format!("{day} {time}"),
        location: extracted.take(Field::Location),
        term_tag,
    })
}
