//! Where each field of a laboratory session lives on a course timetable page.
//!
//! A session block is a `td.formBody` holding a table of label/data rows plus
//! a nested `td.formBody[colspan="6"]` with the meeting information. Rows are
//! every `<tr>` under the first `<table>` of the block, in document order, and
//! data cells are every `td.data` under a row. Columns are picked either by
//! position or by the `td.label` heading them. If UNSW reshuffles the layout,
//! [`LAB_SESSION_RULES`] is the only thing that needs to change.

use std::{collections::HashMap, sync::LazyLock};

use scraper::{ElementRef, Selector};

use crate::{
    errors::ScrapeError,
    text_manipulators::{extract_text, sel},
};

static TABLE: LazyLock<Selector> = LazyLock::new(|| sel("table"));
static ROW: LazyLock<Selector> = LazyLock::new(|| sel("tr"));
static DATA: LazyLock<Selector> = LazyLock::new(|| sel("td.data"));
static LABEL: LazyLock<Selector> = LazyLock::new(|| sel("td.label"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ClassNumber,
    Section,
    Term,
    Status,
    Enrolment,
    Day,
    Time,
    Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The session block itself.
    Session,
    /// The nested meeting information cell.
    Meeting,
}

/// Which data cell of a row holds the value.
#[derive(Debug, Clone, Copy)]
pub enum Column {
    Index(usize),
    /// The data cell lined up with the `td.label` reading `label` in
    /// `label_row`. Rows without any labels fall back to `fallback`.
    Labelled {
        label_row: usize,
        label: &'static str,
        fallback: usize,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct CellRule {
    pub field: Field,
    pub scope: Scope,
    pub row: usize,
    pub column: Column,
    pub required: bool,
}

const fn rule(field: Field, scope: Scope, row: usize, index: usize) -> CellRule {
    CellRule {
        field,
        scope,
        row,
        column: Column::Index(index),
        required: true,
    }
}

const fn labelled(
    field: Field,
    row: usize,
    label_row: usize,
    label: &'static str,
    fallback: usize,
    required: bool,
) -> CellRule {
    CellRule {
        field,
        scope: Scope::Session,
        row,
        column: Column::Labelled {
            label_row,
            label,
            fallback,
        },
        required,
    }
}

pub const LAB_SESSION_RULES: &[CellRule] = &[
    rule(Field::ClassNumber, Scope::Session, 1, 0),
    rule(Field::Section, Scope::Session, 1, 1),
    rule(Field::Term, Scope::Session, 1, 2),
    // Some page variants leave the status column out altogether.
    labelled(Field::Status, 3, 2, "Status", 1, false),
    labelled(Field::Enrolment, 3, 2, "Enrols/Capacity", 2, true),
    rule(Field::Day, Scope::Meeting, 2, 0),
    rule(Field::Time, Scope::Meeting, 2, 1),
    rule(Field::Location, Scope::Meeting, 2, 2),
];

/// Values pulled out of one session block by a set of rules.
#[derive(Debug, Default)]
pub struct Extracted {
    values: HashMap<Field, String>,
}

impl Extracted {
    /// Only valid for fields whose rule is required; those are guaranteed to
    /// be present after a successful [`apply_rules`].
    pub fn take(&mut self, field: Field) -> String {
        self.values.remove(&field).unwrap_or_default()
    }

    pub fn take_optional(&mut self, field: Field) -> Option<String> {
        self.values.remove(&field)
    }
}

pub fn apply_rules(
    rules: &[CellRule],
    session: ElementRef,
    meeting: ElementRef,
) -> Result<Extracted, ScrapeError> {
    let session_rows = table_rows(session, Scope::Session)?;
    let meeting_rows = table_rows(meeting, Scope::Meeting)?;

    let mut extracted = Extracted::default();
    for rule in rules {
        let rows = match rule.scope {
            Scope::Session => &session_rows,
            Scope::Meeting => &meeting_rows,
        };
        let value = data_index(rows, rule.column).and_then(|index| {
            rows.get(rule.row)
                .and_then(|row| row.select(&DATA).nth(index))
                .map(extract_text)
        });
        match value {
            Some(value) => {
                extracted.values.insert(rule.field, value);
            }
            None if rule.required => {
                return Err(ScrapeError::layout(format!(
                    "no {:?} at row {} ({:?}) of the {:?} table",
                    rule.field, rule.row, rule.column, rule.scope
                )));
            }
            None => {}
        }
    }
    Ok(extracted)
}

fn data_index(rows: &[ElementRef], column: Column) -> Option<usize> {
    match column {
        Column::Index(index) => Some(index),
        Column::Labelled {
            label_row,
            label,
            fallback,
        } => {
            let labels: Vec<String> = rows
                .get(label_row)
                .map(|row| row.select(&LABEL).map(extract_text).collect())
                .unwrap_or_default();
            if labels.is_empty() {
                Some(fallback)
            } else {
                labels.iter().position(|text| text == label)
            }
        }
    }
}

fn table_rows(cell: ElementRef, scope: Scope) -> Result<Vec<ElementRef>, ScrapeError> {
    let table = cell
        .select(&TABLE)
        .next()
        .ok_or_else(|| ScrapeError::layout(format!("{scope:?} cell has no table")))?;
    Ok(table.select(&ROW).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const BLOCK: &str = r#"
        <table><tr><td class="formBody" id="session">
          <table>
            <tr><td class="label">Class Nbr</td></tr>
            <tr><td class="data">7890</td><td class="data">H13A</td><td class="data">T2 - Term Two</td></tr>
            <tr><td class="label">Activity</td></tr>
            <tr><td class="data">Laboratory</td></tr>
            <tr><td class="formBody" colspan="6" id="meeting">
              <table>
                <tr><td class="label">Day</td></tr>
                <tr><td class="label">Start</td></tr>
                <tr><td class="data">Thu</td><td class="data">09:00 - 11:00</td><td class="data">Quad 1042</td></tr>
              </table>
            </td></tr>
          </table>
        </td></tr></table>
    "#;

    fn cells(doc: &Html) -> (ElementRef, ElementRef) {
        (
            doc.select(&sel("#session")).next().unwrap(),
            doc.select(&sel("#meeting")).next().unwrap(),
        )
    }

    #[test]
    fn missing_optional_field_is_left_out() {
        let doc = Html::parse_document(BLOCK);
        let (session, meeting) = cells(&doc);
        let rules = [
            rule(Field::ClassNumber, Scope::Session, 1, 0),
            labelled(Field::Status, 3, 2, "Status", 1, false),
            rule(Field::Location, Scope::Meeting, 2, 2),
        ];

        let mut extracted = apply_rules(&rules, session, meeting).unwrap();
        assert_eq!(extracted.take(Field::ClassNumber), "7890");
        assert_eq!(extracted.take(Field::Location), "Quad 1042");
        assert_eq!(extracted.take_optional(Field::Status), None);
    }

    #[test]
    fn missing_required_field_is_a_layout_error() {
        let doc = Html::parse_document(BLOCK);
        let (session, meeting) = cells(&doc);

        let err = apply_rules(LAB_SESSION_RULES, session, meeting).unwrap_err();
        assert!(matches!(err, ScrapeError::Layout(ref msg) if msg.contains("Enrolment")));
    }

    #[test]
    fn labelled_column_follows_its_heading() {
        let doc = Html::parse_document(
            r#"<table><tr><td class="formBody" id="session"><table>
              <tr><td class="label">Class Nbr</td></tr>
              <tr><td class="data">7891</td></tr>
              <tr><td class="label">Activity</td><td class="label">Enrols/Capacity</td></tr>
              <tr><td class="data">Laboratory</td><td class="data">20/24</td></tr>
              <tr><td class="formBody" colspan="6" id="meeting"><table><tr><td>-</td></tr></table></td></tr>
            </table></td></tr></table>"#,
        );
        let (session, meeting) = cells(&doc);
        let rules = [
            labelled(Field::Status, 3, 2, "Status", 1, false),
            labelled(Field::Enrolment, 3, 2, "Enrols/Capacity", 2, true),
        ];

        let mut extracted = apply_rules(&rules, session, meeting).unwrap();
        assert_eq!(extracted.take_optional(Field::Status), None);
        assert_eq!(extracted.take(Field::Enrolment), "20/24");
    }

    #[test]
    fn unlabelled_row_falls_back_to_position() {
        let doc = Html::parse_document(
            r#"<table><tr><td class="formBody" id="session"><table>
              <tr><td>Class Nbr</td></tr>
              <tr><td class="data">7892</td></tr>
              <tr><td>Activity</td><td>Status</td><td>Enrols/Capacity</td></tr>
              <tr><td class="data">Laboratory</td><td class="data">Full</td><td class="data">24/24</td></tr>
              <tr><td class="formBody" colspan="6" id="meeting"><table><tr><td>-</td></tr></table></td></tr>
            </table></td></tr></table>"#,
        );
        let (session, meeting) = cells(&doc);

        let mut extracted = apply_rules(
            &[
                labelled(Field::Status, 3, 2, "Status", 1, false),
                labelled(Field::Enrolment, 3, 2, "Enrols/Capacity", 2, true),
            ],
            session,
            meeting,
        )
        .unwrap();
        assert_eq!(extracted.take_optional(Field::Status).as_deref(), Some("Full"));
        assert_eq!(extracted.take(Field::Enrolment), "24/24");
    }
}
