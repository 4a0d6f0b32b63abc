//! Rows of the case history table.
//!
//! A row either records an event (first cell: linked name, second cell: date)
//! or, when it reads "Senátní věc", points at a related senate docket whose
//! reference is the link text in the second cell.

use scraper::{ElementRef, Html};

use crate::dates::parse_date;
use crate::dom::{Step, locate, text_of, walk};
use crate::error::{InfosoudError, Result};
use crate::model::{Event, HistoryEntry, SubProceeding};
use crate::registry::{ROW_DATE, ROW_FIRST_CELL, ROW_SENATE_LINK, SENATE_CASE_MARKER};

pub fn classify_row(row: ElementRef<'_>) -> Result<HistoryEntry> {
    if text_of(row).contains(SENATE_CASE_MARKER) {
        let link = locate(row, ROW_SENATE_LINK, "senate case reference")?;
        return Ok(HistoryEntry::SubProceeding(SubProceeding::new(text_of(link))));
    }

    let first = locate(row, ROW_FIRST_CELL, "event name cell")?;
    let event = match walk(first, &[Step::Child("a", 1)]) {
        Some(anchor) => {
            let href = anchor.value().attr("href").unwrap_or_default();
            Event::new(text_of(anchor), parse_row_date(row)?).with_link(href)
        }
        None => {
            let name = text_of(first);
            tracing::debug!(%name, "infosoud.history.row_without_link");
            Event::new(name, parse_row_date(row)?)
        }
    };
    Ok(HistoryEntry::Event(event))
}

fn parse_row_date(row: ElementRef<'_>) -> Result<chrono::NaiveDate> {
    let cell = locate(row, ROW_DATE, "event date cell")?;
    parse_date(&text_of(cell))
}

/// Classify a standalone `<tr>…</tr>` fragment.
pub fn parse_history_row(fragment: &str) -> Result<HistoryEntry> {
    // A bare <tr> outside a table is dropped by the HTML parser.
    let doc = Html::parse_fragment(&format!("<table>{fragment}</table>"));
    let row = doc
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "tr")
        .ok_or_else(|| InfosoudError::malformed("fragment contains no table row"))?;
    classify_row(row)
}
