//! Case page and subject page extraction.
//!
//! Both pages share the same nested-table skeleton; every region is found by
//! its fixed row position (see [`crate::registry`]). Anything out of place is
//! an error rather than a partial record.

use scraper::Html;

use crate::dates::parse_timestamp_pair;
use crate::dom::{child_elements, locate, text_of, walk};
use crate::error::{InfosoudError, Result};
use crate::history::classify_row;
use crate::model::{CaseSummary, HistoryEntry};
use crate::not_found::check_not_found;
use crate::registry::{
    CASE_REFERENCE, CONTENT, COURT, HISTORY, STATUS, SUBJECT, SUBJECT_LABEL, TIMESTAMPS,
};

/// Build a [`CaseSummary`] from a case-detail page.
pub fn extract(page: &str) -> Result<CaseSummary> {
    check_not_found(page)?;

    let doc = Html::parse_document(page);
    let content = locate(doc.root_element(), CONTENT, "content table")?;

    let case_reference = text_of(locate(content, CASE_REFERENCE, "case reference")?);
    let court = text_of(locate(content, COURT, "court")?);

    let status_line = text_of(locate(content, STATUS, "status")?);
    let status_text = status_line
        .split_once(':')
        .map(|(_, rest)| rest.trim().to_string())
        .ok_or_else(|| InfosoudError::malformed(format!("status line {status_line:?} has no label")))?;

    let history = locate(content, HISTORY, "case history")?;
    let mut events = Vec::new();
    let mut sub_proceedings = Vec::new();
    // first row is the header
    for row in child_elements(history)
        .into_iter()
        .filter(|el| el.value().name() == "tr")
        .skip(1)
    {
        match classify_row(row)? {
            HistoryEntry::Event(event) => events.push(event),
            HistoryEntry::SubProceeding(sub) => sub_proceedings.push(sub),
        }
    }

    let (last_change, refreshed_at) = match walk(content, TIMESTAMPS) {
        Some(cell) => {
            let (changed, refreshed) = parse_timestamp_pair(&text_of(cell))?;
            (Some(changed), Some(refreshed))
        }
        None => (None, None),
    };

    tracing::debug!(
        %case_reference,
        events = events.len(),
        sub_proceedings = sub_proceedings.len(),
        has_timestamps = last_change.is_some(),
        "infosoud.extract"
    );

    Ok(CaseSummary {
        case_reference,
        court,
        status_text,
        events,
        sub_proceedings,
        last_change,
        refreshed_at,
    })
}

/// Read the subject of proceedings from the page behind the initiation event.
pub fn parse_subject(page: &str) -> Result<String> {
    let doc = Html::parse_document(page);
    let content = locate(doc.root_element(), CONTENT, "content table")?;
    let text = text_of(locate(content, SUBJECT, "subject")?);

    let Some((label, value)) = text.split_once(':') else {
        return Err(InfosoudError::malformed(format!(
            "subject row {text:?} has no label"
        )));
    };
    if label.trim() != SUBJECT_LABEL {
        return Err(InfosoudError::malformed(format!(
            "expected {SUBJECT_LABEL:?} row, found {:?}",
            label.trim()
        )));
    }
    Ok(value.trim().to_string())
}
