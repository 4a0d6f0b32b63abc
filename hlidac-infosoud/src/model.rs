use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};
use url::Url;

use crate::error::{InfosoudError, Result};
use crate::registry::{
    APPEAL_CODE, CONCLUSION_CODE, EVENT_KIND_PARAM, INFOSOUD_URL, INITIATION_CODE,
};

/// Machine-readable kind of a case event, taken from its link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    Initiation,
    Conclusion,
    Appeal,
    Other(String),
}

impl EventKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            INITIATION_CODE => EventKind::Initiation,
            CONCLUSION_CODE => EventKind::Conclusion,
            APPEAL_CODE => EventKind::Appeal,
            other => EventKind::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            EventKind::Initiation => INITIATION_CODE,
            EventKind::Conclusion => CONCLUSION_CODE,
            EventKind::Appeal => APPEAL_CODE,
            EventKind::Other(code) => code,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A dated milestone in a case timeline ("událost").
///
/// Two events are equal when their name and date match; the link is ignored.
#[derive(Debug, Clone)]
pub struct Event {
    pub name: String,
    pub date: NaiveDate,
    /// Link relative to [`INFOSOUD_URL`], empty when the row had no anchor.
    pub link: String,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.date == other.date
    }
}

impl Eq for Event {}

impl Event {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
            link: String::new(),
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    /// The link resolved against the registry, as text. Only the path is
    /// resolved; the query is kept as the registry wrote it except that
    /// spaces become `%20`.
    pub fn resolved_link(&self) -> Result<String> {
        if self.link.is_empty() {
            return Err(InfosoudError::malformed(format!(
                "event {:?} has no link",
                self.name
            )));
        }
        let bad = |e: url::ParseError| {
            InfosoudError::malformed(format!("bad event link {:?}: {e}", self.link))
        };
        let split = self.link.find(['?', '#']).unwrap_or(self.link.len());
        let (path, rest) = self.link.split_at(split);
        let base = Url::parse(INFOSOUD_URL).map_err(bad)?;
        let mut resolved = base.join(path).map_err(bad)?;
        resolved.set_query(None);
        resolved.set_fragment(None);
        Ok(format!("{resolved}{}", rest.replace(' ', "%20")))
    }

    /// [`Event::resolved_link`] as a [`Url`], ready to fetch.
    pub fn absolute_link(&self) -> Result<Url> {
        Url::parse(&self.resolved_link()?)
            .map_err(|e| InfosoudError::malformed(format!("bad event link {:?}: {e}", self.link)))
    }

    /// `None` for events without a link or without a kind parameter.
    pub fn kind(&self) -> Option<EventKind> {
        let url = self.absolute_link().ok()?;
        url.query_pairs()
            .find(|(k, _)| k == EVENT_KIND_PARAM)
            .map(|(_, v)| EventKind::from_code(&v))
    }
}

/// A related proceeding under a different (senate) docket ("dílčí řízení").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubProceeding {
    pub case_reference: String,
}

impl SubProceeding {
    pub fn new(case_reference: impl Into<String>) -> Self {
        Self {
            case_reference: case_reference.into(),
        }
    }
}

/// One classified row of the case history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEntry {
    Event(Event),
    SubProceeding(SubProceeding),
}

/// Everything the case page itself says about a case ("řízení").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseSummary {
    pub case_reference: String,
    /// Court hierarchy, `parent > child`.
    pub court: String,
    pub status_text: String,
    /// Document order.
    pub events: Vec<Event>,
    pub sub_proceedings: Vec<SubProceeding>,
    pub last_change: Option<NaiveDateTime>,
    pub refreshed_at: Option<NaiveDateTime>,
}

impl CaseSummary {
    /// Events of `kind`. Events whose kind cannot be read never match.
    pub fn events_of_kind<'a>(&'a self, kind: &'a EventKind) -> impl Iterator<Item = &'a Event> {
        self.events
            .iter()
            .filter(move |e| e.kind().as_ref() == Some(kind))
    }

    /// The unique initiation event ("zahájení řízení").
    pub fn initiation(&self) -> Result<&Event> {
        let found: Vec<&Event> = self.events_of_kind(&EventKind::Initiation).collect();
        match found.as_slice() {
            [one] => Ok(one),
            other => Err(InfosoudError::InvariantViolation(format!(
                "expected exactly one initiation event in {}, found {}",
                self.case_reference,
                other.len()
            ))),
        }
    }

    /// The conclusion event ("skončení věci"), if the case has ended.
    pub fn conclusion(&self) -> Result<Option<&Event>> {
        let found: Vec<&Event> = self.events_of_kind(&EventKind::Conclusion).collect();
        match found.as_slice() {
            [] => Ok(None),
            [one] => Ok(Some(one)),
            other => Err(InfosoudError::InvariantViolation(format!(
                "expected at most one conclusion event in {}, found {}",
                self.case_reference,
                other.len()
            ))),
        }
    }

    pub fn is_concluded(&self) -> Result<bool> {
        Ok(self.conclusion()?.is_some())
    }

    /// Conclusion date (or `today` while the case runs) minus initiation date.
    pub fn duration_on(&self, today: NaiveDate) -> Result<TimeDelta> {
        let start = self.initiation()?.date;
        let end = match self.conclusion()? {
            Some(event) => event.date,
            None => today,
        };
        Ok(end - start)
    }

    pub fn duration(&self) -> Result<TimeDelta> {
        self.duration_on(Local::now().date_naive())
    }

    pub fn appeal_occurred(&self) -> bool {
        self.events_of_kind(&EventKind::Appeal).next().is_some()
    }

    /// Attach the subject of proceedings, producing the full record.
    pub fn with_subject(self, subject: impl Into<String>) -> CaseDetail {
        CaseDetail {
            summary: self,
            subject: subject.into(),
        }
    }
}

/// A [`CaseSummary`] plus the subject of proceedings ("předmět řízení"),
/// which lives on the page behind the initiation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDetail {
    pub summary: CaseSummary,
    pub subject: String,
}
