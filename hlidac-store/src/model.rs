use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};
use hlidac_infosoud::CaseDetail;

/// A watched case as it is kept in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedCase {
    /// `None` until the row has been written.
    pub id: Option<i64>,
    /// Case page URL; unique.
    pub url: String,
    pub case_reference: String,
    pub subject: String,
    pub court: String,
    pub last_change: Option<NaiveDateTime>,
    pub appeal_occurred: bool,
    pub started_on: NaiveDate,
    pub ended_on: Option<NaiveDate>,
}

impl TrackedCase {
    /// Build a row from an enriched case.
    ///
    /// Fails with `InvariantViolation` when the case does not have exactly one
    /// initiation event or has more than one conclusion.
    pub fn from_detail(
        url: impl Into<String>,
        detail: &CaseDetail,
    ) -> hlidac_infosoud::Result<Self> {
        let summary = &detail.summary;
        Ok(Self {
            id: None,
            url: url.into(),
            case_reference: summary.case_reference.clone(),
            subject: detail.subject.clone(),
            court: summary.court.clone(),
            last_change: summary.last_change,
            appeal_occurred: summary.appeal_occurred(),
            started_on: summary.initiation()?.date,
            ended_on: summary.conclusion()?.map(|e| e.date),
        })
    }

    pub fn concluded(&self) -> bool {
        self.ended_on.is_some()
    }

    /// Days from start to end, or to `today` while the case is open.
    pub fn duration_on(&self, today: NaiveDate) -> TimeDelta {
        self.ended_on.unwrap_or(today) - self.started_on
    }

    pub fn duration(&self) -> TimeDelta {
        self.duration_on(Local::now().date_naive())
    }
}

/// Filters for [`crate::CaseStore::list`]; `None` matches everything.
#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
    pub concluded: Option<bool>,
    pub subject: Option<String>,
    pub court: Option<String>,
}
