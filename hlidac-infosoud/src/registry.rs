//! Fixed facts about the InfoSoud registry: where it lives, how event kinds
//! are encoded, and where each region sits in its table layout.
//!
//! The page layout is externally controlled and unversioned. When it changes,
//! the paths below are the only thing that should need editing.

use crate::dom::Step::{self, Child, Class};

pub const INFOSOUD_URL: &str = "https://infosoud.justice.cz/InfoSoud/public/";

/// Query parameter of an event link that carries its kind.
pub const EVENT_KIND_PARAM: &str = "druhUdalosti";

pub const INITIATION_CODE: &str = "ZAHAJ_RIZ";
pub const CONCLUSION_CODE: &str = "ST_VEC_ODS";
pub const APPEAL_CODE: &str = "ODVOLANI";

/// History rows containing this text point at a related senate docket.
pub const SENATE_CASE_MARKER: &str = "Senátní věc";

pub const SUBJECT_LABEL: &str = "Předmět řízení";

/// `td.body > table > tr > td > table`, the table every region hangs off.
pub const CONTENT: &[Step] = &[
    Class("td", "body"),
    Child("table", 1),
    Child("tr", 1),
    Child("td", 1),
    Child("table", 1),
];

// Relative to CONTENT.
pub const CASE_REFERENCE: &[Step] = &[Child("tr", 1), Class("span", "body-banner-data")];
pub const COURT: &[Step] = &[Child("tr", 3), Child("td", 1), Class("span", "body-vyrazny-text")];
pub const STATUS: &[Step] = &[Child("tr", 4), Child("td", 1)];
pub const HISTORY: &[Step] = &[Child("tr", 7), Child("td", 1), Child("table", 1)];
/// Missing on the oldest page variant.
pub const TIMESTAMPS: &[Step] = &[
    Child("tr", 9),
    Child("td", 1),
    Child("table", 1),
    Child("tr", 1),
    Child("td", 2),
];
/// Same slot as HISTORY, but on the page behind the initiation event.
pub const SUBJECT: &[Step] = &[Child("tr", 7), Child("td", 1)];

// Relative to one history row.
pub const ROW_FIRST_CELL: &[Step] = &[Child("td", 1)];
pub const ROW_DATE: &[Step] = &[Child("td", 2)];
pub const ROW_SENATE_LINK: &[Step] = &[Child("td", 2), Child("a", 1)];
