//! Reader for case records published by the Czech court registry InfoSoud.
//!
//! The registry offers no API, only HTML pages built from nested tables.
//! This crate turns such a page into typed data:
//!
//! - [`extract`]: case page → [`CaseSummary`] (reference, court, status,
//!   history events, sub-proceedings, change timestamps)
//! - [`classify_row`] / [`parse_history_row`]: one history row →
//!   [`HistoryEntry`]
//! - [`detect_not_found`]: recognise the registry's "case does not exist" page
//! - [`fetch_subject`] / [`enrich`]: follow the initiation event to its own
//!   page and read the subject of proceedings, yielding a [`CaseDetail`]
//!
//! ```
//! use hlidac_infosoud::{parse_history_row, HistoryEntry, SubProceeding};
//!
//! let row = r#"<tr><td>Senátní věc</td><td><a href="search.do">12 P A NC 105 / 2019</a></td></tr>"#;
//! assert_eq!(
//!     parse_history_row(row).unwrap(),
//!     HistoryEntry::SubProceeding(SubProceeding::new("12 P A NC 105 / 2019")),
//! );
//! ```

pub mod charset;
pub mod dates;
pub mod dom;
pub mod error;
pub mod extract;
pub mod history;
pub mod model;
pub mod not_found;
pub mod registry;
pub mod source;

pub use charset::decode_page;
pub use dates::{parse_date, parse_timestamp};
pub use error::{InfosoudError, Result};
pub use extract::{extract, parse_subject};
pub use history::{classify_row, parse_history_row};
pub use model::{CaseDetail, CaseSummary, Event, EventKind, HistoryEntry, SubProceeding};
pub use not_found::detect_not_found;
pub use registry::INFOSOUD_URL;
pub use source::{PageSource, enrich, fetch_subject, load_case, load_case_file};
