//! SQLite record of the cases being watched.
//!
//! One row per case page URL. Registering a case again refreshes its row.
pub mod model;
pub mod store;

pub use model::{CaseFilter, TrackedCase};
pub use store::CaseStore;
