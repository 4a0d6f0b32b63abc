//! Plain-text output for the terminal.

use std::fmt::Write;

use chrono::{NaiveDate, NaiveDateTime};
use hlidac_infosoud::{CaseSummary, InfosoudError};
use hlidac_store::TrackedCase;

const TIMESTAMP: &str = "%d.%m.%Y %H:%M:%S";
const DATE: &str = "%d.%m.%Y";

fn when(ts: Option<NaiveDateTime>) -> String {
    ts.map(|t| t.format(TIMESTAMP).to_string())
        .unwrap_or_else(|| "-".into())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "ano" } else { "ne" }
}

/// Everything the case page says, one field per line.
pub fn summary(case: &CaseSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Spisová značka: {}", case.case_reference);
    let _ = writeln!(out, "Soud:           {}", case.court);
    let _ = writeln!(out, "Stav:           {}", case.status_text);
    let _ = writeln!(out, "Poslední změna: {}", when(case.last_change));
    let _ = writeln!(out, "Aktualizováno:  {}", when(case.refreshed_at));
    let _ = writeln!(out, "Události:");
    for e in &case.events {
        let _ = writeln!(out, "  {}  {}", e.date.format(DATE), e.name);
    }
    if !case.sub_proceedings.is_empty() {
        let _ = writeln!(out, "Dílčí řízení:");
        for s in &case.sub_proceedings {
            let _ = writeln!(out, "  {}", s.case_reference);
        }
    }
    out
}

/// The record that would be stored, as shown before `--yes`.
pub fn preview(case: &TrackedCase, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Spisová značka:   {}", case.case_reference);
    let _ = writeln!(out, "Předmět řízení:   {}", case.subject);
    let _ = writeln!(out, "Soud:             {}", case.court);
    let _ = writeln!(out, "Zahájení:         {}", case.started_on.format(DATE));
    let _ = writeln!(
        out,
        "Skončení:         {}",
        case.ended_on
            .map(|d| d.format(DATE).to_string())
            .unwrap_or_else(|| "-".into())
    );
    let _ = writeln!(out, "Délka (dny):      {}", case.duration_on(today).num_days());
    let _ = writeln!(out, "Odvolání:         {}", yes_no(case.appeal_occurred));
    let _ = writeln!(out, "Poslední změna:   {}", when(case.last_change));
    out
}

pub fn added(case_reference: &str) -> String {
    format!("Řízení {case_reference} bylo přidáno")
}

pub fn table(cases: &[TrackedCase], today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24} {:<40} {:<8} {:<19} {:>6} {:<8}",
        "Spisová značka", "Předmět", "Skončeno", "Poslední změna", "Dny", "Odvolání"
    );
    for c in cases {
        let _ = writeln!(
            out,
            "{:<24} {:<40} {:<8} {:<19} {:>6} {:<8}",
            c.case_reference,
            c.subject,
            yes_no(c.concluded()),
            when(c.last_change),
            c.duration_on(today).num_days(),
            yes_no(c.appeal_occurred),
        );
    }
    out
}

/// Message for errors a user can act on; `None` for everything else.
pub fn user_facing(err: &InfosoudError) -> Option<String> {
    match err {
        InfosoudError::CaseNotFound { reference } => {
            Some(format!("Hledaná spisová značka {reference} neexistuje."))
        }
        InfosoudError::Transport(http) => Some(format!("Stránku se nepodařilo načíst: {http}")),
        _ => None,
    }
}
