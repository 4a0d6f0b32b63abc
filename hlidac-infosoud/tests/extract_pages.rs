mod common;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use hlidac_infosoud::{
    CaseSummary, Event, EventKind, InfosoudError, SubProceeding, extract, load_case_file,
    parse_subject,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    ymd(y, m, d).and_hms_opt(h, min, s).unwrap()
}

#[test]
fn main_case_page() {
    common::init_test_tracing();
    let case = load_case_file(common::fixture_path("62-Nc-2528-2019.html")).unwrap();

    assert_eq!(
        case,
        CaseSummary {
            case_reference: "62 NC 2528 / 2019".into(),
            court: "Městský soud Praha\u{a0}>\u{a0}Obvodní soud Praha 9".into(),
            status_text: "Odškrtnutá - evidenčně ukončená věc (od 08.08.2019)".into(),
            events: vec![
                Event::new("Zahájení řízení", ymd(2019, 3, 8)),
                Event::new("Vyřízení věci", ymd(2019, 8, 8)),
                Event::new("Skončení věci", ymd(2019, 8, 8)),
            ],
            sub_proceedings: vec![
                SubProceeding::new("12 P A NC 105 / 2019"),
                SubProceeding::new("12 P A NC 104 / 2019"),
            ],
            last_change: Some(at(2019, 8, 8, 16, 46, 30)),
            refreshed_at: Some(at(2021, 3, 8, 19, 50, 40)),
        }
    );
}

#[test]
fn sub_proceeding_page() {
    let case = extract(&common::fixture("12-P-A-NC-105.html")).unwrap();

    assert_eq!(case.case_reference, "12 P A NC 105 / 2019");
    assert_eq!(
        case.status_text,
        "Odškrtnutá - evidenčně ukončená věc (od 24.06.2019)"
    );
    assert_eq!(
        case.events,
        vec![
            Event::new("Zahájení řízení", ymd(2019, 3, 8)),
            Event::new("Vydání rozhodnutí", ymd(2019, 3, 12)),
            Event::new("Vyřízení věci", ymd(2019, 3, 12)),
            Event::new("Datum pravomocného ukončení věci", ymd(2019, 5, 7)),
            Event::new("Skončení věci", ymd(2019, 6, 24)),
        ]
    );
    assert!(case.sub_proceedings.is_empty());
    assert_eq!(case.last_change, Some(at(2019, 6, 24, 12, 44, 54)));
}

#[test]
fn initiation_and_conclusion() {
    let case = extract(&common::fixture("62-Nc-2528-2019.html")).unwrap();

    assert_eq!(
        case.initiation().unwrap(),
        &Event::new("Zahájení řízení", ymd(2019, 3, 8))
    );
    assert_eq!(
        case.conclusion().unwrap(),
        Some(&Event::new("Skončení věci", ymd(2019, 8, 8)))
    );
    assert_eq!(case.duration().unwrap(), TimeDelta::days(153));
}

#[test]
fn every_event_keeps_its_kind() {
    let case = extract(&common::fixture("62-Nc-2528-2019.html")).unwrap();
    let kinds: Vec<Option<EventKind>> = case.events.iter().map(Event::kind).collect();
    assert_eq!(
        kinds,
        vec![
            Some(EventKind::Initiation),
            Some(EventKind::Other("VYRIZ_VEC".into())),
            Some(EventKind::Conclusion),
        ]
    );
}

#[test]
fn links_with_spaces_resolve() {
    let case = extract(&common::fixture("12-P-A-NC-105.html")).unwrap();
    let url = case.initiation().unwrap().absolute_link().unwrap();
    assert!(url.as_str().starts_with(
        "https://infosoud.justice.cz/InfoSoud/public/list.do?druhVec=P%20A%20NC&rocnik=2019"
    ));
    assert!(!url.as_str().contains(' '));
}

#[test]
fn appeal_flag_on_both_fixtures() {
    let plain = extract(&common::fixture("62-Nc-2528-2019.html")).unwrap();
    assert!(!plain.appeal_occurred());

    let appealed = extract(&common::fixture("62-Nc-2503-2019.html")).unwrap();
    assert!(appealed.appeal_occurred());
}

#[test]
fn older_variant_without_timestamps() {
    let case = extract(&common::fixture("62-Nc-2503-2019.html")).unwrap();

    assert_eq!(case.status_text, "Nevyřízená věc");
    assert_eq!(case.last_change, None);
    assert_eq!(case.refreshed_at, None);

    // the note row has no link and is skipped by kind lookups
    assert_eq!(case.events.len(), 4);
    let note = &case.events[2];
    assert_eq!(note.name, "Doručení rozhodnutí");
    assert!(note.link.is_empty());

    assert_eq!(case.initiation().unwrap().date, ymd(2019, 3, 1));
    assert!(!case.is_concluded().unwrap());
    assert_eq!(
        case.duration_on(ymd(2019, 6, 1)).unwrap(),
        TimeDelta::days(92)
    );
}

#[test]
fn missing_case_fails_before_parsing() {
    let err = load_case_file(common::fixture_path("neexistuje.html")).unwrap_err();
    match err {
        InfosoudError::CaseNotFound { reference } => assert_eq!(reference, "62 NC 1/2019"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unrelated_pages_are_malformed() {
    let err = extract("<html><body><p>Údržba systému</p></body></html>").unwrap_err();
    assert!(matches!(err, InfosoudError::MalformedPage(_)), "{err:?}");

    // the subject page does not have a case history table in row 7
    let err = extract(&common::fixture("62-Nc-2528-2019-ZAHAJ_RIZ.html")).unwrap_err();
    assert!(matches!(err, InfosoudError::MalformedPage(_)), "{err:?}");
}

#[test]
fn missing_files_are_io_errors() {
    let err = load_case_file(common::fixture_path("does-not-exist.html")).unwrap_err();
    assert!(matches!(err, InfosoudError::Io(_)));
}

#[test]
fn subject_page() {
    assert_eq!(
        parse_subject(&common::fixture("62-Nc-2528-2019-ZAHAJ_RIZ.html")).unwrap(),
        "Svěření do péče a určení výživného (včetně změn)"
    );
}

#[test]
fn subject_label_is_checked() {
    // row 7 of a case page is the history table, not the subject
    let err = parse_subject(&common::fixture("62-Nc-2528-2019.html")).unwrap_err();
    assert!(matches!(err, InfosoudError::MalformedPage(_)), "{err:?}");
}

#[test]
fn timestamps_split_by_nbsp() {
    let page = common::fixture("62-Nc-2528-2019.html")
        .replace("08.08.2019 16:46:30", "08.08.2019&nbsp;16:46:30");
    let case = extract(&page).unwrap();
    assert_eq!(case.last_change, Some(at(2019, 8, 8, 16, 46, 30)));
    assert_eq!(case.refreshed_at, Some(at(2021, 3, 8, 19, 50, 40)));
}

#[test]
fn saved_windows_1250_page() {
    let utf8 = load_case_file(common::fixture_path("62-Nc-2528-2019.html")).unwrap();
    let cp1250 = load_case_file(common::fixture_path("62-Nc-2528-2019-cp1250.html")).unwrap();

    assert_eq!(cp1250, utf8);
    assert_eq!(cp1250.events[0].name, "Zahájení řízení");
}
