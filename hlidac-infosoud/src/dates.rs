//! Czech registry date formats. No timezone is attached; the registry prints
//! local wall-clock values.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{InfosoudError, Result};

pub const DATE_FORMAT: &str = "%d.%m.%Y";
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Parse `DD.MM.YYYY`; day and month may be unpadded.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| InfosoudError::InvalidDate {
        value: value.to_string(),
        format: DATE_FORMAT,
    })
}

/// Parse `DD.MM.YYYY HH:MM:SS`.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|_| {
        InfosoudError::InvalidDate {
            value: value.to_string(),
            format: TIMESTAMP_FORMAT,
        }
    })
}

/// Two adjacent timestamps in one whitespace-separated run of text, as in the
/// "last change / refreshed at" cell. Non-breaking spaces separate too.
pub fn parse_timestamp_pair(text: &str) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [d1, t1, d2, t2, ..] = parts.as_slice() else {
        return Err(InfosoudError::malformed(format!(
            "expected two timestamps, found {text:?}"
        )));
    };
    let first = parse_timestamp(&format!("{d1} {t1}"))?;
    let second = parse_timestamp(&format!("{d2} {t2}"))?;
    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_padded_date() {
        assert_eq!(parse_date("08.03.2019").unwrap(), ymd(2019, 3, 8));
    }

    #[test]
    fn parses_unpadded_date_and_trims() {
        assert_eq!(parse_date(" 8.3.2019 ").unwrap(), ymd(2019, 3, 8));
    }

    #[test]
    fn rejects_other_shapes() {
        for bad in ["2019-03-08", "08/03/2019", "32.01.2019", "08.03.2019 extra", ""] {
            let err = parse_date(bad).unwrap_err();
            assert!(
                matches!(err, InfosoudError::InvalidDate { format: DATE_FORMAT, .. }),
                "{bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn parses_timestamp() {
        let ts = parse_timestamp("08.08.2019 16:46:30").unwrap();
        assert_eq!(ts, ymd(2019, 8, 8).and_hms_opt(16, 46, 30).unwrap());
    }

    #[test]
    fn parses_pair() {
        let (a, b) = parse_timestamp_pair("08.08.2019 16:46:30 08.03.2021 19:50:40").unwrap();
        assert_eq!(a, ymd(2019, 8, 8).and_hms_opt(16, 46, 30).unwrap());
        assert_eq!(b, ymd(2021, 3, 8).and_hms_opt(19, 50, 40).unwrap());
    }

    #[test]
    fn pair_split_by_nbsp() {
        let (a, b) =
            parse_timestamp_pair("08.08.2019\u{a0}16:46:30 08.03.2021\u{a0}19:50:40").unwrap();
        assert_eq!(a, ymd(2019, 8, 8).and_hms_opt(16, 46, 30).unwrap());
        assert_eq!(b, ymd(2021, 3, 8).and_hms_opt(19, 50, 40).unwrap());
    }

    #[test]
    fn short_pair_is_malformed() {
        let err = parse_timestamp_pair("08.08.2019 16:46:30").unwrap_err();
        assert!(matches!(err, InfosoudError::MalformedPage(_)));
    }

    #[test]
    fn bad_time_in_pair_is_invalid_date() {
        let err = parse_timestamp_pair("08.08.2019 16:46 08.03.2021 19:50:40").unwrap_err();
        assert!(matches!(err, InfosoudError::InvalidDate { .. }));
    }
}
