//! The registry answers an unknown case reference with an ordinary page that
//! says "Hledaná spisová značka X neexistuje". That page has none of the case
//! layout, so it has to be recognised before any traversal.

use std::sync::LazyLock;

use regex::Regex;

use crate::dom::squash;
use crate::error::{InfosoudError, Result};

// Accented letters may arrive unaccented or as HTML entities depending on
// the page variant.
const A_ACUTE: &str = "(?:á|a|&aacute;|&#225;)";
const C_CARON: &str = "(?:č|c|&ccaron;|&#269;)";
const GAP: &str = r"(?:\s|&nbsp;)+";

static NOT_FOUND_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let pattern = format!(
        r"(?i)Hledan{A_ACUTE}{GAP}spisov{A_ACUTE}{GAP}zna{C_CARON}ka{GAP}([^<>]+?){GAP}neexistuje"
    );
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::error!(error=%err, "infosoud.not_found.pattern_invalid");
            None
        }
    }
});

/// The case reference named by a "does not exist" message, if the page is one.
pub fn detect_not_found(page: &str) -> Option<String> {
    let caps = NOT_FOUND_RE.as_ref()?.captures(page)?;
    let reference = caps.get(1)?.as_str().replace("&nbsp;", " ");
    Some(squash(&reference))
}

/// Fail with [`InfosoudError::CaseNotFound`] when the page is a "does not exist" page.
pub fn check_not_found(page: &str) -> Result<()> {
    match detect_not_found(page) {
        Some(reference) => {
            tracing::info!(%reference, "infosoud.case_not_found");
            Err(InfosoudError::CaseNotFound { reference })
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_compiles() {
        assert!(NOT_FOUND_RE.is_some());
    }

    #[test]
    fn finds_reference_in_accented_message() {
        let page = "<p class=\"error\">Hledaná spisová značka 62 NC 1/2019 neexistuje.</p>";
        assert_eq!(detect_not_found(page).as_deref(), Some("62 NC 1/2019"));
    }

    #[test]
    fn tolerates_unaccented_and_entity_forms() {
        let plain = "Hledana spisova znacka 12 P A NC 7/2020 neexistuje";
        assert_eq!(detect_not_found(plain).as_deref(), Some("12 P A NC 7/2020"));

        let entities = "Hledan&aacute; spisov&aacute; zna&#269;ka\n  62 NC 1/2019&nbsp;neexistuje";
        assert_eq!(detect_not_found(entities).as_deref(), Some("62 NC 1/2019"));
    }

    #[test]
    fn ordinary_pages_pass() {
        let page = "<td>Spisová značka: <span>62 NC 2528 / 2019</span></td>";
        assert!(detect_not_found(page).is_none());
        assert!(check_not_found(page).is_ok());
    }

    #[test]
    fn check_returns_typed_error() {
        let err = check_not_found("Hledaná spisová značka 62 NC 1/2019 neexistuje").unwrap_err();
        match err {
            InfosoudError::CaseNotFound { reference } => assert_eq!(reference, "62 NC 1/2019"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
