//! Positional traversal over a parsed page.
//!
//! A path is an ordered list of [`Step`]s applied one after another from a
//! starting element. The page tree is only ever read.

use scraper::{ElementRef, Node};

use crate::error::{InfosoudError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The `n`-th (1-based) child element named `tag`.
    Child(&'static str, usize),
    /// The first descendant element named `tag` that carries `class`.
    Class(&'static str, &'static str),
}

/// Follow `path` from `from`. `None` as soon as a step finds nothing.
pub fn walk<'a>(from: ElementRef<'a>, path: &[Step]) -> Option<ElementRef<'a>> {
    path.iter().try_fold(from, |el, step| apply(el, *step))
}

/// Like [`walk`], but a missing region is a [`InfosoudError::MalformedPage`].
pub fn locate<'a>(from: ElementRef<'a>, path: &[Step], region: &str) -> Result<ElementRef<'a>> {
    walk(from, path).ok_or_else(|| {
        tracing::debug!(region, ?path, "infosoud.dom.region_missing");
        InfosoudError::malformed(format!("{region} not found at {path:?}"))
    })
}

fn apply(el: ElementRef<'_>, step: Step) -> Option<ElementRef<'_>> {
    match step {
        Step::Child(tag, n) => child_elements(el)
            .into_iter()
            .filter(|c| c.value().name() == tag)
            .nth(n.checked_sub(1)?),
        Step::Class(tag, class) => el
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|d| d.value().name() == tag && d.value().classes().any(|c| c == class)),
    }
}

/// Element children of `el`. Rows of a table are reported as its direct
/// children even though the HTML parser wraps them in an implicit `tbody`.
pub fn child_elements(el: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut out = Vec::new();
    for child in el.children().filter_map(ElementRef::wrap) {
        if matches!(child.value().name(), "tbody" | "thead" | "tfoot") {
            out.extend(child.children().filter_map(ElementRef::wrap));
        } else {
            out.push(child);
        }
    }
    out
}

/// Rendered text of `el`: text nodes concatenated, `<br>` read as a space,
/// runs of ASCII whitespace collapsed, trimmed. Non-breaking spaces survive.
pub fn text_of(el: ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in el.descendants() {
        match node.value() {
            Node::Text(t) => raw.push_str(t),
            Node::Element(e) if e.name() == "br" => raw.push(' '),
            _ => {}
        }
    }
    squash(&raw)
}

pub fn squash(s: &str) -> String {
    s.split(|c: char| c.is_ascii_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::Step::{Child, Class};
    use super::*;
    use scraper::Html;

    const PAGE: &str = r#"<html><body><table>
        <tr><td>one</td></tr>
        <tr><td class="x">two <span class="hit other">deep</span></td><td>three</td></tr>
    </table></body></html>"#;

    #[test]
    fn child_steps_see_through_tbody() {
        let doc = Html::parse_document(PAGE);
        let table = walk(doc.root_element(), &[Child("body", 1), Child("table", 1)]).unwrap();
        let cell = walk(table, &[Child("tr", 2), Child("td", 2)]).unwrap();
        assert_eq!(text_of(cell), "three");
    }

    #[test]
    fn class_step_finds_descendants() {
        let doc = Html::parse_document(PAGE);
        let span = walk(doc.root_element(), &[Class("span", "hit")]).unwrap();
        assert_eq!(text_of(span), "deep");
        assert!(walk(doc.root_element(), &[Class("span", "miss")]).is_none());
    }

    #[test]
    fn out_of_range_positions_are_none() {
        let doc = Html::parse_document(PAGE);
        let root = doc.root_element();
        assert!(walk(root, &[Child("body", 1), Child("table", 1), Child("tr", 3)]).is_none());
        assert!(walk(root, &[Child("body", 0)]).is_none());
    }

    #[test]
    fn locate_reports_region() {
        let doc = Html::parse_document(PAGE);
        let err = locate(doc.root_element(), &[Child("form", 1)], "search form").unwrap_err();
        assert!(err.to_string().contains("search form"));
    }

    #[test]
    fn text_collapses_ascii_whitespace_only() {
        let doc = Html::parse_fragment("<p>  Praha&nbsp;&gt;&nbsp;Praha 9 <br>\n 08.08.2019\t</p>");
        let p = walk(doc.root_element(), &[Child("p", 1)]).unwrap();
        assert_eq!(text_of(p), "Praha\u{a0}>\u{a0}Praha 9 08.08.2019");
    }
}
