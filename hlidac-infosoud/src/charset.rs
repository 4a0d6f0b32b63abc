//! Decoding of pages saved to disk. Over HTTP the transport decodes using the
//! `Content-Type` header; a file only has its `<meta>` declaration.

use std::io;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;

use crate::error::{InfosoudError, Result};

/// The declaration has to appear this early to count, as in browsers.
const SNIFF_LIMIT: usize = 1024;

static META_CHARSET_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    match Regex::new(r#"(?i-u)<meta[^>]*?charset\s*=\s*["']?\s*([A-Za-z0-9_.:\-]+)"#) {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::error!(error=%err, "infosoud.charset.pattern_invalid");
            None
        }
    }
});

/// Encoding named by a `<meta charset>` or `http-equiv` declaration.
pub fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(SNIFF_LIMIT)];
    let re = META_CHARSET_RE.as_ref()?;
    let label = re.captures(head)?.get(1)?;
    Encoding::for_label(label.as_bytes())
}

/// Decode a saved page: BOM first, then the declared charset, then UTF-8.
pub fn decode_page(bytes: &[u8]) -> Result<String> {
    let encoding = declared_encoding(bytes).unwrap_or(UTF_8);
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(InfosoudError::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("page is not valid {}", used.name()),
        )));
    }
    tracing::trace!(encoding = used.name(), "infosoud.charset.decoded");
    Ok(text.into_owned())
}
