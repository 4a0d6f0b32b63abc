//! Where pages come from, and the operations that need to fetch them.
//!
//! Each fetch is a single attempt; transport failures are returned as
//! [`InfosoudError::Transport`] unchanged.

use std::path::Path;

use async_trait::async_trait;
use hlidac_http::{HttpClient, HttpError, RequestOpts};
use url::Url;

use crate::charset::decode_page;
use crate::error::Result;
use crate::extract::{extract, parse_subject};
use crate::model::{CaseDetail, CaseSummary};

/// Anything that can turn a URL into page text.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &Url) -> std::result::Result<String, HttpError>;
}

#[async_trait]
impl PageSource for HttpClient {
    async fn fetch_page(&self, url: &Url) -> std::result::Result<String, HttpError> {
        self.get_text(
            url.as_str(),
            RequestOpts {
                allow_absolute: true,
                ..Default::default()
            },
        )
        .await
    }
}

/// Fetch a case page and extract it.
pub async fn load_case<S: PageSource + ?Sized>(source: &S, url: &Url) -> Result<CaseSummary> {
    tracing::info!(%url, "infosoud.load_case");
    let page = source.fetch_page(url).await?;
    extract(&page)
}

/// Extract a case page saved to disk, in whatever charset it declares.
pub fn load_case_file(path: impl AsRef<Path>) -> Result<CaseSummary> {
    let bytes = std::fs::read(path.as_ref())?;
    extract(&decode_page(&bytes)?)
}

/// Fetch the page behind the initiation event and read the subject from it.
pub async fn fetch_subject<S: PageSource + ?Sized>(
    summary: &CaseSummary,
    source: &S,
) -> Result<String> {
    let url = summary.initiation()?.absolute_link()?;
    tracing::info!(case_reference = %summary.case_reference, %url, "infosoud.fetch_subject");
    let page = source.fetch_page(&url).await?;
    parse_subject(&page)
}

/// Complete a summary with its subject of proceedings.
pub async fn enrich<S: PageSource + ?Sized>(summary: CaseSummary, source: &S) -> Result<CaseDetail> {
    let subject = fetch_subject(&summary, source).await?;
    Ok(summary.with_subject(subject))
}
