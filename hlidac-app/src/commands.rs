use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use hlidac_infosoud::{InfosoudError, PageSource, enrich, load_case, load_case_file};
use hlidac_store::{CaseFilter, CaseStore, TrackedCase};
use tracing::{info, warn};
use url::Url;

use crate::render;

/// Turn registry errors the user can fix into a readable message.
fn explain(err: InfosoudError) -> anyhow::Error {
    match render::user_facing(&err) {
        Some(msg) => anyhow!(msg),
        None => anyhow::Error::new(err),
    }
}

async fn fetch_tracked<S: PageSource + ?Sized>(source: &S, url: &Url) -> Result<TrackedCase> {
    let summary = load_case(source, url).await.map_err(explain)?;
    let detail = enrich(summary, source).await.map_err(explain)?;
    Ok(TrackedCase::from_detail(url.as_str(), &detail)?)
}

pub async fn add<S: PageSource + ?Sized>(
    source: &S,
    store: &CaseStore,
    url: &Url,
    yes: bool,
) -> Result<()> {
    let case = fetch_tracked(source, url).await?;
    print!("{}", render::preview(&case, Local::now().date_naive()));

    if !yes {
        println!("Pro uložení spusťte příkaz znovu s --yes.");
        return Ok(());
    }
    store.upsert(&case).await?;
    info!(case_reference=%case.case_reference, %url, "app.case_added");
    println!("{}", render::added(&case.case_reference));
    Ok(())
}

pub async fn show_url<S: PageSource + ?Sized>(source: &S, url: &Url) -> Result<()> {
    let summary = load_case(source, url).await.map_err(explain)?;
    print!("{}", render::summary(&summary));
    let detail = enrich(summary, source).await.map_err(explain)?;
    println!("Předmět řízení: {}", detail.subject);
    Ok(())
}

pub fn show_file(path: &Path) -> Result<()> {
    let summary = load_case_file(path)
        .map_err(explain)
        .with_context(|| format!("reading {}", path.display()))?;
    print!("{}", render::summary(&summary));
    Ok(())
}

pub async fn list(store: &CaseStore, filter: &CaseFilter) -> Result<()> {
    let cases = store.list(filter).await?;
    print!("{}", render::table(&cases, Local::now().date_naive()));
    Ok(())
}

/// Fetch every tracked case again. One failing case does not stop the rest.
pub async fn refresh<S: PageSource + ?Sized>(source: &S, store: &CaseStore) -> Result<()> {
    let cases = store.list(&CaseFilter::default()).await?;
    let mut failed = 0usize;
    for case in &cases {
        let url = match Url::parse(&case.url) {
            Ok(url) => url,
            Err(err) => {
                warn!(url=%case.url, error=%err, "app.refresh.bad_url");
                failed += 1;
                continue;
            }
        };
        match fetch_tracked(source, &url).await {
            Ok(fresh) => {
                store.upsert(&fresh).await?;
                info!(case_reference=%fresh.case_reference, "app.refresh.updated");
            }
            Err(err) => {
                warn!(url=%case.url, error=%err, "app.refresh.failed");
                eprintln!("{}: {err:#}", case.case_reference);
                failed += 1;
            }
        }
    }
    println!("Aktualizováno {} z {} řízení.", cases.len() - failed, cases.len());
    if failed > 0 {
        bail!("{failed} case(s) could not be refreshed");
    }
    Ok(())
}
