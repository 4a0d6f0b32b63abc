use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use hlidac_common::{LogConfig, init_logging};
use hlidac_config::{HlidacConfig, HlidacConfigLoader};
use hlidac_http::HttpClient;
use hlidac_infosoud::INFOSOUD_URL;
use hlidac_store::{CaseFilter, CaseStore};

use cli::{Cli, Command};

mod cli;
mod commands;
mod render;

const DEFAULT_CONFIG_FILE: &str = "hlidac.yaml";

fn load_config(cli: &Cli) -> Result<HlidacConfig> {
    let loader = match &cli.config {
        Some(path) => HlidacConfigLoader::new().with_file(path),
        None => HlidacConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
    };
    Ok(loader.load()?)
}

fn http_client(cfg: &HlidacConfig) -> Result<HttpClient> {
    let client = match &cfg.http.user_agent {
        Some(ua) => HttpClient::with_user_agent(INFOSOUD_URL, ua)?,
        None => HttpClient::new(INFOSOUD_URL)?,
    };
    Ok(client.with_timeout(Duration::from_secs(cfg.http.timeout_secs)))
}

async fn open_store(cfg: &HlidacConfig) -> Result<CaseStore> {
    let store = CaseStore::connect(&cfg.database_url).await?;
    store.migrate().await?;
    Ok(store)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins)
    let cfg = load_config(&cli)?;

    // 2) Logging from the config's log section
    let log_path = init_logging(LogConfig {
        log_dir: cfg.log.dir.clone(),
        emit_stderr: cfg.log.stderr,
        format: cfg.log.format,
        default_filter: cfg.log.filter.clone(),
        ..LogConfig::default()
    })?;
    tracing::debug!(log_path=%log_path.display(), command=?cli.command, "app.start");

    match cli.command {
        Command::Add { url, yes } => {
            let client = http_client(&cfg)?;
            let store = open_store(&cfg).await?;
            commands::add(&client, &store, &url, yes).await
        }
        Command::Show { file: Some(path), .. } => commands::show_file(&path),
        Command::Show { url, file: None } => match url {
            Some(url) => commands::show_url(&http_client(&cfg)?, &url).await,
            None => anyhow::bail!("either a URL or --file is required"),
        },
        Command::List {
            concluded,
            open,
            subject,
            court,
        } => {
            let store = open_store(&cfg).await?;
            let filter = CaseFilter {
                concluded: Command::concluded_filter(concluded, open),
                subject,
                court,
            };
            commands::list(&store, &filter).await
        }
        Command::Refresh => {
            let client = http_client(&cfg)?;
            let store = open_store(&cfg).await?;
            commands::refresh(&client, &store).await
        }
    }
}
