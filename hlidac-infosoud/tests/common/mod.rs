#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use async_trait::async_trait;
use hlidac_common::observability::{LogConfig, LogFormat};
use hlidac_http::HttpError;
use hlidac_infosoud::PageSource;
use url::Url;

static INIT_PATH: OnceLock<PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let config = LogConfig {
            app_name: "hlidac-tests",
            log_dir: Some(std::env::temp_dir().join("hlidac-tests")),
            emit_stderr: true,
            format: if std::env::var("HLIDAC_LOG_FORMAT")
                .map(|raw| raw.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false)
            {
                LogFormat::Json
            } else {
                LogFormat::Text
            },
            default_filter: "debug".to_string(),
        };

        hlidac_common::init_logging(config).unwrap_or_default()
    });
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("fixture readable")
}

/// In-memory pages keyed by absolute URL; remembers every request.
#[derive(Default)]
pub struct FixtureSource {
    pages: HashMap<String, String>,
    pub requested: Mutex<Vec<String>>,
}

impl FixtureSource {
    pub fn with_page(mut self, url: &Url, body: String) -> Self {
        self.pages.insert(url.to_string(), body);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for FixtureSource {
    async fn fetch_page(&self, url: &Url) -> Result<String, HttpError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages.get(url.as_str()).cloned().ok_or_else(|| HttpError::Status {
            status: hlidac_http::StatusCode::NOT_FOUND,
            url: url.to_string(),
            body_snippet: String::new(),
        })
    }
}
