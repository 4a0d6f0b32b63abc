//! Loader for hlídač configuration with YAML + environment overlays.
//!
//! Every field has a default, so running without a config file is valid.
//! Environment variables use the `HLIDAC__` prefix with `__` between nested
//! keys (`HLIDAC__HTTP__TIMEOUT_SECS=30`) and win over file values. String
//! values may reference other variables as `${VAR}`.
use config::{Config, ConfigError, Environment, File};
use hlidac_common::LogFormat;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Clone, Deserialize)]
pub struct HlidacConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub log: LogSettings,
}

impl Default for HlidacConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            http: HttpSettings::default(),
            log: LogSettings::default(),
        }
    }
}

/// Knobs for the registry HTTP client. There is no retry setting: each page
/// is fetched exactly once.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub stderr: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            dir: None,
            format: LogFormat::Text,
            filter: default_filter(),
            stderr: false,
        }
    }
}

fn default_database_url() -> String {
    "sqlite://hlidac.db?mode=rwc".into()
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_filter() -> String {
    "info".into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct HlidacConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for HlidacConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl HlidacConfigLoader {
    /// Start with `HLIDAC__` env overrides only.
    ///
    /// ```
    /// use hlidac_config::HlidacConfigLoader;
    ///
    /// let config = HlidacConfigLoader::new()
    ///     .with_yaml_str("http:\n  timeout_secs: 3")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.http.timeout_secs, 3);
    /// assert_eq!(config.log.filter, "info");
    /// ```
    pub fn new() -> Self {
        let builder = Config::builder();
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file that must exist; format is inferred by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that may be missing, so plain env-only runs work.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// Environment variables are layered last so they override any file or
    /// inline snippet, then `${VAR}` placeholders are expanded.
    ///
    /// ```
    /// use hlidac_config::HlidacConfigLoader;
    ///
    /// unsafe { std::env::set_var("HLIDAC_DOCTEST_DB", "sqlite::memory:"); }
    ///
    /// let config = HlidacConfigLoader::new()
    ///     .with_yaml_str(r#"database_url: "${HLIDAC_DOCTEST_DB}""#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.database_url, "sqlite::memory:");
    ///
    /// unsafe { std::env::remove_var("HLIDAC_DOCTEST_DB"); }
    /// ```
    pub fn load(self) -> Result<HlidacConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("HLIDAC")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: HlidacConfig =
            serde_json::from_value(v).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
