use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const ENV_PREFIX: &str = "SITEQA";
const DEFAULT_FILE: &str = "siteqa";

const DEFAULT_URLS: &[&str] = &[
    "https://www.kryzo.tech/about",
    "https://www.kryzo.tech/service",
    "https://www.kryzo.tech/contact",
    "https://www.kryzo.tech/blogs",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pages to fetch, in corpus order.
    pub urls: Vec<String>,
    /// `.json` for the plain corpus file, `.sqlite`/`.db` for SQLite.
    pub corpus_path: PathBuf,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Pause after every request.
    pub request_delay_ms: u64,
    pub concurrency: usize,
    pub max_retries: u32,
    /// Extracted texts must be longer than this to be kept.
    pub min_paragraph_chars: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            urls: DEFAULT_URLS.iter().map(|u| u.to_string()).collect(),
            corpus_path: PathBuf::from("scraped_pages.json"),
            user_agent: "Mozilla/5.0".to_string(),
            timeout_secs: 10,
            request_delay_ms: 1000,
            concurrency: 1,
            max_retries: 3,
            min_paragraph_chars: 10,
        }
    }
}

impl Settings {
    /// Defaults, then `siteqa.toml` (or the explicit file), then `SITEQA_*`.
    pub fn load(file: Option<&Path>) -> Result<Settings> {
        let builder = match file {
            Some(path) => Config::builder().add_source(File::from(path).required(true)),
            None => Config::builder().add_source(File::with_name(DEFAULT_FILE).required(false)),
        };
        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("urls"),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize::<Settings>()
            .context("Invalid configuration")?;
        Ok(settings.sanitized())
    }

    fn sanitized(mut self) -> Self {
        if self.concurrency == 0 {
            self.concurrency = 1;
        }
        self
    }
}
