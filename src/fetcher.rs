use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use scraper::{Html, Selector};
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::clean;
use crate::corpus::Page;
use crate::error::FetchError;
use crate::settings::Settings;

static TEXT_TAGS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p, h1, h2, h3").unwrap());

const BASE_BACKOFF_MS: u64 = 2000;
const MAX_BACKOFF_MS: u64 = 60_000;

/// Fetch stats returned after completion.
pub struct FetchStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
}

/// Fetch every configured URL and build the corpus.
///
/// Pages that fail (after retries) are logged and skipped. Output keeps the
/// order of `settings.urls` regardless of which request finishes first.
pub async fn fetch_corpus(settings: &Settings) -> Result<(Vec<Page>, FetchStats)> {
    let client = Client::builder()
        .user_agent(settings.user_agent.as_str())
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()?;
    let semaphore = Arc::new(Semaphore::new(settings.concurrency.max(1)));
    let delay = Duration::from_millis(settings.request_delay_ms);
    let total = settings.urls.len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let (tx, mut rx) = tokio::sync::mpsc::channel::<(usize, Result<Page, FetchError>)>(total.max(1));

    for (idx, url) in settings.urls.iter().cloned().enumerate() {
        let client = client.clone();
        let sem = Arc::clone(&semaphore);
        let tx = tx.clone();
        let max_retries = settings.max_retries;
        let min_chars = settings.min_paragraph_chars;

        tokio::spawn(async move {
            let Ok(_permit) = sem.acquire().await else {
                return;
            };
            info!("Fetching {}", url);
            let result = fetch_with_retry(&client, &url, max_retries)
                .await
                .map(|html| Page::new(url.as_str(), extract_paragraphs(&html, min_chars)));
            let _ = tx.send((idx, result)).await;
            tokio::time::sleep(delay).await;
        });
    }

    // Drop our copy of tx so rx closes when all spawned tasks finish
    drop(tx);

    let mut slots: Vec<Option<Page>> = vec![None; total];
    let mut ok = 0usize;
    let mut errors = 0usize;

    while let Some((idx, result)) = rx.recv().await {
        match result {
            Ok(page) => {
                ok += 1;
                pb.set_message(page.url.clone());
                slots[idx] = Some(page);
            }
            Err(e) => {
                errors += 1;
                warn!("Skipping page: {}", e);
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Fetched {} pages ({} ok, {} errors)", total, ok, errors);

    let pages = slots.into_iter().flatten().collect();
    Ok((pages, FetchStats { total, ok, errors }))
}

async fn fetch_with_retry(client: &Client, url: &str, max_retries: u32) -> Result<String, FetchError> {
    let mut attempt = 0;
    loop {
        match fetch_html(client, url).await {
            Err(e) if e.is_retryable() && attempt < max_retries => {
                let delay = backoff(attempt);
                warn!(
                    "{} (attempt {}/{}), backing off {:.1}s",
                    e,
                    attempt + 1,
                    max_retries,
                    delay.as_secs_f64()
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}

/// Exponential delay before retry `attempt + 1`, capped at one minute.
fn backoff(attempt: u32) -> Duration {
    let ms = 2u64
        .checked_pow(attempt)
        .and_then(|factor| BASE_BACKOFF_MS.checked_mul(factor))
        .map_or(MAX_BACKOFF_MS, |ms| ms.min(MAX_BACKOFF_MS));
    Duration::from_millis(ms)
}

async fn fetch_html(client: &Client, url: &str) -> Result<String, FetchError> {
    let http = |source| FetchError::Http {
        url: url.to_string(),
        source,
    };
    let response = client.get(url).send().await.map_err(http)?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }
    response.text().await.map_err(http)
}

/// Text of every `p`/`h1`/`h2`/`h3` in document order, deduplicated and cleaned.
pub fn extract_paragraphs(html: &str, min_chars: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();

    let texts: Vec<String> = document
        .select(&TEXT_TAGS)
        .map(|el| {
            el.text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|t| t.chars().count() > min_chars)
        .filter(|t| seen.insert(t.clone()))
        .collect();

    clean::clean(texts)
}
