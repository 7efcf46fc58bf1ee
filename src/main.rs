mod chat;
mod clean;
mod corpus;
mod db;
mod engine;
mod error;
mod fetcher;
mod settings;
mod store;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use corpus::Page;
use settings::Settings;
use store::{open_store, CorpusStore};

#[derive(Parser)]
#[command(name = "site_qa", about = "Answer questions about a website from its scraped pages")]
struct Cli {
    /// Config file (default: ./siteqa.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Corpus file; `.sqlite`/`.db` selects the SQLite store
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the configured pages and save the corpus
    Scrape {
        /// Page to fetch instead of the configured list (repeatable)
        #[arg(short, long = "url")]
        urls: Vec<String>,
    },
    /// Load the corpus and answer questions interactively
    Chat,
    /// Answer a single question
    Ask {
        #[arg(required = true)]
        question: Vec<String>,
    },
    /// Scrape, then chat on the fresh corpus
    Run {
        /// Page to fetch instead of the configured list (repeatable)
        #[arg(short, long = "url")]
        urls: Vec<String>,
    },
    /// Show corpus statistics
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(path) = cli.corpus {
        settings.corpus_path = path;
    }
    info!(corpus = ?settings.corpus_path, "settings loaded");
    let store = open_store(&settings.corpus_path);

    let result = match cli.command {
        Commands::Scrape { urls } => scrape(&mut settings, urls, store.as_ref()).await.map(|_| ()),
        Commands::Chat => {
            let pages = load(store.as_ref())?;
            chat_on(&pages)
        }
        Commands::Ask { question } => {
            let pages = load(store.as_ref())?;
            println!("{}", engine::answer(&question.join(" "), &pages));
            Ok(())
        }
        Commands::Run { urls } => {
            let pages = scrape(&mut settings, urls, store.as_ref()).await?;
            chat_on(&pages)
        }
        Commands::Stats => {
            let pages = load(store.as_ref())?;
            print_stats(&pages);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_elapsed(elapsed));
    }

    result
}

async fn scrape(
    settings: &mut Settings,
    urls: Vec<String>,
    store: &dyn CorpusStore,
) -> anyhow::Result<Vec<Page>> {
    if !urls.is_empty() {
        settings.urls = urls;
    }
    println!("Scraping {} pages...", settings.urls.len());
    let (pages, stats) = fetcher::fetch_corpus(settings).await?;
    println!(
        "Done: {} fetched ({} ok, {} errors).",
        stats.total, stats.ok, stats.errors
    );
    if !should_replace(stats.ok, store.path().exists()) {
        warn!(
            "No page could be fetched; keeping the existing corpus at {:?}",
            store.path()
        );
        return load(store);
    }
    store
        .save(&pages)
        .with_context(|| format!("Failed to save corpus to {:?}", store.path()))?;
    println!("Saved {} pages to {:?}", pages.len(), store.path());
    Ok(pages)
}

/// A run where every fetch failed must not wipe a corpus saved earlier.
fn should_replace(fetched_ok: usize, corpus_exists: bool) -> bool {
    fetched_ok > 0 || !corpus_exists
}

fn load(store: &dyn CorpusStore) -> anyhow::Result<Vec<Page>> {
    let pages = store.load()?;
    if pages.is_empty() {
        println!("Corpus is empty; answers will be fallbacks only.");
    }
    Ok(pages)
}

fn chat_on(pages: &[Page]) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let answered = chat::run_chat(pages, stdin.lock(), std::io::stdout())?;
    info!("Session ended after {} questions", answered);
    Ok(())
}

fn print_stats(pages: &[Page]) {
    println!("{:>3} | {:<44} | {:>10}", "#", "URL", "Paragraphs");
    println!("{}", "-".repeat(63));
    for (i, p) in pages.iter().enumerate() {
        println!("{:>3} | {:<44} | {:>10}", i + 1, short_url(&p.url, 44), p.paragraphs.len());
    }

    let paragraphs: usize = pages.iter().map(|p| p.paragraphs.len()).sum();
    let services = corpus::first_page_with(pages, "service")
        .map(|p| engine::extract::extract_services(p).len())
        .unwrap_or(0);
    println!("\nPages:      {}", pages.len());
    println!("Paragraphs: {}", paragraphs);
    println!("Phones:     {}", engine::extract::extract_phones(pages).len());
    println!("Emails:     {}", engine::extract::extract_emails(pages).len());
    println!("Services:   {}", services);
}

/// URL without scheme or `www.`, cut to `max` chars for the stats table.
fn short_url(url: &str, max: usize) -> String {
    let bare = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.")
        .trim_end_matches('/');
    match bare.char_indices().nth(max.saturating_sub(1)) {
        Some((cut, _)) if bare.chars().count() > max => format!("{}…", &bare[..cut]),
        _ => bare.to_string(),
    }
}

fn format_elapsed(d: std::time::Duration) -> String {
    match d.as_secs() {
        s if s < 60 => format!("{:.1}s", d.as_secs_f64()),
        s => format!("{}m {:02}s", s / 60, s % 60),
    }
}
