use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::corpus::Page;

static SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[•\-\n]").unwrap());

const KEYWORDS: &[&str] = &[
    "service",
    "solution",
    "development",
    "application",
    "web",
    "mobile",
    "software",
];

// Longer paragraphs are blog prose, not service listings.
const MAX_PARAGRAPH_CHARS: usize = 400;
const MIN_ITEM_CHARS: usize = 5;

/// Split a service page into individual service items, first-seen order.
pub fn extract_services(page: &Page) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut services = Vec::new();

    for para in &page.paragraphs {
        if para.chars().count() > MAX_PARAGRAPH_CHARS || !has_keyword(para) {
            continue;
        }
        for part in SPLIT_RE.split(para) {
            let item = part.trim();
            if item.chars().count() > MIN_ITEM_CHARS && has_keyword(item) && seen.insert(item) {
                services.push(item.to_string());
            }
        }
    }

    services
}

fn has_keyword(text: &str) -> bool {
    let low = text.to_lowercase();
    KEYWORDS.iter().any(|k| low.contains(k))
}
