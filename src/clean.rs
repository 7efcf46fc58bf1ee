/// Navigation labels that show up as standalone paragraphs on every page.
const NAV_LABELS: &[&str] = &["about", "service", "services", "contact", "blogs", "registration"];

const MIN_WORDS: usize = 4;

/// Drop navigation labels and fragments too short to answer anything.
pub fn clean(paragraphs: Vec<String>) -> Vec<String> {
    paragraphs
        .into_iter()
        .filter(|p| {
            let low = p.trim().to_lowercase();
            !NAV_LABELS.contains(&low.as_str()) && low.split_whitespace().count() >= MIN_WORDS
        })
        .collect()
}
