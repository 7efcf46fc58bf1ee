use std::sync::LazyLock;

use regex::Regex;

use crate::corpus::{self, Page};

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\+?\d[\d\s-]{7,}\d").unwrap());
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+").unwrap());

/// All phone-like matches across the corpus, duplicates kept.
pub fn extract_phones(corpus: &[Page]) -> Vec<String> {
    find_all(&PHONE_RE, corpus)
}

/// All email-like matches across the corpus, duplicates kept.
pub fn extract_emails(corpus: &[Page]) -> Vec<String> {
    find_all(&EMAIL_RE, corpus)
}

fn find_all(re: &Regex, corpus: &[Page]) -> Vec<String> {
    corpus::paragraphs(corpus)
        .flat_map(move |para| re.find_iter(para).map(|m| m.as_str().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str, paras: &[&str]) -> Page {
        Page::new(url, paras.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn phone_with_country_code() {
        let corpus = vec![page(
            "https://x.test/contact",
            &["Call us at +1 555-123-4567 for details"],
        )];
        assert_eq!(extract_phones(&corpus), vec!["+1 555-123-4567"]);
    }

    #[test]
    fn short_digit_runs_are_not_phones() {
        let corpus = vec![page("a", &["Founded in 2019 with 45 people on board"])];
        assert!(extract_phones(&corpus).is_empty());
    }

    #[test]
    fn keeps_duplicates_in_discovery_order() {
        let corpus = vec![
            page("a", &["Reach 01711-000000 now", "Or hello@kryzo.tech anytime"]),
            page("b", &["Again 01711-000000 please", "sales@kryzo.tech and hello@kryzo.tech"]),
        ];
        assert_eq!(extract_phones(&corpus), vec!["01711-000000", "01711-000000"]);
        assert_eq!(
            extract_emails(&corpus),
            vec!["hello@kryzo.tech", "sales@kryzo.tech", "hello@kryzo.tech"]
        );
    }

    #[test]
    fn email_trailing_dot_is_captured() {
        // The pattern has no notion of sentence punctuation.
        let corpus = vec![page("a", &["Write to info@kryzo.tech."])];
        assert_eq!(extract_emails(&corpus), vec!["info@kryzo.tech."]);
    }

    #[test]
    fn nothing_to_find() {
        assert!(extract_emails(&[]).is_empty());
        assert!(extract_phones(&[]).is_empty());
    }
}
