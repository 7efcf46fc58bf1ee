use serde::{Deserialize, Serialize};

/// One fetched page: its URL and the cleaned paragraphs in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub url: String,
    pub paragraphs: Vec<String>,
}

impl Page {
    pub fn new(url: impl Into<String>, paragraphs: Vec<String>) -> Self {
        Page {
            url: url.into(),
            paragraphs,
        }
    }
}

/// First page (in corpus order) whose URL contains `fragment`.
pub fn first_page_with<'a>(corpus: &'a [Page], fragment: &str) -> Option<&'a Page> {
    corpus.iter().find(|p| p.url.contains(fragment))
}

/// Every paragraph of every page, page-then-paragraph order.
pub fn paragraphs(corpus: &[Page]) -> impl Iterator<Item = &str> {
    corpus
        .iter()
        .flat_map(|p| p.paragraphs.iter().map(String::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_keeps_corpus_order() {
        let corpus = vec![
            Page::new("https://x.test/blogs", vec![]),
            Page::new("https://x.test/service", vec!["a".into()]),
            Page::new("https://x.test/services-old", vec!["b".into()]),
        ];
        let page = first_page_with(&corpus, "service").unwrap();
        assert_eq!(page.paragraphs, vec!["a".to_string()]);
        assert!(first_page_with(&corpus, "about").is_none());
    }

    #[test]
    fn paragraphs_flatten_in_order() {
        let corpus = vec![
            Page::new("a", vec!["one".into(), "two".into()]),
            Page::new("b", vec!["three".into()]),
        ];
        let all: Vec<&str> = paragraphs(&corpus).collect();
        assert_eq!(all, vec!["one", "two", "three"]);
    }

    #[test]
    fn deserializes_scraped_pages_shape() {
        let json = r#"[{"url": "https://www.kryzo.tech/about", "paragraphs": ["We build things for you"]}]"#;
        let corpus: Vec<Page> = serde_json::from_str(json).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus[0].url, "https://www.kryzo.tech/about");
    }
}
