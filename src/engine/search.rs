use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::corpus::{self, Page};

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

fn tokens(text: &str) -> HashSet<&str> {
    WORD_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Number of distinct question tokens that also occur in the paragraph.
pub fn overlap(question_tokens: &HashSet<&str>, paragraph: &str) -> usize {
    let low = paragraph.to_lowercase();
    tokens(&low).intersection(question_tokens).count()
}

/// Paragraph sharing the most tokens with the normalized question.
///
/// Ties keep the earliest paragraph in corpus order. `None` when nothing
/// shares a single token.
pub fn best_paragraph<'a>(question: &str, corpus: &'a [Page]) -> Option<&'a str> {
    let words = tokens(question);
    let mut best = None;
    let mut best_score = 0;

    for para in corpus::paragraphs(corpus) {
        let score = overlap(&words, para);
        if score > best_score {
            best_score = score;
            best = Some(para);
        }
    }

    best
}
