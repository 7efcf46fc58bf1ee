use std::sync::LazyLock;

use regex::Regex;

static PUNCT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[?!.]").unwrap());
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

pub const HOW_ARE_YOU: &str = "how are you";

// Compared after all spaces are removed, so only "hru" can actually match.
const COMPACT_SLANG: &[&str] = &["hru", "h r u", "hr u"];
const SPACED_SLANG: &[&str] = &["kamon acho", "kemon acho"];

/// Canonical form of a question: lowercase, no `?!.`, single spaces, slang
/// greetings folded into "how are you".
pub fn normalize(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let stripped = PUNCT_RE.replace_all(&lower, "");
    let t = SPACE_RE.replace_all(&stripped, " ").trim().to_string();

    let compact = t.replace(' ', "");
    if COMPACT_SLANG.contains(&compact.as_str()) || SPACED_SLANG.contains(&t.as_str()) {
        return HOW_ARE_YOU.to_string();
    }
    t
}
