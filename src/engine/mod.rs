pub mod extract;
pub mod intent;
pub mod normalize;
pub mod search;

use tracing::debug;

use crate::corpus::{first_page_with, Page};
use intent::{GreetingKind, Intent};

pub const HI_REPLY: &str = "Hello! How can I help you?";
pub const HOW_ARE_YOU_REPLY: &str = "I'm great! 😊 What about you?";
pub const ACK_REPLY: &str = "Nice! How can I help you?";
pub const NO_PHONE: &str = "No phone number found.";
pub const NO_EMAIL: &str = "No email found.";
pub const ABOUT_FALLBACK: &str =
    "We are a digital service company helping businesses grow with modern technology.";
pub const SERVICES_FALLBACK: &str = "We provide multiple digital services.";
pub const NOT_FOUND: &str = "Sorry, I couldn't find relevant information.";

// Blank line between header and items.
const SERVICES_HEADER: &str = "Here are the services we provide:\n";
const MAX_ABOUT_CHARS: usize = 350;

/// Answer one question against the corpus.
///
/// normalize → classify → dispatch. Never fails: every path ends in either a
/// derived answer or a canned fallback.
pub fn answer(raw_question: &str, corpus: &[Page]) -> String {
    let q = normalize::normalize(raw_question);
    let intent = intent::classify(&q);
    debug!(question = %q, ?intent, "classified question");

    match intent {
        Intent::Greeting(GreetingKind::Hi) => HI_REPLY.to_string(),
        Intent::Greeting(GreetingKind::HowAreYou) => HOW_ARE_YOU_REPLY.to_string(),
        Intent::Greeting(GreetingKind::Acknowledge) => ACK_REPLY.to_string(),
        Intent::PhoneRequest => bullet_list("Phone Number:", &extract::extract_phones(corpus))
            .unwrap_or_else(|| NO_PHONE.to_string()),
        Intent::EmailRequest => bullet_list("Email Address:", &extract::extract_emails(corpus))
            .unwrap_or_else(|| NO_EMAIL.to_string()),
        Intent::AboutRequest => about(corpus),
        Intent::ServiceRequest => services(corpus),
        Intent::GeneralSearch => search::best_paragraph(&q, corpus)
            .map(str::to_string)
            .unwrap_or_else(|| NOT_FOUND.to_string()),
    }
}

// Only the first "about" page is consulted.
fn about(corpus: &[Page]) -> String {
    first_page_with(corpus, "about")
        .and_then(|page| {
            page.paragraphs
                .iter()
                .find(|p| p.chars().count() < MAX_ABOUT_CHARS)
        })
        .cloned()
        .unwrap_or_else(|| ABOUT_FALLBACK.to_string())
}

// Only the first "service" page is consulted.
fn services(corpus: &[Page]) -> String {
    let items = first_page_with(corpus, "service")
        .map(extract::extract_services)
        .unwrap_or_default();
    bullet_list(SERVICES_HEADER, &items).unwrap_or_else(|| SERVICES_FALLBACK.to_string())
}

fn bullet_list(header: &str, items: &[String]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let lines: Vec<String> = items.iter().map(|i| format!("• {}", i)).collect();
    Some(format!("{}\n{}", header, lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str, paras: &[&str]) -> Page {
        Page::new(url, paras.iter().map(|s| s.to_string()).collect())
    }

    fn kryzo() -> Vec<Page> {
        vec![
            page(
                "https://www.kryzo.tech/about",
                &["Kryzo is a young software studio based in Dhaka building products"],
            ),
            page(
                "https://www.kryzo.tech/service",
                &["• Web Development • Mobile App Solutions"],
            ),
            page(
                "https://www.kryzo.tech/contact",
                &["Call us at +1 555-123-4567 for details", "Mail hello@kryzo.tech any time"],
            ),
            page(
                "https://www.kryzo.tech/blogs",
                &["Our blog covers design systems and remote work culture"],
            ),
        ]
    }

    #[test]
    fn greetings_ignore_case() {
        for q in ["hi", "Hello", "HEY"] {
            assert_eq!(answer(q, &[]), HI_REPLY);
        }
        assert_eq!(answer("fine", &[]), ACK_REPLY);
    }

    #[test]
    fn how_are_you_variants_share_reply() {
        for q in ["how are you", "hru", "kamon acho", "H R U?"] {
            assert_eq!(answer(q, &[]), HOW_ARE_YOU_REPLY);
        }
    }

    #[test]
    fn phone_answer() {
        let corpus = vec![page(
            "https://x.test/contact",
            &["Call us at +1 555-123-4567 for details"],
        )];
        let a = answer("what is your phone number", &corpus);
        assert_eq!(a, "Phone Number:\n• +1 555-123-4567");
        assert!(a.contains("555-123-4567"));
    }

    #[test]
    fn missing_entities_fall_back() {
        let corpus = vec![page("https://x.test/about", &["No contact details on this page"])];
        assert_eq!(answer("what is your email", &corpus), NO_EMAIL);
        assert_eq!(answer("phone?", &corpus), NO_PHONE);
    }

    #[test]
    fn email_answer() {
        assert_eq!(
            answer("your e-mail address", &kryzo()),
            "Email Address:\n• hello@kryzo.tech"
        );
    }

    #[test]
    fn services_answer() {
        assert_eq!(
            answer("What services do you offer?", &kryzo()),
            "Here are the services we provide:\n\n• Web Development\n• Mobile App Solutions"
        );
    }

    #[test]
    fn services_only_first_service_page() {
        let corpus = vec![
            page("https://x.test/service", &["We are proud of our team"]),
            page("https://x.test/services", &["• Web Development"]),
        ];
        assert_eq!(answer("services", &corpus), SERVICES_FALLBACK);
        assert_eq!(answer("services", &[]), SERVICES_FALLBACK);
    }

    #[test]
    fn about_answer() {
        assert_eq!(
            answer("Tell me about the company", &kryzo()),
            "Kryzo is a young software studio based in Dhaka building products"
        );
    }

    #[test]
    fn about_skips_long_paragraphs_then_falls_back() {
        let long = "x ".repeat(200);
        let corpus = vec![
            page("https://x.test/about", &[long.as_str(), "Short enough to be the answer here"]),
        ];
        assert_eq!(answer("about", &corpus), "Short enough to be the answer here");

        let only_long = vec![
            page("https://x.test/about", &[long.as_str()]),
            page("https://x.test/about-more", &["Would match but is never consulted"]),
        ];
        assert_eq!(answer("about", &only_long), ABOUT_FALLBACK);
        assert_eq!(answer("about", &[]), ABOUT_FALLBACK);
    }

    #[test]
    fn general_search() {
        let corpus = vec![page(
            "https://x.test/blogs",
            &[
                "Remote work is part of our culture",
                "We write about design systems remote work and culture every week",
            ],
        )];
        assert_eq!(
            answer("do you write on design systems", &corpus),
            "We write about design systems remote work and culture every week"
        );
        assert_eq!(answer("zebra crossing", &corpus), NOT_FOUND);
    }

    #[test]
    fn general_search_prefers_three_shared_tokens() {
        let corpus = vec![page(
            "https://x.test/blogs",
            &["rust is fun to learn", "we use rust tokio and serde daily"],
        )];
        assert_eq!(
            answer("rust tokio serde", &corpus),
            "we use rust tokio and serde daily"
        );
    }
}
