#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreetingKind {
    Hi,
    HowAreYou,
    Acknowledge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting(GreetingKind),
    PhoneRequest,
    EmailRequest,
    AboutRequest,
    ServiceRequest,
    GeneralSearch,
}

/// How a rule inspects the normalized question.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// The whole question equals one of the words.
    Exact(&'static [&'static str]),
    /// Any keyword occurs as a substring.
    Contains(&'static [&'static str]),
}

impl Rule {
    pub fn matches(&self, question: &str) -> bool {
        match self {
            Rule::Exact(words) => words.contains(&question),
            Rule::Contains(keys) => keys.iter().any(|k| question.contains(k)),
        }
    }
}

/// Evaluated top to bottom; the first matching rule decides.
pub const RULES: &[(Rule, Intent)] = &[
    (
        Rule::Exact(&["hi", "hello", "hey"]),
        Intent::Greeting(GreetingKind::Hi),
    ),
    (
        Rule::Exact(&["how are you"]),
        Intent::Greeting(GreetingKind::HowAreYou),
    ),
    (
        Rule::Exact(&["good", "fine", "great", "cool"]),
        Intent::Greeting(GreetingKind::Acknowledge),
    ),
    (
        Rule::Contains(&["phone", "number", "contact number"]),
        Intent::PhoneRequest,
    ),
    (Rule::Contains(&["email", "mail"]), Intent::EmailRequest),
    (
        Rule::Contains(&["about", "company", "kryzo", "about us", "details"]),
        Intent::AboutRequest,
    ),
    (
        Rule::Contains(&["service", "services", "provide", "offer", "ki service", "solutions"]),
        Intent::ServiceRequest,
    ),
];

/// Classify an already normalized question.
pub fn classify(question: &str) -> Intent {
    RULES
        .iter()
        .find(|(rule, _)| rule.matches(question))
        .map(|(_, intent)| *intent)
        .unwrap_or(Intent::GeneralSearch)
}
