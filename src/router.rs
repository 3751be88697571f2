//! Ordered intent table.
//!
//! Each [`IntentRule`] pairs a compiled [`Matcher`] with the [`Intent`] it
//! stands for. Rules are checked in order against the lower-cased utterance
//! and the first match wins, so overlapping patterns such as "open youtube"
//! and the generic "open <site>" rely on table order.

use regex::Regex;

/// Sites with a dedicated intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownSite {
    Google,
    Youtube,
    Linkedin,
    Github,
    Gmail,
    Myntra,
}

impl KnownSite {
    pub const ALL: [KnownSite; 6] = [
        KnownSite::Google,
        KnownSite::Youtube,
        KnownSite::Linkedin,
        KnownSite::Github,
        KnownSite::Gmail,
        KnownSite::Myntra,
    ];

    /// Key used for this site in the configuration URL table.
    pub fn key(self) -> &'static str {
        match self {
            KnownSite::Google => "google",
            KnownSite::Youtube => "youtube",
            KnownSite::Linkedin => "linkedin",
            KnownSite::Github => "github",
            KnownSite::Gmail => "gmail",
            KnownSite::Myntra => "myntra",
        }
    }

    pub fn default_url(self) -> &'static str {
        match self {
            KnownSite::Google => "https://www.google.com",
            KnownSite::Youtube => "https://www.youtube.com",
            KnownSite::Linkedin => "https://www.linkedin.com/in/gokulkumarsant/",
            KnownSite::Github => "https://github.com/gokuls-bit/",
            KnownSite::Gmail => "https://mail.google.com/",
            KnownSite::Myntra => "https://www.myntra.com",
        }
    }

    pub fn announcement(self) -> &'static str {
        match self {
            KnownSite::Google => "Opening Google",
            KnownSite::Youtube => "Opening YouTube",
            KnownSite::Linkedin => "Opening your LinkedIn profile",
            KnownSite::Github => "Opening your GitHub",
            KnownSite::Gmail => "Opening Gmail",
            KnownSite::Myntra => "Opening Myntra",
        }
    }
}

/// What a matched rule asks the assistant to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    OpenSite(KnownSite),
    WhatIsYourName,
    HowAreYou,
    TellMeTheNews,
    PlayMusic,
    WebSearch,
    OpenAnySite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Handled,
    Unhandled,
}

/// Predicate over a lower-cased utterance.
///
/// Substring rules are stored as escaped literal patterns so every rule is
/// evaluated the same way.
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: Regex,
}

impl Matcher {
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn contains(literal: &str) -> Result<Self, regex::Error> {
        Self::pattern(&regex::escape(&literal.to_lowercase()))
    }

    pub fn is_match(&self, normalized: &str) -> bool {
        self.pattern.is_match(normalized)
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

#[derive(Debug, Clone)]
pub struct IntentRule {
    pub matcher: Matcher,
    pub intent: Intent,
}

impl IntentRule {
    pub fn new(matcher: Matcher, intent: Intent) -> Self {
        Self { matcher, intent }
    }
}

/// Receives the intent picked by the router together with the raw utterance.
///
/// A handler may decline with [`Outcome::Unhandled`] when the utterance only
/// looked like its intent; the router reports that as-is.
pub trait IntentHandler {
    fn handle(&self, intent: Intent, utterance: &str) -> Outcome;
}

/// Canonical rules, highest priority first.
const STANDARD_PATTERNS: &[(&str, Intent)] = &[
    (r"\bopen (google)\b", Intent::OpenSite(KnownSite::Google)),
    (r"\bopen (youtube)\b", Intent::OpenSite(KnownSite::Youtube)),
    (r"\bopen (linkedin)\b", Intent::OpenSite(KnownSite::Linkedin)),
    (r"\bopen (github)\b", Intent::OpenSite(KnownSite::Github)),
    (r"\bopen (email|gmail)\b", Intent::OpenSite(KnownSite::Gmail)),
    (r"\bopen (myntra)\b", Intent::OpenSite(KnownSite::Myntra)),
    (r"\bwhat is your name\b", Intent::WhatIsYourName),
    (r"\bhow are you\b", Intent::HowAreYou),
    (r"\btell me the news\b", Intent::TellMeTheNews),
    (r"\bplay .* music\b", Intent::PlayMusic),
    (r"^search\s+\S", Intent::WebSearch),
    (r"^open\s+\S", Intent::OpenAnySite),
];

/// Fixed, read-only rule table.
#[derive(Debug, Clone)]
pub struct Router {
    rules: Vec<IntentRule>,
}

impl Router {
    pub fn new(rules: Vec<IntentRule>) -> Self {
        Self { rules }
    }

    /// The assistant's built-in command set.
    pub fn standard() -> Result<Self, regex::Error> {
        let rules = STANDARD_PATTERNS
            .iter()
            .map(|(pattern, intent)| -> Result<IntentRule, regex::Error> {
                Ok(IntentRule::new(Matcher::pattern(pattern)?, *intent))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// First intent whose matcher accepts the utterance.
    pub fn resolve(&self, utterance: &str) -> Option<Intent> {
        let normalized = utterance.trim().to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matcher.is_match(&normalized))
            .map(|rule| {
                log::debug!("'{}' matched /{}/", normalized, rule.matcher.as_str());
                rule.intent
            })
    }

    /// Runs the handler of the first matching rule with the original
    /// utterance. The router itself performs no I/O.
    pub fn dispatch(&self, utterance: &str, handler: &dyn IntentHandler) -> Outcome {
        match self.resolve(utterance) {
            Some(intent) => {
                log::info!("Dispatching {:?}", intent);
                handler.handle(intent, utterance)
            }
            None => Outcome::Unhandled,
        }
    }
}
