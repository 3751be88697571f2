//! Handlers behind each intent.
//!
//! [`Actions`] resolves an [`Intent`] to its handler. Collaborator failures
//! stop here: they turn into a spoken apology and never reach the session.

use crate::music::MusicCatalog;
use crate::router::{Intent, IntentHandler, KnownSite, Outcome};
use crate::services::{HeadlineProvider, Speaker, SiteLauncher};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

pub const NEWS_QUERY: &str = "tesla";
pub const MAX_HEADLINES: usize = 5;

pub const NAME_REPLY: &str = "I am Jarvis, your personal assistant.";
pub const HOW_ARE_YOU_REPLY: &str = "I am Jarvis, I am fine.";
pub const NEWS_INTRO: &str = "Here are the latest Tesla headlines:";
pub const NO_NEWS: &str = "I couldn't find any Tesla news at the moment.";
pub const UNKNOWN_SONG: &str = "Sorry, I don't know that song.";

static SEARCH_REQUEST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^search\s+(?P<query>.+?)(?:\s+on\s+(?P<engine>google|duckduckgo|bing))?\s*$")
        .unwrap()
});
static OPEN_REQUEST: Lazy<Regex> = Lazy::new(|| Regex::new(r"^open\s+(?P<site>.+?)\s*$").unwrap());

/// URLs the site handlers resolve against.
#[derive(Debug, Clone, Default)]
pub struct SiteTable {
    known: HashMap<KnownSite, String>,
    aliases: HashMap<String, String>,
}

impl SiteTable {
    pub fn new(known: HashMap<KnownSite, String>, aliases: HashMap<String, String>) -> Self {
        Self {
            known,
            aliases: aliases
                .into_iter()
                .map(|(alias, url)| (alias.trim().to_lowercase(), url))
                .collect(),
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        let known = KnownSite::ALL
            .iter()
            .map(|site| (*site, config.site_url(*site).to_string()))
            .collect();
        Self::new(known, config.site_aliases.clone())
    }

    pub fn url(&self, site: KnownSite) -> &str {
        self.known
            .get(&site)
            .map(String::as_str)
            .unwrap_or_else(|| site.default_url())
    }

    /// Resolves a spoken site name: alias first, then anything that looks
    /// like a domain.
    pub fn resolve(&self, spoken: &str) -> Option<String> {
        let spoken = spoken.trim().to_lowercase();
        if let Some(url) = self.aliases.get(&spoken) {
            return Some(url.clone());
        }
        if spoken.contains(char::is_whitespace) || !spoken.contains('.') {
            return None;
        }
        if spoken.starts_with("http://") || spoken.starts_with("https://") {
            Some(spoken)
        } else {
            Some(format!("https://{spoken}"))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEngine {
    Google,
    DuckDuckGo,
    Bing,
}

impl SearchEngine {
    fn parse(name: &str) -> Self {
        match name {
            "duckduckgo" => SearchEngine::DuckDuckGo,
            "bing" => SearchEngine::Bing,
            _ => SearchEngine::Google,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SearchEngine::Google => "google",
            SearchEngine::DuckDuckGo => "duckduckgo",
            SearchEngine::Bing => "bing",
        }
    }

    pub fn search_url(self, query: &str) -> String {
        let query = urlencoding::encode(query);
        match self {
            SearchEngine::Google => format!("https://www.google.com/search?q={query}"),
            SearchEngine::DuckDuckGo => format!("https://duckduckgo.com/?q={query}"),
            SearchEngine::Bing => format!("https://www.bing.com/search?q={query}"),
        }
    }
}

/// Splits "search <query> [on <engine>]" into its parts.
pub fn parse_search(utterance: &str) -> Option<(String, SearchEngine)> {
    let lower = utterance.trim().to_lowercase();
    let caps = SEARCH_REQUEST.captures(&lower)?;
    let query = caps.name("query")?.as_str().trim().to_string();
    let engine = caps
        .name("engine")
        .map(|m| SearchEngine::parse(m.as_str()))
        .unwrap_or(SearchEngine::Google);
    Some((query, engine))
}

pub struct Actions {
    speaker: Arc<dyn Speaker>,
    launcher: Arc<dyn SiteLauncher>,
    headlines: Arc<dyn HeadlineProvider>,
    catalog: MusicCatalog,
    sites: SiteTable,
}

impl Actions {
    pub fn new(
        speaker: Arc<dyn Speaker>,
        launcher: Arc<dyn SiteLauncher>,
        headlines: Arc<dyn HeadlineProvider>,
        catalog: MusicCatalog,
        sites: SiteTable,
    ) -> Self {
        Self {
            speaker,
            launcher,
            headlines,
            catalog,
            sites,
        }
    }

    pub fn open_site(&self, site: KnownSite) {
        self.launcher.open(self.sites.url(site));
        self.speaker.speak(site.announcement());
    }

    /// Reads out at most [`MAX_HEADLINES`] recent headlines.
    pub fn fetch_news(&self) {
        let articles = match self.headlines.headlines(NEWS_QUERY) {
            Ok(articles) => articles,
            Err(e) => {
                log::warn!("Headline provider failed: {}", e);
                self.speaker
                    .speak(&format!("Sorry, I couldn't reach the news service: {e}"));
                return;
            }
        };

        if articles.is_empty() {
            self.speaker.speak(NO_NEWS);
            return;
        }

        self.speaker.speak(NEWS_INTRO);
        for article in articles.iter().take(MAX_HEADLINES) {
            self.speaker.speak(&article.title);
        }
    }

    /// Plays the first song named in the utterance. Never opens more than one.
    pub fn play_music(&self, utterance: &str) {
        match self.catalog.find_in(utterance) {
            Some((song, url)) => {
                self.speaker.speak(&format!("Playing {song}"));
                self.launcher.open(url);
            }
            None => self.speaker.speak(UNKNOWN_SONG),
        }
    }

    /// Leaves the utterance unhandled when no query can be pulled out of it.
    pub fn web_search(&self, utterance: &str) -> Outcome {
        let Some((query, engine)) = parse_search(utterance) else {
            return Outcome::Unhandled;
        };
        self.speaker
            .speak(&format!("Searching {query} on {}", engine.name()));
        self.launcher.open(&engine.search_url(&query));
        Outcome::Handled
    }

    /// Leaves the utterance unhandled when the site cannot be resolved, so
    /// the fallback chain gets to answer it.
    pub fn open_any_site(&self, utterance: &str) -> Outcome {
        let lower = utterance.trim().to_lowercase();
        let resolved = OPEN_REQUEST
            .captures(&lower)
            .and_then(|caps| caps.name("site"))
            .map(|m| m.as_str().trim_end_matches(['?', '!', '.', ',']).trim())
            .filter(|spoken| !spoken.is_empty())
            .and_then(|spoken| self.sites.resolve(spoken).map(|url| (spoken, url)));

        match resolved {
            Some((spoken, url)) => {
                self.speaker.speak(&format!("Opening {spoken}"));
                self.launcher.open(&url);
                Outcome::Handled
            }
            None => {
                log::debug!("No site resolved for '{}'", lower);
                Outcome::Unhandled
            }
        }
    }
}

impl IntentHandler for Actions {
    fn handle(&self, intent: Intent, utterance: &str) -> Outcome {
        match intent {
            Intent::OpenSite(site) => self.open_site(site),
            Intent::WhatIsYourName => self.speaker.speak(NAME_REPLY),
            Intent::HowAreYou => self.speaker.speak(HOW_ARE_YOU_REPLY),
            Intent::TellMeTheNews => self.fetch_news(),
            Intent::PlayMusic => self.play_music(utterance),
            Intent::WebSearch => return self.web_search(utterance),
            Intent::OpenAnySite => return self.open_any_site(utterance),
        }
        Outcome::Handled
    }
}
