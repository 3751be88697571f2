use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

static WORD_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w']+").unwrap());

/// Song name to playback URL. Keys are stored lower-cased.
#[derive(Debug, Clone, Default)]
pub struct MusicCatalog {
    songs: HashMap<String, String>,
}

impl MusicCatalog {
    pub fn new<K, V>(songs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            songs: songs
                .into_iter()
                .map(|(name, url)| (name.as_ref().trim().to_lowercase(), url.into()))
                .collect(),
        }
    }

    /// Loads a JSON object of `"song": "url"` pairs.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let data = fs::read_to_string(path)?;
        let songs: HashMap<String, String> = serde_json::from_str(&data)?;
        Ok(Self::new(songs))
    }

    pub fn url(&self, song: &str) -> Option<&str> {
        self.songs.get(&song.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// First word of `utterance`, left to right, that names a known song.
    pub fn find_in(&self, utterance: &str) -> Option<(String, &str)> {
        let lower = utterance.to_lowercase();
        WORD_TOKEN
            .find_iter(&lower)
            .map(|token| token.as_str())
            .find_map(|token| self.songs.get(token).map(|url| (token.to_string(), url.as_str())))
    }
}
