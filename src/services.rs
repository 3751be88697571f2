//! Contracts for the external collaborators the assistant talks to.
//!
//! Nothing in here does I/O. Concrete implementations live in their own
//! modules (`completion`, `news`, `launcher`, `speech`, `transcription`) and
//! tests substitute fakes.

use std::time::Duration;
use thiserror::Error;

/// Bounds for a single listen request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenWindow {
    /// How long to wait for speech to start.
    pub timeout: Duration,
    /// Longest phrase that will be captured once speech starts.
    pub phrase_limit: Duration,
}

impl ListenWindow {
    pub fn from_secs(timeout: u64, phrase_limit: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout),
            phrase_limit: Duration::from_secs(phrase_limit),
        }
    }

    /// Upper bound on the whole request.
    pub fn total(&self) -> Duration {
        self.timeout + self.phrase_limit
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranscriptionError {
    #[error("no speech detected")]
    NoSpeech,
    #[error("could not understand audio")]
    Unintelligible,
    #[error("listen window elapsed")]
    Timeout,
    /// The audio source is gone for good (end of input, device removed).
    #[error("transcription input closed")]
    InputClosed,
    #[error("transcription engine error: {0}")]
    Engine(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("service returned status {0}")]
    Status(u16),
    #[error("unexpected response: {0}")]
    Malformed(String),
    #[error("could not launch: {0}")]
    Launch(String),
}

impl From<ureq::Error> for ServiceError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => ServiceError::Status(code),
            ureq::Error::Timeout(_) => ServiceError::Timeout,
            other => ServiceError::Network(other.to_string()),
        }
    }
}

/// One news article as far as the assistant cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub title: String,
}

impl Headline {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Speech-to-text: turns one bounded clip of audio into text.
#[cfg_attr(test, mockall::automock)]
pub trait Transcriber: Send {
    fn listen(&mut self, window: ListenWindow) -> Result<String, TranscriptionError>;
}

/// Text-to-speech sink. Returns once the text has been spoken.
#[cfg_attr(test, mockall::automock)]
pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str);
}

/// Generative language model: prompt in, text out.
#[cfg_attr(test, mockall::automock)]
pub trait CompletionService: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<String, ServiceError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait HeadlineProvider: Send + Sync {
    /// Headlines matching `query`, most recent first.
    fn headlines(&self, query: &str) -> Result<Vec<Headline>, ServiceError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait SiteLauncher: Send + Sync {
    fn open(&self, url: &str);
}
