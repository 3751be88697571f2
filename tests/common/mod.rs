#![allow(dead_code)]

use jarvis_voice::actions::{Actions, SiteTable};
use jarvis_voice::config::Config;
use jarvis_voice::fallback::Fallback;
use jarvis_voice::music::MusicCatalog;
use jarvis_voice::router::Router;
use jarvis_voice::services::{
    CompletionService, Headline, HeadlineProvider, ListenWindow, ServiceError, SiteLauncher,
    Speaker, Transcriber, TranscriptionError,
};
use jarvis_voice::session::{Session, SessionConfig};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[ctor::ctor]
unsafe fn init_logging() {
    jarvis_voice::logger::init_logger();
}

#[derive(Default)]
pub struct RecordingSpeaker {
    spoken: Mutex<Vec<String>>,
}

impl RecordingSpeaker {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl Speaker for RecordingSpeaker {
    fn speak(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }
}

#[derive(Default)]
pub struct RecordingLauncher {
    opened: Mutex<Vec<String>>,
}

impl RecordingLauncher {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl SiteLauncher for RecordingLauncher {
    fn open(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}

/// Replays canned transcripts, then reports the input as closed.
pub struct ScriptedTranscriber {
    script: VecDeque<Result<String, TranscriptionError>>,
    windows: Arc<Mutex<Vec<ListenWindow>>>,
}

impl ScriptedTranscriber {
    pub fn new(script: Vec<Result<&str, TranscriptionError>>) -> Self {
        Self {
            script: script
                .into_iter()
                .map(|step| step.map(str::to_string))
                .collect(),
            windows: Arc::default(),
        }
    }

    pub fn windows(&self) -> Arc<Mutex<Vec<ListenWindow>>> {
        self.windows.clone()
    }
}

impl Transcriber for ScriptedTranscriber {
    fn listen(&mut self, window: ListenWindow) -> Result<String, TranscriptionError> {
        self.windows.lock().unwrap().push(window);
        self.script
            .pop_front()
            .unwrap_or(Err(TranscriptionError::InputClosed))
    }
}

pub struct StubCompletion {
    reply: Result<String, ServiceError>,
    prompts: Mutex<Vec<String>>,
}

impl StubCompletion {
    pub fn replying(reply: Result<&str, ServiceError>) -> Self {
        Self {
            reply: reply.map(str::to_string),
            prompts: Mutex::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl CompletionService for StubCompletion {
    fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

pub struct StubHeadlines {
    reply: Result<Vec<Headline>, ServiceError>,
    queries: Mutex<Vec<String>>,
}

impl StubHeadlines {
    pub fn titled(count: usize) -> Self {
        Self::replying(Ok((1..=count)
            .map(|i| Headline::new(format!("Headline {i}")))
            .collect()))
    }

    pub fn replying(reply: Result<Vec<Headline>, ServiceError>) -> Self {
        Self {
            reply,
            queries: Mutex::default(),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl HeadlineProvider for StubHeadlines {
    fn headlines(&self, query: &str) -> Result<Vec<Headline>, ServiceError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.reply.clone()
    }
}

/// Everything a test wants to inspect after driving a session.
pub struct Harness {
    pub speaker: Arc<RecordingSpeaker>,
    pub launcher: Arc<RecordingLauncher>,
    pub completion: Arc<StubCompletion>,
    pub headlines: Arc<StubHeadlines>,
    pub windows: Arc<Mutex<Vec<ListenWindow>>>,
    pub session: Session,
}

pub struct HarnessBuilder {
    script: Vec<Result<&'static str, TranscriptionError>>,
    catalog: MusicCatalog,
    completion: StubCompletion,
    headlines: StubHeadlines,
}

impl HarnessBuilder {
    pub fn new(script: Vec<Result<&'static str, TranscriptionError>>) -> Self {
        Self {
            script,
            catalog: MusicCatalog::new([("despacito", "https://youtu.be/kJQP7kiw5Fk")]),
            completion: StubCompletion::replying(Ok("model answer")),
            headlines: StubHeadlines::titled(3),
        }
    }

    pub fn catalog(mut self, catalog: MusicCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn completion(mut self, completion: StubCompletion) -> Self {
        self.completion = completion;
        self
    }

    pub fn headlines(mut self, headlines: StubHeadlines) -> Self {
        self.headlines = headlines;
        self
    }

    pub fn build(self) -> Harness {
        let config = Config::default();
        let speaker = Arc::new(RecordingSpeaker::default());
        let launcher = Arc::new(RecordingLauncher::default());
        let completion = Arc::new(self.completion);
        let headlines = Arc::new(self.headlines);
        let transcriber = ScriptedTranscriber::new(self.script);
        let windows = transcriber.windows();

        let actions = Actions::new(
            speaker.clone(),
            launcher.clone(),
            headlines.clone(),
            self.catalog,
            SiteTable::from_config(&config),
        );
        let fallback = Fallback::new(speaker.clone(), completion.clone());
        let session = Session::new(
            SessionConfig::from(&config),
            Box::new(transcriber),
            speaker.clone(),
            Router::standard().unwrap(),
            actions,
            fallback,
        );

        Harness {
            speaker,
            launcher,
            completion,
            headlines,
            windows,
            session,
        }
    }
}

/// Wakes the assistant and hands it a single command.
pub fn command(utterance: &'static str) -> HarnessBuilder {
    HarnessBuilder::new(vec![Ok("jarvis"), Ok(utterance)])
}
