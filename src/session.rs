//! Wake word / command state machine.
//!
//! ```text
//! WaitingForWake --(transcript == wake word)--> AwaitingCommand
//! AwaitingCommand --(any outcome)--> WaitingForWake
//! ```
//!
//! One listen or dispatch is in flight at a time; a command is fully handled
//! before the next wake-word listen starts.

use crate::actions::Actions;
use crate::fallback::Fallback;
use crate::router::{Outcome, Router};
use crate::services::{ListenWindow, Speaker, Transcriber, TranscriptionError};
use crate::wakeword::is_wake_word;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub const GREETING: &str = "Initializing Jarvis, please wait…";
pub const COMMAND_PROMPT: &str = "Yes, how can I assist you?";
pub const FAREWELL: &str = "Shutting down. Goodbye!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    WaitingForWake,
    AwaitingCommand,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub wake_word: String,
    pub wake_window: ListenWindow,
    pub command_window: ListenWindow,
}

impl From<&crate::config::Config> for SessionConfig {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            wake_word: config.wake_word.clone(),
            wake_window: config.wake_listen.window(),
            command_window: config.command_listen.window(),
        }
    }
}

pub struct Session {
    config: SessionConfig,
    transcriber: Box<dyn Transcriber>,
    speaker: Arc<dyn Speaker>,
    router: Router,
    actions: Actions,
    fallback: Fallback,
    state: SessionState,
    input_closed: bool,
}

impl Session {
    pub fn new(
        config: SessionConfig,
        transcriber: Box<dyn Transcriber>,
        speaker: Arc<dyn Speaker>,
        router: Router,
        actions: Actions,
        fallback: Fallback,
    ) -> Self {
        Self {
            config,
            transcriber,
            speaker,
            router,
            actions,
            fallback,
            state: SessionState::WaitingForWake,
            input_closed: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Set once the transcriber reports its input is gone for good.
    pub fn input_closed(&self) -> bool {
        self.input_closed
    }

    /// Performs one listen (and, for a command, one dispatch) and returns the
    /// new state.
    pub fn step(&mut self) -> SessionState {
        self.state = match self.state {
            SessionState::WaitingForWake => self.wait_for_wake(),
            SessionState::AwaitingCommand => self.take_command(),
        };
        self.state
    }

    /// Runs until `shutdown` is raised or the input closes, then says goodbye.
    pub fn run(&mut self, shutdown: &AtomicBool) {
        self.speaker.speak(GREETING);
        while !shutdown.load(Ordering::SeqCst) && !self.input_closed {
            self.step();
        }
        self.speaker.speak(FAREWELL);
    }

    fn listen(&mut self, window: ListenWindow) -> Option<String> {
        log::debug!("Listening…");
        match self.transcriber.listen(window) {
            Ok(transcript) => {
                log::info!("Heard: {}", transcript);
                Some(transcript)
            }
            Err(TranscriptionError::InputClosed) => {
                log::warn!("Transcription input closed");
                self.input_closed = true;
                None
            }
            Err(e) => {
                log::debug!("Speech recognition error: {}", e);
                None
            }
        }
    }

    fn wait_for_wake(&mut self) -> SessionState {
        let window = self.config.wake_window;
        match self.listen(window) {
            Some(heard) if is_wake_word(&heard, &self.config.wake_word) => {
                log::info!("Wake word detected");
                SessionState::AwaitingCommand
            }
            _ => SessionState::WaitingForWake,
        }
    }

    fn take_command(&mut self) -> SessionState {
        self.speaker.speak(COMMAND_PROMPT);
        let window = self.config.command_window;
        let Some(command) = self.listen(window) else {
            return SessionState::WaitingForWake;
        };
        if command.trim().is_empty() {
            return SessionState::WaitingForWake;
        }

        if self.router.dispatch(&command, &self.actions) == Outcome::Unhandled {
            self.fallback.handle(&command);
        }
        SessionState::WaitingForWake
    }
}
