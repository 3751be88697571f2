//! Typed-input transcriber: each line read stands in for one spoken phrase.

use crate::services::{ListenWindow, Transcriber, TranscriptionError};
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;

pub struct LineTranscriber {
    lines: Receiver<String>,
}

impl LineTranscriber {
    /// Reads lines from `input` on a background thread.
    pub fn spawn<R>(input: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in input.lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self { lines: rx }
    }

    pub fn stdin() -> Self {
        Self::spawn(std::io::BufReader::new(std::io::stdin()))
    }
}

impl Transcriber for LineTranscriber {
    fn listen(&mut self, window: ListenWindow) -> Result<String, TranscriptionError> {
        match self.lines.recv_timeout(window.total()) {
            Ok(line) if line.trim().is_empty() => Err(TranscriptionError::NoSpeech),
            Ok(line) => Ok(line.trim().to_string()),
            Err(RecvTimeoutError::Timeout) => Err(TranscriptionError::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(TranscriptionError::InputClosed),
        }
    }
}
